use std::path::PathBuf;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,

    /// Frontend origin allowed to send credentialed requests. `None` disables CORS.
    pub cors_origin: Option<String>,
    /// Marks the session cookie `Secure`; enable behind HTTPS.
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|bytes| *bytes > 0)
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    name: "MAX_UPLOAD_BYTES".to_string(),
                    reason: format!("'{}' is not a positive number of bytes", value),
                })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let secure_cookies = match lookup("SECURE_COOKIES").as_deref() {
            None => false,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar {
                    name: "SECURE_COOKIES".to_string(),
                    reason: format!("'{}' is not a boolean", other),
                }
                .into())
            }
        };

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upload_dir: PathBuf::from(
                lookup("UPLOAD_DIR").unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            max_upload_bytes,
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| !origin.is_empty()),
            secure_cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    /// Expected: defaults applied when only DATABASE_URL is set
    #[test]
    fn applies_defaults() {
        let config = config_from(&[("DATABASE_URL", "sqlite://portal.db?mode=rwc")]).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.cors_origin.is_none());
        assert!(!config.secure_cookies);
    }

    /// Expected: Err(ConfigError::MissingEnvVar("DATABASE_URL"))
    #[test]
    fn requires_database_url() {
        match config_from(&[]) {
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) => {
                assert_eq!(name, "DATABASE_URL")
            }
            other => panic!("Expected MissingEnvVar, got: {:?}", other.err()),
        }
    }

    /// Expected: Err(ConfigError::InvalidEnvVar) for a non-numeric upload limit
    #[test]
    fn rejects_invalid_upload_limit() {
        let result = config_from(&[("DATABASE_URL", "sqlite::memory:"), ("MAX_UPLOAD_BYTES", "5MB")]);

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("CORS_ORIGIN", "http://localhost:5173"),
            ("SECURE_COOKIES", "true"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:5173"));
        assert!(config.secure_cookies);
    }
}
