//! One-time setup codes for creating the first admin account.
//!
//! When the server starts without an active admin it generates a code, prints it to the
//! log and waits for `POST /api/auth/setup`. Codes live in memory for 60 seconds and are
//! consumed on first successful use.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Time-to-live for setup codes in seconds.
const SETUP_CODE_TTL_SECONDS: u64 = 60;

const SETUP_CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct SetupCode {
    code: String,
    expires_at: Instant,
}

impl SetupCode {
    fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Outcome of validating a submitted setup code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupCodeCheck {
    /// Code matched and has been consumed.
    Accepted,
    /// Code was wrong or no code is pending.
    Rejected,
    /// A code was pending but its TTL had passed; it has been discarded.
    Expired,
}

/// Holds the pending setup code, if any.
///
/// Cloning shares the same code between the startup check and request handlers.
#[derive(Clone)]
pub struct SetupCodeService {
    code: Arc<RwLock<Option<SetupCode>>>,
    ttl: Duration,
}

impl SetupCodeService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(SETUP_CODE_TTL_SECONDS))
    }

    /// Creates the service with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Generates a new random code, replacing any pending one.
    ///
    /// # Returns
    /// - `String` - The 32-character alphanumeric code
    pub async fn generate(&self) -> String {
        let code_string = Self::generate_random_code();
        *self.code.write().await = Some(SetupCode::new(code_string.clone(), self.ttl));
        code_string
    }

    /// Validates the submitted code, consuming it on success.
    ///
    /// A wrong code leaves the pending code in place; an expired code is discarded.
    pub async fn validate_and_consume(&self, input_code: &str) -> SetupCodeCheck {
        let mut code = self.code.write().await;

        let Some(stored_code) = code.as_ref() else {
            return SetupCodeCheck::Rejected;
        };

        if stored_code.is_expired() {
            *code = None;
            return SetupCodeCheck::Expired;
        }

        if stored_code.code == input_code {
            *code = None;
            return SetupCodeCheck::Accepted;
        }

        SetupCodeCheck::Rejected
    }

    /// Whether a non-expired code is pending.
    pub async fn has_valid_code(&self) -> bool {
        let code = self.code.read().await;
        code.as_ref().is_some_and(|c| !c.is_expired())
    }

    fn generate_random_code() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789";

        let mut rng = rand::rng();

        (0..SETUP_CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

impl Default for SetupCodeService {
    fn default() -> Self {
        Self::new()
    }
}
