//! Attachment storage on the local filesystem.
//!
//! Files are written to `<root>/<category>/<random>.<ext>` and served read-only under
//! `/uploads`. Only images and PDFs are accepted.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::server::{error::AppError, util::multipart::UploadedFile};

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// URL prefix the upload directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const STORED_NAME_LENGTH: usize = 24;

/// Attachment folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    Documents,
    Complaints,
}

impl UploadCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Complaints => "complaints",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Checks size and extension, returning the normalized lower-case extension.
    ///
    /// # Returns
    /// - `Ok(String)` - Accepted extension
    /// - `Err(AppError::BadRequest)` - Empty, too large, or a disallowed type
    pub fn check(&self, file: &UploadedFile) -> Result<String, AppError> {
        if file.bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        if file.bytes.len() > self.max_bytes {
            return Err(AppError::BadRequest(format!(
                "Uploaded file exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Only {} files are allowed",
                    ALLOWED_EXTENSIONS.join(", ")
                ))
            })?;

        Ok(extension)
    }

    /// Validates and writes a file under the category folder.
    ///
    /// # Returns
    /// - `Ok(String)` - Relative path such as `documents/Ab12....pdf`, stored on the row
    /// - `Err(AppError::BadRequest)` - File rejected by `check`
    /// - `Err(AppError::IoErr)` - Writing to disk failed
    pub async fn save(
        &self,
        category: UploadCategory,
        file: &UploadedFile,
    ) -> Result<String, AppError> {
        let extension = self.check(file)?;

        let dir = self.root.join(category.dir_name());
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", random_name(), extension);
        tokio::fs::write(dir.join(&file_name), &file.bytes).await?;

        tracing::debug!(
            "Stored upload '{}' as {}/{}",
            file.file_name,
            category.dir_name(),
            file_name
        );

        Ok(format!("{}/{}", category.dir_name(), file_name))
    }

    /// Removes a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, relative_path: &str) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.root.join(relative_path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Public URL for a stored relative path.
pub fn public_url(relative_path: &str) -> String {
    format!("{}/{}", UPLOADS_URL_PREFIX, relative_path)
}

fn random_name() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..STORED_NAME_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, len: usize) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: vec![1u8; len],
        }
    }

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("rtrw-uploads-{}", random_name()))
    }

    #[test]
    fn accepts_allowed_extensions_case_insensitively() {
        let storage = UploadStorage::new(temp_root(), 1024);

        assert_eq!(storage.check(&file("ktp.JPG", 10)).unwrap(), "jpg");
        assert_eq!(storage.check(&file("surat.pdf", 10)).unwrap(), "pdf");
    }

    #[test]
    fn rejects_disallowed_extension() {
        let storage = UploadStorage::new(temp_root(), 1024);

        assert!(matches!(
            storage.check(&file("script.exe", 10)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            storage.check(&file("no_extension", 10)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_oversized_and_empty_files() {
        let storage = UploadStorage::new(temp_root(), 100);

        assert!(matches!(
            storage.check(&file("foto.png", 101)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            storage.check(&file("foto.png", 0)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn saves_under_category_folder() {
        let root = temp_root();
        let storage = UploadStorage::new(&root, 1024);

        let path = storage
            .save(UploadCategory::Complaints, &file("Foto.PNG", 16))
            .await
            .unwrap();

        assert!(path.starts_with("complaints/"));
        assert!(path.ends_with(".png"));
        assert_eq!(tokio::fs::read(root.join(&path)).await.unwrap().len(), 16);
        assert_eq!(public_url(&path), format!("/uploads/{}", path));

        storage.remove(&path).await.unwrap();
        storage.remove(&path).await.unwrap();
        let _ = tokio::fs::remove_dir_all(root).await;
    }
}
