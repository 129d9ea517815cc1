//! Reading `multipart/form-data` request bodies.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::server::error::AppError;

/// File part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Text fields plus at most one file field of a multipart form.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl MultipartForm {
    /// Drains the multipart stream.
    ///
    /// The part named `file_field` is read as bytes; every other part is read as text.
    /// An empty file part (browsers send one when no file was picked) is ignored.
    ///
    /// # Returns
    /// - `Ok(MultipartForm)` - Collected fields
    /// - `Err(AppError::BadRequest)` - Malformed body or body exceeding the size limit
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read form field: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == file_field {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

                if !bytes.is_empty() {
                    form.file = Some(UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read field '{}': {}", name, e))
                })?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Text of a field, `None` when missing or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Text of a required field.
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("Field '{}' is required", name)))
    }
}
