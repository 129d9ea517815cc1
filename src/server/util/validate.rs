//! Field-level validation for request parameters.
//!
//! Parameter structs build a `Validator`, run their checks, then call `finish()` which
//! returns every failed field at once as `AppError::Validation`.

use crate::server::error::AppError;

pub const IDENTITY_NUMBER_LENGTH: usize = 16;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
        self
    }

    /// Value must contain something other than whitespace.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, "is required");
        }
        self
    }

    /// Character count must be within `min..=max`; the required check covers blanks.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len < min {
            self.add(field, format!("must be at least {} characters", min));
        } else if len > max {
            self.add(field, format!("must be at most {} characters", max));
        }
        self
    }

    /// Optional text is only checked against `max` when present.
    pub fn max_length_opt(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.add(field, format!("must be at most {} characters", max));
            }
        }
        self
    }

    /// Value must be exactly `len` ASCII digits (NIK, KK number).
    pub fn digits(&mut self, field: &str, value: &str, len: usize) -> &mut Self {
        if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
            self.add(field, format!("must be exactly {} digits", len));
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: i64) -> &mut Self {
        if value <= 0 {
            self.add(field, "must be greater than zero");
        }
        self
    }

    /// Username: 3 to 50 characters of letters, digits, `.`, `_` or `-`.
    pub fn username(&mut self, field: &str, value: &str) -> &mut Self {
        let valid_chars = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid_chars {
            self.add(field, "may only contain letters, digits, '.', '_' and '-'");
        }
        self.length(field, value, 3, 50)
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            self.add(
                field,
                format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        }
        self
    }

    /// Phone numbers: optional leading `+`, then 8 to 15 digits.
    pub fn phone_opt(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            let digits = value.strip_prefix('+').unwrap_or(value);
            if !(8..=15).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
                self.add(field, "must be a valid phone number");
            }
        }
        self
    }

    pub fn check(&mut self, condition: bool, field: &str, message: &str) -> &mut Self {
        if !condition {
            self.add(field, message);
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}
