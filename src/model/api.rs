use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Envelope wrapping every successful response body.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope without a payload (`data: null`).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Envelope returned for every failed request.
///
/// `data` carries field-level validation errors when the request body failed
/// validation and is `null` otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ErrorDto {
    pub status: String,
    pub message: String,
    pub data: Option<Vec<FieldErrorDto>>,
}

impl ErrorDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

/// One page of a listing.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
