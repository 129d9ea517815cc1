//! HTTP request handlers.
//!
//! Each handler authenticates through `AuthGuard`, converts the request DTO into
//! server params, calls one service operation and wraps the result in the
//! `ApiResponse` envelope. Resource-level access (territory, ownership) is decided by
//! the services.

pub mod assistance;
pub mod auth;
pub mod complaint;
pub mod document;
pub mod event;
pub mod family;
pub mod forum;
pub mod notification;
pub mod resident;
pub mod rt;
pub mod user;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::model::page::PageRequest;

/// `?page=&per_page=` query shared by listings without extra filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Zero-based page number (default 0).
    pub page: Option<u64>,
    /// Items per page (default 10, max 100).
    pub per_page: Option<u64>,
}

impl PaginationQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
