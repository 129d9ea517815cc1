//! Service layer for business rules and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce territory
//! and workflow rules, coordinate several repositories for one operation, and send the
//! notifications that accompany successful changes. They take domain params and return
//! domain models; DTO conversion stays in the controllers.

pub mod assistance;
pub mod auth;
pub mod complaint;
pub mod document;
pub mod event;
pub mod family;
pub mod forum;
pub mod notification;
pub mod password;
pub mod resident;
pub mod rt;
pub mod setup_code;
pub mod upload;
pub mod user;

#[cfg(test)]
mod test;
