//! SeaORM entities for the portal database.
//!
//! Enumerated columns (roles, workflow statuses, categories) are stored as upper-case
//! strings; parsing into typed enums happens at the repository boundary in the server.

pub mod prelude;

pub mod complaint;
pub mod document;
pub mod event;
pub mod event_participant;
pub mod family;
pub mod forum_comment;
pub mod forum_like;
pub mod forum_post;
pub mod notification;
pub mod resident;
pub mod rt;
pub mod social_assistance;
pub mod social_assistance_recipient;
pub mod user;
