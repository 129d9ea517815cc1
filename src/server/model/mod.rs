//! Domain models and operation parameters.
//!
//! Repositories convert entities into these types at the database boundary (parsing the
//! stored enum strings) and controllers convert them into DTOs. Parameter structs carry
//! request input into services and validate it there.

pub mod assistance;
pub mod complaint;
pub mod document;
pub mod event;
pub mod family;
pub mod forum;
pub mod notification;
pub mod page;
pub mod resident;
pub mod rt;
pub mod scope;
pub mod user;
