//! Database repository layer for all domain entities.
//!
//! Repositories wrap a `DatabaseConnection` and perform the queries, inserts and
//! updates for one domain. They use SeaORM entity models internally and return domain
//! models from `server::model`, so services never touch entities directly. Territory
//! filtering shared by the listings lives in `territory`.

pub mod assistance;
pub mod complaint;
pub mod document;
pub mod event;
pub mod family;
pub mod forum;
pub mod notification;
pub mod resident;
pub mod rt;
pub mod territory;
pub mod user;

#[cfg(test)]
mod test;
