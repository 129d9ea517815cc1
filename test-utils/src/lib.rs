//! RT/RW Portal Test Utils
//!
//! Shared testing utilities for the portal backend. The crate offers a builder for
//! creating test contexts with in-memory SQLite databases, a lazily created session
//! backed by the same database, and factories for inserting entities with sensible
//! defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders for inserting test rows with their parent rows
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn finds_resident() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_portal_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let resident = factory::resident::create_resident(db, 1).await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
