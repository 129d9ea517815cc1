use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Rt, Resident};
///
/// let test = TestBuilder::new()
///     .with_table(Rt)
///     .with_table(Resident)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// syntax. Foreign keys are enforced by SQLite, so tables must be added after the
    /// tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the territory and population tables.
    ///
    /// Adds, in dependency order:
    /// - Rt
    /// - Family
    /// - Resident
    /// - User
    ///
    /// Enough for user, RT, resident and family tests and for the auth guard.
    pub fn with_residency_tables(self) -> Self {
        self.with_table(Rt)
            .with_table(Family)
            .with_table(Resident)
            .with_table(User)
    }

    /// Adds every table of the portal schema.
    ///
    /// Use this for service tests that touch several domains at once (workflows that
    /// emit notifications, summaries that count documents and complaints, etc.).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_portal_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_portal_tables(self) -> Self {
        self.with_residency_tables()
            .with_table(Document)
            .with_table(Complaint)
            .with_table(Event)
            .with_table(EventParticipant)
            .with_table(SocialAssistance)
            .with_table(SocialAssistanceRecipient)
            .with_table(ForumPost)
            .with_table(ForumComment)
            .with_table(ForumLike)
            .with_table(Notification)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
