//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM over SQLite for persistence and
//! `tower-sessions` for cookie sessions.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, authentication and DTO conversion
//! - **Service Layer** (`service/`) - Business rules, territory checks, workflows and notifications
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models, access scopes and operation parameters
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrapper and the `AuthGuard`
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, setup code, upload storage)
//! - **Startup** (`startup`) - Database, session store and first-admin setup
//! - **Router** (`router`) - Route table and OpenAPI documentation
//! - **Scheduler** (`scheduler/`) - Cron job for event reminders
//!
//! # Request Flow
//!
//! 1. **Router** receives the request and dispatches to a controller
//! 2. **Controller** authenticates with `AuthGuard`, converts the DTO to params
//! 3. **Service** checks the user's scope against the resource and applies the rules
//! 4. **Data** queries the database and converts entities to domain models
//! 5. **Controller** converts the result to a DTO inside the response envelope

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
