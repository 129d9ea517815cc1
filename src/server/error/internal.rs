use thiserror::Error;

/// Internal issues indicating unexpected stored data or possible bugs.
///
/// Always results in a 500 with a generic message returned to the client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enum column holds a value the application does not know.
    #[error("Failed to parse {column} value '{value}'")]
    InvalidStoredValue {
        /// Column that held the value
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// Password hashing or hash parsing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// A task on the blocking thread pool panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    BlockingTask(String),
}
