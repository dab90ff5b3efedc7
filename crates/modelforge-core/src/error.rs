use thiserror::Error;

/// Core error type shared across modelforge crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The table is missing, or the data source reported no columns for it.
    #[error("table not found or has no column metadata: {table}")]
    SchemaNotFound { table: String },
    /// Database error or adapter failure.
    #[error("database error: {0}")]
    Db(String),
    /// A schema document could not be read or violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// An option value could not be interpreted.
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

impl Error {
    /// Returns true when the error only signals that no schema is available.
    pub fn is_schema_not_found(&self) -> bool {
        matches!(self, Error::SchemaNotFound { .. })
    }
}

/// Convenience alias for results returned by modelforge crates.
pub type Result<T> = std::result::Result<T, Error>;
