use thiserror::Error;

/// Unified error type for qualifier operations
#[derive(Error, Debug)]
pub enum QualifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid qualifier template: {0}")]
    Template(String),

    #[error("Version control query failed: {0}")]
    Vcs(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in update-qualifier
pub type Result<T> = std::result::Result<T, QualifierError>;

impl QualifierError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        QualifierError::Config(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        QualifierError::Template(msg.into())
    }

    /// Create a version control error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        QualifierError::Vcs(msg.into())
    }
}

impl From<tempfile::PersistError> for QualifierError {
    fn from(err: tempfile::PersistError) -> Self {
        QualifierError::Io(err.error)
    }
}
