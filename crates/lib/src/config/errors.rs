//! Error types for seed configuration.

use thiserror::Error;

/// Errors raised while validating a [`SeedConfig`](super::SeedConfig).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The seed lists no threads
    #[error("Seed must contain at least one thread")]
    NoThreads,

    /// Two seeded threads share an id
    #[error("Duplicate thread id in seed: {id}")]
    DuplicateThreadId { id: String },

    /// The configured active thread is not one of the seeded threads
    #[error("Active thread '{id}' is not among the seeded threads")]
    UnknownActiveThread { id: String },

    /// A seeded thread has an empty id
    #[error("Thread at position {index} has an empty id")]
    EmptyThreadId { index: usize },
}

impl ConfigError {
    /// Check if this error indicates a referenced thread was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::UnknownActiveThread { .. })
    }

    /// Check if this error is a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ConfigError::DuplicateThreadId { .. })
    }

    /// Get the thread id associated with this error, if any
    pub fn thread_id(&self) -> Option<&str> {
        match self {
            ConfigError::DuplicateThreadId { id } | ConfigError::UnknownActiveThread { id } => {
                Some(id)
            }
            ConfigError::NoThreads | ConfigError::EmptyThreadId { .. } => None,
        }
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
