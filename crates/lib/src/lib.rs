//!
//! Threadline: threaded chat state held in a single predictable store.
//!
//! ## Core Concepts
//!
//! * **Actions (`action::Action`)**: The closed set of requested state transitions
//!   (open a thread, add a message, delete a message).
//! * **State (`state::AppState`)**: An immutable snapshot holding the active thread id and
//!   the ordered threads. Threads and message sequences are shared through `Arc`, so every
//!   transition yields a new root while untouched threads stay pointer-equal.
//! * **Reducers (`reducer`)**: Pure functions mapping a slice of state and an action to a new
//!   slice. The root reducer composes the session and thread reducers.
//! * **Store (`store::Store`)**: The owner of the current snapshot. Exposes `dispatch`,
//!   `state` and `subscribe`, and notifies observers synchronously after every dispatch.
//! * **Wire format (`wire`)**: The JSON shapes of actions and state used at the boundary.
//! * **Selectors (`selectors`)**: Read-only projections for a view layer (tabs, active thread).
//! * **Seed configuration (`config::SeedConfig`)**: The validated description of the initial state.

pub mod action;
pub mod clock;
pub mod config;
pub mod ids;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;
pub mod wire;

pub use action::Action;
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, SeedConfig};
#[cfg(any(test, feature = "testing"))]
pub use ids::SequentialIds;
pub use ids::{IdGenerator, UuidIds};
pub use state::{AppState, Message, MessageId, Thread, ThreadId};
pub use store::{Store, Subscription};
pub use wire::{WireAction, WireError};

/// Result type used throughout the Threadline library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Threadline library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured seed configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),

    /// Structured wire format errors from the wire module
    #[error(transparent)]
    Wire(wire::WireError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Wire(_) => "wire",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Config(config_err) => config_err.is_not_found(),
            Error::Io(io_err) => io_err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error comes from seed configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this error comes from decoding the wire format.
    pub fn is_wire_error(&self) -> bool {
        matches!(self, Error::Wire(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
