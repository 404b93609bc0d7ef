//! Seed configuration for the initial state.
//!
//! A [`SeedConfig`] names the threads a store starts with and, optionally,
//! which one is active. It can be loaded from a JSON file:
//!
//! ```json
//! {
//!   "activeThreadId": "2-be91",
//!   "threads": [
//!     { "id": "1-fca2", "title": "User #1" },
//!     { "id": "2-be91", "title": "User #2" }
//!   ]
//! }
//! ```

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    state::{AppState, Thread},
};

mod errors;

pub use errors::ConfigError;

/// Threads every store starts with unless configured otherwise, as `(id, title)`.
pub const DEFAULT_THREADS: &[(&str, &str)] = &[("1-fca2", "User #1"), ("2-be91", "User #2")];

/// One seeded thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSeed {
    pub id: String,
    pub title: String,
}

/// Description of the initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedConfig {
    /// Defaults to the first thread when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_thread_id: Option<String>,
    pub threads: Vec<ThreadSeed>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            active_thread_id: None,
            threads: DEFAULT_THREADS
                .iter()
                .map(|(id, title)| ThreadSeed {
                    id: id.to_string(),
                    title: title.to_string(),
                })
                .collect(),
        }
    }
}

impl SeedConfig {
    /// Reads a seed from a JSON file. The result is not validated until
    /// [`into_state`](Self::into_state).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let seed: SeedConfig = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), threads = seed.threads.len(), "Loaded seed configuration");
        Ok(seed)
    }

    /// Checks the seed without building a state.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.threads.is_empty() {
            return Err(ConfigError::NoThreads);
        }

        let mut seen = HashSet::with_capacity(self.threads.len());
        for (index, thread) in self.threads.iter().enumerate() {
            if thread.id.is_empty() {
                return Err(ConfigError::EmptyThreadId { index });
            }
            if !seen.insert(thread.id.as_str()) {
                return Err(ConfigError::DuplicateThreadId {
                    id: thread.id.clone(),
                });
            }
        }

        if let Some(active) = &self.active_thread_id
            && !seen.contains(active.as_str())
        {
            return Err(ConfigError::UnknownActiveThread { id: active.clone() });
        }

        Ok(())
    }

    /// Validates the seed and builds the initial state from it.
    pub fn into_state(self) -> Result<AppState> {
        self.validate()?;

        let active = match self.active_thread_id {
            Some(id) => id,
            // validate() guarantees at least one thread
            None => self.threads[0].id.clone(),
        };
        let threads = self
            .threads
            .into_iter()
            .map(|seed| Thread::new(seed.id, seed.title))
            .collect();

        Ok(AppState::new(active, threads))
    }
}
