//! Application state snapshots.
//!
//! State is never mutated in place. Message sequences and threads are shared
//! through `Arc`, so a transition that touches one thread allocates a new
//! message sequence, a new `Thread` and a new thread sequence, while every
//! other thread is carried over pointer-equal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

mod id;

pub use id::{MessageId, ThreadId};

/// Ordered, shared sequence of messages belonging to one thread.
pub type Messages = Arc<[Message]>;

/// Ordered, shared sequence of threads.
pub type Threads = Arc<[Arc<Thread>]>;

/// A single timestamped text entry within a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    /// Creation time in milliseconds since Unix epoch.
    pub timestamp: u64,
}

/// A named conversation owning an ordered list of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub title: String,
    pub messages: Messages,
}

impl Thread {
    /// Creates a thread with no messages.
    pub fn new(id: impl Into<ThreadId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            messages: empty_messages(),
        }
    }

    /// Returns a copy of this thread with its message sequence replaced.
    pub fn with_messages(&self, messages: Messages) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            messages,
        }
    }

    /// Returns true if a message with `id` belongs to this thread.
    pub fn contains_message(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| &m.id == id)
    }

    /// Looks up a message of this thread by id.
    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    /// The most recently added message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// The root state object.
///
/// `active_thread_id` references a thread by id only; ownership of every
/// thread stays with `threads`. Nothing guarantees the referenced thread
/// exists, so lookups return `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub active_thread_id: ThreadId,
    pub threads: Threads,
}

impl AppState {
    /// Builds a state from an active thread id and a thread list.
    ///
    /// No validation happens here; use [`SeedConfig`](crate::config::SeedConfig)
    /// for validated construction.
    pub fn new(active_thread_id: impl Into<ThreadId>, threads: Vec<Thread>) -> Self {
        Self {
            active_thread_id: active_thread_id.into(),
            threads: threads.into_iter().map(Arc::new).collect(),
        }
    }

    /// Looks up a thread by id.
    pub fn thread(&self, id: &ThreadId) -> Option<&Arc<Thread>> {
        self.threads.iter().find(|t| &t.id == id)
    }

    /// Finds the thread that owns the message with `id`.
    pub fn thread_of_message(&self, id: &MessageId) -> Option<&Arc<Thread>> {
        self.threads.iter().find(|t| t.contains_message(id))
    }

    /// Iterates over every message of every thread, in thread order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.threads.iter().flat_map(|t| t.messages.iter())
    }

    /// Total number of messages across all threads.
    pub fn message_count(&self) -> usize {
        self.threads.iter().map(|t| t.messages.len()).sum()
    }
}

impl Default for AppState {
    /// The state every reducer starts from: the seeded threads with the first
    /// one active.
    fn default() -> Self {
        let threads = crate::reducer::threads::initial_threads();
        let active_thread_id = crate::reducer::session::initial_active_thread(&threads);
        Self {
            active_thread_id,
            threads,
        }
    }
}

/// A new empty message sequence.
pub fn empty_messages() -> Messages {
    Arc::from(Vec::new())
}
