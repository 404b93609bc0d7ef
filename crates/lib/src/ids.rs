//! Message id generation.
//!
//! Message ids must never collide across independent message sequences, so
//! production ids are random UUIDs rather than per-thread counters.

use std::fmt::Debug;

#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::state::MessageId;

/// A source of fresh message ids.
pub trait IdGenerator: Send + Sync + Debug {
    /// Returns an id that has not been returned before.
    fn next_message_id(&self) -> MessageId;
}

/// Random v4 UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_message_id(&self) -> MessageId {
        MessageId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids `m1`, `m2`, ... for tests.
///
/// Unique per generator only; two generators hand out the same sequence.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

#[cfg(any(test, feature = "testing"))]
impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(any(test, feature = "testing"))]
impl IdGenerator for SequentialIds {
    fn next_message_id(&self) -> MessageId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        MessageId::new(format!("m{n}"))
    }
}
