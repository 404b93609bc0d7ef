//! Locating the thread an action targets.

use std::sync::Arc;

use crate::{action::Action, state::Thread};

/// Index of the thread `action` should be applied to.
///
/// * `AddMessage` targets the thread whose id equals `thread_id`.
/// * `DeleteMessage` targets the first thread holding a message with that id.
/// * `OpenThread` does not target a thread.
///
/// `None` means no thread matches.
pub fn find_thread_index(threads: &[Arc<Thread>], action: &Action) -> Option<usize> {
    match action {
        Action::AddMessage { thread_id, .. } => threads.iter().position(|t| &t.id == thread_id),
        Action::DeleteMessage { id } => threads.iter().position(|t| t.contains_message(id)),
        Action::OpenThread { .. } => None,
    }
}
