//! Active thread selection.

use crate::{
    action::Action,
    state::{Thread, ThreadId},
};

/// The session starts on the first seeded thread.
pub fn initial_active_thread(threads: &[std::sync::Arc<Thread>]) -> ThreadId {
    threads
        .first()
        .map(|t| t.id.clone())
        .unwrap_or_default()
}

/// Switches the active thread on `OpenThread`; any other action returns
/// `active` untouched.
///
/// The new id is accepted as-is, even when no thread carries it.
pub fn reduce_session(active: ThreadId, action: &Action) -> ThreadId {
    match action {
        Action::OpenThread { id } => id.clone(),
        Action::AddMessage { .. } | Action::DeleteMessage { .. } => active,
    }
}
