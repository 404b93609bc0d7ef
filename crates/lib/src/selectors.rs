//! Read-only projections of state for a view layer.

use std::sync::Arc;

use serde::Serialize;

use crate::state::{AppState, Thread, ThreadId};

/// One entry of the thread tab bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: ThreadId,
    pub title: String,
    pub active: bool,
}

/// One tab per thread, in thread order, with the active thread marked.
///
/// No tab is active when the session points at a thread that does not exist.
pub fn tabs(state: &AppState) -> Vec<Tab> {
    state
        .threads
        .iter()
        .map(|t| Tab {
            id: t.id.clone(),
            title: t.title.clone(),
            active: t.id == state.active_thread_id,
        })
        .collect()
}

/// The thread the session points at, if it exists.
pub fn active_thread(state: &AppState) -> Option<&Arc<Thread>> {
    state.thread(&state.active_thread_id)
}

/// Position of the active thread within the thread list.
pub fn active_index(state: &AppState) -> Option<usize> {
    state
        .threads
        .iter()
        .position(|t| t.id == state.active_thread_id)
}

/// The thread after (`step > 0`) or before (`step < 0`) the active one,
/// wrapping around. Falls back to the first thread when none is active.
pub fn neighbor_thread(state: &AppState, step: isize) -> Option<&ThreadId> {
    let len = state.threads.len();
    if len == 0 {
        return None;
    }
    let index = match active_index(state) {
        Some(current) => (current as isize + step).rem_euclid(len as isize) as usize,
        None => 0,
    };
    Some(&state.threads[index].id)
}
