//! The ordered thread list.

use std::sync::Arc;

use tracing::debug;

use crate::{
    action::Action,
    config::DEFAULT_THREADS,
    state::{Thread, Threads},
};

use super::{ReduceContext, lookup::find_thread_index, messages::reduce_messages};

/// The seeded threads, each with no messages.
pub fn initial_threads() -> Threads {
    DEFAULT_THREADS
        .iter()
        .map(|(id, title)| Arc::new(Thread::new(*id, *title)))
        .collect()
}

/// Routes message actions to the one thread they target.
///
/// Only the target thread is replaced; all other entries are the same `Arc`s
/// as in `threads`. If no thread matches, or the action is not a message
/// action, `threads` itself is returned.
pub fn reduce_threads(threads: Threads, action: &Action, ctx: &ReduceContext<'_>) -> Threads {
    if !action.touches_messages() {
        return threads;
    }

    let Some(index) = find_thread_index(&threads, action) else {
        debug!(kind = action.kind(), ?action, "No thread matches action, state unchanged");
        return threads;
    };

    let old_thread = &threads[index];
    let new_thread = Arc::new(old_thread.with_messages(reduce_messages(
        old_thread.messages.clone(),
        action,
        ctx,
    )));

    threads
        .iter()
        .enumerate()
        .map(|(i, thread)| {
            if i == index {
                new_thread.clone()
            } else {
                thread.clone()
            }
        })
        .collect()
}
