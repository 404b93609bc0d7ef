//! Pure state-transition functions.
//!
//! Each sub-reducer only ever sees and returns its own slice of
//! [`AppState`]:
//!
//! * [`session::reduce_session`] owns `active_thread_id`
//! * [`threads::reduce_threads`] owns `threads`, delegating message changes to
//!   [`messages::reduce_messages`] for exactly one thread
//!
//! Reducers are deterministic except for reading the clock and drawing message
//! ids, both of which come from the [`ReduceContext`].

use crate::{
    action::Action,
    clock::{Clock, SystemClock},
    ids::{IdGenerator, UuidIds},
    state::AppState,
};

pub mod lookup;
pub mod messages;
pub mod session;
pub mod threads;

pub use lookup::find_thread_index;
pub use messages::reduce_messages;
pub use session::reduce_session;
pub use threads::reduce_threads;

/// Providers for the two side effects reducers are allowed to have.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub clock: &'a dyn Clock,
    pub ids: &'a dyn IdGenerator,
}

impl<'a> ReduceContext<'a> {
    pub fn new(clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self { clock, ids }
    }
}

impl ReduceContext<'static> {
    /// Wall-clock time and UUID ids.
    pub fn system() -> Self {
        Self {
            clock: &SystemClock,
            ids: &UuidIds,
        }
    }
}

/// The root reducer: applies every sub-reducer to its own slice.
///
/// Always returns a new root. Slices the action does not concern are carried
/// over unchanged (`threads` stays pointer-equal).
pub fn reduce(state: &AppState, action: &Action, ctx: &ReduceContext<'_>) -> AppState {
    AppState {
        active_thread_id: reduce_session(state.active_thread_id.clone(), action),
        threads: reduce_threads(state.threads.clone(), action, ctx),
    }
}
