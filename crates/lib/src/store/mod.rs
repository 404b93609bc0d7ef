//!
//! The observable state container.
//!
//! `Store` owns the current [`AppState`] snapshot. [`Store::dispatch`] runs the
//! root reducer, installs the new snapshot and then notifies every observer,
//! synchronously and in registration order.
//!
//! A store is constructed once at the composition root and handed to the view
//! layer; there is no process-wide instance.

use std::{
    collections::VecDeque,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    thread::{self, ThreadId},
};

use handle_trait::Handle;
use tracing::{debug, error, trace, warn};

use crate::{
    Clock, Result, SystemClock,
    action::Action,
    config::SeedConfig,
    ids::{IdGenerator, UuidIds},
    reducer::{ReduceContext, reduce},
    state::AppState,
    wire::WireAction,
};

mod subscription;

use subscription::ObserverList;
pub use subscription::{Observer, Subscription};

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Store data is only ever replaced wholesale, so a poisoned guard still holds
/// a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Actions waiting to be applied, and the OS thread currently applying them.
#[derive(Default)]
struct DispatchQueue {
    pending: VecDeque<WireAction>,
    drainer: Option<ThreadId>,
}

/// Releases the drain when dropped, including when a reducer or provider
/// unwinds out of it.
///
/// Actions queued by observers of the interrupted round are discarded; they
/// reacted to a transition that never completed.
struct DrainGuard<'a>(&'a Mutex<DispatchQueue>);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        let mut queue = lock(self.0);
        queue.drainer = None;
        if !queue.pending.is_empty() {
            warn!(
                discarded = queue.pending.len(),
                "Dispatch interrupted by a panic, dropping queued actions"
            );
            queue.pending.clear();
        }
    }
}

/// Internal state for Store
///
/// Store itself is just a cheap-to-clone handle wrapping `Arc<StoreInternal>`.
pub(crate) struct StoreInternal {
    /// Current snapshot
    state: Mutex<Arc<AppState>>,
    /// Registered observers
    observers: ObserverList,
    /// Dispatches issued by observers of the one currently running
    queue: Mutex<DispatchQueue>,
    /// Held for a whole drain, so dispatches from other threads wait their turn
    serial: Mutex<()>,
    /// Time provider for message timestamps
    clock: Arc<dyn Clock>,
    /// Message id provider
    ids: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for StoreInternal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreInternal")
            .field("state", &*lock(&self.state))
            .field("observers", &format!("<{} observers>", self.observers.len()))
            .field("pending", &lock(&self.queue).pending.len())
            .field("clock", &self.clock)
            .field("ids", &self.ids)
            .finish()
    }
}

/// The single owner of root state.
///
/// ## Re-entrancy
///
/// An observer may call [`dispatch`](Self::dispatch) on the store that is
/// notifying it. Such a dispatch is queued and applied once the current
/// notification round has finished, in FIFO order; `dispatch` never recurses
/// into the reducer.
///
/// A dispatch from another thread blocks until the running one, including
/// everything its observers queued, has finished, and returns only after its
/// own action has been applied. An observer must therefore not wait on
/// another thread that dispatches to the same store.
///
/// ## Example
///
/// ```
/// use threadline::{Action, Store};
///
/// let store = Store::new();
/// store.dispatch(Action::add_message("1-fca2", "hi"));
///
/// let state = store.state();
/// let thread = state.thread(&"1-fca2".into()).unwrap();
/// assert_eq!(thread.messages[0].text, "hi");
/// ```
#[derive(Clone, Debug, Handle)]
pub struct Store {
    inner: Arc<StoreInternal>,
}

/// Weak reference to a Store.
///
/// Observers that need to read the store they are registered with should hold
/// one of these; capturing a strong `Store` in an observer keeps the store
/// alive forever.
#[derive(Clone, Debug, Handle)]
pub struct WeakStore {
    inner: Weak<StoreInternal>,
}

impl Store {
    /// Creates a store holding the default seeded state.
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Creates a store holding `state`, using wall-clock time and UUID ids.
    pub fn with_state(state: AppState) -> Self {
        Self::build(state, Arc::new(SystemClock), Arc::new(UuidIds))
    }

    /// Validates `seed` and creates a store from it.
    pub fn from_seed(seed: SeedConfig) -> Result<Self> {
        Ok(Self::with_state(seed.into_state()?))
    }

    /// Creates a store with custom time and id providers.
    ///
    /// Only available with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub fn with_providers(
        state: AppState,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self::build(state, clock, ids)
    }

    fn build(state: AppState, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            inner: Arc::new(StoreInternal {
                state: Mutex::new(Arc::new(state)),
                observers: ObserverList::default(),
                queue: Mutex::new(DispatchQueue::default()),
                serial: Mutex::new(()),
                clock,
                ids,
            }),
        }
    }

    /// The current snapshot. It stays valid and unchanged after later dispatches.
    pub fn state(&self) -> Arc<AppState> {
        lock(&self.inner.state).clone()
    }

    /// Applies `action` and notifies observers.
    ///
    /// Never fails: actions naming threads or messages that do not exist leave
    /// the state unchanged. Called from inside an observer, the action is
    /// queued instead (see [`Store`]).
    pub fn dispatch(&self, action: Action) {
        self.dispatch_wire(WireAction::Known(action));
    }

    /// Applies a decoded wire action and notifies observers.
    ///
    /// [`WireAction::Unrecognized`] is an identity transition: the snapshot is
    /// kept as-is, but observers are still notified.
    pub fn dispatch_wire(&self, action: WireAction) {
        let current = thread::current().id();
        {
            let mut queue = lock(&self.inner.queue);
            if queue.drainer == Some(current) {
                queue.pending.push_back(action);
                trace!(pending = queue.pending.len(), "Dispatch queued behind running dispatch");
                return;
            }
        }

        let _serial = lock(&self.inner.serial);
        {
            let mut queue = lock(&self.inner.queue);
            queue.drainer = Some(current);
            queue.pending.push_back(action);
        }
        let _drain = DrainGuard(&self.inner.queue);

        loop {
            let Some(next) = lock(&self.inner.queue).pending.pop_front() else {
                break;
            };
            self.apply(&next);
            self.notify();
        }
    }

    /// Dispatches every action in order.
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = WireAction>) {
        for action in actions {
            self.dispatch_wire(action);
        }
    }

    fn apply(&self, action: &WireAction) {
        let action = match action {
            WireAction::Known(action) => action,
            WireAction::Unrecognized { kind } => {
                debug!(kind = %kind, "Unrecognized action, state unchanged");
                return;
            }
        };

        debug!(kind = action.kind(), "Dispatching action");
        let ctx = ReduceContext::new(self.inner.clock.as_ref(), self.inner.ids.as_ref());
        let mut state = lock(&self.inner.state);
        let next = reduce(&state, action, &ctx);
        *state = Arc::new(next);
    }

    fn notify(&self) {
        for (id, observer) in self.inner.observers.snapshot() {
            if catch_unwind(AssertUnwindSafe(|| observer())).is_err() {
                error!(observer = id, "Observer panicked, continuing with remaining observers");
            }
        }
    }

    /// Registers `observer` to run after every dispatch.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.observers.add(Arc::new(observer));
        trace!(observer = id, "Observer subscribed");
        Subscription::new(id, &self.inner)
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.len()
    }

    /// Returns a weak reference to this store.
    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl WeakStore {
    /// Upgrade to a strong reference, or `None` if the store has been dropped.
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}
