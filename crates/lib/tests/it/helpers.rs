use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use threadline::{
    Action, AppState, FixedClock, Message, MessageId, SequentialIds, Store, Thread, ThreadId,
};

/// Thread ids of the default seed.
pub const FIRST: &str = "1-fca2";
pub const SECOND: &str = "2-be91";

// ==========================
// CORE TEST FACTORIES
// ==========================

/// Creates a store over the default seed with a fixed clock and ids `m1`, `m2`, ...
pub fn test_store() -> Store {
    test_store_with_state(AppState::default())
}

/// Creates a store over `state` with a fixed clock and sequential ids.
pub fn test_store_with_state(state: AppState) -> Store {
    Store::with_providers(
        state,
        Arc::new(FixedClock::default()),
        Arc::new(SequentialIds::new()),
    )
}

/// Creates a store with wall-clock time and UUID ids, as production uses.
pub fn system_store() -> Store {
    Store::new()
}

// ==========================
// OBSERVER HELPERS
// ==========================

/// Counts how many times it has been notified.
#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a counting observer on `store`.
    pub fn attach(&self, store: &Store) -> threadline::Subscription {
        let counter = self.0.clone();
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Shared log that observers can append to.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ==========================
// STATE ACCESS HELPERS
// ==========================

/// The thread `id` in the store's current state (panics if missing).
pub fn thread(store: &Store, id: &str) -> Arc<Thread> {
    store
        .state()
        .thread(&ThreadId::from(id))
        .cloned()
        .unwrap_or_else(|| panic!("thread {id} not found"))
}

/// Texts of the messages of thread `id`, in order.
pub fn texts(store: &Store, id: &str) -> Vec<String> {
    thread(store, id)
        .messages
        .iter()
        .map(|m| m.text.clone())
        .collect()
}

/// Adds a message and returns it as stored.
pub fn add_message(store: &Store, thread_id: &str, text: &str) -> Message {
    store.dispatch(Action::add_message(thread_id, text));
    thread(store, thread_id)
        .last_message()
        .cloned()
        .expect("message was just added")
}

/// Every message id across every thread.
pub fn all_message_ids(state: &AppState) -> Vec<MessageId> {
    state.messages().map(|m| m.id.clone()).collect()
}
