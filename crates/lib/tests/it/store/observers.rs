//! Observer notification tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use threadline::{Action, Subscription};

use crate::helpers::*;

#[test]
fn test_observers_run_in_registration_order() {
    let store = test_store();
    let log = event_log();
    for name in ["a", "b", "c"] {
        let log = log.clone();
        store.subscribe(move || log.lock().unwrap().push(name.to_string()));
    }

    store.dispatch(Action::open_thread(SECOND));

    assert_eq!(events(&log), ["a", "b", "c"]);
}

#[test]
fn test_every_dispatch_notifies_once() {
    let store = test_store();
    let counter = CallCounter::new();
    counter.attach(&store);

    store.dispatch(Action::open_thread(SECOND));
    store.dispatch(Action::add_message("missing", "x"));
    store.dispatch(Action::delete_message("missing"));

    assert_eq!(counter.count(), 3);
}

#[test]
fn test_observer_sees_new_state() {
    let store = test_store();
    let weak = store.downgrade();
    let log = event_log();
    let observer_log = log.clone();
    store.subscribe(move || {
        if let Some(store) = weak.upgrade() {
            let count = store.state().message_count();
            observer_log.lock().unwrap().push(count.to_string());
        }
    });

    add_message(&store, FIRST, "one");
    add_message(&store, SECOND, "two");

    assert_eq!(events(&log), ["1", "2"]);
}

#[test]
fn test_panicking_observer_does_not_stop_others() {
    let store = test_store();
    let before = CallCounter::new();
    before.attach(&store);
    store.subscribe(|| panic!("observer failure"));
    let after = CallCounter::new();
    after.attach(&store);

    store.dispatch(Action::add_message(FIRST, "still applied"));
    store.dispatch(Action::open_thread(SECOND));

    assert_eq!(before.count(), 2);
    assert_eq!(after.count(), 2);
    assert_eq!(texts(&store, FIRST), ["still applied"]);
    assert_eq!(store.state().active_thread_id, SECOND);
}

#[test]
fn test_dispatch_from_observer_is_queued() {
    let store = test_store();
    let weak = store.downgrade();
    let log = event_log();
    let fired = Arc::new(AtomicBool::new(false));

    // First observer reacts to the first dispatch by dispatching again
    {
        let log = log.clone();
        let fired = fired.clone();
        store.subscribe(move || {
            let Some(store) = weak.upgrade() else { return };
            let state = store.state();
            log.lock()
                .unwrap()
                .push(format!("first:{}", state.message_count()));
            if !fired.swap(true, Ordering::SeqCst) {
                store.dispatch(Action::add_message(SECOND, "reply"));
                // Not applied yet: the nested dispatch waits for this round
                log.lock()
                    .unwrap()
                    .push(format!("nested:{}", store.state().message_count()));
            }
        });
    }
    {
        let log = log.clone();
        let weak = store.downgrade();
        store.subscribe(move || {
            let Some(store) = weak.upgrade() else { return };
            log.lock()
                .unwrap()
                .push(format!("second:{}", store.state().message_count()));
        });
    }

    store.dispatch(Action::add_message(FIRST, "hello"));

    assert_eq!(
        events(&log),
        ["first:1", "nested:1", "second:1", "first:2", "second:2"]
    );
    assert_eq!(texts(&store, SECOND), ["reply"]);
}

#[test]
fn test_unsubscribe_during_notification_applies_next_round() {
    let store = test_store();
    let counter = CallCounter::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    // Removes the counting observer the first time it runs
    let remover_slot = slot.clone();
    store.subscribe(move || {
        if let Some(subscription) = remover_slot.lock().unwrap().take() {
            assert!(subscription.unsubscribe());
        }
    });
    *slot.lock().unwrap() = Some(counter.attach(&store));

    store.dispatch(Action::open_thread(SECOND));
    store.dispatch(Action::open_thread(FIRST));

    // Notified in the round it was removed in, not after
    assert_eq!(counter.count(), 1);
    assert_eq!(store.observer_count(), 1);
}

#[test]
fn test_subscribe_and_unsubscribe_counts() {
    let store = test_store();
    let first = store.subscribe(|| {});
    let second = store.subscribe(|| {});
    assert_eq!(store.observer_count(), 2);

    assert!(first.unsubscribe());
    assert_eq!(store.observer_count(), 1);
    assert!(second.unsubscribe());
    assert_eq!(store.observer_count(), 0);
}
