//! Wire format tests
//!
//! Replay scripts are JSON arrays of tagged actions; they are decoded and fed
//! through a store the same way the demo's replay mode does.

use threadline::{
    Action, WireAction,
    wire::{decode_actions, encode_action, encode_state},
};

use crate::helpers::*;

const SCRIPT: &str = r#"[
    { "type": "ADD_MESSAGE", "threadId": "1-fca2", "text": "hi" },
    { "type": "ADD_MESSAGE", "threadId": "1-fca2", "text": "again" },
    { "type": "@@redux/INIT" },
    { "type": "OPEN_THREAD", "id": "2-be91" },
    { "type": "ADD_MESSAGE", "threadId": "2-be91", "text": "other" },
    { "type": "DELETE_MESSAGE", "id": "m1" },
    { "type": "ADD_MESSAGE", "threadId": "ghost", "text": "lost" }
]"#;

#[test]
fn test_replay_script_through_store() {
    let actions = decode_actions(SCRIPT).expect("script should decode");
    assert_eq!(actions.len(), 7);
    assert!(matches!(actions[2], WireAction::Unrecognized { .. }));

    let store = test_store();
    let counter = CallCounter::new();
    counter.attach(&store);
    store.dispatch_all(actions);

    assert_eq!(counter.count(), 7);
    let state = store.state();
    assert_eq!(state.active_thread_id, SECOND);
    assert_eq!(texts(&store, FIRST), ["again"]);
    assert_eq!(texts(&store, SECOND), ["other"]);
    assert_eq!(state.message_count(), 2);
}

#[test]
fn test_state_encoding_matches_wire_shape() {
    let store = test_store();
    add_message(&store, FIRST, "hi");

    let text = encode_state(&store.state()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["activeThreadId"], FIRST);
    let thread = &value["threads"][0];
    assert_eq!(thread["id"], FIRST);
    assert_eq!(thread["title"], "User #1");
    let message = &thread["messages"][0];
    assert_eq!(message["id"], "m1");
    assert_eq!(message["text"], "hi");
    assert!(message["timestamp"].is_u64());
    assert_eq!(value["threads"][1]["messages"], serde_json::json!([]));
}

#[test]
fn test_encoded_actions_decode_to_the_same_action() {
    let actions = [
        Action::open_thread(SECOND),
        Action::add_message(FIRST, "text with \"quotes\""),
        Action::delete_message("m7"),
    ];
    let script = serde_json::Value::Array(
        actions
            .iter()
            .map(|a| encode_action(a).unwrap())
            .collect(),
    )
    .to_string();

    let decoded = decode_actions(&script).unwrap();

    let expected: Vec<WireAction> = actions.into_iter().map(WireAction::from).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_malformed_script_is_rejected_before_dispatch() {
    let script = r#"[
        { "type": "OPEN_THREAD", "id": "2-be91" },
        { "type": "DELETE_MESSAGE" }
    ]"#;

    let err = decode_actions(script).unwrap_err();

    assert!(err.is_wire_error());
    assert_eq!(err.module(), "wire");
    assert!(err.to_string().contains("index 1"));
}
