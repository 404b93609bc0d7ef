//! Seed file loading tests

use std::io::Write;

use tempfile::NamedTempFile;
use threadline::{AppState, ConfigError, Error, SeedConfig, Store};

fn seed_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write seed file");
    file
}

#[test]
fn test_load_seed_from_file() {
    let file = seed_file(
        r#"{
            "threads": [
                { "id": "ops", "title": "Ops" },
                { "id": "dev", "title": "Dev" }
            ]
        }"#,
    );

    let seed = SeedConfig::load(file.path()).expect("Failed to load seed");
    let state = seed.into_state().expect("Seed should be valid");

    assert_eq!(state.active_thread_id, "ops");
    assert_eq!(state.threads[1].title, "Dev");
    assert!(state.threads.iter().all(|t| t.messages.is_empty()));
}

#[test]
fn test_default_seed_written_and_reloaded() {
    let file = seed_file(&serde_json::to_string(&SeedConfig::default()).unwrap());

    let state = SeedConfig::load(file.path())
        .and_then(SeedConfig::into_state)
        .unwrap();

    assert_eq!(state, AppState::default());
}

#[test]
fn test_missing_seed_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = SeedConfig::load(dir.path().join("absent.json")).unwrap_err();

    assert!(err.is_io_error());
    assert!(err.is_not_found());
}

#[test]
fn test_invalid_json_seed_is_a_serialization_error() {
    let file = seed_file("{ \"threads\": [ ");

    let err = SeedConfig::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::Serialize(_)));
}

#[test]
fn test_duplicate_ids_in_seed_file() {
    let file = seed_file(
        r#"{ "threads": [
            { "id": "x", "title": "One" },
            { "id": "x", "title": "Two" }
        ] }"#,
    );

    let err = SeedConfig::load(file.path())
        .and_then(Store::from_seed)
        .unwrap_err();

    match err {
        Error::Config(ConfigError::DuplicateThreadId { id }) => assert_eq!(id, "x"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_active_thread_in_seed_file() {
    let file = seed_file(
        r#"{ "activeThreadId": "nope", "threads": [ { "id": "x", "title": "One" } ] }"#,
    );

    let err = SeedConfig::load(file.path())
        .and_then(SeedConfig::into_state)
        .unwrap_err();

    assert!(err.is_config_error());
    assert!(err.is_not_found());
}
