use standings_core::seed;
use standings_core::{
    JsonFilePersister, League, MemoryPersister, Persister, Snapshot, StateStore,
};
use std::sync::Arc;

#[test]
fn restore_without_saved_state_uses_demo_data() {
    let store = StateStore::restore(&MemoryPersister::new());
    assert_eq!(store.snapshot(), seed::default_snapshot());
}

#[test]
fn restore_from_corrupt_state_uses_demo_data() {
    let store = StateStore::restore(&MemoryPersister::with_raw("[1, 2"));
    assert_eq!(store.snapshot(), seed::default_snapshot());
}

#[test]
fn blank_state_file_restores_demo_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "  \n").unwrap();

    let persister = JsonFilePersister::new(&path);
    assert!(persister.load().unwrap().is_none());
    let store = StateStore::restore(&persister);
    assert_eq!(store.snapshot(), seed::default_snapshot());
}

#[test]
fn corrupt_state_file_restores_demo_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ broken").unwrap();

    let persister = JsonFilePersister::new(&path);
    assert!(persister.load().is_err());
    let store = StateStore::restore(&persister);
    assert_eq!(store.snapshot(), seed::default_snapshot());
    // The bad file is left for the next save to replace.
    assert_eq!(std::fs::read_to_string(persister.path()).unwrap(), "{ broken");
}

#[test]
fn saved_document_uses_camel_case_keys() {
    let persister = MemoryPersister::new();
    persister.save(&seed::default_snapshot()).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&persister.raw().unwrap()).unwrap();
    assert_eq!(raw["currentLeague"], "premier");
    let first = &raw["matches"][0];
    assert!(first["homeTeamId"].is_string());
    assert!(first["date"].is_string());
    assert!(first.get("timestamp").is_none());
}

#[test]
fn restore_keeps_a_saved_empty_store() {
    let persister = MemoryPersister::new();
    persister.save(&Snapshot::default()).unwrap();
    let store = StateStore::restore(&persister);
    assert!(store.read().teams.is_empty());
}

#[test]
fn listener_driven_saves_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let persister = Arc::new(JsonFilePersister::new(&path));

    let mut store = StateStore::restore(&*persister);
    let sink = persister.clone();
    store.on_change(move |view| {
        // Save failures are ignored by contract.
        let _ = sink.save(&view.to_snapshot());
    });

    store.reset_all();
    let team = store.add_team("Sinner", League::Wimbledon).unwrap();
    store.set_league(League::Wimbledon);

    let reopened = StateStore::restore(&JsonFilePersister::new(&path));
    let view = reopened.read();
    assert_eq!(view.teams.to_vec(), vec![team]);
    assert_eq!(view.current_league, League::Wimbledon);
}

#[test]
fn save_failure_does_not_disturb_the_store() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes every write fail.
    let blocked = dir.path().join("state.json");
    std::fs::create_dir_all(&blocked).unwrap();
    let persister = JsonFilePersister::new(&blocked);

    let mut store = StateStore::new();
    let sink = persister.clone();
    store.on_change(move |view| {
        let _ = sink.save(&view.to_snapshot());
    });
    store.add_team("Spurs", League::Premier).unwrap();

    assert_eq!(store.read().teams_in(League::Premier).len(), 5);
    assert!(persister.load().is_err());
}
