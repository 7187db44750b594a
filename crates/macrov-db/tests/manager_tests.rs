// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use macrov_db::{DirSnapshotStore, Store};
use macrov_testkit::{RecordingSnapshotStore, meter_named};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

const DB_NAME: &str = "macrov_test";

#[test]
fn concurrent_initializers_share_one_attempt() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let snapshot = RecordingSnapshotStore::new(dir.path());
    let calls = snapshot.calls();
    let store = Store::snapshot(DB_NAME, Box::new(snapshot));

    let became_ready = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&became_ready);
    store.manager().subscribe(move |ready| {
        if ready {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    thread::scope(|scope| {
        let mut handles = Vec::new();
        for _ in 0..5 {
            handles.push(scope.spawn(|| store.initialize()));
        }
        for handle in handles {
            handle.join().expect("initializer thread panicked")?;
        }
        anyhow::Ok(())
    })?;

    assert!(store.is_ready());
    assert_eq!(calls.init.load(Ordering::SeqCst), 1, "one backend init pass");
    assert_eq!(calls.load.load(Ordering::SeqCst), 1, "one snapshot restore");
    assert_eq!(
        became_ready.load(Ordering::SeqCst),
        1,
        "readiness flips true exactly once"
    );

    // seeding ran exactly once as well
    assert_eq!(store.list_cycles()?.len(), 1);
    assert_eq!(store.list_users()?.len(), 1);
    Ok(())
}

#[test]
fn corrupt_snapshot_is_deleted_and_recreated() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = DirSnapshotStore::new(dir.path()).snapshot_path(DB_NAME);
    std::fs::write(&path, b"this is not a sqlite database")?;

    let snapshot = RecordingSnapshotStore::new(dir.path());
    let calls = snapshot.calls();
    let store = Store::snapshot(DB_NAME, Box::new(snapshot));
    store.initialize()?;

    assert!(store.is_ready());
    assert_eq!(calls.delete.load(Ordering::SeqCst), 1);
    assert_eq!(calls.load.load(Ordering::SeqCst), 2);

    // the recovered database is freshly seeded, not a crash
    let cycles = store.list_cycles()?;
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].description, "Mensual");

    // and the published snapshot is valid again
    store.close()?;
    let reopened = Store::snapshot(DB_NAME, Box::new(DirSnapshotStore::new(dir.path())));
    reopened.initialize()?;
    assert_eq!(reopened.list_cycles()?.len(), 1);
    Ok(())
}

#[test]
fn writes_survive_close_and_reopen_via_snapshot() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let store = Store::snapshot(DB_NAME, Box::new(DirSnapshotStore::new(dir.path())));
    let meter_id = store.create_meter(&meter_named("Tanque Norte"))?;
    store.close()?;
    assert!(!store.is_ready());

    let reopened = Store::snapshot(DB_NAME, Box::new(DirSnapshotStore::new(dir.path())));
    reopened.initialize()?;
    let meter = reopened.get_meter(meter_id)?.expect("meter persisted");
    assert_eq!(meter.name, "Tanque Norte");
    Ok(())
}

#[test]
fn failed_snapshot_save_never_fails_the_write() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let snapshot = RecordingSnapshotStore::new(dir.path());
    let calls = snapshot.calls();
    let save_failures = snapshot.save_failures();
    let store = Store::snapshot(DB_NAME, Box::new(snapshot));
    store.initialize()?;
    let saves_after_init = calls.save.load(Ordering::SeqCst);

    // first save attempt fails, the retry after backend init succeeds
    save_failures.store(1, Ordering::SeqCst);
    let meter_id = store.create_meter(&meter_named("Bocatoma Sur"))?;
    assert!(store.get_meter(meter_id)?.is_some());
    assert_eq!(calls.save.load(Ordering::SeqCst), saves_after_init + 2);
    assert!(calls.init.load(Ordering::SeqCst) >= 2, "backend reinitialized");

    // even both attempts failing leaves the write intact
    save_failures.store(2, Ordering::SeqCst);
    let second = store.create_meter(&meter_named("Acueducto Centro"))?;
    assert!(store.get_meter(second)?.is_some());
    Ok(())
}

#[test]
fn crud_triggers_implicit_initialization() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Store::snapshot(DB_NAME, Box::new(DirSnapshotStore::new(dir.path())));

    assert!(!store.is_ready());
    let meter_id = store.create_meter(&meter_named("Tanque Norte"))?;
    assert!(store.is_ready());
    assert!(meter_id.get() > 0);
    Ok(())
}

#[test]
fn close_notifies_observers_with_false() -> Result<()> {
    let store = Store::memory();
    let transitions = Arc::new(AtomicUsize::new(0));
    let went_down = Arc::new(AtomicUsize::new(0));

    let ups = Arc::clone(&transitions);
    let downs = Arc::clone(&went_down);
    store.manager().subscribe(move |ready| {
        if ready {
            ups.fetch_add(1, Ordering::SeqCst);
        } else {
            downs.fetch_add(1, Ordering::SeqCst);
        }
    });

    store.initialize()?;
    store.close()?;
    // closing an already-closed manager stays silent
    store.close()?;

    assert_eq!(transitions.load(Ordering::SeqCst), 1);
    assert_eq!(went_down.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn file_mode_open_failure_propagates_without_recovery() {
    let store = Store::file("/nonexistent-macrov-dir/macrov_db.db");
    let error = store.initialize().expect_err("open should fail");
    assert!(error.to_string().contains("open database at"));
    assert!(!store.is_ready());
}

#[test]
fn file_mode_round_trips_on_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("macrov_db.db");

    let store = Store::file(&path);
    store.initialize()?;
    let meter_id = store.create_meter(&meter_named("Tanque Norte"))?;
    store.close()?;

    let reopened = Store::file(&path);
    reopened.initialize()?;
    assert!(reopened.get_meter(meter_id)?.is_some());
    assert_eq!(reopened.list_cycles()?.len(), 1, "no duplicate seeds");
    Ok(())
}
