// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Shared fixtures for macrov tests: ready-to-use stores, sample entity
//! inputs, and an instrumented snapshot store for exercising the
//! connection manager's recovery and persistence paths.

use anyhow::{Context, Result, bail};
use macrov_app::{CycleId, MeterId};
use macrov_db::{
    DEFAULT_ADMIN_USERNAME, DirSnapshotStore, NewCycle, NewLoss, NewMeter, NewReading,
    SnapshotStore, Store,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::{Date, Month, OffsetDateTime, Time};

/// An initialized in-memory store with the default seed rows applied.
pub fn memory_store() -> Result<Store> {
    let store = Store::memory();
    store.initialize().context("initialize in-memory store")?;
    Ok(store)
}

pub fn sample_cycle(id: i64) -> NewCycle {
    NewCycle {
        id: CycleId::new(id),
        description: format!("Ciclo {id}"),
        periodicity: "30 dias".to_owned(),
    }
}

pub fn sample_meter() -> NewMeter {
    meter_named("Tanque Norte")
}

pub fn meter_named(name: &str) -> NewMeter {
    NewMeter {
        name: name.to_owned(),
        address: "Calle 10 #2-45".to_owned(),
        sig_coord: "4.6097,-74.0817".to_owned(),
        installation_type: "Residencial".to_owned(),
        cycle_id: Some(CycleId::new(1)),
    }
}

pub fn sample_reading(meter_id: MeterId, value: f64, recorded_at: OffsetDateTime) -> NewReading {
    NewReading {
        value,
        recorded_at,
        anomaly_status: "Normal".to_owned(),
        photo_ref: None,
        meter_id,
        username: DEFAULT_ADMIN_USERNAME.to_owned(),
    }
}

pub fn sample_loss(cycle_id: i64, month_label: &str, value: f64) -> NewLoss {
    NewLoss {
        month_label: month_label.to_owned(),
        value,
        cycle_id: CycleId::new(cycle_id),
    }
}

/// A timestamp in 2026 at the given month/day/hour (UTC), for building
/// ordered reading series without repeating calendar plumbing.
pub fn reading_time(month: u8, day: u8, hour: u8) -> Result<OffsetDateTime> {
    let month = Month::try_from(month).context("month out of range")?;
    let date = Date::from_calendar_date(2026, month, day).context("invalid calendar date")?;
    let time = Time::from_hms(hour, 0, 0).context("invalid time of day")?;
    Ok(date.with_time(time).assume_utc())
}

/// Per-method call counters for [`RecordingSnapshotStore`].
#[derive(Debug, Default)]
pub struct SnapshotCalls {
    pub init: AtomicUsize,
    pub load: AtomicUsize,
    pub save: AtomicUsize,
    pub delete: AtomicUsize,
}

/// A [`DirSnapshotStore`] wrapper that counts calls and can inject save
/// failures. Counters and the failure budget stay accessible after the
/// store has been boxed into a manager.
pub struct RecordingSnapshotStore {
    inner: DirSnapshotStore,
    calls: Arc<SnapshotCalls>,
    save_failures: Arc<AtomicUsize>,
}

impl RecordingSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: DirSnapshotStore::new(dir),
            calls: Arc::new(SnapshotCalls::default()),
            save_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<SnapshotCalls> {
        Arc::clone(&self.calls)
    }

    /// Handle for injecting failures: every pending unit makes the next
    /// `save` call fail.
    pub fn save_failures(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.save_failures)
    }
}

impl SnapshotStore for RecordingSnapshotStore {
    fn init(&self) -> Result<()> {
        self.calls.init.fetch_add(1, Ordering::SeqCst);
        self.inner.init()
    }

    fn load(&self, name: &str, conn: &mut Connection) -> Result<bool> {
        self.calls.load.fetch_add(1, Ordering::SeqCst);
        self.inner.load(name, conn)
    }

    fn save(&self, name: &str, conn: &Connection) -> Result<()> {
        self.calls.save.fetch_add(1, Ordering::SeqCst);
        if self.save_failures.load(Ordering::SeqCst) > 0 {
            self.save_failures.fetch_sub(1, Ordering::SeqCst);
            bail!("injected snapshot save failure");
        }
        self.inner.save(name, conn)
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{memory_store, reading_time, sample_meter};
    use anyhow::Result;

    #[test]
    fn memory_store_is_seeded_and_usable() -> Result<()> {
        let store = memory_store()?;
        let meter_id = store.create_meter(&sample_meter())?;
        assert!(meter_id.get() > 0);
        Ok(())
    }

    #[test]
    fn reading_time_orders_chronologically() -> Result<()> {
        assert!(reading_time(1, 5, 8)? < reading_time(2, 5, 8)?);
        assert!(reading_time(2, 5, 8)? < reading_time(2, 5, 9)?);
        Ok(())
    }
}
