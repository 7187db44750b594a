// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::snapshot::SnapshotStore;
use crate::{apply_schema, configure_connection, seed_defaults};
use anyhow::{Context, Result, anyhow, bail};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Where the named database lives.
pub enum StorageMode {
    /// Private in-memory database; nothing survives the process.
    Memory,
    /// Database file opened in place. Open failures propagate with no
    /// recovery attempt.
    File { path: PathBuf },
    /// In-memory database restored from a durable snapshot at open and
    /// persisted back after every write. A snapshot that cannot be
    /// restored is deleted and recreated once.
    Snapshot { store: Box<dyn SnapshotStore> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Initializing,
    Ready,
}

struct ManagerInner {
    phase: Phase,
    conn: Option<Connection>,
    failure: Option<String>,
}

type ReadyObserver = Box<dyn Fn(bool) + Send + Sync>;

/// Owns the lifecycle of one named database connection. Concurrent
/// `initialize` callers share a single in-flight attempt, so the schema
/// and seed rows are applied at most once per open.
pub struct ConnectionManager {
    name: String,
    mode: StorageMode,
    inner: Mutex<ManagerInner>,
    settled: Condvar,
    observers: Mutex<Vec<ReadyObserver>>,
}

impl ConnectionManager {
    pub fn new(name: impl Into<String>, mode: StorageMode) -> Self {
        Self {
            name: name.into(),
            mode,
            inner: Mutex::new(ManagerInner {
                phase: Phase::Uninitialized,
                conn: None,
                failure: None,
            }),
            settled: Condvar::new(),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn memory(name: impl Into<String>) -> Self {
        Self::new(name, StorageMode::Memory)
    }

    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(name, StorageMode::File { path: path.into() })
    }

    pub fn snapshot(name: impl Into<String>, store: Box<dyn SnapshotStore>) -> Self {
        Self::new(name, StorageMode::Snapshot { store })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ready(&self) -> bool {
        self.lock_inner().phase == Phase::Ready
    }

    /// Registers a readiness observer. Observers fire exactly on
    /// `false -> true` (initialization completed) and `true -> false`
    /// (connection closed or discarded) edges.
    pub fn subscribe(&self, observer: impl Fn(bool) + Send + Sync + 'static) {
        self.lock_observers().push(Box::new(observer));
    }

    /// Opens the connection, applies the schema, and seeds defaults.
    /// Idempotent once ready. Callers arriving while an attempt is in
    /// flight wait for that attempt and share its outcome instead of
    /// starting a second one.
    pub fn initialize(&self) -> Result<()> {
        let mut inner = self.lock_inner();
        loop {
            match inner.phase {
                Phase::Ready => return Ok(()),
                Phase::Initializing => {
                    inner = self
                        .settled
                        .wait(inner)
                        .unwrap_or_else(PoisonError::into_inner);
                    match inner.phase {
                        Phase::Ready => return Ok(()),
                        Phase::Uninitialized => {
                            let detail = inner
                                .failure
                                .clone()
                                .unwrap_or_else(|| "initialization failed".to_owned());
                            return Err(anyhow!(
                                "database {} failed to initialize: {detail}",
                                self.name
                            ));
                        }
                        Phase::Initializing => {}
                    }
                }
                Phase::Uninitialized => break,
            }
        }

        inner.phase = Phase::Initializing;
        drop(inner);

        let attempt = self.open_and_prepare();
        let mut inner = self.lock_inner();
        let outcome = match attempt {
            Ok(conn) => {
                inner.conn = Some(conn);
                inner.phase = Phase::Ready;
                inner.failure = None;
                Ok(())
            }
            Err(error) => {
                inner.conn = None;
                inner.phase = Phase::Uninitialized;
                inner.failure = Some(format!("{error:#}"));
                Err(error)
            }
        };
        drop(inner);
        self.settled.notify_all();
        if outcome.is_ok() {
            self.notify_observers(true);
        }
        outcome
    }

    /// Closes the connection and returns to `Uninitialized`. Observers
    /// are notified with `false`.
    pub fn close(&self) -> Result<()> {
        let mut inner = self.lock_inner();
        let was_ready = inner.phase == Phase::Ready;
        inner.conn = None;
        inner.phase = Phase::Uninitialized;
        inner.failure = None;
        drop(inner);
        self.settled.notify_all();
        if was_ready {
            self.notify_observers(false);
        }
        Ok(())
    }

    /// Runs a read against the guaranteed-open connection.
    pub fn query<T>(&self, operation: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.with_open_connection(false, operation)
    }

    /// Runs a write against the guaranteed-open connection, then
    /// persists the snapshot. Persistence failures are retried once and
    /// otherwise only logged; they never fail the caller's write.
    pub fn run<T>(&self, operation: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.with_open_connection(true, operation)
    }

    fn with_open_connection<T>(
        &self,
        persist_after: bool,
        operation: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let mut inner = self.lock_inner();
        if inner.conn.is_none() {
            drop(inner);
            self.initialize()?;
            inner = self.lock_inner();
        }

        let handle_dead = match inner.conn.as_ref() {
            Some(conn) => probe_connection(conn).is_err(),
            None => false,
        };
        if handle_dead {
            // The handle went bad underneath us; discard it and run a
            // full initialization instead of handing out a dead handle.
            log::warn!(
                "database {}: connection failed liveness probe; reinitializing",
                self.name
            );
            inner.conn = None;
            inner.phase = Phase::Uninitialized;
            inner.failure = None;
            drop(inner);
            self.notify_observers(false);
            self.initialize()?;
            inner = self.lock_inner();
        }

        let Some(conn) = inner.conn.as_ref() else {
            bail!(
                "database {}: could not obtain an open connection; initialize and retry",
                self.name
            );
        };

        let output = operation(conn)?;
        if persist_after && let StorageMode::Snapshot { store } = &self.mode {
            self.persist(store.as_ref(), conn);
        }
        Ok(output)
    }

    fn open_and_prepare(&self) -> Result<Connection> {
        let conn = match &self.mode {
            StorageMode::Memory => {
                Connection::open_in_memory().context("open in-memory database")?
            }
            StorageMode::File { path } => Connection::open(path)
                .with_context(|| format!("open database at {}", path.display()))?,
            StorageMode::Snapshot { store } => {
                store.init().context("initialize snapshot backend")?;
                match self.restore_from_snapshot(store.as_ref()) {
                    Ok(conn) => conn,
                    Err(error) => {
                        // One-shot recovery: a snapshot that does not
                        // restore intact is treated as corrupt.
                        log::warn!(
                            "database {}: snapshot restore failed; deleting and recreating: {error:#}",
                            self.name
                        );
                        if let Err(delete_error) = store.delete(&self.name) {
                            log::warn!(
                                "database {}: could not delete corrupt snapshot: {delete_error:#}",
                                self.name
                            );
                        }
                        self.restore_from_snapshot(store.as_ref())?
                    }
                }
            }
        };

        configure_connection(&conn)?;
        apply_schema(&conn)?;
        seed_defaults(&conn)?;
        if let StorageMode::Snapshot { store } = &self.mode {
            self.persist(store.as_ref(), &conn);
        }
        Ok(conn)
    }

    fn restore_from_snapshot(&self, store: &dyn SnapshotStore) -> Result<Connection> {
        let mut conn = Connection::open_in_memory().context("open in-memory database")?;
        store.load(&self.name, &mut conn)?;
        Ok(conn)
    }

    fn persist(&self, store: &dyn SnapshotStore, conn: &Connection) {
        let Err(error) = store.save(&self.name, conn) else {
            return;
        };
        log::warn!(
            "database {}: snapshot save failed; retrying after backend init: {error:#}",
            self.name
        );
        if let Err(init_error) = store.init() {
            log::warn!(
                "database {}: snapshot backend init failed: {init_error:#}",
                self.name
            );
        }
        if let Err(retry_error) = store.save(&self.name, conn) {
            log::error!(
                "database {}: snapshot save failed after retry; latest changes are not persisted: {retry_error:#}",
                self.name
            );
        }
    }

    fn notify_observers(&self, ready: bool) {
        for observer in self.lock_observers().iter() {
            observer(ready);
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, ManagerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<ReadyObserver>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn probe_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map(|_| ())
}
