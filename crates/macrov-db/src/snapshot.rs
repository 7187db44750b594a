// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use rusqlite::backup::Backup;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const BACKUP_PAGES_PER_STEP: std::os::raw::c_int = 64;

/// Durable backend for snapshot-backed databases. The live database is
/// in memory; the backend owns the persisted copy.
pub trait SnapshotStore: Send + Sync {
    /// Prepares the backend. Idempotent; called again when a save needs
    /// a retry.
    fn init(&self) -> Result<()>;

    /// Restores the named snapshot into `conn`. Returns `false` when no
    /// snapshot exists yet. A snapshot that cannot be restored intact
    /// is an error.
    fn load(&self, name: &str, conn: &mut Connection) -> Result<bool>;

    /// Persists the current contents of `conn` as the named snapshot.
    fn save(&self, name: &str, conn: &Connection) -> Result<()>;

    /// Removes the named snapshot. Removing a missing snapshot is not
    /// an error.
    fn delete(&self, name: &str) -> Result<()>;
}

/// Snapshot store keeping one `<name>.db` file per database under a
/// directory. Saves go through a temp file and a rename so a crash
/// mid-save cannot clobber the last good snapshot.
pub struct DirSnapshotStore {
    dir: PathBuf,
}

impl DirSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.db"))
    }
}

impl SnapshotStore for DirSnapshotStore {
    fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create snapshot directory {}", self.dir.display()))
    }

    fn load(&self, name: &str, conn: &mut Connection) -> Result<bool> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Ok(false);
        }

        let source =
            Connection::open_with_flags(&path, rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY)
                .with_context(|| format!("open snapshot {}", path.display()))?;
        copy_database(&source, conn)
            .with_context(|| format!("restore snapshot {}", path.display()))?;
        verify_integrity(conn).with_context(|| format!("verify snapshot {}", path.display()))?;
        Ok(true)
    }

    fn save(&self, name: &str, conn: &Connection) -> Result<()> {
        let path = self.snapshot_path(name);
        let staging = self.dir.join(format!("{name}.db.tmp"));
        remove_if_present(&staging)?;

        {
            let mut target = Connection::open(&staging)
                .with_context(|| format!("open snapshot staging file {}", staging.display()))?;
            copy_database(conn, &mut target)
                .with_context(|| format!("write snapshot {}", staging.display()))?;
        }

        fs::rename(&staging, &path)
            .with_context(|| format!("publish snapshot {}", path.display()))
    }

    fn delete(&self, name: &str) -> Result<()> {
        remove_if_present(&self.snapshot_path(name))
    }
}

pub(crate) fn verify_integrity(conn: &Connection) -> Result<()> {
    let status: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .context("run integrity check")?;
    if status != "ok" {
        bail!("database failed integrity check: {status}");
    }
    Ok(())
}

fn copy_database(source: &Connection, target: &mut Connection) -> Result<()> {
    let backup = Backup::new(source, target).context("start database copy")?;
    backup
        .run_to_completion(BACKUP_PAGES_PER_STEP, Duration::ZERO, None)
        .context("copy database pages")?;
    Ok(())
}

fn remove_if_present(path: &std::path::Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(error) => {
            Err(error).with_context(|| format!("remove snapshot file {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DirSnapshotStore, SnapshotStore};
    use anyhow::Result;
    use rusqlite::Connection;

    #[test]
    fn save_then_load_round_trips_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DirSnapshotStore::new(dir.path());
        store.init()?;

        let conn = Connection::open_in_memory()?;
        conn.execute_batch("CREATE TABLE sample (id INTEGER PRIMARY KEY, name TEXT)")?;
        conn.execute("INSERT INTO sample (name) VALUES (?)", ["bocatoma"])?;
        store.save("unit", &conn)?;

        let mut restored = Connection::open_in_memory()?;
        assert!(store.load("unit", &mut restored)?);
        let name: String =
            restored.query_row("SELECT name FROM sample WHERE id = 1", [], |row| row.get(0))?;
        assert_eq!(name, "bocatoma");
        Ok(())
    }

    #[test]
    fn load_reports_missing_snapshot() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DirSnapshotStore::new(dir.path());
        store.init()?;

        let mut conn = Connection::open_in_memory()?;
        assert!(!store.load("absent", &mut conn)?);
        Ok(())
    }

    #[test]
    fn load_rejects_garbage_snapshot() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DirSnapshotStore::new(dir.path());
        store.init()?;
        std::fs::write(store.snapshot_path("broken"), b"not a sqlite file")?;

        let mut conn = Connection::open_in_memory()?;
        assert!(store.load("broken", &mut conn).is_err());
        Ok(())
    }

    #[test]
    fn delete_tolerates_missing_snapshot() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = DirSnapshotStore::new(dir.path());
        store.init()?;
        store.delete("never-saved")?;
        Ok(())
    }
}
