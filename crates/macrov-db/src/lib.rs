// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod manager;
pub mod snapshot;
pub mod validation;

use anyhow::{Context, Result, anyhow, bail};
use macrov_app::{
    Cycle, CycleId, Loss, LossBucket, LossId, Meter, MeterId, Reading, ReadingDelta, ReadingId,
    Role, User,
};
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

pub use manager::{ConnectionManager, StorageMode};
pub use snapshot::{DirSnapshotStore, SnapshotStore};
use validation::{
    parse_month_label, require_measure, require_name, require_password, require_positive_id,
};

pub const APP_NAME: &str = "macrov";
pub const DEFAULT_DB_NAME: &str = "macrov_db";

pub const DEFAULT_CYCLE_ID: i64 = 1;
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

const TABLES: [&str; 5] = ["ciclo", "usuario", "macro_medidor", "lectura", "perdidas"];

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("ciclo", &["id_ciclo", "descripcion", "periodicidad"]),
    ("usuario", &["usuario", "nombre", "rol", "contrasena"]),
    (
        "macro_medidor",
        &[
            "id_macro",
            "nombre",
            "direccion",
            "sig_coord",
            "tipo_instalacion",
            "id_ciclo",
        ],
    ),
    (
        "lectura",
        &[
            "id_lectura",
            "valor",
            "fecha",
            "novedad_estado",
            "id_macro_foto",
            "id_macro",
            "id_usuario",
        ],
    ),
    (
        "perdidas",
        &["id_perdida", "mes_anio", "valor_perdida", "id_ciclo"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCycle {
    pub id: CycleId,
    pub description: String,
    pub periodicity: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeter {
    pub name: String,
    pub address: String,
    pub sig_coord: String,
    pub installation_type: String,
    pub cycle_id: Option<CycleId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub value: f64,
    pub recorded_at: OffsetDateTime,
    pub anomaly_status: String,
    pub photo_ref: Option<String>,
    pub meter_id: MeterId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLoss {
    pub month_label: String,
    pub value: f64,
    pub cycle_id: CycleId,
}

/// Typed operations over the five meter-reading tables, executed
/// through a [`ConnectionManager`]'s guaranteed-open handle. Every
/// statement binds parameters; values are never interpolated.
pub struct Store {
    manager: ConnectionManager,
}

impl Store {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    pub fn memory() -> Self {
        Self::new(ConnectionManager::memory(DEFAULT_DB_NAME))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(ConnectionManager::file(DEFAULT_DB_NAME, path))
    }

    pub fn snapshot(name: impl Into<String>, store: Box<dyn SnapshotStore>) -> Self {
        Self::new(ConnectionManager::snapshot(name, store))
    }

    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    pub fn initialize(&self) -> Result<()> {
        self.manager.initialize()
    }

    pub fn close(&self) -> Result<()> {
        self.manager.close()
    }

    pub fn is_ready(&self) -> bool {
        self.manager.is_ready()
    }

    pub fn create_cycle(&self, cycle: &NewCycle) -> Result<()> {
        let id = require_positive_id(cycle.id.get())?;
        let description = require_name(&cycle.description)?;
        self.manager.run(|conn| {
            conn.execute(
                "INSERT INTO ciclo (id_ciclo, descripcion, periodicidad) VALUES (?, ?, ?)",
                params![id, description, cycle.periodicity],
            )
            .with_context(|| format!("insert cycle {id}"))?;
            Ok(())
        })
    }

    pub fn list_cycles(&self) -> Result<Vec<Cycle>> {
        self.manager.query(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id_ciclo, descripcion, periodicidad FROM ciclo ORDER BY id_ciclo ASC",
                )
                .context("prepare cycles query")?;
            let rows = stmt.query_map([], cycle_from_row).context("query cycles")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect cycles")
        })
    }

    pub fn get_cycle(&self, cycle_id: CycleId) -> Result<Option<Cycle>> {
        let id = require_positive_id(cycle_id.get())?;
        self.manager.query(move |conn| {
            conn.query_row(
                "SELECT id_ciclo, descripcion, periodicidad FROM ciclo WHERE id_ciclo = ?",
                params![id],
                cycle_from_row,
            )
            .optional()
            .with_context(|| format!("load cycle {id}"))
        })
    }

    pub fn create_user(&self, user: &NewUser) -> Result<()> {
        let username = require_name(&user.username)?;
        let display_name = require_name(&user.display_name)?;
        let digest = password_digest(require_password(&user.password)?);
        self.manager.run(move |conn| {
            conn.execute(
                "INSERT INTO usuario (usuario, nombre, rol, contrasena) VALUES (?, ?, ?, ?)",
                params![username, display_name, user.role.as_str(), digest],
            )
            .with_context(|| format!("insert user {username}"))?;
            Ok(())
        })
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.manager.query(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT usuario, nombre, rol, contrasena FROM usuario ORDER BY nombre ASC",
                )
                .context("prepare users query")?;
            let rows = stmt.query_map([], user_from_row).context("query users")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect users")
        })
    }

    pub fn get_user(&self, username: &str) -> Result<Option<User>> {
        let username = require_name(username)?;
        self.manager.query(move |conn| {
            conn.query_row(
                "SELECT usuario, nombre, rol, contrasena FROM usuario WHERE usuario = ?",
                params![username],
                user_from_row,
            )
            .optional()
            .with_context(|| format!("load user {username}"))
        })
    }

    /// Compares the stored digest against the digest of `password`.
    /// Unknown usernames simply verify as false.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<bool> {
        let username = require_name(username)?;
        let digest = password_digest(password);
        self.manager.query(move |conn| {
            let stored: Option<String> = conn
                .query_row(
                    "SELECT contrasena FROM usuario WHERE usuario = ?",
                    params![username],
                    |row| row.get(0),
                )
                .optional()
                .with_context(|| format!("load credential for {username}"))?;
            Ok(stored.is_some_and(|stored| stored == digest))
        })
    }

    pub fn create_meter(&self, meter: &NewMeter) -> Result<MeterId> {
        let name = require_name(&meter.name)?;
        if let Some(cycle_id) = meter.cycle_id {
            require_positive_id(cycle_id.get())?;
        }
        self.manager.run(move |conn| {
            conn.execute(
                "
                INSERT INTO macro_medidor (nombre, direccion, sig_coord, tipo_instalacion, id_ciclo)
                VALUES (?, ?, ?, ?, ?)
                ",
                params![
                    name,
                    meter.address,
                    meter.sig_coord,
                    meter.installation_type,
                    meter.cycle_id.map(CycleId::get),
                ],
            )
            .context("insert meter")?;
            Ok(MeterId::new(conn.last_insert_rowid()))
        })
    }

    pub fn list_meters(&self) -> Result<Vec<Meter>> {
        self.manager.query(|conn| {
            let mut stmt = conn
                .prepare(
                    "
                    SELECT id_macro, nombre, direccion, sig_coord, tipo_instalacion, id_ciclo
                    FROM macro_medidor
                    ORDER BY nombre ASC, id_macro ASC
                    ",
                )
                .context("prepare meters query")?;
            let rows = stmt.query_map([], meter_from_row).context("query meters")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect meters")
        })
    }

    pub fn get_meter(&self, meter_id: MeterId) -> Result<Option<Meter>> {
        let id = require_positive_id(meter_id.get())?;
        self.manager.query(move |conn| {
            conn.query_row(
                "
                SELECT id_macro, nombre, direccion, sig_coord, tipo_instalacion, id_ciclo
                FROM macro_medidor
                WHERE id_macro = ?
                ",
                params![id],
                meter_from_row,
            )
            .optional()
            .with_context(|| format!("load meter {id}"))
        })
    }

    pub fn create_reading(&self, reading: &NewReading) -> Result<ReadingId> {
        let meter_id = require_positive_id(reading.meter_id.get())?;
        let username = require_name(&reading.username)?;
        let value = require_measure(reading.value)?;
        let recorded_at = format_datetime(reading.recorded_at)?;
        self.manager.run(move |conn| {
            conn.execute(
                "
                INSERT INTO lectura (valor, fecha, novedad_estado, id_macro_foto, id_macro, id_usuario)
                VALUES (?, ?, ?, ?, ?, ?)
                ",
                params![
                    value,
                    recorded_at,
                    reading.anomaly_status,
                    reading.photo_ref,
                    meter_id,
                    username,
                ],
            )
            .with_context(|| format!("insert reading for meter {meter_id}"))?;
            Ok(ReadingId::new(conn.last_insert_rowid()))
        })
    }

    pub fn list_readings(&self, meter_id: MeterId) -> Result<Vec<Reading>> {
        let id = require_positive_id(meter_id.get())?;
        self.manager.query(move |conn| {
            let mut stmt = conn
                .prepare(
                    "
                    SELECT id_lectura, valor, fecha, novedad_estado, id_macro_foto, id_macro, id_usuario
                    FROM lectura
                    WHERE id_macro = ?
                    ORDER BY fecha ASC, id_lectura ASC
                    ",
                )
                .context("prepare readings query")?;
            let rows = stmt
                .query_map(params![id], reading_from_row)
                .context("query readings")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect readings")
        })
    }

    pub fn create_loss(&self, loss: &NewLoss) -> Result<LossId> {
        let cycle_id = require_positive_id(loss.cycle_id.get())?;
        let month_label = parse_month_label(&loss.month_label)?;
        let value = require_measure(loss.value)?;
        self.manager.run(move |conn| {
            conn.execute(
                "INSERT INTO perdidas (mes_anio, valor_perdida, id_ciclo) VALUES (?, ?, ?)",
                params![month_label, value, cycle_id],
            )
            .with_context(|| format!("insert loss for cycle {cycle_id}"))?;
            Ok(LossId::new(conn.last_insert_rowid()))
        })
    }

    pub fn list_losses(&self) -> Result<Vec<Loss>> {
        self.manager.query(|conn| {
            let mut stmt = conn
                .prepare(
                    "
                    SELECT id_perdida, mes_anio, valor_perdida, id_ciclo
                    FROM perdidas
                    ORDER BY id_ciclo ASC, mes_anio ASC, id_perdida ASC
                    ",
                )
                .context("prepare losses query")?;
            let rows = stmt.query_map([], loss_from_row).context("query losses")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect losses")
        })
    }

    /// Pairs every reading with the immediately preceding value on the
    /// same meter in timestamp order. The earliest reading of each
    /// meter has no previous value. Used to flag anomalous deltas.
    pub fn reading_deltas(&self) -> Result<Vec<ReadingDelta>> {
        self.manager.query(|conn| {
            let mut stmt = conn
                .prepare(
                    "
                    SELECT
                      id_macro, id_lectura, valor, fecha,
                      LAG(valor) OVER (
                        PARTITION BY id_macro
                        ORDER BY fecha ASC, id_lectura ASC
                      ) AS valor_previo
                    FROM lectura
                    ORDER BY id_macro ASC, fecha ASC, id_lectura ASC
                    ",
                )
                .context("prepare reading delta query")?;
            let rows = stmt
                .query_map([], |row| {
                    let fecha_raw: String = row.get(3)?;
                    Ok(ReadingDelta {
                        meter_id: MeterId::new(row.get(0)?),
                        reading_id: ReadingId::new(row.get(1)?),
                        value: row.get(2)?,
                        recorded_at: parse_datetime(&fecha_raw).map_err(to_sql_error)?,
                        previous_value: row.get(4)?,
                    })
                })
                .context("query reading deltas")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect reading deltas")
        })
    }

    /// Total loss per cycle and month bucket.
    pub fn loss_totals(&self) -> Result<Vec<LossBucket>> {
        self.manager.query(|conn| {
            let mut stmt = conn
                .prepare(
                    "
                    SELECT id_ciclo, mes_anio, SUM(valor_perdida) AS total
                    FROM perdidas
                    GROUP BY id_ciclo, mes_anio
                    ORDER BY id_ciclo ASC, mes_anio ASC
                    ",
                )
                .context("prepare loss totals query")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(LossBucket {
                        cycle_id: CycleId::new(row.get(0)?),
                        month_label: row.get(1)?,
                        total: row.get(2)?,
                    })
                })
                .context("query loss totals")?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .context("collect loss totals")
        })
    }

    pub fn row_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        self.manager.query(|conn| {
            let mut counts = Vec::with_capacity(TABLES.len());
            for table in TABLES {
                let count: i64 = conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })
                    .with_context(|| format!("count rows in {table}"))?;
                counts.push((table, count));
            }
            Ok(counts)
        })
    }

    /// Populates a recognizable sample data set for demo runs.
    pub fn seed_demo_data(&self) -> Result<()> {
        use time::macros::datetime;

        self.initialize()?;

        self.create_cycle(&NewCycle {
            id: CycleId::new(2),
            description: "Trimestral".to_owned(),
            periodicity: "90 dias".to_owned(),
        })?;
        self.create_user(&NewUser {
            username: "operario1".to_owned(),
            display_name: "Operario de Campo".to_owned(),
            role: Role::Operator,
            password: "operario1".to_owned(),
        })?;

        let tanque = self.create_meter(&NewMeter {
            name: "Tanque Norte".to_owned(),
            address: "Carrera 12 #4-80".to_owned(),
            sig_coord: "4.6501,-74.0831".to_owned(),
            installation_type: "Residencial".to_owned(),
            cycle_id: Some(CycleId::new(DEFAULT_CYCLE_ID)),
        })?;
        let bocatoma = self.create_meter(&NewMeter {
            name: "Bocatoma Sur".to_owned(),
            address: "Vereda El Salitre".to_owned(),
            sig_coord: "4.5989,-74.0900".to_owned(),
            installation_type: "Comercial".to_owned(),
            cycle_id: Some(CycleId::new(2)),
        })?;

        let series = [
            (tanque, 1200.0, datetime!(2026-01-05 08:00 UTC)),
            (tanque, 1248.5, datetime!(2026-02-05 08:00 UTC)),
            (tanque, 1310.0, datetime!(2026-03-05 08:00 UTC)),
            (bocatoma, 530.0, datetime!(2026-01-06 09:30 UTC)),
            (bocatoma, 545.25, datetime!(2026-02-06 09:30 UTC)),
        ];
        for (meter_id, value, recorded_at) in series {
            self.create_reading(&NewReading {
                value,
                recorded_at,
                anomaly_status: "Normal".to_owned(),
                photo_ref: None,
                meter_id,
                username: DEFAULT_ADMIN_USERNAME.to_owned(),
            })?;
        }

        for (cycle, month, value) in [
            (DEFAULT_CYCLE_ID, "2026-01", 35.2),
            (DEFAULT_CYCLE_ID, "2026-02", 28.9),
            (2, "2026-01", 12.4),
        ] {
            self.create_loss(&NewLoss {
                month_label: month.to_owned(),
                value,
                cycle_id: CycleId::new(cycle),
            })?;
        }

        Ok(())
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(override_dir) = env::var_os("MACROV_DATA_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set MACROV_DATA_DIR to a writable directory")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir)
}

pub fn validate_db_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("database name must not be empty");
    }
    if !name
        .bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
    {
        bail!(
            "database name {name:?} may only contain letters, digits, '_' and '-'; it becomes a file name"
        );
    }
    Ok(())
}

pub fn password_digest(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    let mut output = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}

fn cycle_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Cycle> {
    Ok(Cycle {
        id: CycleId::new(row.get(0)?),
        description: row.get(1)?,
        periodicity: row.get(2)?,
    })
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role_raw: String = row.get(2)?;
    let role = Role::parse(&role_raw).ok_or_else(|| {
        to_sql_error(anyhow!("unknown role {role_raw:?} stored in usuario table"))
    })?;
    Ok(User {
        username: row.get(0)?,
        display_name: row.get(1)?,
        role,
        password_sha256: row.get(3)?,
    })
}

fn meter_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Meter> {
    let cycle_id: Option<i64> = row.get(5)?;
    Ok(Meter {
        id: MeterId::new(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        sig_coord: row.get(3)?,
        installation_type: row.get(4)?,
        cycle_id: cycle_id.map(CycleId::new),
    })
}

fn reading_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reading> {
    let fecha_raw: String = row.get(2)?;
    Ok(Reading {
        id: ReadingId::new(row.get(0)?),
        value: row.get(1)?,
        recorded_at: parse_datetime(&fecha_raw).map_err(to_sql_error)?,
        anomaly_status: row.get(3)?,
        photo_ref: row.get(4)?,
        meter_id: MeterId::new(row.get(5)?),
        username: row.get(6)?,
    })
}

fn loss_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Loss> {
    Ok(Loss {
        id: LossId::new(row.get(0)?),
        month_label: row.get(1)?,
        value: row.get(2)?,
        cycle_id: CycleId::new(row.get(3)?),
    })
}

pub(crate) fn configure_connection(conn: &Connection) -> Result<()> {
    // foreign_keys is per-connection state; it must be set again on
    // every fresh handle, never assumed from a previous open.
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

pub(crate) fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(include_str!("sql/schema.sql"))
        .context("create schema")?;
    validate_schema(conn)
}

pub(crate) fn seed_defaults(conn: &Connection) -> Result<()> {
    let cycles: i64 = conn
        .query_row("SELECT COUNT(*) FROM ciclo", [], |row| row.get(0))
        .context("count cycles")?;
    if cycles > 0 {
        return Ok(());
    }

    conn.execute(
        "INSERT INTO ciclo (id_ciclo, descripcion, periodicidad) VALUES (?, ?, ?)",
        params![DEFAULT_CYCLE_ID, "Mensual", "30 dias"],
    )
    .context("insert default cycle")?;
    conn.execute(
        "INSERT INTO usuario (usuario, nombre, rol, contrasena) VALUES (?, ?, ?, ?)",
        params![
            DEFAULT_ADMIN_USERNAME,
            "Admin MacroV",
            Role::Admin.as_str(),
            password_digest("1234"),
        ],
    )
    .context("insert default admin user")?;
    Ok(())
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; the store predates this schema",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn format_datetime(value: OffsetDateTime) -> Result<String> {
    value.format(&Rfc3339).context("format timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported datetime format {raw:?}")
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::{Store, password_digest};
    use anyhow::Result;
    use macrov_app::Role;

    #[test]
    fn password_digest_is_stable_hex() {
        let digest = password_digest("1234");
        assert_eq!(digest.len(), 64);
        assert!(digest.bytes().all(|byte| byte.is_ascii_hexdigit()));
        assert_eq!(digest, password_digest("1234"));
        assert_ne!(digest, password_digest("12345"));
    }

    #[test]
    fn seeded_admin_verifies_with_bootstrap_password() -> Result<()> {
        let store = Store::memory();
        store.initialize()?;

        assert!(store.verify_credentials("admin", "1234")?);
        assert!(!store.verify_credentials("admin", "wrong")?);
        assert!(!store.verify_credentials("nobody", "1234")?);

        let admin = store.get_user("admin")?.expect("seeded admin exists");
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.display_name, "Admin MacroV");
        Ok(())
    }
}
