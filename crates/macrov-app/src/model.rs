// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

/// Role stored in `usuario.rol`. Stored values keep the labels the
/// field operators already know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Engineer,
    Operator,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Engineer => "Ingeniero",
            Self::Operator => "Operativo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Admin" => Some(Self::Admin),
            "Ingeniero" => Some(Self::Engineer),
            "Operativo" => Some(Self::Operator),
            _ => None,
        }
    }
}

/// A billing/reading period definition (table `ciclo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: CycleId,
    pub description: String,
    pub periodicity: String,
}

/// An operator account (table `usuario`). `password_sha256` is the hex
/// digest of the password, never the password itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub display_name: String,
    pub role: Role,
    pub password_sha256: String,
}

/// A bulk water-meter installation (table `macro_medidor`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meter {
    pub id: MeterId,
    pub name: String,
    pub address: String,
    pub sig_coord: String,
    pub installation_type: String,
    pub cycle_id: Option<CycleId>,
}

/// One recorded meter value (table `lectura`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: ReadingId,
    pub value: f64,
    pub recorded_at: OffsetDateTime,
    pub anomaly_status: String,
    pub photo_ref: Option<String>,
    pub meter_id: MeterId,
    pub username: String,
}

/// Unaccounted-for water attributed to a cycle and month (table
/// `perdidas`). `month_label` is canonical `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loss {
    pub id: LossId,
    pub month_label: String,
    pub value: f64,
    pub cycle_id: CycleId,
}

/// One row of the lag-comparison report: a reading paired with the
/// immediately preceding value on the same meter, `None` for the
/// earliest reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingDelta {
    pub meter_id: MeterId,
    pub reading_id: ReadingId,
    pub value: f64,
    pub recorded_at: OffsetDateTime,
    pub previous_value: Option<f64>,
}

/// One bucket of the loss report: total loss for a cycle in a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossBucket {
    pub cycle_id: CycleId,
    pub month_label: String,
    pub total: f64,
}
