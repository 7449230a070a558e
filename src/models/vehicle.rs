//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su enum de estado.
//! Mapea exactamente a la tabla vehicles con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del vehículo - columna TEXT 'status'
///
/// 'reserved' significa "tiene al menos una reserva activa", no ocupación
/// en tiempo real. 'maintenance' se fija manualmente y el ciclo de reservas
/// nunca lo toca.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Maintenance,
    Reserved,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Reserved => "reserved",
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
