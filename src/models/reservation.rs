//! Modelo de Reservation
//!
//! Este módulo contiene el struct Reservation, su enum de estado y los
//! read-models derivados (detalle con joins, períodos en conflicto).
//! Mapea exactamente a la tabla reservations con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de la reserva - columna TEXT 'status'
///
/// Solo 'pending' y 'confirmed' cuentan como activas: son las únicas que
/// participan en la detección de solapamientos y en la derivación del
/// estado del vehículo. La transición permitida es confirmed -> cancelled,
/// irreversible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReservationStatus::Pending),
            "confirmed" => Some(ReservationStatus::Confirmed),
            "cancelled" => Some(ReservationStatus::Cancelled),
            "completed" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// Reservation principal - mapea exactamente a la tabla reservations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos validados para insertar una reserva nueva
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
}

/// Reserva con sus relaciones (vehículo y usuario) - resultado del join
#[derive(Debug, Clone, FromRow)]
pub struct ReservationDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_registration_number: String,
    pub vehicle_status: String,
    pub user_email: String,
    pub user_first_name: String,
    pub user_last_name: String,
}

/// Período en conflicto que se devuelve al cliente en un 409
#[derive(Debug, Clone, Serialize)]
pub struct ConflictingPeriod {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
}

impl From<&Reservation> for ConflictingPeriod {
    fn from(reservation: &Reservation) -> Self {
        Self {
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            reason: reservation.reason.clone(),
        }
    }
}
