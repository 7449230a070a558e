use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::reservation::ReservationDetail;

// Request para crear una reserva
// Campos opcionales: la ausencia de cualquiera es un 400 con envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub vehicle_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

/// Resumen de vehículo embebido en una reserva
#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
}

/// Resumen de vehículo con estado (listado del propio usuario)
#[derive(Debug, Serialize)]
pub struct VehicleSummaryWithStatus {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
    pub status: String,
}

/// Resumen de usuario embebido en una reserva
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Reserva con vehículo y usuario embebidos (detalle y listado admin)
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle: VehicleSummary,
    pub user: UserSummary,
}

impl From<ReservationDetail> for ReservationResponse {
    fn from(detail: ReservationDetail) -> Self {
        Self {
            id: detail.id,
            user_id: detail.user_id,
            vehicle_id: detail.vehicle_id,
            start_date: detail.start_date,
            end_date: detail.end_date,
            reason: detail.reason,
            status: detail.status,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
            vehicle: VehicleSummary {
                id: detail.vehicle_id,
                brand: detail.vehicle_brand,
                model: detail.vehicle_model,
                registration_number: detail.vehicle_registration_number,
            },
            user: UserSummary {
                id: detail.user_id,
                email: detail.user_email,
                first_name: detail.user_first_name,
                last_name: detail.user_last_name,
            },
        }
    }
}

/// Reserva del propio usuario: vehículo con estado, sin bloque de usuario
#[derive(Debug, Serialize)]
pub struct UserReservationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle: VehicleSummaryWithStatus,
}

impl From<ReservationDetail> for UserReservationResponse {
    fn from(detail: ReservationDetail) -> Self {
        Self {
            id: detail.id,
            user_id: detail.user_id,
            vehicle_id: detail.vehicle_id,
            start_date: detail.start_date,
            end_date: detail.end_date,
            reason: detail.reason,
            status: detail.status,
            created_at: detail.created_at,
            updated_at: detail.updated_at,
            vehicle: VehicleSummaryWithStatus {
                id: detail.vehicle_id,
                brand: detail.vehicle_brand,
                model: detail.vehicle_model,
                registration_number: detail.vehicle_registration_number,
                status: detail.vehicle_status,
            },
        }
    }
}

/// Payload de una reserva
#[derive(Debug, Serialize)]
pub struct ReservationData {
    pub reservation: ReservationResponse,
}

/// Payload de listado admin
#[derive(Debug, Serialize)]
pub struct ReservationListData {
    pub reservations: Vec<ReservationResponse>,
}

/// Payload de listado del propio usuario
#[derive(Debug, Serialize)]
pub struct UserReservationListData {
    pub reservations: Vec<UserReservationResponse>,
}
