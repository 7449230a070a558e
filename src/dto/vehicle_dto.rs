use serde::{Deserialize, Serialize};

use crate::models::reservation::Reservation;
use crate::models::vehicle::Vehicle;

/// Query params de /vehicles/:id/availability
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Payload de listado de vehículos
#[derive(Debug, Serialize)]
pub struct VehicleListData {
    pub vehicles: Vec<Vehicle>,
}

/// Payload de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleData {
    pub vehicle: Vehicle,
}

/// Payload de disponibilidad: vehículo + booleano + conflictos completos
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityData {
    pub vehicle: Vehicle,
    pub available: bool,
    pub conflicting_reservations: Vec<Reservation>,
}
