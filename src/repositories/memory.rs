//! Doble de test en memoria del almacén de reservas
//!
//! Replica la semántica de PgReservationStore sobre HashMaps para poder
//! ejercitar el ciclo de vida completo sin base de datos. El Mutex hace de
//! frontera atómica de las operaciones compuestas.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::reservation::{
    ConflictingPeriod, NewReservation, Reservation, ReservationDetail, ReservationStatus,
};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::store::ReservationStore;
use crate::services::overlap;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
struct UserRecord {
    email: String,
    first_name: String,
    last_name: String,
}

#[derive(Default)]
struct Inner {
    vehicles: HashMap<Uuid, Vehicle>,
    reservations: HashMap<Uuid, Reservation>,
    users: HashMap<Uuid, UserRecord>,
}

pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn add_vehicle(&self, brand: &str, model: &str, registration_number: &str) -> Uuid {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            brand: brand.to_string(),
            model: model.to_string(),
            registration_number: registration_number.to_string(),
            status: VehicleStatus::Available.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        let id = vehicle.id;
        inner.vehicles.insert(id, vehicle);
        id
    }

    pub fn add_user(&self, email: &str, first_name: &str, last_name: &str) -> Uuid {
        let mut inner = self.inner.lock().unwrap();
        let id = Uuid::new_v4();
        inner.users.insert(
            id,
            UserRecord {
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            },
        );
        id
    }

    pub fn vehicle_status(&self, id: Uuid) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner.vehicles.get(&id).map(|v| v.status.clone())
    }

    pub fn reservation_count(&self) -> usize {
        self.inner.lock().unwrap().reservations.len()
    }

    fn reservations_for_vehicle(inner: &Inner, vehicle_id: Uuid) -> Vec<Reservation> {
        inner
            .reservations
            .values()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect()
    }

    fn detail(inner: &Inner, reservation: &Reservation) -> ReservationDetail {
        let vehicle = inner
            .vehicles
            .get(&reservation.vehicle_id)
            .expect("vehículo presente en el store de test");
        let user = inner
            .users
            .get(&reservation.user_id)
            .expect("usuario presente en el store de test");

        ReservationDetail {
            id: reservation.id,
            user_id: reservation.user_id,
            vehicle_id: reservation.vehicle_id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            reason: reservation.reason.clone(),
            status: reservation.status.clone(),
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
            vehicle_brand: vehicle.brand.clone(),
            vehicle_model: vehicle.model.clone(),
            vehicle_registration_number: vehicle.registration_number.clone(),
            vehicle_status: vehicle.status.clone(),
            user_email: user.email.clone(),
            user_first_name: user.first_name.clone(),
            user_last_name: user.last_name.clone(),
        }
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.vehicles.get(&id).cloned())
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let inner = self.inner.lock().unwrap();
        let mut vehicles: Vec<Vehicle> = inner.vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        candidate_start: DateTime<Utc>,
        candidate_end: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>> {
        let inner = self.inner.lock().unwrap();
        let of_vehicle = Self::reservations_for_vehicle(&inner, vehicle_id);
        let mut conflicts: Vec<Reservation> =
            overlap::find_conflicts(&of_vehicle, candidate_start, candidate_end)
                .into_iter()
                .cloned()
                .collect();
        conflicts.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        Ok(conflicts)
    }

    async fn reserve(&self, new_reservation: NewReservation) -> AppResult<ReservationDetail> {
        let mut inner = self.inner.lock().unwrap();

        if !inner.vehicles.contains_key(&new_reservation.vehicle_id) {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        let of_vehicle = Self::reservations_for_vehicle(&inner, new_reservation.vehicle_id);
        let mut conflicts: Vec<&Reservation> = overlap::find_conflicts(
            &of_vehicle,
            new_reservation.start_date,
            new_reservation.end_date,
        );
        conflicts.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        if !conflicts.is_empty() {
            return Err(AppError::ReservationConflict {
                message: "El vehículo ya está reservado para este período".to_string(),
                conflicts: conflicts.into_iter().map(ConflictingPeriod::from).collect(),
            });
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4(),
            user_id: new_reservation.user_id,
            vehicle_id: new_reservation.vehicle_id,
            start_date: new_reservation.start_date,
            end_date: new_reservation.end_date,
            reason: new_reservation.reason,
            status: ReservationStatus::Confirmed.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        let vehicle = inner
            .vehicles
            .get_mut(&reservation.vehicle_id)
            .expect("verificado arriba");
        vehicle.status = VehicleStatus::Reserved.as_str().to_string();
        vehicle.updated_at = now;

        let detail_source = reservation.clone();
        inner.reservations.insert(reservation.id, reservation);

        Ok(Self::detail(&inner, &detail_source))
    }

    async fn cancel(&self, reservation_id: Uuid, user_id: Uuid) -> AppResult<ReservationDetail> {
        let mut inner = self.inner.lock().unwrap();

        let reservation = match inner.reservations.get(&reservation_id) {
            Some(r) if r.user_id == user_id => r.clone(),
            _ => return Err(AppError::NotFound("Reserva no encontrada".to_string())),
        };

        if reservation.status == ReservationStatus::Cancelled.as_str() {
            return Err(AppError::Validation("Esta reserva ya está anulada".to_string()));
        }

        let now = Utc::now();
        {
            let stored = inner
                .reservations
                .get_mut(&reservation_id)
                .expect("verificado arriba");
            stored.status = ReservationStatus::Cancelled.as_str().to_string();
            stored.updated_at = now;
        }

        let vehicle_id = reservation.vehicle_id;
        let active_remaining = inner
            .reservations
            .values()
            .filter(|r| r.vehicle_id == vehicle_id)
            .filter(|r| {
                ReservationStatus::parse(&r.status).map_or(false, |status| status.is_active())
            })
            .count();

        if active_remaining == 0 {
            let vehicle = inner
                .vehicles
                .get_mut(&vehicle_id)
                .expect("vehículo presente en el store de test");
            vehicle.status = VehicleStatus::Available.as_str().to_string();
            vehicle.updated_at = now;
        }

        let updated = inner.reservations.get(&reservation_id).cloned().unwrap();
        Ok(Self::detail(&inner, &updated))
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<ReservationDetail>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .reservations
            .get(&id)
            .map(|r| Self::detail(&inner, r)))
    }

    async fn list_all_details(&self) -> AppResult<Vec<ReservationDetail>> {
        let inner = self.inner.lock().unwrap();
        let mut reservations: Vec<Reservation> = inner.reservations.values().cloned().collect();
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reservations
            .iter()
            .map(|r| Self::detail(&inner, r))
            .collect())
    }

    async fn list_details_for_user(&self, user_id: Uuid) -> AppResult<Vec<ReservationDetail>> {
        let inner = self.inner.lock().unwrap();
        let mut reservations: Vec<Reservation> = inner
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reservations
            .iter()
            .map(|r| Self::detail(&inner, r))
            .collect())
    }
}
