use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::reservation::{
    ConflictingPeriod, NewReservation, Reservation, ReservationDetail, ReservationStatus,
};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::store::ReservationStore;
use crate::utils::errors::{AppError, AppResult};

// Predicado de solapamiento de intervalos cerrados sobre reservas activas:
// existing.start <= candidate_end AND existing.end >= candidate_start
const OVERLAP_SQL: &str = r#"
    SELECT * FROM reservations
    WHERE vehicle_id = $1
      AND status IN ($2, $3)
      AND start_date <= $4
      AND end_date >= $5
    ORDER BY start_date ASC
"#;

const DETAIL_SELECT: &str = r#"
    SELECT r.id, r.user_id, r.vehicle_id, r.start_date, r.end_date, r.reason, r.status,
           r.created_at, r.updated_at,
           v.brand AS vehicle_brand, v.model AS vehicle_model,
           v.registration_number AS vehicle_registration_number, v.status AS vehicle_status,
           u.email AS user_email, u.first_name AS user_first_name, u.last_name AS user_last_name
    FROM reservations r
    JOIN vehicles v ON v.id = r.vehicle_id
    JOIN users u ON u.id = r.user_id
"#;

pub struct PgReservationStore {
    pool: PgPool,
}

impl PgReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        candidate_start: DateTime<Utc>,
        candidate_end: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(OVERLAP_SQL)
            .bind(vehicle_id)
            .bind(ReservationStatus::Pending.as_str())
            .bind(ReservationStatus::Confirmed.as_str())
            .bind(candidate_end)
            .bind(candidate_start)
            .fetch_all(&self.pool)
            .await?;

        Ok(reservations)
    }

    async fn reserve(&self, new_reservation: NewReservation) -> AppResult<ReservationDetail> {
        let mut tx = self.pool.begin().await?;

        // Lock por vehículo: serializa creaciones concurrentes sobre el
        // mismo vehículo, cerrando la carrera chequear-luego-insertar
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(new_reservation.vehicle_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let conflicts = sqlx::query_as::<_, Reservation>(OVERLAP_SQL)
            .bind(vehicle.id)
            .bind(ReservationStatus::Pending.as_str())
            .bind(ReservationStatus::Confirmed.as_str())
            .bind(new_reservation.end_date)
            .bind(new_reservation.start_date)
            .fetch_all(&mut *tx)
            .await?;

        if !conflicts.is_empty() {
            return Err(AppError::ReservationConflict {
                message: "El vehículo ya está reservado para este período".to_string(),
                conflicts: conflicts.iter().map(ConflictingPeriod::from).collect(),
            });
        }

        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO reservations (id, user_id, vehicle_id, start_date, end_date, reason, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(new_reservation.user_id)
        .bind(vehicle.id)
        .bind(new_reservation.start_date)
        .bind(new_reservation.end_date)
        .bind(&new_reservation.reason)
        .bind(ReservationStatus::Confirmed.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // El estado del vehículo es una bandera "tiene alguna reserva
        // activa": se pone en 'reserved' incondicionalmente y solo se
        // reevalúa al anular
        sqlx::query("UPDATE vehicles SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(vehicle.id)
            .bind(VehicleStatus::Reserved.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.find_detail(id)
            .await?
            .ok_or_else(|| AppError::Internal("No se pudo recuperar la reserva creada".to_string()))
    }

    async fn cancel(&self, reservation_id: Uuid, user_id: Uuid) -> AppResult<ReservationDetail> {
        let mut tx = self.pool.begin().await?;

        // Restringido a id AND user_id: una reserva ajena responde igual
        // que una inexistente
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(reservation_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if reservation.status == ReservationStatus::Cancelled.as_str() {
            return Err(AppError::Validation("Esta reserva ya está anulada".to_string()));
        }

        // Mismo lock de vehículo que reserve() antes de recontar activas
        sqlx::query("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(reservation.vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;

        let now = Utc::now();

        sqlx::query("UPDATE reservations SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(reservation.id)
            .bind(ReservationStatus::Cancelled.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;

        let (active_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM reservations WHERE vehicle_id = $1 AND status IN ($2, $3)",
        )
        .bind(reservation.vehicle_id)
        .bind(ReservationStatus::Pending.as_str())
        .bind(ReservationStatus::Confirmed.as_str())
        .fetch_one(&mut *tx)
        .await?;

        if active_count == 0 {
            sqlx::query("UPDATE vehicles SET status = $2, updated_at = $3 WHERE id = $1")
                .bind(reservation.vehicle_id)
                .bind(VehicleStatus::Available.as_str())
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.find_detail(reservation.id)
            .await?
            .ok_or_else(|| AppError::Internal("No se pudo recuperar la reserva anulada".to_string()))
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<ReservationDetail>> {
        let sql = format!("{} WHERE r.id = $1", DETAIL_SELECT);

        let detail = sqlx::query_as::<_, ReservationDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(detail)
    }

    async fn list_all_details(&self) -> AppResult<Vec<ReservationDetail>> {
        let sql = format!("{} ORDER BY r.created_at DESC", DETAIL_SELECT);

        let details = sqlx::query_as::<_, ReservationDetail>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(details)
    }

    async fn list_details_for_user(&self, user_id: Uuid) -> AppResult<Vec<ReservationDetail>> {
        let sql = format!("{} WHERE r.user_id = $1 ORDER BY r.created_at DESC", DETAIL_SELECT);

        let details = sqlx::query_as::<_, ReservationDetail>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(details)
    }
}
