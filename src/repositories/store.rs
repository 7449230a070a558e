//! Interfaz del almacén de reservas
//!
//! El trait expone las operaciones compuestas Create/Cancel como métodos
//! atómicos únicos, nunca como lecturas y escrituras separadas: cualquier
//! implementación debe garantizar que la secuencia chequeo-de-solapamiento
//! + inserción + cambio de estado del vehículo no tenga carreras.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::reservation::{NewReservation, Reservation, ReservationDetail};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Buscar un vehículo por id
    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Listar todos los vehículos, más recientes primero
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    /// Reservas activas del vehículo que chocan con el rango candidato
    /// (intervalo cerrado: compartir frontera cuenta como conflicto)
    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        candidate_start: DateTime<Utc>,
        candidate_end: DateTime<Utc>,
    ) -> AppResult<Vec<Reservation>>;

    /// Operación compuesta de creación: verifica el vehículo, re-ejecuta el
    /// chequeo de solapamiento, inserta la reserva como 'confirmed' y marca
    /// el vehículo como 'reserved', todo como unidad atómica.
    ///
    /// Errores: NotFound si el vehículo no existe, ReservationConflict con
    /// la lista completa de períodos si hay solapamiento.
    async fn reserve(&self, new_reservation: NewReservation) -> AppResult<ReservationDetail>;

    /// Operación compuesta de anulación: carga la reserva restringida a
    /// `id AND user_id` (una reserva ajena es NotFound, igual que una
    /// inexistente), la marca 'cancelled' y devuelve el vehículo a
    /// 'available' solo si no queda ninguna otra reserva activa.
    ///
    /// Errores: NotFound si no existe o no es del usuario, Validation si
    /// ya estaba anulada.
    async fn cancel(&self, reservation_id: Uuid, user_id: Uuid) -> AppResult<ReservationDetail>;

    /// Reserva con sus relaciones embebidas
    async fn find_detail(&self, id: Uuid) -> AppResult<Option<ReservationDetail>>;

    /// Todas las reservas con relaciones, más recientes primero
    async fn list_all_details(&self) -> AppResult<Vec<ReservationDetail>>;

    /// Reservas de un usuario con relaciones, más recientes primero
    async fn list_details_for_user(&self, user_id: Uuid) -> AppResult<Vec<ReservationDetail>>;
}
