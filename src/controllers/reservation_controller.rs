use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::dto::reservation_dto::{
    CreateReservationRequest, ReservationData, ReservationListData, UserReservationListData,
};
use crate::dto::ApiResponse;
use crate::models::reservation::NewReservation;
use crate::repositories::store::ReservationStore;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_datetime, validate_not_empty};

pub struct ReservationController {
    store: Arc<dyn ReservationStore>,
}

impl ReservationController {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateReservationRequest,
    ) -> AppResult<ApiResponse<ReservationData>> {
        let (vehicle_raw, start_raw, end_raw, reason) = match (
            request.vehicle_id,
            request.start_date,
            request.end_date,
            request.reason,
        ) {
            (Some(vehicle_id), Some(start), Some(end), Some(reason)) => {
                (vehicle_id, start, end, reason)
            }
            _ => {
                return Err(AppError::Validation(
                    "Todos los campos son requeridos".to_string(),
                ))
            }
        };

        validate_not_empty(&reason)
            .map_err(|_| AppError::Validation("Todos los campos son requeridos".to_string()))?;

        let start_date = validate_datetime(&start_raw).map_err(|_| {
            AppError::Validation("Formato de fecha inválido (se espera RFC 3339)".to_string())
        })?;
        let end_date = validate_datetime(&end_raw).map_err(|_| {
            AppError::Validation("Formato de fecha inválido (se espera RFC 3339)".to_string())
        })?;

        if end_date <= start_date {
            return Err(AppError::Validation(
                "La fecha de fin debe ser posterior a la de inicio".to_string(),
            ));
        }

        // Solo el inicio se compara contra ahora; el fin ya quedó ordenado
        if start_date < Utc::now() {
            return Err(AppError::Validation(
                "La fecha de inicio no puede estar en el pasado".to_string(),
            ));
        }

        // Un id que no parsea como UUID se comporta como vehículo inexistente
        let vehicle_id = Uuid::parse_str(&vehicle_raw)
            .map_err(|_| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Verificación de vehículo, chequeo de solapamiento, inserción y
        // cambio de estado viajan juntos como operación atómica del store
        let detail = self
            .store
            .reserve(NewReservation {
                user_id,
                vehicle_id,
                start_date,
                end_date,
                reason,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            ReservationData {
                reservation: detail.into(),
            },
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn cancel(&self, user_id: Uuid, id: &str) -> AppResult<ApiResponse<ReservationData>> {
        let reservation_id = Uuid::parse_str(id)
            .map_err(|_| AppError::NotFound("Reserva no encontrada".to_string()))?;

        let detail = self.store.cancel(reservation_id, user_id).await?;

        Ok(ApiResponse::success_with_message(
            ReservationData {
                reservation: detail.into(),
            },
            "Reserva anulada exitosamente".to_string(),
        ))
    }

    pub async fn my_reservations(
        &self,
        user_id: Uuid,
    ) -> AppResult<ApiResponse<UserReservationListData>> {
        let details = self.store.list_details_for_user(user_id).await?;

        Ok(ApiResponse::success(UserReservationListData {
            reservations: details.into_iter().map(Into::into).collect(),
        }))
    }

    pub async fn get_all(&self) -> AppResult<ApiResponse<ReservationListData>> {
        let details = self.store.list_all_details().await?;

        Ok(ApiResponse::success(ReservationListData {
            reservations: details.into_iter().map(Into::into).collect(),
        }))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<ApiResponse<ReservationData>> {
        let reservation_id = Uuid::parse_str(id)
            .map_err(|_| AppError::NotFound("Reserva no encontrada".to_string()))?;

        let detail = self
            .store
            .find_detail(reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(ApiResponse::success(ReservationData {
            reservation: detail.into(),
        }))
    }
}
