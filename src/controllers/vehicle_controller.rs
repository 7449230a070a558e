use std::sync::Arc;

use uuid::Uuid;

use crate::dto::vehicle_dto::{AvailabilityData, AvailabilityQuery, VehicleData, VehicleListData};
use crate::dto::ApiResponse;
use crate::models::vehicle::Vehicle;
use crate::repositories::store::ReservationStore;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_datetime;

pub struct VehicleController {
    store: Arc<dyn ReservationStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<ApiResponse<VehicleListData>> {
        let vehicles = self.store.list_vehicles().await?;
        Ok(ApiResponse::success(VehicleListData { vehicles }))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<ApiResponse<VehicleData>> {
        let vehicle = self.find_vehicle(id).await?;
        Ok(ApiResponse::success(VehicleData { vehicle }))
    }

    pub async fn check_availability(
        &self,
        id: &str,
        query: AvailabilityQuery,
    ) -> AppResult<ApiResponse<AvailabilityData>> {
        // Las fechas se validan antes de mirar el vehículo
        let (start_raw, end_raw) = match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AppError::Validation(
                    "Las fechas de inicio y fin son requeridas".to_string(),
                ))
            }
        };

        let start = validate_datetime(&start_raw).map_err(|_| {
            AppError::Validation("Formato de fecha inválido (se espera RFC 3339)".to_string())
        })?;
        let end = validate_datetime(&end_raw).map_err(|_| {
            AppError::Validation("Formato de fecha inválido (se espera RFC 3339)".to_string())
        })?;

        let vehicle = self.find_vehicle(id).await?;
        let conflicting_reservations = self.store.find_overlapping(vehicle.id, start, end).await?;

        Ok(ApiResponse::success(AvailabilityData {
            available: conflicting_reservations.is_empty(),
            vehicle,
            conflicting_reservations,
        }))
    }

    async fn find_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        // Un id que no parsea como UUID se comporta como vehículo inexistente
        let vehicle_id = Uuid::parse_str(id)
            .map_err(|_| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        self.store
            .find_vehicle(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::reservation_dto::CreateReservationRequest;
    use crate::controllers::reservation_controller::ReservationController;
    use crate::repositories::memory::InMemoryStore;
    use chrono::{DateTime, Duration, Utc};

    fn day(offset: i64) -> DateTime<Utc> {
        Utc::now() + Duration::days(offset)
    }

    fn setup() -> (Arc<InMemoryStore>, VehicleController) {
        let store = Arc::new(InMemoryStore::new());
        let controller = VehicleController::new(store.clone());
        (store, controller)
    }

    async fn reserve(store: &Arc<InMemoryStore>, vehicle_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) {
        let user_id = store.add_user("luis@example.com", "Luis", "Pérez");
        let controller = ReservationController::new(store.clone());
        controller
            .create(
                user_id,
                CreateReservationRequest {
                    vehicle_id: Some(vehicle_id.to_string()),
                    start_date: Some(start.to_rfc3339()),
                    end_date: Some(end.to_rfc3339()),
                    reason: Some("entrega".to_string()),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_availability_is_true_without_reservations() {
        let (store, controller) = setup();
        let vehicle_id = store.add_vehicle("Honda", "Civic", "TG-5678-CD");

        let query = AvailabilityQuery {
            start_date: Some(day(1).to_rfc3339()),
            end_date: Some(day(2).to_rfc3339()),
        };
        let response = controller
            .check_availability(&vehicle_id.to_string(), query)
            .await
            .unwrap();
        let data = response.data.unwrap();

        assert!(data.available);
        assert!(data.conflicting_reservations.is_empty());
        assert_eq!(data.vehicle.registration_number, "TG-5678-CD");
    }

    #[tokio::test]
    async fn test_availability_reports_conflicts() {
        let (store, controller) = setup();
        let vehicle_id = store.add_vehicle("Honda", "Civic", "TG-5678-CD");
        reserve(&store, vehicle_id, day(1), day(3)).await;

        let query = AvailabilityQuery {
            start_date: Some(day(2).to_rfc3339()),
            end_date: Some(day(4).to_rfc3339()),
        };
        let response = controller
            .check_availability(&vehicle_id.to_string(), query)
            .await
            .unwrap();
        let data = response.data.unwrap();

        assert!(!data.available);
        assert_eq!(data.conflicting_reservations.len(), 1);
        assert_eq!(data.conflicting_reservations[0].reason, "entrega");
    }

    #[tokio::test]
    async fn test_availability_requires_both_dates() {
        let (store, controller) = setup();
        let vehicle_id = store.add_vehicle("Honda", "Civic", "TG-5678-CD");

        let query = AvailabilityQuery {
            start_date: Some(day(1).to_rfc3339()),
            end_date: None,
        };
        let result = controller
            .check_availability(&vehicle_id.to_string(), query)
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_availability_unknown_vehicle_is_not_found() {
        let (_, controller) = setup();

        let query = AvailabilityQuery {
            start_date: Some(day(1).to_rfc3339()),
            end_date: Some(day(2).to_rfc3339()),
        };
        let result = controller
            .check_availability(&Uuid::new_v4().to_string(), query)
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_with_malformed_id_is_not_found() {
        let (_, controller) = setup();
        let result = controller.get_by_id("no-es-un-uuid").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
