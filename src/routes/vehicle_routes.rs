use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{AvailabilityData, AvailabilityQuery, VehicleData, VehicleListData};
use crate::dto::ApiResponse;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/availability", get(check_availability))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<VehicleListData>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VehicleData>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityData>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.check_availability(&id, query).await?;
    Ok(Json(response))
}
