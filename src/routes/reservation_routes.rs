use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::reservation_dto::{
    CreateReservationRequest, ReservationData, ReservationListData, UserReservationListData,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reservation_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_reservation))
        .route("/", get(get_all_reservations))
        .route("/my-reservations", get(get_my_reservations))
        .route("/:id", get(get_reservation))
        .route("/:id", delete(cancel_reservation))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationData>>), AppError> {
    let controller = ReservationController::new(state.store.clone());
    let response = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_my_reservations(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserReservationListData>>, AppError> {
    let controller = ReservationController::new(state.store.clone());
    let response = controller.my_reservations(user.user_id).await?;
    Ok(Json(response))
}

async fn get_all_reservations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReservationListData>>, AppError> {
    let controller = ReservationController::new(state.store.clone());
    let response = controller.get_all().await?;
    Ok(Json(response))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationData>>, AppError> {
    let controller = ReservationController::new(state.store.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationData>>, AppError> {
    let controller = ReservationController::new(state.store.clone());
    let response = controller.cancel(user.user_id, &id).await?;
    Ok(Json(response))
}
