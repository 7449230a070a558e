use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AuthData, LoginRequest, RegisterRequest, UserData};
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/profile", get(get_profile))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserData>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.profile(user.user_id).await?;
    Ok(Json(response))
}
