//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el envelope uniforme
//! {success, message, data}.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::reservation::ConflictingPeriod;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{message}")]
    ReservationConflict {
        message: String,
        conflicts: Vec<ConflictingPeriod>,
    },

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Los detalles de la base de datos solo van al log, nunca al cliente
            AppError::Database(e) => {
                tracing::error!("Error de base de datos: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Error interno del servidor"
                    }),
                )
            }

            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "message": msg
                }),
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "success": false,
                    "message": msg
                }),
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({
                    "success": false,
                    "message": msg
                }),
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": msg
                }),
            ),

            AppError::ReservationConflict { message, conflicts } => (
                StatusCode::CONFLICT,
                json!({
                    "success": false,
                    "message": message,
                    "data": {
                        "conflictingReservations": conflicts
                    }
                }),
            ),

            AppError::Jwt(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "success": false,
                    "message": msg
                }),
            ),

            AppError::Internal(msg) => {
                tracing::error!("Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Error interno del servidor"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("campo requerido".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("no existe".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_reservation_conflict_maps_to_409() {
        let conflicts = vec![ConflictingPeriod {
            start_date: Utc::now(),
            end_date: Utc::now(),
            reason: "viaje".to_string(),
        }];
        let response = AppError::ReservationConflict {
            message: "reservado".to_string(),
            conflicts,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = AppError::Internal("detalle privado".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_jwt_maps_to_401() {
        let response = AppError::Jwt("token inválido".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
