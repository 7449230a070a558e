//! DTOs de la API
//!
//! Este módulo contiene los requests/responses de cada recurso y el
//! envelope uniforme {success, message, data} de todas las respuestas.

use serde::Serialize;

pub mod auth_dto;
pub mod reservation_dto;
pub mod vehicle_dto;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_empty_fields() {
        let response = ApiResponse::success(serde_json::json!({"ok": 1}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("message").is_none());
        assert_eq!(value["data"]["ok"], 1);
    }

    #[test]
    fn test_error_envelope() {
        let response = ApiResponse::error("falló".to_string());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "falló");
        assert!(value.get("data").is_none());
    }
}
