use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;

// Request para registrar un usuario
// Los campos son opcionales para que la ausencia se reporte como 400 con
// envelope, no como rechazo del deserializador.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// Response de usuario (sin password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

// Payload de register/login: usuario + token emitido
#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserResponse,
    pub token: String,
}

// Payload de perfil
#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: UserResponse,
}
