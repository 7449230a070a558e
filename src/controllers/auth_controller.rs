use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::{AuthData, LoginRequest, RegisterRequest, UserData};
use crate::dto::ApiResponse;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use crate::utils::validation::{validate_email, validate_not_empty};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<ApiResponse<AuthData>> {
        let (email, password, first_name, last_name) = match (
            request.email,
            request.password,
            request.first_name,
            request.last_name,
        ) {
            (Some(email), Some(password), Some(first_name), Some(last_name)) => {
                (email, password, first_name, last_name)
            }
            _ => {
                return Err(AppError::Validation(
                    "Todos los campos son requeridos".to_string(),
                ))
            }
        };

        for field in [&email, &password, &first_name, &last_name] {
            validate_not_empty(field).map_err(|_| {
                AppError::Validation("Todos los campos son requeridos".to_string())
            })?;
        }

        validate_email(&email)
            .map_err(|_| AppError::Validation("Email inválido".to_string()))?;

        // Verificar que el email no exista
        if self.repository.email_exists(&email).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        // Hash de la contraseña
        let password_hash = hash(&password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let user = User::new(email, password_hash, first_name, last_name);
        let saved_user = self.repository.create(&user).await?;

        let token = generate_token(saved_user.id, &saved_user.email, &self.jwt_config)?;

        Ok(ApiResponse::success_with_message(
            AuthData {
                user: saved_user.into(),
                token,
            },
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<AuthData>> {
        let (email, password) = match (request.email, request.password) {
            (Some(email), Some(password)) => (email, password),
            _ => {
                return Err(AppError::Validation(
                    "Email y contraseña son requeridos".to_string(),
                ))
            }
        };

        // Mismo mensaje para email desconocido y contraseña errónea
        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Email o contraseña incorrectos".to_string()))?;

        let valid = verify(&password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(
                "Email o contraseña incorrectos".to_string(),
            ));
        }

        let token = generate_token(user.id, &user.email, &self.jwt_config)?;

        Ok(ApiResponse::success_with_message(
            AuthData {
                user: user.into(),
                token,
            },
            "Inicio de sesión exitoso".to_string(),
        ))
    }

    pub async fn profile(&self, user_id: Uuid) -> AppResult<ApiResponse<UserData>> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(ApiResponse::success(UserData { user: user.into() }))
    }
}
