mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{http::StatusCode, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use dto::ApiResponse;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚗 Vehicle Reservation API");
    info!("==========================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);

    // Crear router de la API
    let app = Router::new()
        .route("/api/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router(app_state.clone()))
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router(app_state.clone()))
        .nest(
            "/api/reservations",
            routes::reservation_routes::create_reservation_router(app_state.clone()),
        )
        .fallback(fallback_endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(&app_state.config.cors_origins))
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login usuario");
    info!("   GET  /api/auth/profile - Perfil del usuario actual");
    info!("🚗 Endpoints - Vehicles:");
    info!("   GET  /api/vehicles - Listar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/:id/availability - Verificar disponibilidad");
    info!("📅 Endpoints - Reservations:");
    info!("   POST /api/reservations - Crear reserva");
    info!("   GET  /api/reservations - Listar todas las reservas");
    info!("   GET  /api/reservations/my-reservations - Reservas del usuario");
    info!("   GET  /api/reservations/:id - Obtener reserva");
    info!("   DELETE /api/reservations/:id - Anular reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check de la API
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Vehicle Reservation API is running",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Respuesta uniforme para rutas inexistentes
async fn fallback_endpoint() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Ruta no encontrada".to_string())),
    )
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
