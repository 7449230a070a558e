//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::postgres::PgReservationStore;
use crate::repositories::store::ReservationStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub store: Arc<dyn ReservationStore>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let store: Arc<dyn ReservationStore> = Arc::new(PgReservationStore::new(pool.clone()));
        Self { pool, config, store }
    }
}
