//! Shared application state
//!
//! Estado compartido del backend de pruebas que se pasa a través del
//! router de Axum.

use crate::config::environment::ServerConfig;
use crate::repositories::vehicle_repository::InMemoryVehicleRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: InMemoryVehicleRepository,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(repository: InMemoryVehicleRepository, config: ServerConfig) -> Self {
        Self { repository, config }
    }
}
