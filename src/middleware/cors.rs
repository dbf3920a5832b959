//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde el front end de inventario.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::ServerConfig;

/// CORS según el entorno: permisivo en desarrollo, lista de orígenes si no
pub fn cors_for(config: &ServerConfig) -> CorsLayer {
    if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    }
}

/// NOTA: Permite cualquier origen - solo para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Crear middleware de CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}
