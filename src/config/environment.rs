//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente y del backend de
//! pruebas. Las variables ausentes usan valores por defecto; las mal
//! formadas son un error de configuración.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::vehicle_list::DEFAULT_PAGE_SIZE;
use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn parse_var<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("{} has an invalid value: '{}'", key, raw)))
}

fn env_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_var(key, &raw),
        _ => Ok(default),
    }
}

fn parse_flag(key: &str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!("{} has an invalid value: '{}'", key, raw))),
    }
}

fn env_flag(key: &str, default: bool) -> AppResult<bool> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_flag(key, &raw),
        _ => Ok(default),
    }
}

/// Configuración del cliente de inventario
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL base del backend, sin `/api/vehicles`
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout: Duration,
    /// Usar el almacén en memoria en lugar del backend HTTP
    pub use_mock_store: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            use_mock_store: false,
        }
    }
}

impl ClientConfig {
    /// Lee `VEHICLE_API_URL`, `VEHICLE_PAGE_SIZE`,
    /// `VEHICLE_REQUEST_TIMEOUT_SECS` y `VEHICLE_USE_MOCK_STORE`
    pub fn from_env() -> AppResult<Self> {
        let page_size: usize = env_or("VEHICLE_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(AppError::Config("VEHICLE_PAGE_SIZE must be at least 1".to_string()));
        }

        let timeout_secs: u64 = env_or("VEHICLE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url: env_or("VEHICLE_API_URL", DEFAULT_API_URL.to_string())?,
            page_size,
            request_timeout: Duration::from_secs(timeout_secs),
            use_mock_store: env_flag("VEHICLE_USE_MOCK_STORE", false)?,
        })
    }
}

/// Configuración del backend de pruebas
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Orígenes permitidos fuera de desarrollo
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl ServerConfig {
    /// Lee `ENVIRONMENT`, `HOST`, `PORT` y `CORS_ORIGINS` (separados por comas)
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            environment: env_or("ENVIRONMENT", defaults.environment)?,
            host: env_or("HOST", defaults.host)?,
            port: env_or("PORT", defaults.port)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
