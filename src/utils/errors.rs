//! Sistema de manejo de errores
//!
//! Este módulo define los errores del cliente de inventario y del backend
//! de pruebas, y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Mensaje que usa el backend cuando el VIN ya está registrado
pub const DUPLICATE_VIN_MESSAGE: &str = "A vehicle with this VIN already exists";

/// Mensaje que usa el backend cuando faltan campos obligatorios
pub const REQUIRED_FIELDS_MESSAGE: &str = "VIN, Brand, and Model are required fields";

/// Mensaje mostrado al usuario cuando no hay respuesta del backend
pub const UNREACHABLE_MESSAGE: &str =
    "Could not connect to the backend. Make sure it is running.";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    /// Validación del formulario, antes de cualquier llamada de red
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate VIN: {0}")]
    DuplicateVin(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Respuesta no 2xx del backend
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No se recibió respuesta (conexión rechazada, timeout, DNS...)
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, AppError::Unreachable(_))
    }

    /// Texto para la notificación bloqueante que ve el usuario
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(errors) => {
                let fields = crate::utils::validation::field_messages(errors);
                let detail = fields
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, message))
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("Please fix the form: {}", detail)
            }
            AppError::NotFound(msg) | AppError::DuplicateVin(msg) | AppError::BadRequest(msg) => {
                msg.clone()
            }
            AppError::Server { status, message } => {
                format!("Server error ({}): {}", status, message)
            }
            AppError::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(e) => {
                log::warn!("⚠️ Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                log::warn!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::DuplicateVin(msg) => {
                log::warn!("🚫 Duplicate VIN: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("DUPLICATE_VIN".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                log::warn!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Server { status, message } => {
                log::error!("❌ Upstream error {}: {}", status, message);
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    ErrorResponse {
                        error: "Upstream Error".to_string(),
                        message,
                        details: None,
                        code: Some("UPSTREAM_ERROR".to_string()),
                    },
                )
            }

            AppError::Unreachable(msg) => {
                log::error!("❌ Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Service Unavailable".to_string(),
                        message: msg,
                        details: None,
                        code: Some("SERVICE_UNAVAILABLE".to_string()),
                    },
                )
            }

            AppError::InvalidResponse(msg) => {
                log::error!("❌ Invalid response: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Bad Gateway".to_string(),
                        message: "An invalid response was received".to_string(),
                        details: Some(json!({ "invalid_response": msg })),
                        code: Some("INVALID_RESPONSE".to_string()),
                    },
                )
            }

            AppError::Config(msg) | AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with ID {} not found", resource, id))
}

/// Función helper para el conflicto de VIN duplicado
pub fn duplicate_vin_error() -> AppError {
    AppError::DuplicateVin(DUPLICATE_VIN_MESSAGE.to_string())
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
