//! Cliente HTTP para el backend de vehículos
//!
//! Una petición por operación, sin reintentos. Cualquier respuesta no 2xx
//! se reporta como fallo del servidor; si no hay respuesta, como backend
//! inalcanzable.

use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::vehicle_api::VehicleApi;
use crate::config::ClientConfig;
use crate::dto::vehicle_dto::VehicleRecord;
use crate::utils::errors::{AppError, AppResult};

const VEHICLES_PATH: &str = "/api/vehicles";

lazy_static! {
    static ref DUPLICATE_VIN_RE: Regex = Regex::new(
        r"(?i)(\bvin\b.*\b(already exists|already registered|duplicated?|in use)\b)|(\bduplicate\b.*vin)"
    )
    .expect("duplicate VIN pattern is valid");
}

/// ¿El mensaje del servidor corresponde a un VIN duplicado?
pub fn is_duplicate_vin_message(message: &str) -> bool {
    DUPLICATE_VIN_RE.is_match(message)
}

/// Cliente HTTP para `/api/vehicles`
#[derive(Debug, Clone)]
pub struct VehicleHttpClient {
    client: Client,
    base_url: String,
}

impl VehicleHttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Error creating HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> AppResult<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, VEHICLES_PATH)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, VEHICLES_PATH, urlencoding::encode(id))
    }

    /// Envía la petición y separa los tres casos: éxito, error del
    /// servidor, sin respuesta.
    async fn send(&self, request: RequestBuilder, operation: &str) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            log::error!("❌ {} sin respuesta del backend: {}", operation, e);
            AppError::Unreachable(format!("{}: {}", operation, e))
        })?;

        let status = response.status();
        log::debug!("📡 {} -> {}", operation, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = error_from_status(status, &body);
        log::warn!("⚠️ {} falló: {}", operation, error);
        Err(error)
    }

    async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> AppResult<T> {
        response.json::<T>().await.map_err(|e| {
            AppError::InvalidResponse(format!("{}: could not decode response: {}", operation, e))
        })
    }
}

/// Traduce una respuesta no 2xx a `AppError`
pub fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    });

    if status == StatusCode::CONFLICT || is_duplicate_vin_message(&message) {
        AppError::DuplicateVin(message)
    } else if status == StatusCode::NOT_FOUND {
        AppError::NotFound(message)
    } else {
        AppError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// Mensaje legible del cuerpo de error: `message`, luego `error`, luego
/// el texto tal cual.
fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        Ok(Value::String(message)) => Some(message),
        _ => Some(body.to_string()),
    }
}

#[async_trait]
impl VehicleApi for VehicleHttpClient {
    async fn list_vehicles(&self) -> AppResult<Vec<VehicleRecord>> {
        let response = self
            .send(self.client.get(self.collection_url()), "GET vehicles")
            .await?;
        let records: Vec<VehicleRecord> = Self::decode(response, "GET vehicles").await?;
        log::info!("✅ {} vehículos recibidos", records.len());
        Ok(records)
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<VehicleRecord> {
        let response = self
            .send(self.client.get(self.item_url(id)), "GET vehicle")
            .await?;
        Self::decode(response, "GET vehicle").await
    }

    async fn create_vehicle(&self, record: &VehicleRecord) -> AppResult<VehicleRecord> {
        log::info!("🚗 Creando vehículo con VIN {}", record.vin);
        let response = self
            .send(
                self.client.post(self.collection_url()).json(record),
                "POST vehicle",
            )
            .await?;
        Self::decode(response, "POST vehicle").await
    }

    async fn update_vehicle(&self, id: &str, record: &VehicleRecord) -> AppResult<VehicleRecord> {
        log::info!("✏️ Actualizando vehículo {}", id);
        let response = self
            .send(self.client.put(self.item_url(id)).json(record), "PUT vehicle")
            .await?;
        Self::decode(response, "PUT vehicle").await
    }

    async fn delete_vehicle(&self, id: &str) -> AppResult<()> {
        log::info!("🗑️ Eliminando vehículo {}", id);
        // El cuerpo de la respuesta, si lo hay, no se usa
        self.send(self.client.delete(self.item_url(id)), "DELETE vehicle")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = VehicleHttpClient::new("http://localhost:3000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.collection_url(), "http://localhost:3000/api/vehicles");
        assert_eq!(client.item_url("abc 1"), "http://localhost:3000/api/vehicles/abc%201");
    }

    #[test]
    fn test_duplicate_vin_phrasing() {
        assert!(is_duplicate_vin_message("A vehicle with this VIN already exists"));
        assert!(is_duplicate_vin_message("vin is already registered"));
        assert!(is_duplicate_vin_message(
            "duplicate key value violates unique constraint \"vehicles_vin_key\""
        ));
        assert!(!is_duplicate_vin_message("Vehicle with ID 9 not found"));
        assert!(!is_duplicate_vin_message("VIN, Brand, and Model are required fields"));
    }

    #[test]
    fn test_error_from_status() {
        let err = error_from_status(StatusCode::NOT_FOUND, r#"{"message": "Vehicle with ID 9 not found"}"#);
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Vehicle with ID 9 not found"));

        let err = error_from_status(StatusCode::CONFLICT, "");
        assert!(matches!(err, AppError::DuplicateVin(ref m) if m == "Conflict"));

        let err = error_from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "A vehicle with this VIN already exists"}"#,
        );
        assert!(matches!(err, AppError::DuplicateVin(_)));

        let err = error_from_status(StatusCode::BAD_REQUEST, "plain failure");
        assert!(matches!(
            err,
            AppError::Server { status: 400, ref message } if message == "plain failure"
        ));
    }
}
