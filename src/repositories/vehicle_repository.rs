use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clients::vehicle_api::VehicleApi;
use crate::dto::vehicle_dto::VehicleRecord;
use crate::utils::errors::{
    bad_request_error, duplicate_vin_error, not_found_error, AppResult, REQUIRED_FIELDS_MESSAGE,
};

pub const YEAR_NOT_NUMBER_MESSAGE: &str = "Year must be a number";

// Almacén en memoria con la misma semántica que el backend real
#[derive(Debug, Clone, Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Arc<RwLock<Vec<VehicleRecord>>>,
}

fn seed_record(id: &str, vin: &str, make: &str, model: &str, year: &str, location: &str, status: bool) -> VehicleRecord {
    VehicleRecord {
        id: Some(id.to_string()),
        vin: vin.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        model_year: year.to_string(),
        location: Some(location.to_string()),
        status,
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn same_vin(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn vin_taken(vehicles: &[VehicleRecord], vin: &str, exclude_id: Option<&str>) -> bool {
    vehicles
        .iter()
        .any(|v| same_vin(&v.vin, vin) && (exclude_id.is_none() || v.id.as_deref() != exclude_id))
}

/// Año recortado; vacío usa `fallback`, no numérico es un 400
fn model_year_or(raw: &str, fallback: impl FnOnce() -> String) -> AppResult<String> {
    let year = raw.trim();
    if year.is_empty() {
        return Ok(fallback());
    }
    year.parse::<i32>()
        .map(|y| y.to_string())
        .map_err(|_| bad_request_error(YEAR_NOT_NUMBER_MESSAGE))
}

fn require_fields(data: &VehicleRecord) -> AppResult<()> {
    if is_blank(&data.vin) || is_blank(&data.make) || is_blank(&data.model) {
        return Err(bad_request_error(REQUIRED_FIELDS_MESSAGE));
    }
    Ok(())
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<VehicleRecord>) -> Self {
        Self {
            vehicles: Arc::new(RwLock::new(records)),
        }
    }

    /// Tres vehículos de ejemplo
    pub fn with_seed_data() -> Self {
        Self::from_records(vec![
            seed_record("1", "WBA3A5C50CF370001", "BMW", "X3", "2020", "Madrid", true),
            seed_record("2", "WAUAF78E67A123456", "Audi", "A4", "2019", "Barcelona", false),
            seed_record("3", "JH4KA8260PC123456", "Mercedes", "C-Class", "2021", "Valencia", true),
        ])
    }

    pub async fn len(&self) -> usize {
        self.vehicles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.vehicles.read().await.is_empty()
    }

    pub async fn find_all(&self) -> Vec<VehicleRecord> {
        self.vehicles.read().await.clone()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<VehicleRecord> {
        self.vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id.as_deref() == Some(id))
            .cloned()
    }

    pub async fn vin_exists(&self, vin: &str, exclude_id: Option<&str>) -> bool {
        vin_taken(&self.vehicles.read().await, vin, exclude_id)
    }

    pub async fn create(&self, data: VehicleRecord) -> AppResult<VehicleRecord> {
        require_fields(&data)?;

        let model_year = model_year_or(&data.model_year, || Utc::now().year().to_string())?;

        // Verificación e inserción bajo el mismo lock de escritura
        let mut vehicles = self.vehicles.write().await;
        if vin_taken(&vehicles, &data.vin, None) {
            return Err(duplicate_vin_error());
        }

        let vehicle = VehicleRecord {
            id: Some(Uuid::new_v4().to_string()),
            vin: data.vin.trim().to_string(),
            make: data.make.trim().to_string(),
            model: data.model.trim().to_string(),
            model_year,
            location: non_blank(data.location),
            status: data.status,
        };

        vehicles.push(vehicle.clone());
        log::info!("✅ Vehículo {} creado (VIN {})", vehicle.id.as_deref().unwrap_or_default(), vehicle.vin);
        Ok(vehicle)
    }

    pub async fn update(&self, id: &str, data: VehicleRecord) -> AppResult<VehicleRecord> {
        let mut vehicles = self.vehicles.write().await;

        let index = vehicles
            .iter()
            .position(|v| v.id.as_deref() == Some(id))
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        require_fields(&data)?;

        // VIN duplicado, excepto en el mismo vehículo
        if vin_taken(&vehicles, &data.vin, Some(id)) {
            return Err(duplicate_vin_error());
        }

        let current = &vehicles[index];
        let model_year = model_year_or(&data.model_year, || current.model_year.clone())?;
        let updated = VehicleRecord {
            id: current.id.clone(),
            vin: data.vin.trim().to_string(),
            make: data.make.trim().to_string(),
            model: data.model.trim().to_string(),
            model_year,
            location: non_blank(data.location).or_else(|| current.location.clone()),
            status: data.status,
        };

        vehicles[index] = updated.clone();
        log::info!("✅ Vehículo {} actualizado", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<VehicleRecord> {
        let mut vehicles = self.vehicles.write().await;

        let index = vehicles
            .iter()
            .position(|v| v.id.as_deref() == Some(id))
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let deleted = vehicles.remove(index);
        log::info!("🗑️ Vehículo {} eliminado", id);
        Ok(deleted)
    }
}

#[async_trait]
impl VehicleApi for InMemoryVehicleRepository {
    async fn list_vehicles(&self) -> AppResult<Vec<VehicleRecord>> {
        Ok(self.find_all().await)
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<VehicleRecord> {
        self.find_by_id(id)
            .await
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    async fn create_vehicle(&self, record: &VehicleRecord) -> AppResult<VehicleRecord> {
        self.create(record.clone()).await
    }

    async fn update_vehicle(&self, id: &str, record: &VehicleRecord) -> AppResult<VehicleRecord> {
        self.update(id, record.clone()).await
    }

    async fn delete_vehicle(&self, id: &str) -> AppResult<()> {
        self.delete(id).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn new_record(vin: &str) -> VehicleRecord {
        VehicleRecord {
            id: None,
            vin: vin.to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            model_year: "2022".to_string(),
            location: Some("Sevilla".to_string()),
            status: true,
        }
    }

    #[tokio::test]
    async fn test_seed_data() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        assert_eq!(repo.len().await, 3);
        let audi = repo.find_by_id("2").await.unwrap();
        assert_eq!(audi.make, "Audi");
        assert!(!audi.status);
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = InMemoryVehicleRepository::new();
        let created = repo.create(new_record("JTDBR32E720123456")).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(repo.len().await, 1);
        assert!(repo.vin_exists("jtdbr32e720123456", None).await);
    }

    #[tokio::test]
    async fn test_create_duplicate_vin_is_rejected() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        let err = repo.create(new_record("WBA3A5C50CF370001")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateVin(_)));
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let repo = InMemoryVehicleRepository::new();
        let record = VehicleRecord {
            make: "  ".to_string(),
            ..new_record("JTDBR32E720123456")
        };
        let err = repo.create(record).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == REQUIRED_FIELDS_MESSAGE));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_defaults_blank_year() {
        let repo = InMemoryVehicleRepository::new();
        let record = VehicleRecord {
            model_year: String::new(),
            ..new_record("JTDBR32E720123456")
        };
        let created = repo.create(record).await.unwrap();
        assert_eq!(created.model_year, Utc::now().year().to_string());
    }

    #[tokio::test]
    async fn test_non_numeric_year_is_rejected() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        let record = VehicleRecord {
            model_year: "abc".to_string(),
            ..new_record("JTDBR32E720123456")
        };

        let err = repo.create(record.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == YEAR_NOT_NUMBER_MESSAGE));
        assert_eq!(repo.len().await, 3);

        let err = repo.update("1", record).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == YEAR_NOT_NUMBER_MESSAGE));
        assert_eq!(repo.find_by_id("1").await.unwrap().model_year, "2020");

        // Todo lo guardado sigue siendo legible por el cliente
        let records = repo.find_all().await;
        assert!(crate::dto::vehicle_dto::to_view_list(records).is_ok());
    }

    #[tokio::test]
    async fn test_vin_exists_excludes_given_id() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        assert!(repo.vin_exists(" wba3a5c50cf370001 ", None).await);
        assert!(!repo.vin_exists("WBA3A5C50CF370001", Some("1")).await);
        assert!(repo.vin_exists("WBA3A5C50CF370001", Some("2")).await);
    }

    #[tokio::test]
    async fn test_update_keeps_own_vin_and_blank_fields() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        let data = VehicleRecord {
            vin: "WBA3A5C50CF370001".to_string(),
            make: "BMW".to_string(),
            model: "X5".to_string(),
            model_year: " ".to_string(),
            location: None,
            status: false,
            id: None,
        };
        let updated = repo.update("1", data).await.unwrap();
        assert_eq!(updated.id.as_deref(), Some("1"));
        assert_eq!(updated.model, "X5");
        assert_eq!(updated.model_year, "2020");
        assert_eq!(updated.location.as_deref(), Some("Madrid"));
        assert!(!updated.status);
    }

    #[tokio::test]
    async fn test_update_rejects_other_vehicle_vin() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        let data = VehicleRecord {
            vin: "WAUAF78E67A123456".to_string(),
            ..new_record("")
        };
        let err = repo.update("1", data).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateVin(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        let err = repo.update("99", new_record("JTDBR32E720123456")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = repo.delete("99").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Vehicle with ID 99 not found"));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryVehicleRepository::with_seed_data();
        let deleted = repo.delete("3").await.unwrap();
        assert_eq!(deleted.make, "Mercedes");
        assert!(repo.find_by_id("3").await.is_none());

        let err = repo.delete_vehicle("3").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
