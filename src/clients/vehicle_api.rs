//! Puerto de acceso al backend de vehículos.

use async_trait::async_trait;

use crate::dto::vehicle_dto::VehicleRecord;
use crate::utils::errors::AppResult;

/// Operaciones CRUD sobre `/api/vehicles`.
///
/// Trabaja con la forma de red; la conversión a modelo de vista la hace
/// quien consume el puerto. Implementado por el cliente HTTP y por el
/// almacén en memoria.
#[async_trait]
pub trait VehicleApi: Send + Sync {
    /// `GET /api/vehicles`
    async fn list_vehicles(&self) -> AppResult<Vec<VehicleRecord>>;

    /// `GET /api/vehicles/:id`
    async fn get_vehicle(&self, id: &str) -> AppResult<VehicleRecord>;

    /// `POST /api/vehicles`
    async fn create_vehicle(&self, record: &VehicleRecord) -> AppResult<VehicleRecord>;

    /// `PUT /api/vehicles/:id`
    async fn update_vehicle(&self, id: &str, record: &VehicleRecord) -> AppResult<VehicleRecord>;

    /// `DELETE /api/vehicles/:id`
    async fn delete_vehicle(&self, id: &str) -> AppResult<()>;
}
