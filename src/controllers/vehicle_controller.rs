use std::sync::Arc;

use crate::clients::vehicle_api::VehicleApi;
use crate::dto::vehicle_dto::{form_to_wire, to_view, to_view_list};
use crate::models::vehicle::{Vehicle, VehicleForm, VehicleStatus};
use crate::services::vehicle_list::VehicleListView;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{current_year, validate_vehicle_form};

/// Notificación bloqueante que el usuario debe cerrar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(msg) | Notification::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }

    /// Aplana el resultado de una operación en una sola notificación
    pub fn from_result(result: AppResult<Notification>) -> Self {
        result.unwrap_or_else(|e| Notification::from(&e))
    }
}

impl From<&AppError> for Notification {
    fn from(error: &AppError) -> Self {
        Notification::Error(error.user_message())
    }
}

pub struct VehicleController {
    api: Arc<dyn VehicleApi>,
    list: VehicleListView,
    connection_error: Option<String>,
}

impl VehicleController {
    pub fn new(api: Arc<dyn VehicleApi>, page_size: usize) -> Self {
        Self {
            api,
            list: VehicleListView::new(page_size),
            connection_error: None,
        }
    }

    pub fn list(&self) -> &VehicleListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VehicleListView {
        &mut self.list
    }

    /// Mensaje de conexión pendiente; se muestra con la opción de reintentar
    pub fn connection_error(&self) -> Option<&str> {
        self.connection_error.as_deref()
    }

    /// Vuelve a pedir la lista completa
    pub async fn load(&mut self) -> AppResult<usize> {
        match self.api.list_vehicles().await.and_then(to_view_list) {
            Ok(vehicles) => {
                let count = vehicles.len();
                self.list.set_vehicles(vehicles);
                self.connection_error = None;
                log::debug!("📋 {} vehículos cargados", count);
                Ok(count)
            }
            Err(e) => {
                // El aviso de conexión solo describe fallos sin respuesta
                self.connection_error = e.is_unreachable().then(|| e.user_message());
                log::error!("❌ Error cargando vehículos: {}", e);
                Err(e)
            }
        }
    }

    /// Reintento manual tras un error de conexión
    pub async fn retry(&mut self) -> AppResult<usize> {
        log::info!("🔄 Reintentando carga de vehículos");
        self.load().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Vehicle> {
        let record = self.api.get_vehicle(id).await?;
        to_view(record)
    }

    pub async fn create(&mut self, form: &VehicleForm) -> AppResult<Notification> {
        let form = form.trimmed();
        validate_vehicle_form(&form, current_year())?;

        let created = self.api.create_vehicle(&form_to_wire(&form)).await?;
        let vehicle = to_view(created)?;
        self.refresh().await;

        Ok(Notification::success(format!(
            "Vehicle {} created successfully",
            vehicle.display_name()
        )))
    }

    pub async fn update(&mut self, id: &str, form: &VehicleForm) -> AppResult<Notification> {
        let form = form.trimmed();
        validate_vehicle_form(&form, current_year())?;

        let updated = self.api.update_vehicle(id, &form_to_wire(&form)).await?;
        let vehicle = to_view(updated)?;
        self.refresh().await;

        Ok(Notification::success(format!(
            "Vehicle {} updated successfully",
            vehicle.display_name()
        )))
    }

    pub async fn delete(&mut self, id: &str) -> AppResult<Notification> {
        self.api.delete_vehicle(id).await?;
        self.refresh().await;
        Ok(Notification::success("Vehicle deleted successfully"))
    }

    /// Opciones de estado que ofrece el formulario
    pub fn status_options(&self) -> [VehicleStatus; 2] {
        VehicleStatus::ALL
    }

    // La mutación ya se aplicó; un fallo del refetch no la invalida
    async fn refresh(&mut self) {
        if let Err(e) = self.load().await {
            log::warn!("⚠️ Refetch tras la mutación falló: {}", e);
        }
    }
}
