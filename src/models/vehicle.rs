//! Modelo de Vehicle
//!
//! Representación de vista de un vehículo del inventario, su estado y el
//! formulario de alta / edición.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::current_year;

pub const AVAILABLE_LABEL: &str = "Available";
pub const NOT_AVAILABLE_LABEL: &str = "Not Available";

/// Etiquetas de la revisión de cuatro estados
pub const LEGACY_STATUS_LABELS: [&str; 4] = ["Available", "Sold", "Under Maintenance", "Reserved"];

/// Estado del vehículo tal como lo muestra la vista
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[serde(rename = "Available")]
    Available,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 2] = [VehicleStatus::Available, VehicleStatus::NotAvailable];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Available => AVAILABLE_LABEL,
            VehicleStatus::NotAvailable => NOT_AVAILABLE_LABEL,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, VehicleStatus::Available)
    }

    /// Estado a partir del booleano del backend
    pub fn from_available(available: bool) -> Self {
        if available {
            VehicleStatus::Available
        } else {
            VehicleStatus::NotAvailable
        }
    }

    /// Interpreta las etiquetas de la revisión de cuatro estados.
    ///
    /// `Sold`, `Under Maintenance` y `Reserved` colapsan en `NotAvailable`:
    /// el backend solo guarda un booleano, así que la distinción se pierde.
    pub fn from_legacy_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case(AVAILABLE_LABEL) {
            return Some(VehicleStatus::Available);
        }
        if label.eq_ignore_ascii_case(NOT_AVAILABLE_LABEL) {
            return Some(VehicleStatus::NotAvailable);
        }
        let legacy = LEGACY_STATUS_LABELS[1..]
            .iter()
            .any(|known| label.eq_ignore_ascii_case(known));
        if legacy {
            log::warn!(
                "⚠️ Estado '{}' colapsado a '{}': el backend solo distingue disponible/no disponible",
                label,
                NOT_AVAILABLE_LABEL
            );
            return Some(VehicleStatus::NotAvailable);
        }
        None
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleStatus {
    type Err = AppError;

    /// Acepta las dos etiquetas actuales y, colapsadas, las de la revisión
    /// de cuatro estados.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleStatus::from_legacy_label(s)
            .ok_or_else(|| bad_request_error(&format!("Unknown vehicle status '{}'", s.trim())))
    }
}

/// Vehicle de vista - lo que consumen la tabla, el detalle y los formularios
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    pub city: Option<String>,
}

impl Vehicle {
    /// "Marca Modelo", usado en confirmaciones y notificaciones
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    pub fn city_or_default(&self) -> &str {
        self.city.as_deref().unwrap_or("Not specified")
    }
}

/// Datos del formulario de alta / edición
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VehicleForm {
    #[validate(length(max = 17, message = "VIN must be at most 17 characters"))]
    pub vin: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub status: VehicleStatus,
    pub city: Option<String>,
}

impl Default for VehicleForm {
    fn default() -> Self {
        Self {
            vin: String::new(),
            brand: String::new(),
            model: String::new(),
            year: Some(current_year()),
            status: VehicleStatus::Available,
            city: None,
        }
    }
}

impl VehicleForm {
    /// Formulario de edición precargado con el vehículo actual
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            vin: vehicle.vin.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            year: Some(vehicle.year),
            status: vehicle.status,
            city: vehicle.city.clone(),
        }
    }

    /// Copia con los textos recortados; una ciudad en blanco pasa a `None`
    pub fn trimmed(&self) -> Self {
        Self {
            vin: self.vin.trim().to_string(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            status: self.status,
            city: normalize_city(self.city.as_deref()),
        }
    }
}

/// Ciudad recortada, `None` si queda vacía
pub fn normalize_city(city: Option<&str>) -> Option<String> {
    city.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
