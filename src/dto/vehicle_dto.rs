//! DTO de Vehicle para el backend
//!
//! Forma JSON que se intercambia con `/api/vehicles` y la conversión
//! entre esa forma y el modelo de vista.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::vehicle::{normalize_city, Vehicle, VehicleForm, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

/// Registro de vehículo tal como viaja por la red
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opaque_id")]
    pub id: Option<String>,
    pub vin: String,
    pub make: String,
    pub model: String,
    #[serde(deserialize_with = "string_or_number")]
    pub model_year: String,
    #[serde(default)]
    pub location: Option<String>,
    pub status: bool,
}

// El id es opaco: algunos backends lo envían como número
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(de::Error::custom(format!("invalid vehicle id: {}", other))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(de::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// Vista → red: brand→make, year→modelYear, city→location, status→bool
pub fn to_wire(vehicle: &Vehicle) -> VehicleRecord {
    VehicleRecord {
        id: Some(vehicle.id.clone()),
        vin: vehicle.vin.clone(),
        make: vehicle.brand.clone(),
        model: vehicle.model.clone(),
        model_year: vehicle.year.to_string(),
        location: normalize_city(vehicle.city.as_deref()),
        status: vehicle.status.is_available(),
    }
}

/// Formulario → red, sin id (lo asigna el backend)
pub fn form_to_wire(form: &VehicleForm) -> VehicleRecord {
    VehicleRecord {
        id: None,
        vin: form.vin.trim().to_string(),
        make: form.brand.trim().to_string(),
        model: form.model.trim().to_string(),
        model_year: form.year.map(|y| y.to_string()).unwrap_or_default(),
        location: normalize_city(form.city.as_deref()),
        status: form.status.is_available(),
    }
}

/// Red → vista.
///
/// Falla si el registro no trae id o si `modelYear` no es un entero; no se
/// rellenan valores por defecto.
pub fn to_view(record: VehicleRecord) -> AppResult<Vehicle> {
    let id = record.id.ok_or_else(|| {
        AppError::InvalidResponse(format!("vehicle record for VIN '{}' has no id", record.vin))
    })?;

    let year = record.model_year.trim().parse::<i32>().map_err(|_| {
        AppError::InvalidResponse(format!(
            "vehicle {} has a non-numeric modelYear '{}'",
            id, record.model_year
        ))
    })?;

    Ok(Vehicle {
        id,
        vin: record.vin,
        brand: record.make,
        model: record.model,
        year,
        status: VehicleStatus::from_available(record.status),
        city: normalize_city(record.location.as_deref()),
    })
}

pub fn to_view_list(records: Vec<VehicleRecord>) -> AppResult<Vec<Vehicle>> {
    records.into_iter().map(to_view).collect()
}
