//! Utilidades de validación
//!
//! Validación del formulario de vehículos antes de cualquier llamada al
//! backend. Los mensajes quedan asociados a cada campo.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::vehicle::VehicleForm;

pub const MIN_MODEL_YEAR: i32 = 1900;
pub const VIN_MIN_LENGTH: usize = 10;
pub const VIN_MAX_LENGTH: usize = 17;

/// Año actual (UTC)
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Año máximo aceptado: se permiten modelos del año siguiente
pub fn max_model_year(current_year: i32) -> i32 {
    current_year + 1
}

fn with_message(mut error: ValidationError, message: impl Into<Cow<'static, str>>) -> ValidationError {
    error.message = Some(message.into());
    error
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima y máxima
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Valida el formulario completo de un vehículo.
///
/// Se espera el formulario ya recortado (`VehicleForm::trimmed`). Las reglas
/// estáticas vienen del derive de `Validate`; las que dependen del año
/// actual o de espacios en blanco se añaden aquí.
pub fn validate_vehicle_form(form: &VehicleForm, current_year: i32) -> Result<(), ValidationErrors> {
    let mut errors = match form.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if let Err(e) = validate_not_empty(&form.vin) {
        errors.add("vin", with_message(e, "VIN is required"));
    } else if form.vin.chars().count() < VIN_MIN_LENGTH {
        if let Err(e) = validate_length(&form.vin, VIN_MIN_LENGTH, VIN_MAX_LENGTH) {
            errors.add(
                "vin",
                with_message(e, format!("VIN must be at least {} characters", VIN_MIN_LENGTH)),
            );
        }
    }

    if let Err(e) = validate_not_empty(&form.brand) {
        errors.add("brand", with_message(e, "Brand is required"));
    }

    if let Err(e) = validate_not_empty(&form.model) {
        errors.add("model", with_message(e, "Model is required"));
    }

    let max_year = max_model_year(current_year);
    match form.year {
        None => {
            errors.add("year", with_message(ValidationError::new("required"), "Year is required"));
        }
        Some(year) => {
            if let Err(e) = validate_range(year, MIN_MODEL_YEAR, max_year) {
                errors.add(
                    "year",
                    with_message(
                        e,
                        format!("Year must be between {} and {}", MIN_MODEL_YEAR, max_year),
                    ),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Primer mensaje de cada campo con error, ordenado por nombre de campo
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (field.to_string(), message)
            }),
            _ => None,
        })
        .collect()
}
