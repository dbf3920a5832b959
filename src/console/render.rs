//! Render en texto plano de la vista de inventario.
//!
//! Funciones puras: reciben el estado y devuelven el texto a imprimir. El
//! color se aplica al imprimir, no aquí.

use crate::models::vehicle::Vehicle;
use crate::services::vehicle_list::{SortConfig, SortKey, VehiclePage};

const VIN_WIDTH: usize = 19;
const TEXT_WIDTH: usize = 14;
const YEAR_WIDTH: usize = 6;
const STATUS_WIDTH: usize = 15;

pub const EMPTY_TITLE: &str = "No vehicles found";
pub const EMPTY_HINT: &str = "No vehicles match your current search criteria.";

fn column_width(key: SortKey) -> usize {
    match key {
        SortKey::Vin => VIN_WIDTH,
        SortKey::Year => YEAR_WIDTH,
        SortKey::Status => STATUS_WIDTH,
        SortKey::Brand | SortKey::Model | SortKey::City => TEXT_WIDTH,
    }
}

fn fit(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        format!("{:<width$}", value, width = width)
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn cell(vehicle: &Vehicle, key: SortKey) -> String {
    match key {
        SortKey::Vin => vehicle.vin.clone(),
        SortKey::Brand => vehicle.brand.clone(),
        SortKey::Model => vehicle.model.clone(),
        SortKey::Year => vehicle.year.to_string(),
        SortKey::Status => vehicle.status.label().to_string(),
        SortKey::City => vehicle.city.clone().unwrap_or_default(),
    }
}

/// "Vehicle Management" y el total de coincidencias
pub fn render_header(total_matches: usize) -> String {
    let plural = if total_matches == 1 { "" } else { "s" };
    format!("Vehicle Management\nTotal: {} vehicle{}", total_matches, plural)
}

/// Encabezado de columnas; la columna ordenada lleva ▲ o ▼
pub fn render_column_headers(sort: Option<SortConfig>) -> String {
    let mut line = format!("{:>3}  ", "#");
    for key in SortKey::ALL {
        let title = match sort {
            Some(config) if config.key == key => {
                format!("{} {}", key.label(), config.direction.arrow())
            }
            _ => key.label().to_string(),
        };
        line.push_str(&fit(&title, column_width(key)));
        line.push(' ');
    }
    line.trim_end().to_string()
}

/// Tabla de la página actual con el pie "Page x of y".
///
/// Las filas se numeran desde 1 dentro de la página; ese número es el que
/// aceptan los comandos de ver, editar y eliminar.
pub fn render_table(page: &VehiclePage<'_>, sort: Option<SortConfig>) -> String {
    if page.rows.is_empty() {
        return format!("{}\n{}", EMPTY_TITLE, EMPTY_HINT);
    }

    let mut lines = vec![render_column_headers(sort)];
    for (index, vehicle) in page.rows.iter().enumerate() {
        let mut line = format!("{:>3}  ", index + 1);
        for key in SortKey::ALL {
            line.push_str(&fit(&cell(vehicle, key), column_width(key)));
            line.push(' ');
        }
        lines.push(line.trim_end().to_string());
    }
    lines.push(render_pagination(page));
    lines.join("\n")
}

pub fn render_pagination(page: &VehiclePage<'_>) -> String {
    format!("Page {} of {}", page.current_page, page.total_pages.max(1))
}

/// Ficha de un vehículo
pub fn render_detail(vehicle: &Vehicle) -> String {
    [
        format!("{} ({})", vehicle.display_name(), vehicle.year),
        format!("  VIN:    {}", vehicle.vin),
        format!("  Brand:  {}", vehicle.brand),
        format!("  Model:  {}", vehicle.model),
        format!("  Year:   {}", vehicle.year),
        format!("  Status: {}", vehicle.status),
        format!("  City:   {}", vehicle.city_or_default()),
    ]
    .join("\n")
}

pub fn render_help() -> String {
    [
        "n / p          next / previous page",
        "s <vin>        search by VIN (empty clears)",
        "o <column>     sort by VIN, Brand, Model, Year, Status or City",
        "v <row>        view vehicle",
        "e <row>        edit vehicle",
        "d <row>        delete vehicle",
        "a              add vehicle",
        "r              reload",
        "q              quit",
    ]
    .join("\n")
}
