//! Lógica de la vista de listado
//!
//! Filtro por VIN, ordenamiento por columna y paginación. Todo se recalcula
//! a partir de la lista completa en cada render; no hay estado incremental.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::{bad_request_error, AppError};

/// Filas por página por defecto
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Columna por la que se ordena la tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Vin,
    Brand,
    Model,
    Year,
    Status,
    City,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Vin,
        SortKey::Brand,
        SortKey::Model,
        SortKey::Year,
        SortKey::Status,
        SortKey::City,
    ];

    /// Encabezado de la columna
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Vin => "VIN",
            SortKey::Brand => "Brand",
            SortKey::Model => "Model",
            SortKey::Year => "Year",
            SortKey::Status => "Status",
            SortKey::City => "City",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        SortKey::ALL
            .into_iter()
            .find(|key| key.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| bad_request_error(&format!("Unknown sort column '{}'", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Columna y dirección de ordenamiento activas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Selección de una columna: misma columna invierte la dirección,
    /// columna nueva empieza ascendente.
    pub fn select(current: Option<SortConfig>, key: SortKey) -> Self {
        match current {
            Some(config) if config.key == key => Self {
                key,
                direction: config.direction.toggled(),
            },
            _ => Self::ascending(key),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Comparación ascendente por una columna
pub fn compare_by(a: &Vehicle, b: &Vehicle, key: SortKey) -> Ordering {
    match key {
        SortKey::Vin => compare_text(&a.vin, &b.vin),
        SortKey::Brand => compare_text(&a.brand, &b.brand),
        SortKey::Model => compare_text(&a.model, &b.model),
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::Status => compare_text(a.status.label(), b.status.label()),
        SortKey::City => compare_text(
            a.city.as_deref().unwrap_or(""),
            b.city.as_deref().unwrap_or(""),
        ),
    }
}

/// Coincidencia parcial del VIN sin distinguir mayúsculas.
/// Una consulta vacía devuelve todos los vehículos.
pub fn filter_by_vin<'a>(vehicles: &'a [Vehicle], query: &str) -> Vec<&'a Vehicle> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return vehicles.iter().collect();
    }
    vehicles
        .iter()
        .filter(|v| v.vin.to_lowercase().contains(&query))
        .collect()
}

/// Ordenamiento estable: los empates conservan el orden del backend
pub fn sort_vehicles(vehicles: &mut [&Vehicle], sort: SortConfig) {
    vehicles.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort.key);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// `ceil(count / page_size)`
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Porción de la página pedida (base 1); vacía fuera de rango
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Página visible de la tabla y sus metadatos
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePage<'a> {
    pub rows: Vec<&'a Vehicle>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Vehículos que pasan el filtro, en todas las páginas
    pub total_matches: usize,
}

/// Estado de la vista de listado
#[derive(Debug, Clone)]
pub struct VehicleListView {
    vehicles: Vec<Vehicle>,
    search_vin: String,
    sort: Option<SortConfig>,
    current_page: usize,
    page_size: usize,
}

impl Default for VehicleListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl VehicleListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            vehicles: Vec::new(),
            search_vin: String::new(),
            sort: None,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn search(&self) -> &str {
        &self.search_vin
    }

    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Reemplaza la lista tras un refetch; la página actual se ajusta al
    /// nuevo rango.
    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
        let total = self.total_pages();
        if self.current_page > total {
            self.current_page = total.max(1);
        }
    }

    /// Cambia el término de búsqueda y vuelve a la página 1
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_vin = query.into();
        self.current_page = 1;
    }

    /// Selecciona una columna de ordenamiento y vuelve a la página 1
    pub fn sort_by(&mut self, key: SortKey) -> SortConfig {
        let config = SortConfig::select(self.sort, key);
        self.sort = Some(config);
        self.current_page = 1;
        config
    }

    /// Navega a una página; fuera de `[1, total_pages]` no hace nada y
    /// devuelve `false`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// Vehículos filtrados y ordenados, todas las páginas
    pub fn visible(&self) -> Vec<&Vehicle> {
        let mut rows = filter_by_vin(&self.vehicles, &self.search_vin);
        if let Some(sort) = self.sort {
            sort_vehicles(&mut rows, sort);
        }
        rows
    }

    pub fn total_pages(&self) -> usize {
        total_pages(
            filter_by_vin(&self.vehicles, &self.search_vin).len(),
            self.page_size,
        )
    }

    pub fn page(&self) -> VehiclePage<'_> {
        let visible = self.visible();
        let total_matches = visible.len();
        let rows = paginate(&visible, self.current_page, self.page_size).to_vec();
        VehiclePage {
            rows,
            current_page: self.current_page,
            total_pages: total_pages(total_matches, self.page_size),
            total_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::VehicleStatus;

    fn vehicle(id: usize, vin: &str, brand: &str, year: i32) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            vin: vin.to_string(),
            brand: brand.to_string(),
            model: format!("Model {}", id),
            year,
            status: VehicleStatus::Available,
            city: None,
        }
    }

    fn numbered(count: usize) -> Vec<Vehicle> {
        (1..=count)
            .map(|i| vehicle(i, &format!("VIN{:014}", i), "Brand", 2000 + i as i32))
            .collect()
    }

    fn ids(rows: &[&Vehicle]) -> Vec<String> {
        rows.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_filter_by_vin_substring() {
        let vehicles = vec![
            vehicle(1, "WBA3A5C50CF370001", "BMW", 2020),
            vehicle(2, "WAUAF78E67A123456", "Audi", 2019),
        ];
        let hits = filter_by_vin(&vehicles, "WBA");
        assert_eq!(ids(&hits), vec!["1"]);

        let hits = filter_by_vin(&vehicles, "  wba3 ");
        assert_eq!(ids(&hits), vec!["1"]);

        assert!(filter_by_vin(&vehicles, "ZZZ").is_empty());
        assert_eq!(filter_by_vin(&vehicles, "").len(), 2);
        assert_eq!(filter_by_vin(&vehicles, "   ").len(), 2);
    }

    #[test]
    fn test_filter_ignores_other_fields() {
        let vehicles = vec![vehicle(1, "WBA3A5C50CF370001", "Audi", 2020)];
        assert!(filter_by_vin(&vehicles, "Audi").is_empty());
    }

    #[test]
    fn test_sort_by_year_toggles_direction() {
        let mut view = VehicleListView::new(5);
        view.set_vehicles(vec![
            vehicle(1, "A0000000001", "BMW", 2020),
            vehicle(2, "A0000000002", "Audi", 2019),
            vehicle(3, "A0000000003", "Mercedes", 2021),
        ]);

        view.sort_by(SortKey::Year);
        let years: Vec<i32> = view.visible().iter().map(|v| v.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);

        let config = view.sort_by(SortKey::Year);
        assert_eq!(config.direction, SortDirection::Descending);
        let years: Vec<i32> = view.visible().iter().map(|v| v.year).collect();
        assert_eq!(years, vec![2021, 2020, 2019]);
    }

    #[test]
    fn test_new_sort_key_resets_to_ascending() {
        let first = SortConfig::select(None, SortKey::Brand);
        let second = SortConfig::select(Some(first), SortKey::Brand);
        assert_eq!(second.direction, SortDirection::Descending);

        let third = SortConfig::select(Some(second), SortKey::City);
        assert_eq!(third, SortConfig::ascending(SortKey::City));
    }

    #[test]
    fn test_string_sort_is_case_insensitive_and_stable() {
        let vehicles = vec![
            vehicle(1, "A0000000001", "bmw", 2020),
            vehicle(2, "A0000000002", "Audi", 2019),
            vehicle(3, "A0000000003", "BMW", 2021),
        ];
        let mut rows: Vec<&Vehicle> = vehicles.iter().collect();
        sort_vehicles(&mut rows, SortConfig::ascending(SortKey::Brand));
        assert_eq!(ids(&rows), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_missing_city_sorts_first() {
        let mut with_city = vehicle(1, "A0000000001", "BMW", 2020);
        with_city.city = Some("Madrid".to_string());
        let without_city = vehicle(2, "A0000000002", "Audi", 2019);
        let vehicles = vec![with_city, without_city];

        let mut rows: Vec<&Vehicle> = vehicles.iter().collect();
        sort_vehicles(&mut rows, SortConfig::ascending(SortKey::City));
        assert_eq!(ids(&rows), vec!["2", "1"]);
    }

    #[test]
    fn test_pagination_twelve_items() {
        let mut view = VehicleListView::new(5);
        view.set_vehicles(numbered(12));

        let page = view.page();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_matches, 12);
        assert_eq!(ids(&page.rows), vec!["1", "2", "3", "4", "5"]);

        assert!(view.go_to_page(3));
        let page = view.page();
        assert_eq!(ids(&page.rows), vec!["11", "12"]);

        assert!(!view.go_to_page(4));
        assert_eq!(view.current_page(), 3);
        assert!(!view.go_to_page(0));
        assert_eq!(view.current_page(), 3);
    }

    #[test]
    fn test_next_prev_stay_in_range() {
        let mut view = VehicleListView::new(5);
        view.set_vehicles(numbered(7));

        assert!(!view.prev_page());
        assert!(view.next_page());
        assert_eq!(view.current_page(), 2);
        assert!(!view.next_page());
        assert!(view.prev_page());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_search_and_sort_reset_page() {
        let mut view = VehicleListView::new(5);
        view.set_vehicles(numbered(12));

        assert!(view.go_to_page(2));
        view.set_search("VIN");
        assert_eq!(view.current_page(), 1);

        assert!(view.go_to_page(3));
        view.sort_by(SortKey::Vin);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_refetch_clamps_current_page() {
        let mut view = VehicleListView::new(5);
        view.set_vehicles(numbered(11));
        assert!(view.go_to_page(3));

        view.set_vehicles(numbered(10));
        assert_eq!(view.current_page(), 2);

        view.set_vehicles(Vec::new());
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.page().total_pages, 0);
        assert!(view.page().rows.is_empty());
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&items, 1, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 3, 5), &[11, 12]);
        assert!(paginate(&items, 4, 5).is_empty());
        assert!(paginate(&items, 0, 5).is_empty());
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(0, 5), 0);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("year".parse::<SortKey>().unwrap(), SortKey::Year);
        assert_eq!("VIN".parse::<SortKey>().unwrap(), SortKey::Vin);
        assert!("mileage".parse::<SortKey>().is_err());
    }
}
