//! Services module
//!
//! Lógica de presentación del listado de vehículos: filtro, orden y
//! paginación, independiente de cualquier render.

pub mod vehicle_list;

pub use vehicle_list::*;
