//! Repositories
//!
//! Almacén en memoria que implementa el contrato del backend de vehículos.

pub mod vehicle_repository;

pub use vehicle_repository::InMemoryVehicleRepository;
