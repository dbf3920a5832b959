//! Clients - acceso al backend de vehículos
//!
//! El puerto `VehicleApi` y su implementación HTTP.

pub mod vehicle_api;
pub mod vehicle_http_client;

pub use vehicle_api::VehicleApi;
pub use vehicle_http_client::VehicleHttpClient;
