//! DTOs intercambiados con el backend de vehículos

pub mod api_response;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
pub use vehicle_dto::{form_to_wire, to_view, to_view_list, to_wire, VehicleRecord};
