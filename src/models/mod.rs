//! Modelos del sistema
//!
//! Modelos de vista que consumen los componentes de presentación.

pub mod vehicle;

pub use vehicle::{Vehicle, VehicleForm, VehicleStatus};
