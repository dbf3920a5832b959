//! Configuración del proyecto
//!
//! Variables de entorno del cliente y del backend de pruebas.

pub mod environment;

pub use environment::*;
