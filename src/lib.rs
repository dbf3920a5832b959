//! Cliente de inventario de vehículos
//!
//! Mapeo red ⇄ vista, lógica de listado (filtro, orden, paginación),
//! acceso HTTP a `/api/vehicles`, un almacén en memoria con el mismo
//! contrato y el backend de pruebas que lo expone.

pub mod clients;
pub mod config;
pub mod console;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
