//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, filtros en
//! memoria y la proyección de coordenadas del mapa.

pub mod errors;
pub mod filters;
pub mod projection;

pub use errors::{AppError, AppResult};
