//! Cliente del sistema de gestión vehicular naval
//!
//! Biblioteca con el cliente REST del backend, los view-models de cada
//! página y los servicios de sesión, refresco y exportación. El binario
//! `fleet_dashboard` es una capa de presentación en terminal sobre ella.

pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

pub use client::{ApiClient, FleetApi};
pub use config::EnvironmentConfig;
pub use state::AppState;
pub use utils::errors::{AppError, AppResult};
