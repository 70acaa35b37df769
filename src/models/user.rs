//! Modelo de usuarios del sistema
//!
//! Lista de usuarios mostrada en la página de configuración (`GET /usuarios`).

use serde::{Deserialize, Serialize};

/// Roles disponibles en la configuración
pub const ROLES: [&str; 5] = ["Administrador", "Supervisor", "Operador", "Logística", "Consulta"];

/// Usuario del sistema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemUser {
    pub id: String,
    #[serde(rename = "nombre")]
    pub display_name: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "unidad", default)]
    pub unit: String,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

/// Preferencias de notificación y refresco de la configuración
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPreferences {
    pub email_notifications: bool,
    pub system_notifications: bool,
    pub maintenance_alerts: bool,
    pub fuel_alerts: bool,
    pub critical_alerts: bool,
    pub refresh_secs: u64,
    pub time_zone: String,
}

impl Default for DashboardPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            system_notifications: true,
            maintenance_alerts: true,
            fuel_alerts: true,
            critical_alerts: true,
            refresh_secs: 30,
            time_zone: "America/Guayaquil".to_string(),
        }
    }
}
