//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: URL del backend,
//! ruta del archivo de sesión, periodo de refresco del mapa y límites de
//! consulta.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{config_error, AppError, AppResult};

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_SESSION_PATH: &str = "sgvn_usuario.json";
const DEFAULT_GPS_REFRESH_SECS: u64 = 30;
const DEFAULT_VEHICLE_FETCH_LIMIT: u32 = 120;
const DEFAULT_ALERT_FETCH_LIMIT: u32 = 100;
/// Máximos de `limite` que acepta el backend
const MAX_VEHICLE_FETCH_LIMIT: u32 = 200;
const MAX_ALERT_FETCH_LIMIT: u32 = 100;
const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub backend_url: String,
    pub session_path: PathBuf,
    pub gps_refresh_secs: u64,
    pub vehicle_fetch_limit: u32,
    pub alert_fetch_limit: u32,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Configuración con valores por defecto para un backend dado
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            backend_url: normalize_url(&backend_url.into()),
            session_path: PathBuf::from(DEFAULT_SESSION_PATH),
            gps_refresh_secs: DEFAULT_GPS_REFRESH_SECS,
            vehicle_fetch_limit: DEFAULT_VEHICLE_FETCH_LIMIT,
            alert_fetch_limit: DEFAULT_ALERT_FETCH_LIMIT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| config_error("BACKEND_URL", "must be set"))?;

        let mut config = Self::new(backend_url);

        if let Some(environment) = lookup("ENVIRONMENT") {
            config.environment = environment.trim().to_lowercase();
        }
        if let Some(path) = lookup("SESSION_PATH") {
            config.session_path = PathBuf::from(path.trim());
        }
        if let Some(raw) = lookup("GPS_REFRESH_SECS") {
            config.gps_refresh_secs = parse_number("GPS_REFRESH_SECS", &raw)?;
            if config.gps_refresh_secs == 0 {
                return Err(config_error("GPS_REFRESH_SECS", "must be greater than zero"));
            }
        }
        if let Some(raw) = lookup("VEHICLE_FETCH_LIMIT") {
            config.vehicle_fetch_limit =
                parse_limit("VEHICLE_FETCH_LIMIT", &raw, MAX_VEHICLE_FETCH_LIMIT)?;
        }
        if let Some(raw) = lookup("ALERT_FETCH_LIMIT") {
            config.alert_fetch_limit =
                parse_limit("ALERT_FETCH_LIMIT", &raw, MAX_ALERT_FETCH_LIMIT)?;
        }
        config.log_level = match lookup("LOG_LEVEL") {
            Some(level) => level.trim().to_uppercase(),
            None if config.is_development() => "DEBUG".to_string(),
            None => DEFAULT_LOG_LEVEL.to_string(),
        };

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// URL base de la API REST (`{backend_url}/api`)
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.backend_url)
    }

    /// Periodo de refresco del mapa GPS
    pub fn gps_refresh_period(&self) -> Duration {
        Duration::from_secs(self.gps_refresh_secs)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_number<T: std::str::FromStr>(variable: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| config_error(variable, &format!("'{}' is not a valid number", raw)))
}

fn parse_limit(variable: &str, raw: &str, max: u32) -> Result<u32, AppError> {
    let limit: u32 = parse_number(variable, raw)?;
    if limit == 0 || limit > max {
        return Err(config_error(
            variable,
            &format!("must be between 1 and {}, got {}", max, limit),
        ));
    }
    Ok(limit)
}
