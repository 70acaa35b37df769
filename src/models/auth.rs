//! Modelos de autenticación
//!
//! Credenciales de login y perfil de sesión devuelto por `POST /auth/login`.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request de login (el backend espera `usuario` y `clave`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "El usuario es obligatorio"))]
    #[serde(rename = "usuario")]
    pub username: String,

    #[validate(length(min = 1, message = "La clave es obligatoria"))]
    #[serde(rename = "clave")]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Perfil del usuario autenticado; se persiste tal cual como sesión
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSession {
    pub id: String,
    #[serde(rename = "nombre")]
    pub display_name: String,
    #[serde(rename = "rango", default)]
    pub rank: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "unidad", default)]
    pub unit: String,
    #[serde(default)]
    pub token: String,
}
