//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente y su
//! traducción a mensajes cortos para las notificaciones.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No active session")]
    SessionRequired,
}

impl AppError {
    /// Texto corto para mostrar al usuario en una notificación
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "No se pudo conectar con el servidor".to_string(),
            AppError::Http { status, .. } => {
                format!("El servidor respondió con error ({})", status)
            }
            AppError::NotFound(_) => "Recurso no encontrado".to_string(),
            AppError::Unauthorized(_) => "Credenciales inválidas. Intente nuevamente.".to_string(),
            AppError::Parse(_) => "Respuesta del servidor no válida".to_string(),
            AppError::Validation(_) => "Complete todos los campos".to_string(),
            AppError::Config(msg) => format!("Configuración inválida: {}", msg),
            AppError::Io(_) => "Error de lectura/escritura local".to_string(),
            AppError::SessionRequired => "Sesión no iniciada".to_string(),
        }
    }

    /// Indica si el error corresponde a un recurso inexistente
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, reason: &str) -> AppError {
    AppError::Config(format!("{}: {}", variable, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let err = not_found_error("Alerta", "42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: Alerta with id '42' not found");
    }

    #[test]
    fn test_user_messages_are_spanish() {
        let err = AppError::Http { status: 500, message: "boom".to_string() };
        assert_eq!(err.user_message(), "El servidor respondió con error (500)");
        assert_eq!(AppError::SessionRequired.user_message(), "Sesión no iniciada");
        assert!(!AppError::SessionRequired.is_not_found());
    }

    #[test]
    fn test_config_helper() {
        let err = config_error("GPS_REFRESH_SECS", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: GPS_REFRESH_SECS: must be greater than zero"
        );
    }
}
