//! Estado de carga de una página
//!
//! `PageState<T>` envuelve los datos de una página junto con el indicador de
//! carga. Un fallo conserva los datos anteriores y el indicador se apaga
//! siempre, tanto si la carga termina bien como si falla.

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::services::notification_service::Notifier;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Default)]
pub struct PageState<T> {
    pub loading: bool,
    pub data: T,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> PageState<T> {
    pub fn new(data: T) -> Self {
        Self {
            loading: false,
            data,
            last_error: None,
            last_updated: None,
        }
    }

    /// Marcar el inicio de una carga
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Aplicar el resultado de una carga. Devuelve `true` si hubo datos nuevos.
    pub fn finish(&mut self, result: AppResult<T>, notifier: &Notifier, context: &str) -> bool {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.last_error = None;
                self.last_updated = Some(Utc::now());
                true
            }
            Err(e) => {
                log::error!("❌ Error cargando {}: {}", context, e);
                notifier.error(format!("Error al cargar {}", context), Some(e.user_message()));
                self.last_error = Some(e.user_message());
                false
            }
        }
    }

    /// Ejecutar una carga completa sobre este estado
    pub async fn load<F>(&mut self, fut: F, notifier: &Notifier, context: &str) -> bool
    where
        F: Future<Output = AppResult<T>>,
    {
        self.begin();
        let result = fut.await;
        self.finish(result, notifier, context)
    }

    pub fn has_loaded(&self) -> bool {
        self.last_updated.is_some()
    }
}
