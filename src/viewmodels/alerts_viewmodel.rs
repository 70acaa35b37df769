//! Centro de alertas
//!
//! Lista, filtra y cuenta las alertas, y las marca como atendidas. Una
//! alerta atendida no vuelve a enviarse al backend.

use std::sync::Arc;

use crate::client::FleetApi;
use crate::models::{Alert, AlertCounts, AlertQuery};
use crate::services::notification_service::Notifier;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::filters::{AlertFilter, RecordFilter};
use crate::viewmodels::page_state::PageState;

pub struct AlertsViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    fetch_limit: u32,
    pub filter: AlertFilter,
    pub state: PageState<Vec<Alert>>,
}

impl AlertsViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier, fetch_limit: u32) -> Self {
        Self {
            api,
            notifier,
            fetch_limit,
            filter: AlertFilter::default(),
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let query = AlertQuery {
            limit: Some(self.fetch_limit),
            ..Default::default()
        };
        let fut = async move { api.list_alerts(&query).await };
        self.state.load(fut, &self.notifier, "alertas").await
    }

    pub fn filtered(&self) -> Vec<&Alert> {
        self.filter.apply(&self.state.data)
    }

    /// Conteos sobre todas las alertas cargadas, no sobre la vista filtrada
    pub fn counts(&self) -> AlertCounts {
        AlertCounts::from_alerts(&self.state.data)
    }

    /// Marcar una alerta como atendida.
    ///
    /// Devuelve `Ok(false)` si ya estaba atendida (no se llama al backend).
    /// Si el backend falla la copia local no cambia.
    pub async fn attend(&mut self, id: &str) -> AppResult<bool> {
        let alert = self
            .state
            .data
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found_error("Alerta", id))?;

        if alert.attended {
            log::debug!("Alerta {} ya atendida", id);
            return Ok(false);
        }

        match self.api.attend_alert(id).await {
            Ok(response) => {
                if let Some(alert) = self.state.data.iter_mut().find(|a| a.id == id) {
                    alert.attended = true;
                }
                log::info!("✅ Alerta {} atendida: {}", id, response.message);
                self.notifier.success("Alerta marcada como atendida", None);
                Ok(true)
            }
            Err(e) => {
                log::error!("❌ Error atendiendo alerta {}: {}", id, e);
                self.notifier.error("Error al atender alerta", Some(e.user_message()));
                Err(e)
            }
        }
    }
}
