//! Panel de control
//!
//! Carga en paralelo los KPIs, las alertas pendientes más recientes y las
//! estadísticas agregadas. Si cualquiera de las seis llamadas falla no se
//! aplica ninguna.

use std::sync::Arc;

use crate::client::FleetApi;
use crate::models::{
    Alert, AlertQuery, Kpis, MonthlyConsumption, MonthlyMaintenance, StatusCount, TypeCount,
};
use crate::services::notification_service::Notifier;
use crate::utils::errors::AppError;
use crate::viewmodels::page_state::PageState;

/// Alertas pendientes que muestra el panel
pub const DASHBOARD_ALERT_LIMIT: u32 = 5;

#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub kpis: Option<Kpis>,
    pub pending_alerts: Vec<Alert>,
    pub by_status: Vec<StatusCount>,
    pub by_type: Vec<TypeCount>,
    pub monthly_consumption: Vec<MonthlyConsumption>,
    pub monthly_maintenance: Vec<MonthlyMaintenance>,
}

pub struct DashboardViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    pub state: PageState<DashboardData>,
}

impl DashboardViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let alert_query = AlertQuery {
            severity: None,
            attended: Some(false),
            limit: Some(DASHBOARD_ALERT_LIMIT),
        };

        let fut = async move {
            let (
                kpis,
                pending_alerts,
                by_status,
                by_type,
                monthly_consumption,
                monthly_maintenance,
            ) = futures::try_join!(
                api.kpis(),
                api.list_alerts(&alert_query),
                api.stats_by_status(),
                api.stats_by_type(),
                api.monthly_consumption(),
                api.monthly_maintenance(),
            )?;

            Ok::<_, AppError>(DashboardData {
                kpis: Some(kpis),
                pending_alerts,
                by_status,
                by_type,
                monthly_consumption,
                monthly_maintenance,
            })
        };

        self.state.load(fut, &self.notifier, "datos del panel").await
    }

    pub fn data(&self) -> &DashboardData {
        &self.state.data
    }

    /// Total de mantenimientos (preventivos + correctivos) del periodo cargado
    pub fn maintenance_total(&self) -> u32 {
        self.state
            .data
            .monthly_maintenance
            .iter()
            .map(|m| m.preventive + m.corrective)
            .sum()
    }
}
