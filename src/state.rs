//! Shared application state
//!
//! Este módulo define el contexto de la aplicación que se crea al arrancar
//! y desde el que se construyen los view-models de cada página.

use std::sync::Arc;

use crate::client::{ApiClient, FleetApi};
use crate::config::environment::EnvironmentConfig;
use crate::services::notification_service::Notifier;
use crate::services::session_service::{SessionContext, SessionStore};
use crate::utils::errors::AppResult;
use crate::viewmodels::{
    AlertsViewModel, DashboardViewModel, FuelViewModel, MapViewModel, ReportsViewModel,
    SettingsViewModel, VehicleDetailViewModel, VehiclesViewModel,
};

pub struct AppState {
    pub config: EnvironmentConfig,
    pub api: Arc<dyn FleetApi>,
    pub session: SessionContext,
    pub notifier: Notifier,
}

impl AppState {
    /// Restaura la sesión guardada en `config.session_path`
    pub fn new(config: EnvironmentConfig, api: Arc<dyn FleetApi>) -> Self {
        let session = SessionContext::restore(SessionStore::new(config.session_path.clone()));
        Self {
            config,
            api,
            session,
            notifier: Notifier::new(),
        }
    }

    /// Estado con el cliente REST real
    pub fn from_config(config: EnvironmentConfig) -> AppResult<Self> {
        let api = ApiClient::from_config(&config)?;
        log::info!("🔗 Backend configurado en {}", api.base_url());
        Ok(Self::new(config, Arc::new(api)))
    }

    pub fn dashboard(&self) -> DashboardViewModel {
        DashboardViewModel::new(Arc::clone(&self.api), self.notifier.clone())
    }

    pub fn vehicles(&self) -> VehiclesViewModel {
        VehiclesViewModel::new(
            Arc::clone(&self.api),
            self.notifier.clone(),
            self.config.vehicle_fetch_limit,
        )
    }

    pub fn vehicle_detail(&self) -> VehicleDetailViewModel {
        VehicleDetailViewModel::new(Arc::clone(&self.api), self.notifier.clone())
    }

    pub fn alerts(&self) -> AlertsViewModel {
        AlertsViewModel::new(
            Arc::clone(&self.api),
            self.notifier.clone(),
            self.config.alert_fetch_limit,
        )
    }

    pub fn map(&self) -> MapViewModel {
        MapViewModel::new(
            Arc::clone(&self.api),
            self.notifier.clone(),
            self.config.gps_refresh_period(),
        )
    }

    pub fn fuel(&self) -> FuelViewModel {
        FuelViewModel::new(
            Arc::clone(&self.api),
            self.notifier.clone(),
            self.config.vehicle_fetch_limit,
        )
    }

    pub fn reports(&self) -> ReportsViewModel {
        ReportsViewModel::new(Arc::clone(&self.api), self.notifier.clone())
    }

    pub fn settings(&self) -> SettingsViewModel {
        SettingsViewModel::new(Arc::clone(&self.api), self.notifier.clone())
    }
}
