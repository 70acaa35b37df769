//! Listado de vehículos
//!
//! El filtro activo se envía también como parámetros de consulta y se vuelve
//! a aplicar en memoria sobre lo recibido.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::client::FleetApi;
use crate::models::Vehicle;
use crate::services::export_service;
use crate::services::notification_service::Notifier;
use crate::utils::errors::AppResult;
use crate::utils::filters::{RecordFilter, VehicleFilter};
use crate::viewmodels::page_state::PageState;

pub struct VehiclesViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    fetch_limit: u32,
    pub filter: VehicleFilter,
    pub state: PageState<Vec<Vehicle>>,
}

impl VehiclesViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier, fetch_limit: u32) -> Self {
        Self {
            api,
            notifier,
            fetch_limit,
            filter: VehicleFilter::default(),
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let query = self.filter.to_query(self.fetch_limit);
        log::debug!("🚗 Consultando vehículos: {:?}", query);
        let api = Arc::clone(&self.api);
        let fut = async move { api.list_vehicles(&query).await };
        self.state.load(fut, &self.notifier, "vehículos").await
    }

    /// Cambiar el filtro y recargar
    pub async fn apply_filter(&mut self, filter: VehicleFilter) -> bool {
        self.filter = filter;
        self.load().await
    }

    pub fn filtered(&self) -> Vec<&Vehicle> {
        self.filter.apply(&self.state.data)
    }

    /// Tipos presentes en los datos cargados, para el desplegable
    pub fn vehicle_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .state
            .data
            .iter()
            .map(|v| v.vehicle_type.clone())
            .collect();
        types.sort();
        types.dedup();
        types
    }

    pub fn export_csv(&self) -> String {
        export_service::vehicles_csv(self.filtered())
    }

    /// Escribir `flota_vehicular_{fecha}.csv` con la vista filtrada
    pub async fn export(&self, dir: &Path, today: NaiveDate) -> AppResult<PathBuf> {
        let file_name = export_service::vehicles_file_name(today);
        match export_service::write_export(dir, &file_name, &self.export_csv()).await {
            Ok(path) => {
                self.notifier.success(
                    "Exportación completada",
                    Some(format!("{} vehículos en {}", self.filtered().len(), file_name)),
                );
                Ok(path)
            }
            Err(e) => {
                self.notifier.error("Error al exportar", Some(e.user_message()));
                Err(e)
            }
        }
    }
}
