//! Reportes
//!
//! Resumen ejecutivo del backend y su exportación a CSV por periodo.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::FleetApi;
use crate::models::{ReportSummary, UnitCount};
use crate::services::export_service;
use crate::services::notification_service::Notifier;
use crate::utils::errors::{AppError, AppResult};
use crate::viewmodels::page_state::PageState;

/// Periodos seleccionables: (identificador, nombre)
pub const REPORT_PERIODS: [(&str, &str); 5] = [
    ("enero-2026", "Enero 2026"),
    ("diciembre-2025", "Diciembre 2025"),
    ("noviembre-2025", "Noviembre 2025"),
    ("q4-2025", "Q4 2025"),
    ("2025", "Año 2025"),
];

pub const DEFAULT_PERIOD: &str = "enero-2026";

pub fn period_name(id: &str) -> Option<&'static str> {
    REPORT_PERIODS
        .iter()
        .find(|(period, _)| *period == id)
        .map(|(_, name)| *name)
}

/// Resumen del periodo y distribución de la flota por unidad operativa
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    pub summary: Option<ReportSummary>,
    pub by_unit: Vec<UnitCount>,
}

pub struct ReportsViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    pub period: String,
    pub state: PageState<ReportData>,
}

impl ReportsViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            period: DEFAULT_PERIOD.to_string(),
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let fut = async move {
            let (summary, by_unit) =
                futures::try_join!(api.report_summary(), api.stats_by_unit())?;
            Ok::<_, AppError>(ReportData {
                summary: Some(summary),
                by_unit,
            })
        };
        self.state.load(fut, &self.notifier, "resumen").await
    }

    pub fn summary(&self) -> Option<&ReportSummary> {
        self.state.data.summary.as_ref()
    }

    /// Unidades ordenadas de mayor a menor cantidad de vehículos
    pub fn units_by_size(&self) -> Vec<&UnitCount> {
        let mut units: Vec<&UnitCount> = self.state.data.by_unit.iter().collect();
        units.sort_by(|a, b| b.count.cmp(&a.count));
        units
    }

    pub fn csv(&self, generated_at: DateTime<Utc>) -> Option<String> {
        self.summary()
            .map(|summary| export_service::report_csv(summary, &self.period, generated_at))
    }

    /// Escribir `reporte_flota_{periodo}.csv`; carga el resumen si aún no está
    pub async fn export(&mut self, dir: &Path, generated_at: DateTime<Utc>) -> AppResult<PathBuf> {
        if self.summary().is_none() {
            self.load().await;
        }
        let contents = self
            .csv(generated_at)
            .ok_or_else(|| AppError::NotFound("Resumen de reportes no disponible".to_string()))?;

        let file_name = export_service::report_file_name(&self.period);
        match export_service::write_export(dir, &file_name, &contents).await {
            Ok(path) => {
                self.notifier.success(
                    "Reporte Excel generado",
                    Some("El archivo se ha descargado correctamente".to_string()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;
    use chrono::TimeZone;

    fn summary() -> ReportSummary {
        ReportSummary {
            generated_at: Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap(),
            period: "Enero 2026".to_string(),
            total_vehicles: 120,
            operational: 98,
            maintenance: 15,
            critical: 7,
            total_fuel_gallons: 15420.5,
            total_fuel_cost: 52430.0,
            total_maintenance_cost: 28750.0,
            total_distance_km: 285000,
            alerts_generated: 45,
            alerts_attended: 38,
            efficiency_index: 87.5,
        }
    }

    #[tokio::test]
    async fn test_load_joins_summary_and_units() {
        let api = FakeApi::default();
        *api.summary.lock().unwrap() = Some(summary());
        *api.units.lock().unwrap() = vec![
            UnitCount { unit: "Base Naval Sur".to_string(), count: 12 },
            UnitCount { unit: "Comandancia General".to_string(), count: 30 },
            UnitCount { unit: "Capitanía del Puerto".to_string(), count: 12 },
        ];
        let mut vm = ReportsViewModel::new(Arc::new(api), Notifier::new());

        assert!(vm.load().await);
        assert_eq!(vm.summary().map(|s| s.total_vehicles), Some(120));
        let units: Vec<&str> = vm.units_by_size().iter().map(|u| u.unit.as_str()).collect();
        assert_eq!(units, vec!["Comandancia General", "Base Naval Sur", "Capitanía del Puerto"]);
    }

    #[tokio::test]
    async fn test_failed_unit_stats_keep_previous_report() {
        let api = Arc::new(FakeApi::default());
        *api.summary.lock().unwrap() = Some(summary());
        let notifier = Notifier::new();
        let mut vm = ReportsViewModel::new(api.clone(), notifier.clone());
        assert!(vm.load().await);

        api.fail("por-unidad");
        assert!(!vm.load().await);
        assert!(vm.summary().is_some());
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_period_names() {
        assert_eq!(period_name(DEFAULT_PERIOD), Some("Enero 2026"));
        assert_eq!(period_name("q4-2025"), Some("Q4 2025"));
        assert_eq!(period_name("2030"), None);
    }

    #[tokio::test]
    async fn test_export_loads_summary_on_demand() {
        let api = FakeApi::default();
        *api.summary.lock().unwrap() = Some(summary());
        let notifier = Notifier::new();
        let mut vm = ReportsViewModel::new(Arc::new(api), notifier.clone());
        vm.period = "q4-2025".to_string();

        let dir = std::env::temp_dir()
            .join(format!("fleet_dashboard_reports_{}", std::process::id()));
        let path = vm.export(&dir, Utc::now()).await.unwrap();

        assert!(path.ends_with("reporte_flota_q4-2025.csv"));
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("Período:,q4-2025"));
        assert!(contents.contains("Alertas Atendidas:,38"));
        assert_eq!(
            notifier.drain().last().map(|n| n.title.clone()),
            Some("Reporte Excel generado".to_string())
        );
    }

    #[tokio::test]
    async fn test_export_without_summary_fails() {
        let api = FakeApi::default();
        api.fail("resumen");
        let mut vm = ReportsViewModel::new(Arc::new(api), Notifier::new());
        let dir = std::env::temp_dir();
        assert!(matches!(vm.export(&dir, Utc::now()).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_export_write_failure_notifies() {
        let api = FakeApi::default();
        *api.summary.lock().unwrap() = Some(summary());
        let notifier = Notifier::new();
        let mut vm = ReportsViewModel::new(Arc::new(api), notifier.clone());

        // Un archivo normal no puede hacer de directorio de destino
        let blocker = std::env::temp_dir()
            .join(format!("fleet_dashboard_reports_blocker_{}", std::process::id()));
        tokio::fs::write(&blocker, "x").await.unwrap();

        let result = vm.export(&blocker.join("salida"), Utc::now()).await;
        assert!(matches!(result, Err(AppError::Io(_))));
        let last = notifier.drain().pop().unwrap();
        assert_eq!(last.title, "Error al exportar");
        assert_eq!(last.level, crate::services::NotificationLevel::Error);
    }
}
