//! Ficha de un vehículo
//!
//! Vehículo, historial de mantenimiento e historial de combustible se piden
//! en paralelo. Un identificador inexistente devuelve al listado.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::FleetApi;
use crate::models::{FuelRecord, MaintenanceRecord, Vehicle};
use crate::services::notification_service::Notifier;
use crate::viewmodels::page_state::PageState;

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    pub maintenance: Vec<MaintenanceRecord>,
    pub fuel: Vec<FuelRecord>,
}

impl VehicleDetail {
    pub fn days_until_maintenance(&self, now: DateTime<Utc>) -> i64 {
        self.vehicle.days_until_maintenance(now)
    }

    pub fn maintenance_cost(&self) -> f64 {
        self.maintenance.iter().map(|m| m.cost).sum()
    }

    pub fn fuel_cost(&self) -> f64 {
        self.fuel.iter().map(FuelRecord::total_cost).sum()
    }

    pub fn fuel_gallons(&self) -> f64 {
        self.fuel.iter().map(|f| f.gallons).sum()
    }
}

/// Resultado de abrir la ficha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    Loaded,
    /// El vehículo no existe: volver al listado
    RedirectToList,
    Failed,
}

pub struct VehicleDetailViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    pub state: PageState<Option<VehicleDetail>>,
}

impl VehicleDetailViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self, id: &str) -> DetailOutcome {
        // La ficha de otro vehículo no sobrevive a un fallo
        if self.detail().is_some_and(|d| d.vehicle.id != id) {
            self.state.data = None;
        }
        self.state.begin();
        let api = &self.api;
        let result = futures::try_join!(
            api.get_vehicle(id),
            api.maintenance_history(id),
            api.fuel_history(id),
        );

        match result {
            Err(e) if e.is_not_found() => {
                log::warn!("⚠️ Vehículo {} no encontrado, volviendo al listado", id);
                self.state.loading = false;
                self.notifier.error("Vehículo no encontrado", None);
                DetailOutcome::RedirectToList
            }
            result => {
                let result = result.map(|(vehicle, maintenance, fuel)| {
                    Some(VehicleDetail {
                        vehicle,
                        maintenance,
                        fuel,
                    })
                });
                if self.state.finish(result, &self.notifier, "vehículo") {
                    DetailOutcome::Loaded
                } else {
                    DetailOutcome::Failed
                }
            }
        }
    }

    pub fn detail(&self) -> Option<&VehicleDetail> {
        self.state.data.as_ref()
    }
}
