//! Control de combustible
//!
//! Consumo mensual y flota se cargan en paralelo; el resto son agregados
//! calculados sobre lo cargado.

use std::sync::Arc;

use crate::client::FleetApi;
use crate::models::{MonthlyConsumption, Vehicle, VehicleQuery};
use crate::services::notification_service::Notifier;
use crate::utils::errors::AppError;
use crate::viewmodels::page_state::PageState;

/// Nivel de combustible (%) por debajo del cual se avisa
pub const LOW_FUEL_THRESHOLD: u32 = 25;
pub const TOP_CONSUMERS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct FuelData {
    pub monthly: Vec<MonthlyConsumption>,
    pub vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeConsumption {
    pub vehicle_type: String,
    pub consumption: i64,
}

pub struct FuelViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    fetch_limit: u32,
    pub state: PageState<FuelData>,
}

impl FuelViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier, fetch_limit: u32) -> Self {
        Self {
            api,
            notifier,
            fetch_limit,
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let query = VehicleQuery::with_limit(self.fetch_limit);
        let fut = async move {
            let (monthly, vehicles) =
                futures::try_join!(api.monthly_consumption(), api.list_vehicles(&query))?;
            Ok::<_, AppError>(FuelData { monthly, vehicles })
        };
        self.state.load(fut, &self.notifier, "datos de combustible").await
    }

    pub fn annual_consumption(&self) -> f64 {
        self.state.data.monthly.iter().map(|m| m.consumption).sum()
    }

    pub fn annual_cost(&self) -> f64 {
        self.state.data.monthly.iter().map(|m| m.cost).sum()
    }

    pub fn monthly_average(&self) -> f64 {
        let months = self.state.data.monthly.len();
        if months == 0 {
            return 0.0;
        }
        self.annual_consumption() / months as f64
    }

    pub fn low_fuel(&self) -> Vec<&Vehicle> {
        self.state
            .data
            .vehicles
            .iter()
            .filter(|v| v.fuel_level < LOW_FUEL_THRESHOLD)
            .collect()
    }

    /// Suma de consumo promedio por tipo, en orden de primera aparición
    pub fn consumption_by_type(&self) -> Vec<TypeConsumption> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for vehicle in &self.state.data.vehicles {
            match totals.iter_mut().find(|(t, _)| *t == vehicle.vehicle_type) {
                Some((_, total)) => *total += vehicle.average_consumption,
                None => totals.push((vehicle.vehicle_type.clone(), vehicle.average_consumption)),
            }
        }
        totals
            .into_iter()
            .map(|(vehicle_type, total)| TypeConsumption {
                vehicle_type,
                consumption: total.round() as i64,
            })
            .collect()
    }

    pub fn top_consumers(&self) -> Vec<&Vehicle> {
        let mut vehicles: Vec<&Vehicle> = self.state.data.vehicles.iter().collect();
        vehicles.sort_by(|a, b| b.average_consumption.total_cmp(&a.average_consumption));
        vehicles.truncate(TOP_CONSUMERS);
        vehicles
    }
}
