//! Modelos de Analytics
//!
//! KPIs, estadísticas agregadas y resumen de reportes. Todos se calculan en
//! el backend; el cliente solo los muestra.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vehicle::VehicleStatus;

/// Vehículo con mayor kilometraje (dentro de los KPIs)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MostUsedVehicle {
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "kilometraje")]
    pub odometer_km: u64,
    #[serde(rename = "tipo", default)]
    pub vehicle_type: String,
}

/// KPIs estratégicos del dashboard (`GET /kpis`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kpis {
    #[serde(rename = "porcentaje_flota_operativa")]
    pub operational_fleet_pct: f64,
    #[serde(rename = "indice_disponibilidad")]
    pub availability_index: f64,
    #[serde(rename = "vehiculos_mantenimiento")]
    pub vehicles_in_maintenance: u32,
    #[serde(rename = "alertas_criticas")]
    pub critical_alerts: u32,
    #[serde(rename = "eficiencia_flota")]
    pub fleet_efficiency: f64,
    #[serde(rename = "consumo_mensual_estimado")]
    pub estimated_monthly_consumption: f64,
    #[serde(rename = "cumplimiento_mantenimiento")]
    pub maintenance_compliance: f64,
    #[serde(rename = "vehiculos_mas_utilizados", default)]
    pub most_used_vehicles: Vec<MostUsedVehicle>,
    #[serde(rename = "indice_riesgo_operativo")]
    pub operational_risk_index: f64,
    #[serde(rename = "tendencia_fallas", default)]
    pub failure_trend: String,
    #[serde(rename = "tiempo_promedio_mantenimiento")]
    pub average_maintenance_days: u32,
    #[serde(rename = "kilometraje_promedio")]
    pub average_odometer_km: u64,
    #[serde(rename = "total_vehiculos")]
    pub total_vehicles: u32,
    #[serde(rename = "vehiculos_operativos")]
    pub operational_vehicles: u32,
    #[serde(rename = "vehiculos_criticos")]
    pub critical_vehicles: u32,
    #[serde(rename = "vehiculos_reserva")]
    pub reserve_vehicles: u32,
    #[serde(rename = "ahorro_estimado_mensual")]
    pub estimated_monthly_savings: f64,
    #[serde(rename = "costo_operacion_diario")]
    pub daily_operating_cost: f64,
}

/// Cantidad de vehículos por estado (`GET /estadisticas/por-estado`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusCount {
    #[serde(rename = "estado")]
    pub status: VehicleStatus,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

/// Cantidad de vehículos por tipo (`GET /estadisticas/por-tipo`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeCount {
    #[serde(rename = "tipo")]
    pub vehicle_type: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

/// Cantidad de vehículos por unidad operativa (`GET /estadisticas/por-unidad`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitCount {
    #[serde(rename = "unidad")]
    pub unit: String,
    #[serde(rename = "cantidad")]
    pub count: u32,
}

/// Consumo de combustible mensual
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyConsumption {
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "consumo")]
    pub consumption: f64,
    #[serde(rename = "costo")]
    pub cost: f64,
}

/// Mantenimientos por mes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyMaintenance {
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "preventivo")]
    pub preventive: u32,
    #[serde(rename = "correctivo")]
    pub corrective: u32,
    #[serde(rename = "costo")]
    pub cost: f64,
}

/// Resumen para reportes (`GET /reportes/resumen`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    #[serde(rename = "fecha_generacion")]
    pub generated_at: DateTime<Utc>,
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "total_vehiculos")]
    pub total_vehicles: u32,
    #[serde(rename = "operativos")]
    pub operational: u32,
    #[serde(rename = "mantenimiento")]
    pub maintenance: u32,
    #[serde(rename = "criticos")]
    pub critical: u32,
    #[serde(rename = "consumo_total_galones")]
    pub total_fuel_gallons: f64,
    #[serde(rename = "costo_total_combustible")]
    pub total_fuel_cost: f64,
    #[serde(rename = "costo_total_mantenimiento")]
    pub total_maintenance_cost: f64,
    #[serde(rename = "kilometraje_total_recorrido")]
    pub total_distance_km: u64,
    #[serde(rename = "alertas_generadas")]
    pub alerts_generated: u32,
    #[serde(rename = "alertas_atendidas")]
    pub alerts_attended: u32,
    #[serde(rename = "indice_eficiencia")]
    pub efficiency_index: f64,
}

impl ReportSummary {
    /// Porcentaje de alertas atendidas sobre las generadas
    pub fn attended_ratio_pct(&self) -> f64 {
        if self.alerts_generated == 0 {
            return 0.0;
        }
        f64::from(self.alerts_attended) / f64::from(self.alerts_generated) * 100.0
    }
}
