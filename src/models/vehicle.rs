//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como lo entrega el backend
//! (`GET /vehiculos`), sus historiales y los parámetros de consulta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estado operativo del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleStatus {
    Operativo,
    Mantenimiento,
    #[serde(rename = "Crítico")]
    Critico,
    Reserva,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Operativo,
        VehicleStatus::Mantenimiento,
        VehicleStatus::Critico,
        VehicleStatus::Reserva,
    ];

    /// Etiqueta tal como la usa el backend
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Operativo => "Operativo",
            VehicleStatus::Mantenimiento => "Mantenimiento",
            VehicleStatus::Critico => "Crítico",
            VehicleStatus::Reserva => "Reserva",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "operativo" => Ok(VehicleStatus::Operativo),
            "mantenimiento" => Ok(VehicleStatus::Mantenimiento),
            "crítico" | "critico" => Ok(VehicleStatus::Critico),
            "reserva" => Ok(VehicleStatus::Reserva),
            other => Err(format!("Estado de vehículo desconocido: '{}'", other)),
        }
    }
}

/// Ubicación de referencia del vehículo
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VehicleLocation {
    #[serde(rename = "nombre")]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: String,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "tipo", default)]
    pub vehicle_type: String,
    #[serde(rename = "marca_modelo", default)]
    pub make_model: String,
    #[serde(rename = "anio", default)]
    pub year: i32,
    #[serde(rename = "capacidad", default)]
    pub capacity: u32,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "kilometraje", default)]
    pub odometer_km: u64,
    #[serde(rename = "estado")]
    pub status: VehicleStatus,
    #[serde(rename = "disponibilidad", default)]
    pub availability: String,
    #[serde(rename = "unidad_operativa", default)]
    pub operating_unit: String,
    #[serde(rename = "responsable", default)]
    pub responsible: String,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<VehicleLocation>,
    #[serde(rename = "consumo_promedio", default)]
    pub average_consumption: f64,
    #[serde(rename = "tanque_capacidad", default)]
    pub tank_capacity: u32,
    #[serde(rename = "nivel_combustible", default)]
    pub fuel_level: u32,
    #[serde(rename = "fecha_adquisicion", default)]
    pub acquired_at: Option<DateTime<Utc>>,
    #[serde(rename = "ultimo_mantenimiento", default)]
    pub last_maintenance: Option<DateTime<Utc>>,
    #[serde(rename = "proximo_mantenimiento", default)]
    pub next_maintenance: Option<DateTime<Utc>>,
    #[serde(rename = "numero_serie_motor", default)]
    pub engine_serial: String,
    #[serde(rename = "numero_chasis", default)]
    pub chassis_number: String,
    #[serde(rename = "seguro_vigente", default)]
    pub insurance_valid: bool,
    #[serde(rename = "matricula_vigente", default)]
    pub registration_valid: bool,
}

impl Vehicle {
    /// Días que faltan para el próximo mantenimiento (negativo si ya venció)
    pub fn days_until_maintenance(&self, now: DateTime<Utc>) -> i64 {
        let Some(next) = self.next_maintenance else {
            return 0;
        };
        let seconds = (next - now).num_seconds();
        // División con redondeo hacia arriba, también para valores negativos
        let day = 86_400;
        if seconds > 0 {
            (seconds + day - 1) / day
        } else {
            seconds / day
        }
    }

    /// Documentación completa: seguro y matrícula vigentes
    pub fn documents_valid(&self) -> bool {
        self.insurance_valid && self.registration_valid
    }
}

/// Registro del historial de mantenimiento
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceRecord {
    pub id: String,
    #[serde(rename = "vehiculo_id")]
    pub vehicle_id: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "kilometraje", default)]
    pub odometer_km: u64,
    #[serde(rename = "costo", default)]
    pub cost: f64,
    #[serde(rename = "proveedor", default)]
    pub provider: String,
    #[serde(rename = "observaciones", default)]
    pub notes: String,
}

/// Registro del historial de carga de combustible
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelRecord {
    pub id: String,
    #[serde(rename = "vehiculo_id")]
    pub vehicle_id: String,
    #[serde(rename = "fecha")]
    pub date: DateTime<Utc>,
    #[serde(rename = "galones")]
    pub gallons: f64,
    #[serde(rename = "costo_galon")]
    pub cost_per_gallon: f64,
    #[serde(rename = "estacion", default)]
    pub station: String,
    #[serde(rename = "kilometraje_actual", default)]
    pub odometer_km: u64,
    #[serde(rename = "autorizado_por", default)]
    pub authorized_by: String,
}

impl FuelRecord {
    pub fn total_cost(&self) -> f64 {
        self.gallons * self.cost_per_gallon
    }
}

/// Parámetros de consulta para `GET /vehiculos`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VehicleQuery {
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(rename = "unidad", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "busqueda", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "limite", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl VehicleQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }
}
