//! Modelo de ubicaciones GPS
//!
//! Posición reportada por cada vehículo (`GET /ubicaciones-gps`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::vehicle::VehicleStatus;

/// Ubicación GPS de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsLocation {
    pub id: String,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "tipo", default)]
    pub vehicle_type: String,
    #[serde(rename = "estado")]
    pub status: VehicleStatus,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "ubicacion_nombre", default)]
    pub place_name: String,
    #[serde(rename = "responsable", default)]
    pub responsible: String,
    #[serde(rename = "velocidad", default)]
    pub speed_kmh: u32,
    #[serde(rename = "ultimo_reporte", default)]
    pub last_report: Option<DateTime<Utc>>,
}

impl GpsLocation {
    pub fn is_moving(&self) -> bool {
        self.speed_kmh > 0
    }
}

/// Conteo de ubicaciones por estado, en el orden fijo de `VehicleStatus::ALL`
pub fn counts_by_status(locations: &[GpsLocation]) -> Vec<(VehicleStatus, usize)> {
    let mut counts: HashMap<VehicleStatus, usize> = HashMap::new();
    for location in locations {
        *counts.entry(location.status).or_insert(0) += 1;
    }
    VehicleStatus::ALL
        .iter()
        .map(|status| (*status, counts.get(status).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_and_count() {
        let locations: Vec<GpsLocation> = serde_json::from_value(json!([
            {"id": "1", "placa": "GAB-1234", "tipo": "Bus", "estado": "Operativo",
             "lat": -2.2, "lng": -79.9,
             "ubicacion_nombre": "Puerto Marítimo Guayaquil", "responsable": "x", "velocidad": 40,
             "ultimo_reporte": "2026-01-10T08:00:00+00:00"},
            {"id": "2", "placa": "MBC-2222", "estado": "Operativo", "lat": -0.95, "lng": -80.73},
            {"id": "3", "placa": "EAA-3333", "estado": "Crítico", "lat": 0.98, "lng": -79.65}
        ]))
        .unwrap();

        assert!(locations[0].is_moving());
        assert!(!locations[1].is_moving());
        assert_eq!(
            counts_by_status(&locations),
            vec![
                (VehicleStatus::Operativo, 2),
                (VehicleStatus::Mantenimiento, 0),
                (VehicleStatus::Critico, 1),
                (VehicleStatus::Reserva, 0),
            ]
        );
    }
}
