//! Filtros y búsqueda en memoria
//!
//! Un registro pasa el filtro solo si cumple TODOS los criterios activos.
//! Una selección "Todos"/"Todas" y una búsqueda vacía no filtran nada. La
//! búsqueda de texto es una subcadena sin distinguir mayúsculas.

use std::str::FromStr;

use crate::models::{Alert, AlertSeverity, GpsLocation, Vehicle, VehicleQuery, VehicleStatus};

/// Criterio aplicable a una colección ya descargada
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;

    /// Vista filtrada, conservando el orden original
    fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Selección de un desplegable: todos los valores o uno concreto
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Only(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }

    pub fn accepts_with<F: Fn(&T) -> bool>(&self, predicate: F) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(value) => predicate(value),
        }
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn accepts(&self, value: &T) -> bool {
        self.accepts_with(|selected| selected == value)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "todos" | "todas" => Ok(Selection::All),
            _ => s.parse().map(Selection::Only),
        }
    }
}

/// Texto de búsqueda normalizado a minúsculas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Verdadero si la búsqueda está vacía o aparece en alguno de los campos
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        !self.is_active()
            || fields
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Filtro de la página de vehículos
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleFilter {
    pub status: Selection<VehicleStatus>,
    pub vehicle_type: Selection<String>,
    pub search: TextQuery,
}

impl VehicleFilter {
    /// Parámetros equivalentes para filtrar también en el servidor
    pub fn to_query(&self, limit: u32) -> VehicleQuery {
        VehicleQuery {
            status: self.status.as_option().copied(),
            vehicle_type: self.vehicle_type.as_option().cloned(),
            unit: None,
            search: self
                .search
                .is_active()
                .then(|| self.search.as_str().to_string()),
            limit: Some(limit),
        }
    }
}

impl RecordFilter<Vehicle> for VehicleFilter {
    fn matches(&self, vehicle: &Vehicle) -> bool {
        self.status.accepts(&vehicle.status)
            && self
                .vehicle_type
                .accepts_with(|t| t.to_lowercase() == vehicle.vehicle_type.to_lowercase())
            && self.search.matches_any(&[
                vehicle.plate.as_str(),
                vehicle.make_model.as_str(),
                vehicle.responsible.as_str(),
            ])
    }
}

/// Estado de atención de las alertas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttendanceFilter {
    #[default]
    All,
    Pending,
    Attended,
}

impl AttendanceFilter {
    pub fn accepts(&self, attended: bool) -> bool {
        match self {
            AttendanceFilter::All => true,
            AttendanceFilter::Pending => !attended,
            AttendanceFilter::Attended => attended,
        }
    }
}

impl FromStr for AttendanceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "todas" => Ok(AttendanceFilter::All),
            "pendientes" => Ok(AttendanceFilter::Pending),
            "atendidas" => Ok(AttendanceFilter::Attended),
            other => Err(format!("Estado de alerta desconocido: '{}'", other)),
        }
    }
}

/// Filtro de la página de alertas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertFilter {
    pub severity: Selection<AlertSeverity>,
    pub attendance: AttendanceFilter,
    pub search: TextQuery,
}

impl RecordFilter<Alert> for AlertFilter {
    fn matches(&self, alert: &Alert) -> bool {
        self.severity.accepts(&alert.severity)
            && self.attendance.accepts(alert.attended)
            && self
                .search
                .matches_any(&[alert.vehicle_plate.as_str(), alert.kind.as_str()])
    }
}

/// Filtro del mapa GPS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFilter {
    pub status: Selection<VehicleStatus>,
    pub search: TextQuery,
}

impl RecordFilter<GpsLocation> for LocationFilter {
    fn matches(&self, location: &GpsLocation) -> bool {
        self.status.accepts(&location.status)
            && self
                .search
                .matches_any(&[location.plate.as_str(), location.place_name.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vehicle(plate: &str, status: &str, vehicle_type: &str, make_model: &str) -> Vehicle {
        serde_json::from_value(json!({
            "id": plate,
            "placa": plate,
            "estado": status,
            "tipo": vehicle_type,
            "marca_modelo": make_model,
            "responsable": "Teniente de Navío Luis Pacheco"
        }))
        .unwrap()
    }

    fn alert(id: &str, plate: &str, kind: &str, severity: &str, attended: bool) -> Alert {
        serde_json::from_value(json!({
            "id": id,
            "vehiculo_placa": plate,
            "tipo": kind,
            "severidad": severity,
            "atendida": attended
        }))
        .unwrap()
    }

    fn location(plate: &str, status: &str, place: &str) -> GpsLocation {
        serde_json::from_value(json!({
            "id": plate,
            "placa": plate,
            "estado": status,
            "lat": -2.2,
            "lng": -79.9,
            "ubicacion_nombre": place
        }))
        .unwrap()
    }

    #[test]
    fn test_status_filter_example() {
        let vehicles = vec![
            vehicle("ABC-123", "Operativo", "Camioneta", "Toyota Hilux"),
            vehicle("XYZ-999", "Crítico", "Bus", "Hino AK"),
        ];
        let filter = VehicleFilter {
            status: Selection::Only(VehicleStatus::Operativo),
            ..Default::default()
        };
        let result = filter.apply(&vehicles);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].plate, "ABC-123");
    }

    #[test]
    fn test_inactive_filter_returns_everything_in_order() {
        let vehicles = vec![
            vehicle("B-2", "Reserva", "Bus", "Hino AK"),
            vehicle("A-1", "Operativo", "SUV", "Chevrolet Captiva"),
        ];
        let result = VehicleFilter::default().apply(&vehicles);
        let plates: Vec<&str> = result.iter().map(|v| v.plate.as_str()).collect();
        assert_eq!(plates, vec!["B-2", "A-1"]);
    }

    #[test]
    fn test_text_search_is_case_insensitive() {
        let vehicles = vec![
            vehicle("GAB-1234", "Operativo", "Camioneta", "Toyota Hilux"),
            vehicle("PXY-9999", "Operativo", "Camión", "Hino 500"),
        ];
        let lower = VehicleFilter {
            search: TextQuery::new("gab"),
            ..Default::default()
        };
        let upper = VehicleFilter {
            search: TextQuery::new("GAB"),
            ..Default::default()
        };
        assert_eq!(lower.apply(&vehicles), upper.apply(&vehicles));
        assert_eq!(lower.apply(&vehicles).len(), 1);

        let by_make = VehicleFilter {
            search: TextQuery::new("hino"),
            ..Default::default()
        };
        assert_eq!(by_make.apply(&vehicles)[0].plate, "PXY-9999");
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let vehicles = vec![
            vehicle("GAB-1", "Operativo", "Bus", "Hino AK"),
            vehicle("GAB-2", "Crítico", "Bus", "Hino AK"),
            vehicle("GAB-3", "Operativo", "SUV", "Chevrolet Captiva"),
            vehicle("PXX-4", "Operativo", "Bus", "Hino AK"),
        ];
        let filter = VehicleFilter {
            status: Selection::Only(VehicleStatus::Operativo),
            vehicle_type: Selection::Only("bus".to_string()),
            search: TextQuery::new("gab"),
        };

        // Cada registro aparece si y solo si cumple los tres predicados
        for v in &vehicles {
            let expected = v.status == VehicleStatus::Operativo
                && v.vehicle_type.to_lowercase() == "bus"
                && v.plate.to_lowercase().contains("gab");
            assert_eq!(filter.matches(v), expected, "vehículo {}", v.plate);
        }
        assert_eq!(filter.apply(&vehicles).len(), 1);
    }

    #[test]
    fn test_unicode_lowercase_search() {
        let locations = vec![
            location("GAB-1", "Operativo", "Capitanía del Puerto Guayaquil"),
            location("MAN-2", "Reserva", "Puerto de Manta"),
        ];
        let filter = LocationFilter {
            search: TextQuery::new("CAPITANÍA"),
            ..Default::default()
        };
        assert_eq!(filter.apply(&locations).len(), 1);

        let by_status = LocationFilter {
            status: Selection::Only(VehicleStatus::Reserva),
            search: TextQuery::new("puerto"),
        };
        assert_eq!(by_status.apply(&locations)[0].plate, "MAN-2");
    }

    #[test]
    fn test_alert_filter() {
        let alerts = vec![
            alert("1", "GAB-1", "Combustible Bajo", "media", false),
            alert("2", "GAB-2", "Falla Reportada", "alta", true),
            alert("3", "PXX-3", "Falla Reportada", "alta", false),
        ];

        let pending_high = AlertFilter {
            severity: Selection::Only(AlertSeverity::Alta),
            attendance: AttendanceFilter::Pending,
            search: TextQuery::default(),
        };
        let ids: Vec<&str> = pending_high.apply(&alerts).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);

        let by_kind = AlertFilter {
            search: TextQuery::new("falla"),
            attendance: AttendanceFilter::Attended,
            ..Default::default()
        };
        let ids: Vec<&str> = by_kind.apply(&alerts).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("Todos".parse::<Selection<VehicleStatus>>().unwrap(), Selection::All);
        assert_eq!("todas".parse::<Selection<AlertSeverity>>().unwrap(), Selection::All);
        assert_eq!(
            "Crítico".parse::<Selection<VehicleStatus>>().unwrap(),
            Selection::Only(VehicleStatus::Critico)
        );
        assert!("nada".parse::<Selection<VehicleStatus>>().is_err());
        assert_eq!("Pendientes".parse::<AttendanceFilter>().unwrap(), AttendanceFilter::Pending);
    }

    #[test]
    fn test_vehicle_filter_to_query() {
        let filter = VehicleFilter {
            status: Selection::Only(VehicleStatus::Mantenimiento),
            vehicle_type: Selection::All,
            search: TextQuery::new("  Hilux "),
        };
        let query = filter.to_query(120);
        assert_eq!(query.status, Some(VehicleStatus::Mantenimiento));
        assert_eq!(query.vehicle_type, None);
        assert_eq!(query.search.as_deref(), Some("hilux"));
        assert_eq!(query.limit, Some(120));
    }
}
