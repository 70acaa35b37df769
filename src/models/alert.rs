//! Modelo de alertas
//!
//! Alertas de mantenimiento, combustible y documentación generadas por el
//! backend. El único campo que el cliente modifica es `atendida`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severidad de la alerta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Alta,
    Media,
    Baja,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 3] =
        [AlertSeverity::Alta, AlertSeverity::Media, AlertSeverity::Baja];

    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Alta => "alta",
            AlertSeverity::Media => "media",
            AlertSeverity::Baja => "baja",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AlertSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alta" => Ok(AlertSeverity::Alta),
            "media" => Ok(AlertSeverity::Media),
            "baja" => Ok(AlertSeverity::Baja),
            other => Err(format!("Severidad desconocida: '{}'", other)),
        }
    }
}

/// Alerta del sistema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "severidad")]
    pub severity: AlertSeverity,
    #[serde(rename = "icono", default)]
    pub icon: String,
    #[serde(rename = "vehiculo_placa", default)]
    pub vehicle_plate: String,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(rename = "fecha", default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "atendida", default)]
    pub attended: bool,
    #[serde(rename = "responsable", default)]
    pub responsible: String,
}

/// Parámetros de consulta para `GET /alertas`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AlertQuery {
    #[serde(rename = "severidad", skip_serializing_if = "Option::is_none")]
    pub severity: Option<AlertSeverity>,
    #[serde(rename = "atendida", skip_serializing_if = "Option::is_none")]
    pub attended: Option<bool>,
    #[serde(rename = "limite", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Respuesta de `PATCH /alertas/{id}/atender`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendAlertResponse {
    #[serde(rename = "mensaje", default)]
    pub message: String,
    pub id: String,
}

/// Conteos mostrados en la cabecera de la página de alertas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCounts {
    pub total: usize,
    pub pending: usize,
    pub pending_high: usize,
    pub pending_medium: usize,
    pub pending_low: usize,
}

impl AlertCounts {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut counts = AlertCounts {
            total: alerts.len(),
            ..Default::default()
        };
        for alert in alerts.iter().filter(|a| !a.attended) {
            counts.pending += 1;
            match alert.severity {
                AlertSeverity::Alta => counts.pending_high += 1,
                AlertSeverity::Media => counts.pending_medium += 1,
                AlertSeverity::Baja => counts.pending_low += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alert(id: &str, severity: AlertSeverity, attended: bool) -> Alert {
        Alert {
            id: id.to_string(),
            kind: "Combustible Bajo".to_string(),
            severity,
            icon: "fuel".to_string(),
            vehicle_plate: "GAB-1234".to_string(),
            message: String::new(),
            timestamp: None,
            attended,
            responsible: String::new(),
        }
    }

    #[test]
    fn test_deserialize_backend_alert() {
        let alert: Alert = serde_json::from_value(json!({
            "id": "a-1",
            "tipo": "Mantenimiento Vencido",
            "severidad": "alta",
            "icono": "wrench",
            "vehiculo_placa": "GAB-1234",
            "mensaje": "Alerta: Mantenimiento Vencido requiere atención inmediata",
            "fecha": "2026-01-10T08:00:00.123456+00:00",
            "atendida": false,
            "responsable": "Sargento Primero José García"
        }))
        .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Alta);
        assert!(!alert.attended);
        assert!(alert.timestamp.is_some());
    }

    #[test]
    fn test_query_serialization() {
        let query = AlertQuery {
            attended: Some(false),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"atendida": false, "limite": 5})
        );
    }

    #[test]
    fn test_counts_only_pending_by_severity() {
        let alerts = vec![
            alert("1", AlertSeverity::Alta, false),
            alert("2", AlertSeverity::Alta, true),
            alert("3", AlertSeverity::Media, false),
            alert("4", AlertSeverity::Baja, false),
            alert("5", AlertSeverity::Baja, false),
        ];
        let counts = AlertCounts::from_alerts(&alerts);
        assert_eq!(
            counts,
            AlertCounts {
                total: 5,
                pending: 4,
                pending_high: 1,
                pending_medium: 1,
                pending_low: 2,
            }
        );
    }
}
