//! Exportación CSV
//!
//! Genera el texto CSV (RFC 4180) de la flota filtrada y del reporte
//! ejecutivo, y lo escribe en disco.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::models::{ReportSummary, Vehicle};
use crate::utils::errors::AppResult;

pub const VEHICLE_HEADER: [&str; 8] = [
    "Placa",
    "Tipo",
    "Marca/Modelo",
    "Estado",
    "Unidad",
    "Responsable",
    "Kilometraje",
    "Combustible %",
];

/// Escritor CSV mínimo por filas
#[derive(Debug, Default)]
pub struct CsvWriter {
    buffer: String,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = true;
        for field in fields {
            if !first {
                self.buffer.push(',');
            }
            first = false;
            push_field(&mut self.buffer, field.as_ref());
        }
        self.buffer.push_str("\r\n");
        self
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Entrecomilla si el campo contiene coma, comillas o salto de línea
fn push_field(buffer: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        buffer.push('"');
        buffer.push_str(&field.replace('"', "\"\""));
        buffer.push('"');
    } else {
        buffer.push_str(field);
    }
}

/// Flota en el orden en que se muestra
pub fn vehicles_csv<'a, I>(vehicles: I) -> String
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut writer = CsvWriter::new();
    writer.row(VEHICLE_HEADER);
    for v in vehicles {
        writer.row([
            v.plate.clone(),
            v.vehicle_type.clone(),
            v.make_model.clone(),
            v.status.label().to_string(),
            v.operating_unit.clone(),
            v.responsible.clone(),
            v.odometer_km.to_string(),
            v.fuel_level.to_string(),
        ]);
    }
    writer.finish()
}

/// Reporte ejecutivo con el formato etiquetado de secciones
pub fn report_csv(summary: &ReportSummary, period: &str, generated_at: DateTime<Utc>) -> String {
    let mut w = CsvWriter::new();
    w.row(["REPORTE DE FLOTA VEHICULAR - ARMADA DEL ECUADOR"])
        .row([
            "Fecha de generación:".to_string(),
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ])
        .row(["Período:", period])
        .row([""])
        .row(["RESUMEN EJECUTIVO"])
        .row(["Total de Vehículos:".to_string(), summary.total_vehicles.to_string()])
        .row(["Vehículos Operativos:".to_string(), summary.operational.to_string()])
        .row(["En Mantenimiento:".to_string(), summary.maintenance.to_string()])
        .row(["Estado Crítico:".to_string(), summary.critical.to_string()])
        .row([""])
        .row(["INDICADORES OPERATIVOS"])
        .row(["Consumo Total (galones):".to_string(), summary.total_fuel_gallons.to_string()])
        .row(["Costo Combustible ($):".to_string(), summary.total_fuel_cost.to_string()])
        .row(["Costo Mantenimiento ($):".to_string(), summary.total_maintenance_cost.to_string()])
        .row(["Kilometraje Total:".to_string(), summary.total_distance_km.to_string()])
        .row(["Índice de Eficiencia (%):".to_string(), summary.efficiency_index.to_string()])
        .row([""])
        .row(["GESTIÓN DE ALERTAS"])
        .row(["Alertas Generadas:".to_string(), summary.alerts_generated.to_string()])
        .row(["Alertas Atendidas:".to_string(), summary.alerts_attended.to_string()]);
    w.finish()
}

pub fn vehicles_file_name(date: NaiveDate) -> String {
    format!("flota_vehicular_{}.csv", date.format("%Y-%m-%d"))
}

pub fn report_file_name(period: &str) -> String {
    let period: String = period
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("reporte_flota_{}.csv", period)
}

/// Escribir el archivo en `dir` y devolver su ruta
pub async fn write_export(dir: &Path, file_name: &str, contents: &str) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, contents).await?;
    log::info!("📄 Exportado {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleStatus;
    use chrono::TimeZone;

    fn vehicle(plate: &str, responsible: &str) -> Vehicle {
        serde_json::from_value(serde_json::json!({
            "id": "veh-001",
            "placa": plate,
            "tipo": "Camioneta",
            "marca_modelo": "Toyota Hilux",
            "anio": 2020,
            "capacidad": 5,
            "color": "Gris Naval",
            "kilometraje": 45210,
            "estado": "Operativo",
            "disponibilidad": "Disponible",
            "unidad_operativa": "Base Naval Sur",
            "responsable": responsible,
            "ubicacion": null,
            "consumo_promedio": 12.5,
            "tanque_capacidad": 80,
            "nivel_combustible": 64,
            "fecha_adquisicion": null,
            "ultimo_mantenimiento": null,
            "proximo_mantenimiento": null,
            "numero_serie_motor": "M-1",
            "numero_chasis": "C-1",
            "seguro_vigente": true,
            "matricula_vigente": true
        }))
        .unwrap()
    }

    #[test]
    fn test_fields_are_escaped() {
        let mut w = CsvWriter::new();
        w.row(["simple", "con,coma", "con \"comillas\"", "dos\nlíneas"]);
        assert_eq!(
            w.finish(),
            "simple,\"con,coma\",\"con \"\"comillas\"\"\",\"dos\nlíneas\"\r\n"
        );
    }

    #[test]
    fn test_vehicles_csv_layout() {
        let mut critical = vehicle("ABC-123", "Tnte. Pérez, Juan");
        critical.status = VehicleStatus::Critico;
        let vehicles = [vehicle("XYZ-9", "Sgto. Vera"), critical];

        let csv = vehicles_csv(vehicles.iter());
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(
            lines[0],
            "Placa,Tipo,Marca/Modelo,Estado,Unidad,Responsable,Kilometraje,Combustible %"
        );
        assert_eq!(
            lines[1],
            "XYZ-9,Camioneta,Toyota Hilux,Operativo,Base Naval Sur,Sgto. Vera,45210,64"
        );
        assert_eq!(
            lines[2],
            "ABC-123,Camioneta,Toyota Hilux,Crítico,Base Naval Sur,\"Tnte. Pérez, Juan\",45210,64"
        );
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_report_csv_sections() {
        let generated_at = Utc.with_ymd_and_hms(2024, 11, 20, 15, 30, 0).unwrap();
        let summary = ReportSummary {
            generated_at,
            period: "mes".to_string(),
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
        };

        let csv = report_csv(&summary, "mes", generated_at);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "REPORTE DE FLOTA VEHICULAR - ARMADA DEL ECUADOR");
        assert_eq!(lines[1], "Fecha de generación:,2024-11-20T15:30:00.000Z");
        assert_eq!(lines[2], "Período:,mes");
        assert!(lines.contains(&"Total de Vehículos:,120"));
        assert!(lines.contains(&"Consumo Total (galones):,15420.5"));
        assert!(lines.contains(&"Costo Combustible ($):,52430"));
        assert_eq!(lines.last(), Some(&"Alertas Atendidas:,38"));
        assert_eq!(lines.iter().filter(|l| l.is_empty()).count(), 3);
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(vehicles_file_name(date), "flota_vehicular_2024-03-07.csv");
        assert_eq!(report_file_name("trimestre"), "reporte_flota_trimestre.csv");
        assert_eq!(report_file_name("../x"), "reporte_flota_.._x.csv");
    }

    #[tokio::test]
    async fn test_write_export_creates_directory() {
        let dir = std::env::temp_dir()
            .join(format!("fleet_dashboard_export_{}", std::process::id()));
        let path = write_export(&dir, "prueba.csv", "a,b\r\n").await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "a,b\r\n");
    }
}
