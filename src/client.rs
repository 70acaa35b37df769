//! Cliente HTTP para el backend de gestión vehicular
//!
//! Este módulo contiene el cliente REST (`ApiClient`) y el trait `FleetApi`
//! del que dependen los view-models. El cliente no reintenta ni aplica
//! timeouts: un fallo se propaga directamente al llamador.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::EnvironmentConfig;
use crate::models::{
    Alert, AlertQuery, AttendAlertResponse, FuelRecord, GpsLocation, Kpis, LoginRequest,
    MaintenanceRecord, MonthlyConsumption, MonthlyMaintenance, ReportSummary, StatusCount,
    SystemUser, TypeCount, UnitCount, UserSession, Vehicle, VehicleQuery,
};
use crate::utils::errors::{AppError, AppResult};

/// Operaciones que los view-models necesitan del backend
#[async_trait]
pub trait FleetApi: Send + Sync {
    async fn list_vehicles(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>>;
    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle>;
    async fn maintenance_history(&self, vehicle_id: &str) -> AppResult<Vec<MaintenanceRecord>>;
    async fn fuel_history(&self, vehicle_id: &str) -> AppResult<Vec<FuelRecord>>;
    async fn list_alerts(&self, query: &AlertQuery) -> AppResult<Vec<Alert>>;
    async fn attend_alert(&self, id: &str) -> AppResult<AttendAlertResponse>;
    async fn gps_locations(&self) -> AppResult<Vec<GpsLocation>>;
    async fn kpis(&self) -> AppResult<Kpis>;
    async fn stats_by_status(&self) -> AppResult<Vec<StatusCount>>;
    async fn stats_by_type(&self) -> AppResult<Vec<TypeCount>>;
    async fn stats_by_unit(&self) -> AppResult<Vec<UnitCount>>;
    async fn monthly_consumption(&self) -> AppResult<Vec<MonthlyConsumption>>;
    async fn monthly_maintenance(&self) -> AppResult<Vec<MonthlyMaintenance>>;
    async fn users(&self) -> AppResult<Vec<SystemUser>>;
    async fn report_summary(&self) -> AppResult<ReportSummary>;
    async fn login(&self, request: &LoginRequest) -> AppResult<UserSession>;
}

/// Cliente REST contra `{backend_url}/api`
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Crear cliente para una URL base de API ya completa (`.../api`)
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        Self::new(config.api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.client.get(self.url(path));
        self.send_json(request, path).await
    }

    async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.get(self.url(path)).query(query);
        self.send_json(request, path).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> AppResult<T> {
        log::debug!("🌐 Request a {}", path);

        let response = request.send().await.map_err(|e| {
            log::error!("❌ Error de red en {}: {}", path, e);
            AppError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("⚠️ {} respondió {}", path, status);
            return Err(status_error(status, path, &body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            log::error!("❌ Respuesta no válida de {}: {}", path, e);
            AppError::Parse(e)
        })
    }
}

/// Traducir una respuesta no exitosa a `AppError`
fn status_error(status: StatusCode, path: &str, body: &str) -> AppError {
    let message = detail_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(format!("{}: {}", path, message)),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        _ => AppError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

/// El backend devuelve los errores como `{"detail": "..."}`
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.to_string())
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl FleetApi for ApiClient {
    async fn list_vehicles(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let vehicles: Vec<Vehicle> = self.get_json_with_query("/vehiculos", query).await?;
        log::info!("🚗 {} vehículos obtenidos", vehicles.len());
        Ok(vehicles)
    }

    async fn get_vehicle(&self, id: &str) -> AppResult<Vehicle> {
        self.get_json(&format!("/vehiculos/{}", segment(id))).await
    }

    async fn maintenance_history(&self, vehicle_id: &str) -> AppResult<Vec<MaintenanceRecord>> {
        self.get_json(&format!("/vehiculos/{}/historial-mantenimiento", segment(vehicle_id)))
            .await
    }

    async fn fuel_history(&self, vehicle_id: &str) -> AppResult<Vec<FuelRecord>> {
        self.get_json(&format!("/vehiculos/{}/historial-combustible", segment(vehicle_id)))
            .await
    }

    async fn list_alerts(&self, query: &AlertQuery) -> AppResult<Vec<Alert>> {
        let alerts: Vec<Alert> = self.get_json_with_query("/alertas", query).await?;
        log::info!("🔔 {} alertas obtenidas", alerts.len());
        Ok(alerts)
    }

    async fn attend_alert(&self, id: &str) -> AppResult<AttendAlertResponse> {
        let path = format!("/alertas/{}/atender", segment(id));
        let request = self.client.patch(self.url(&path));
        let response: AttendAlertResponse = self.send_json(request, &path).await?;
        log::info!("✅ Alerta {} marcada como atendida", response.id);
        Ok(response)
    }

    async fn gps_locations(&self) -> AppResult<Vec<GpsLocation>> {
        let locations: Vec<GpsLocation> = self.get_json("/ubicaciones-gps").await?;
        log::info!("📍 {} ubicaciones GPS obtenidas", locations.len());
        Ok(locations)
    }

    async fn kpis(&self) -> AppResult<Kpis> {
        self.get_json("/kpis").await
    }

    async fn stats_by_status(&self) -> AppResult<Vec<StatusCount>> {
        self.get_json("/estadisticas/por-estado").await
    }

    async fn stats_by_type(&self) -> AppResult<Vec<TypeCount>> {
        self.get_json("/estadisticas/por-tipo").await
    }

    async fn stats_by_unit(&self) -> AppResult<Vec<UnitCount>> {
        self.get_json("/estadisticas/por-unidad").await
    }

    async fn monthly_consumption(&self) -> AppResult<Vec<MonthlyConsumption>> {
        self.get_json("/estadisticas/consumo-mensual").await
    }

    async fn monthly_maintenance(&self) -> AppResult<Vec<MonthlyMaintenance>> {
        self.get_json("/estadisticas/mantenimiento-mensual").await
    }

    async fn users(&self) -> AppResult<Vec<SystemUser>> {
        self.get_json("/usuarios").await
    }

    async fn report_summary(&self) -> AppResult<ReportSummary> {
        self.get_json("/reportes/resumen").await
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<UserSession> {
        log::info!("🔐 Iniciando sesión para usuario: {}", request.username);
        let path = "/auth/login";
        let builder = self.client.post(self.url(path)).json(request);
        self.send_json(builder, path).await
    }
}
