//! Mapa GPS
//!
//! Mientras la página está abierta un `Poller` refresca las ubicaciones con
//! periodo fijo. Al salir se cancela. El estado se comparte con la tarea de
//! refresco detrás de un `RwLock`, que solo se toma para marcar el inicio y
//! aplicar el resultado, nunca durante la petición.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::client::FleetApi;
use crate::models::location::counts_by_status;
use crate::models::{GpsLocation, VehicleStatus};
use crate::services::notification_service::Notifier;
use crate::services::polling_service::{Poller, PollerHandle};
use crate::utils::filters::{LocationFilter, RecordFilter};
use crate::utils::projection::{MapBounds, MapMarker};
use crate::viewmodels::page_state::PageState;

type SharedLocations = Arc<RwLock<PageState<Vec<GpsLocation>>>>;

/// Vista lista para dibujar
#[derive(Debug, Clone, Default)]
pub struct MapSnapshot {
    /// Ubicaciones que pasan el filtro
    pub locations: Vec<GpsLocation>,
    pub markers: Vec<MapMarker>,
    /// Conteo por estado sobre todas las ubicaciones
    pub counts: Vec<(VehicleStatus, usize)>,
    pub total: usize,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

pub struct MapViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    period: Duration,
    bounds: MapBounds,
    pub filter: LocationFilter,
    state: SharedLocations,
    poller: Option<PollerHandle>,
}

impl MapViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier, period: Duration) -> Self {
        Self {
            api,
            notifier,
            period,
            bounds: MapBounds::default(),
            filter: LocationFilter::default(),
            state: Arc::new(RwLock::new(PageState::default())),
            poller: None,
        }
    }

    /// Entrar en la página: arranca el refresco periódico (el primero es inmediato)
    pub fn enter(&mut self) {
        if self.poller.is_some() {
            return;
        }

        let api = Arc::clone(&self.api);
        let notifier = self.notifier.clone();
        let state = Arc::clone(&self.state);
        let handle = Poller::start("mapa-gps", self.period, move || {
            let api = Arc::clone(&api);
            let notifier = notifier.clone();
            let state = Arc::clone(&state);
            async move {
                refresh_locations(api.as_ref(), &notifier, &state).await;
            }
        });

        log::info!("🗺️ Mapa GPS activo, refresco cada {:?}", self.period);
        self.poller = Some(handle);
    }

    /// Salir de la página: ningún refresco nuevo tras esta llamada
    pub fn leave(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.cancel();
            log::info!("🗺️ Mapa GPS inactivo");
        }
    }

    pub fn is_active(&self) -> bool {
        self.poller.is_some()
    }

    /// Botón "Actualizar". Con la página activa pasa por el mismo bucle que
    /// el refresco periódico; si no, refresca directamente.
    pub async fn refresh_now(&self) -> bool {
        match &self.poller {
            Some(handle) => {
                handle.refresh_now();
                true
            }
            None => refresh_locations(self.api.as_ref(), &self.notifier, &self.state).await,
        }
    }

    pub async fn snapshot(&self) -> MapSnapshot {
        let state = self.state.read().await;
        let locations: Vec<GpsLocation> = self
            .filter
            .apply(&state.data)
            .into_iter()
            .cloned()
            .collect();
        let markers = self.bounds.markers(&locations);

        MapSnapshot {
            markers,
            counts: counts_by_status(&state.data),
            total: state.data.len(),
            loading: state.loading,
            last_updated: state.last_updated,
            locations,
        }
    }

    pub async fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_updated
    }
}

impl Drop for MapViewModel {
    fn drop(&mut self) {
        self.leave();
    }
}

async fn refresh_locations(
    api: &dyn FleetApi,
    notifier: &Notifier,
    state: &RwLock<PageState<Vec<GpsLocation>>>,
) -> bool {
    state.write().await.begin();
    let result = api.gps_locations().await;
    state
        .write()
        .await
        .finish(result, notifier, "ubicaciones GPS")
}
