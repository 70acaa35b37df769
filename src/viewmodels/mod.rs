//! View-models de las páginas
//!
//! Cada página tiene su view-model: carga los datos con `PageState`,
//! aplica filtros en memoria y expone las acciones de la página.

pub mod alerts_viewmodel;
pub mod dashboard_viewmodel;
pub mod fuel_viewmodel;
pub mod map_viewmodel;
pub mod page_state;
pub mod reports_viewmodel;
pub mod settings_viewmodel;
pub mod vehicle_detail_viewmodel;
pub mod vehicles_viewmodel;

pub use alerts_viewmodel::AlertsViewModel;
pub use dashboard_viewmodel::{DashboardData, DashboardViewModel};
pub use fuel_viewmodel::FuelViewModel;
pub use map_viewmodel::{MapSnapshot, MapViewModel};
pub use page_state::PageState;
pub use reports_viewmodel::ReportsViewModel;
pub use settings_viewmodel::SettingsViewModel;
pub use vehicle_detail_viewmodel::{DetailOutcome, VehicleDetail, VehicleDetailViewModel};
pub use vehicles_viewmodel::VehiclesViewModel;
