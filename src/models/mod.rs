//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos tal como los entrega el
//! backend REST. Los nombres de campo JSON se conservan vía `serde(rename)`.

pub mod alert;
pub mod analytics;
pub mod auth;
pub mod location;
pub mod user;
pub mod vehicle;

pub use alert::{Alert, AlertCounts, AlertQuery, AlertSeverity, AttendAlertResponse};
pub use analytics::{
    Kpis, MonthlyConsumption, MonthlyMaintenance, MostUsedVehicle, ReportSummary, StatusCount,
    TypeCount, UnitCount,
};
pub use auth::{LoginRequest, UserSession};
pub use location::GpsLocation;
pub use user::{DashboardPreferences, SystemUser, ROLES};
pub use vehicle::{
    FuelRecord, MaintenanceRecord, Vehicle, VehicleLocation, VehicleQuery, VehicleStatus,
};
