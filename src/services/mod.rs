//! Services module
//!
//! Este módulo contiene los servicios transversales de la aplicación:
//! sesión, refresco periódico, notificaciones y exportación.

pub mod export_service;
pub mod notification_service;
pub mod polling_service;
pub mod session_service;

pub use notification_service::{Notification, NotificationLevel, Notifier};
pub use polling_service::{Poller, PollerHandle};
pub use session_service::{SessionContext, SessionStore};
