//! Configuración del sistema
//!
//! Usuarios registrados, catálogo de roles y preferencias del panel. Las
//! preferencias solo viven en memoria.

use std::sync::Arc;

use crate::client::FleetApi;
use crate::models::{DashboardPreferences, SystemUser, ROLES};
use crate::services::notification_service::Notifier;
use crate::viewmodels::page_state::PageState;

pub struct SettingsViewModel {
    api: Arc<dyn FleetApi>,
    notifier: Notifier,
    pub preferences: DashboardPreferences,
    pub state: PageState<Vec<SystemUser>>,
}

impl SettingsViewModel {
    pub fn new(api: Arc<dyn FleetApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            preferences: DashboardPreferences::default(),
            state: PageState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        let api = Arc::clone(&self.api);
        let fut = async move { api.users().await };
        self.state.load(fut, &self.notifier, "usuarios").await
    }

    pub fn roles(&self) -> &'static [&'static str] {
        &ROLES
    }

    pub fn active_users(&self) -> usize {
        self.state.data.iter().filter(|u| u.active).count()
    }

    pub fn save_preferences(&mut self, preferences: DashboardPreferences) {
        self.preferences = preferences;
        self.notifier.success(
            "Configuración guardada",
            Some("Los cambios se han aplicado correctamente".to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;

    fn user(id: &str, role: &str, active: bool) -> SystemUser {
        SystemUser {
            id: id.to_string(),
            display_name: format!("Usuario {}", id),
            role: role.to_string(),
            unit: "Base Naval Sur".to_string(),
            active,
        }
    }

    #[tokio::test]
    async fn test_load_users() {
        let api = FakeApi::default();
        *api.users.lock().unwrap() = vec![
            user("1", "Administrador", true),
            user("2", "Consulta", false),
        ];
        let mut vm = SettingsViewModel::new(Arc::new(api), Notifier::new());

        assert!(vm.load().await);
        assert_eq!(vm.state.data.len(), 2);
        assert_eq!(vm.active_users(), 1);
        assert_eq!(vm.roles().len(), 5);
        assert_eq!(vm.preferences.refresh_secs, 30);
    }

    #[test]
    fn test_save_preferences_notifies() {
        let notifier = Notifier::new();
        let mut vm = SettingsViewModel::new(Arc::new(FakeApi::default()), notifier.clone());
        let preferences = DashboardPreferences {
            fuel_alerts: false,
            ..Default::default()
        };
        vm.save_preferences(preferences);
        assert!(!vm.preferences.fuel_alerts);
        assert_eq!(notifier.drain()[0].title, "Configuración guardada");
    }
}
