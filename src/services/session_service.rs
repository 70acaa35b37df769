//! Servicio de sesión
//!
//! La sesión es un único documento JSON con el perfil devuelto por el login.
//! Se lee una vez al arrancar (`SessionContext::restore`) y solo se escribe
//! en login/logout. Su presencia implica sesión autenticada; no hay
//! expiración.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use validator::Validate;

use crate::client::FleetApi;
use crate::models::{LoginRequest, UserSession};
use crate::services::notification_service::Notifier;
use crate::utils::errors::{AppError, AppResult};

/// Persistencia del documento de sesión
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` si no hay sesión guardada
    pub fn load(&self) -> AppResult<Option<UserSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };
        let session = serde_json::from_str(&contents)?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &UserSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(session)?;
        fs::write(&self.path, contents)?;
        log::info!("💾 Sesión guardada en {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Sesión explícita del proceso, creada al arrancar y pasada por `AppState`
#[derive(Debug)]
pub struct SessionContext {
    store: SessionStore,
    current: Option<UserSession>,
}

impl SessionContext {
    /// Restaurar la sesión guardada; un documento ilegible cuenta como "sin sesión"
    pub fn restore(store: SessionStore) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(e) => {
                log::warn!(
                    "⚠️ No se pudo leer la sesión en {}: {}",
                    store.path().display(),
                    e
                );
                None
            }
        };

        if let Some(session) = &current {
            log::info!("✅ Sesión restaurada: {} ({})", session.display_name, session.role);
        }

        Self { store, current }
    }

    pub fn current(&self) -> Option<&UserSession> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn require(&self) -> AppResult<&UserSession> {
        self.current.as_ref().ok_or(AppError::SessionRequired)
    }

    /// Validar credenciales, autenticarse en el backend y persistir el perfil
    pub async fn login(
        &mut self,
        api: &dyn FleetApi,
        request: LoginRequest,
        notifier: &Notifier,
    ) -> AppResult<&UserSession> {
        if let Err(errors) = request.validate() {
            notifier.error("Complete todos los campos", None);
            return Err(AppError::Validation(errors));
        }

        let session = match api.login(&request).await {
            Ok(session) => session,
            Err(e) => {
                log::error!("❌ Login rechazado para {}: {}", request.username, e);
                notifier.error("Acceso denegado", Some(e.user_message()));
                return Err(e);
            }
        };

        self.store.save(&session)?;
        notifier.success(
            "Acceso autorizado",
            Some(format!("Bienvenido, {}", session.display_name)),
        );
        Ok(self.current.insert(session))
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.store.clear()?;
        if let Some(session) = self.current.take() {
            log::info!("👋 Sesión cerrada: {}", session.display_name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeApi;

    fn temp_session_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fleet_dashboard_{}_{}", std::process::id(), name))
            .join("sgvn_usuario.json")
    }

    #[tokio::test]
    async fn test_login_persists_and_reload_restores() {
        let path = temp_session_path("reload");
        let api = FakeApi::default();
        let notifier = Notifier::new();

        let mut context = SessionContext::restore(SessionStore::new(&path));
        assert!(!context.is_authenticated());

        let session = context
            .login(&api, LoginRequest::new("admin", "naval2024"), &notifier)
            .await
            .unwrap()
            .clone();
        assert_eq!(session.role, "Administrador");

        // Recarga simulada: un contexto nuevo sobre el mismo archivo
        let reloaded = SessionContext::restore(SessionStore::new(&path));
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.current(), Some(&session));

        let titles: Vec<String> = notifier.drain().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Acceso autorizado".to_string()]);

        let mut reloaded = reloaded;
        reloaded.logout().unwrap();
        assert!(!reloaded.is_authenticated());
        assert!(!SessionContext::restore(SessionStore::new(&path)).is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_login_keeps_session_empty() {
        let path = temp_session_path("rejected");
        let api = FakeApi::default();
        let notifier = Notifier::new();
        let mut context = SessionContext::restore(SessionStore::new(&path));

        let result = context
            .login(&api, LoginRequest::new("admin", "incorrecta"), &notifier)
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(!context.is_authenticated());
        assert!(SessionStore::new(&path).load().unwrap().is_none());
        assert_eq!(notifier.drain()[0].title, "Acceso denegado");
    }

    #[tokio::test]
    async fn test_empty_credentials_never_reach_backend() {
        let path = temp_session_path("empty");
        let api = FakeApi::default();
        api.fail("login");
        let notifier = Notifier::new();
        let mut context = SessionContext::restore(SessionStore::new(&path));

        let result = context.login(&api, LoginRequest::new("", ""), &notifier).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(notifier.drain()[0].title, "Complete todos los campos");
    }

    #[test]
    fn test_corrupt_session_counts_as_logged_out() {
        let path = temp_session_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{no es json").unwrap();

        assert!(matches!(SessionStore::new(&path).load(), Err(AppError::Parse(_))));
        let context = SessionContext::restore(SessionStore::new(&path));
        assert!(!context.is_authenticated());
        assert!(matches!(context.require(), Err(AppError::SessionRequired)));
    }
}
