//! Notificaciones transitorias
//!
//! Equivalente a los "toasts" de la interfaz: cada view-model empuja aquí
//! los avisos de éxito o error y la capa de presentación los consume.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_PENDING: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Cola compartida de notificaciones pendientes de mostrar
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, title: impl Into<String>, description: Option<String>) {
        self.push(NotificationLevel::Success, title.into(), description);
    }

    pub fn error(&self, title: impl Into<String>, description: Option<String>) {
        self.push(NotificationLevel::Error, title.into(), description);
    }

    fn push(&self, level: NotificationLevel, title: String, description: Option<String>) {
        let detail = description.as_deref().unwrap_or("");
        match level {
            NotificationLevel::Error => log::warn!("🔔 {} {}", title, detail),
            NotificationLevel::Success => log::info!("🔔 {} {}", title, detail),
        }

        let mut queue = self.lock();
        if queue.len() == MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(Notification {
            level,
            title,
            description,
            created_at: Utc::now(),
        });
    }

    /// Retirar todas las notificaciones pendientes
    pub fn drain(&self) -> Vec<Notification> {
        self.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
