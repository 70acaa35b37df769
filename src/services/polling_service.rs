//! Refresco periódico
//!
//! Una única tarea de fondo por página que repite un refresco con periodo
//! fijo. El bucle espera a que termine cada refresco antes de atender el
//! siguiente tick, de modo que dos refrescos nunca se solapan. Los ticks
//! perdidos mientras tanto se descartan y el refresco manual entra por el
//! mismo bucle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct Poller;

impl Poller {
    /// Arrancar el bucle; el primer refresco se ejecuta de inmediato
    pub fn start<F, Fut>(name: &'static str, period: Duration, mut task: F) -> PollerHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let refresh = Arc::new(Notify::new());
        let manual = Arc::clone(&refresh);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            log::debug!("🔄 Refresco '{}' iniciado cada {:?}", name, period);

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                    _ = manual.notified() => {
                        log::debug!("🔄 Refresco manual '{}'", name);
                        interval.reset();
                    }
                    _ = interval.tick() => {}
                }

                // El refresco en curso termina siempre; la cancelación se
                // atiende antes del siguiente
                task().await;

                if *shutdown_rx.borrow() {
                    break;
                }
            }

            log::debug!("🛑 Refresco '{}' detenido", name);
        });

        PollerHandle {
            shutdown_tx,
            refresh,
            task: Some(handle),
        }
    }
}

/// Control del bucle de refresco; soltarlo lo cancela
#[derive(Debug)]
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    refresh: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Pedir un refresco fuera de plazo. Si ya hay uno en curso, se ejecuta
    /// uno más al terminar (las peticiones repetidas se agrupan).
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    pub fn cancel(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Cancelar y esperar a que el bucle termine
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                log::warn!("⚠️ La tarea de refresco terminó con error: {}", e);
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
