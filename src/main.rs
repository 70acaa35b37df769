mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_dashboard::config::environment::EnvironmentConfig;
use fleet_dashboard::models::{AlertSeverity, LoginRequest, VehicleStatus};
use fleet_dashboard::state::AppState;
use fleet_dashboard::utils::errors::AppError;
use fleet_dashboard::utils::filters::{
    AlertFilter, AttendanceFilter, LocationFilter, Selection, TextQuery, VehicleFilter,
};
use fleet_dashboard::viewmodels::reports_viewmodel::DEFAULT_PERIOD;
use fleet_dashboard::viewmodels::DetailOutcome;

#[derive(Parser)]
#[command(
    name = "fleet_dashboard",
    version,
    about = "Sistema de Gestión Vehicular Naval - Armada del Ecuador"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Iniciar sesión y guardar el perfil
    Login {
        #[arg(short, long)]
        usuario: String,
        #[arg(short, long, env = "SGVN_CLAVE", hide_env_values = true)]
        clave: String,
    },
    /// Cerrar la sesión guardada
    Logout,
    /// Mostrar el usuario de la sesión
    Whoami,
    /// Panel de control
    Dashboard,
    /// Listado de vehículos
    Vehiculos {
        #[arg(long, default_value = "Todos")]
        estado: String,
        #[arg(long, default_value = "Todos")]
        tipo: String,
        #[arg(long, default_value = "")]
        buscar: String,
        /// Directorio donde exportar el CSV de la vista filtrada
        #[arg(long)]
        exportar: Option<PathBuf>,
    },
    /// Ficha de un vehículo
    Vehiculo { id: String },
    /// Centro de alertas
    Alertas {
        #[arg(long, default_value = "Todas")]
        severidad: String,
        #[arg(long, default_value = "Todas")]
        estado: String,
        #[arg(long, default_value = "")]
        buscar: String,
    },
    /// Marcar una alerta como atendida
    Atender { id: String },
    /// Mapa GPS con refresco periódico (Ctrl+C para salir)
    Mapa {
        #[arg(long, default_value = "Todos")]
        estado: String,
        #[arg(long, default_value = "")]
        buscar: String,
        /// Un único refresco, sin quedarse en la página
        #[arg(long)]
        una_vez: bool,
    },
    /// Control de combustible
    Combustible,
    /// Resumen de reportes
    Reportes {
        #[arg(long, default_value = DEFAULT_PERIOD)]
        periodo: String,
        /// Directorio donde exportar el reporte CSV
        #[arg(long)]
        exportar: Option<PathBuf>,
    },
    /// Usuarios y configuración
    Usuarios,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let cli = Cli::parse();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let level = config
        .as_ref()
        .ok()
        .and_then(|c| c.log_level.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(e.into());
        }
    };

    info!("⚓ Sistema de Gestión Vehicular Naval ({})", config.environment);

    let mut state = AppState::from_config(config)?;
    let result = run(&mut state, cli.command).await;
    render::notifications(&state.notifier.drain());

    if let Err(e) = &result {
        if matches!(e.downcast_ref::<AppError>(), Some(AppError::SessionRequired)) {
            eprintln!("Inicie sesión con `fleet_dashboard login`");
        }
    }
    result
}

async fn run(state: &mut AppState, command: Command) -> Result<()> {
    // Todas las páginas salvo el login exigen sesión
    if !matches!(command, Command::Login { .. }) {
        let user = state.session.require()?;
        info!("👤 {} ({})", user.display_name, user.role);
    }

    match command {
        Command::Login { usuario, clave } => {
            let api = state.api.clone();
            let session = state
                .session
                .login(api.as_ref(), LoginRequest::new(&usuario, &clave), &state.notifier)
                .await?;
            render::session(session);
        }
        Command::Logout => {
            state.session.logout()?;
            println!("Sesión cerrada");
        }
        Command::Whoami => {
            render::session(state.session.require()?);
        }
        Command::Dashboard => {
            let mut vm = state.dashboard();
            vm.load().await;
            render::dashboard(vm.data(), vm.maintenance_total());
        }
        Command::Vehiculos {
            estado,
            tipo,
            buscar,
            exportar,
        } => {
            let filter = VehicleFilter {
                status: estado.parse().map_err(anyhow::Error::msg)?,
                vehicle_type: tipo.parse().map_err(anyhow::Error::msg)?,
                search: TextQuery::new(&buscar),
            };
            let mut vm = state.vehicles();
            vm.apply_filter(filter).await;
            render::vehicles(&vm);
            if let Some(dir) = exportar {
                let path = vm.export(&dir, Utc::now().date_naive()).await?;
                println!("CSV: {}", path.display());
            }
        }
        Command::Vehiculo { id } => {
            let mut vm = state.vehicle_detail();
            match vm.load(&id).await {
                DetailOutcome::Loaded => {
                    if let Some(detail) = vm.detail() {
                        render::vehicle_detail(detail, Utc::now());
                    }
                }
                DetailOutcome::RedirectToList => {
                    let mut list = state.vehicles();
                    list.load().await;
                    render::vehicles(&list);
                }
                DetailOutcome::Failed => {}
            }
        }
        Command::Alertas {
            severidad,
            estado,
            buscar,
        } => {
            let mut vm = state.alerts();
            vm.filter = AlertFilter {
                severity: severidad
                    .parse::<Selection<AlertSeverity>>()
                    .map_err(anyhow::Error::msg)?,
                attendance: estado.parse::<AttendanceFilter>().map_err(anyhow::Error::msg)?,
                search: TextQuery::new(&buscar),
            };
            vm.load().await;
            render::alerts(&vm);
        }
        Command::Atender { id } => {
            let mut vm = state.alerts();
            if vm.load().await {
                if !vm.attend(&id).await? {
                    println!("La alerta {} ya estaba atendida", id);
                }
                render::alerts(&vm);
            }
        }
        Command::Mapa {
            estado,
            buscar,
            una_vez,
        } => {
            let mut vm = state.map();
            vm.filter = LocationFilter {
                status: estado.parse::<Selection<VehicleStatus>>().map_err(anyhow::Error::msg)?,
                search: TextQuery::new(&buscar),
            };

            if una_vez {
                vm.refresh_now().await;
                render::map(&vm.snapshot().await);
                return Ok(());
            }

            vm.enter();
            let shutdown = shutdown_signal();
            tokio::pin!(shutdown);
            let mut rendered_at = None;
            loop {
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(Duration::from_millis(500)) => {
                        let snapshot = vm.snapshot().await;
                        if snapshot.last_updated != rendered_at && !snapshot.loading {
                            rendered_at = snapshot.last_updated;
                            render::map(&snapshot);
                        }
                        render::notifications(&state.notifier.drain());
                    }
                }
            }
            vm.leave();
        }
        Command::Combustible => {
            let mut vm = state.fuel();
            vm.load().await;
            render::fuel(&vm);
        }
        Command::Reportes { periodo, exportar } => {
            let mut vm = state.reports();
            vm.period = periodo;
            vm.load().await;
            render::report(&vm);
            if let Some(dir) = exportar {
                let path = vm.export(&dir, Utc::now()).await?;
                println!("CSV: {}", path.display());
            }
        }
        Command::Usuarios => {
            let mut vm = state.settings();
            vm.load().await;
            render::users(&vm);
        }
    }

    Ok(())
}

/// Señal de salida del mapa
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("⚠️ No se pudo instalar el manejador de señales: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, cerrando mapa...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, cerrando mapa...");
        },
    }
}
