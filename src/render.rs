//! Presentación en terminal
//!
//! Cada página se imprime como tablas de texto. Nada aquí toca el backend.

use chrono::{DateTime, Utc};

use fleet_dashboard::models::{Alert, SystemUser, UserSession};
use fleet_dashboard::services::{Notification, NotificationLevel};
use fleet_dashboard::viewmodels::{
    AlertsViewModel, DashboardData, FuelViewModel, MapSnapshot, ReportsViewModel,
    SettingsViewModel, VehicleDetail, VehiclesViewModel,
};
use fleet_dashboard::viewmodels::reports_viewmodel::period_name;

fn header(title: &str) {
    println!();
    println!("{}", title.to_uppercase());
    println!("{}", "=".repeat(title.chars().count()));
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn date_time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn notifications(items: &[Notification]) {
    for n in items {
        let mark = match n.level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Error => "✖",
        };
        match &n.description {
            Some(description) => eprintln!("{} {} - {}", mark, n.title, description),
            None => eprintln!("{} {}", mark, n.title),
        }
    }
}

pub fn session(session: &UserSession) {
    println!("{} ({})", session.display_name, session.rank);
    println!("Rol: {}  Unidad: {}", session.role, session.unit);
}

pub fn dashboard(data: &DashboardData, maintenance_total: u32) {
    header("Panel de Control");
    if let Some(k) = &data.kpis {
        println!(
            "Flota operativa:      {}% ({} de {} vehículos)",
            k.operational_fleet_pct, k.operational_vehicles, k.total_vehicles
        );
        println!("Disponibilidad:       {}%", k.availability_index);
        println!(
            "En mantenimiento:     {} (tiempo prom: {} días)",
            k.vehicles_in_maintenance, k.average_maintenance_days
        );
        println!("Alertas críticas:     {}", k.critical_alerts);
        println!("Eficiencia de flota:  {}%", k.fleet_efficiency);
        println!("Consumo mensual est.: {} gal", k.estimated_monthly_consumption);
        println!("Cumplimiento mant.:   {}%", k.maintenance_compliance);
        println!("Costo operación/día:  ${}", k.daily_operating_cost);
        println!("Ahorro estimado/mes:  ${}", k.estimated_monthly_savings);
        if !k.most_used_vehicles.is_empty() {
            println!();
            println!("Vehículos más utilizados:");
            for (i, v) in k.most_used_vehicles.iter().enumerate() {
                println!(
                    "  {}. {:<10} {:<14} {} km",
                    i + 1,
                    v.plate,
                    v.vehicle_type,
                    v.odometer_km
                );
            }
        }
    }

    println!();
    println!("Por estado:");
    for s in &data.by_status {
        println!("  {:<14} {}", s.status.label(), s.count);
    }
    println!("Por tipo:");
    for t in &data.by_type {
        println!("  {:<14} {}", t.vehicle_type, t.count);
    }
    println!("Consumo mensual:");
    for m in &data.monthly_consumption {
        println!("  {:<6} {:>10} gal  ${:>10}", m.month, m.consumption, m.cost);
    }
    println!("Mantenimientos del periodo: {}", maintenance_total);

    println!();
    println!("Alertas pendientes:");
    alert_rows(data.pending_alerts.iter());
}

pub fn vehicles(vm: &VehiclesViewModel) {
    header("Flota Vehicular");
    let vehicles = vm.filtered();
    println!(
        "{:<10} {:<14} {:<20} {:<14} {:<22} {:>10} {:>6}",
        "PLACA", "TIPO", "MARCA/MODELO", "ESTADO", "UNIDAD", "KM", "COMB%"
    );
    for v in &vehicles {
        println!(
            "{:<10} {:<14} {:<20} {:<14} {:<22} {:>10} {:>6}",
            v.plate,
            v.vehicle_type,
            v.make_model,
            v.status.label(),
            v.operating_unit,
            v.odometer_km,
            v.fuel_level
        );
    }
    println!("{} de {} vehículos", vehicles.len(), vm.state.data.len());
    println!("Tipos: {}", vm.vehicle_types().join(", "));
}

pub fn vehicle_detail(detail: &VehicleDetail, now: DateTime<Utc>) {
    let v = &detail.vehicle;
    header(&format!("{} - {}", v.plate, v.make_model));
    println!("Tipo: {}  Año: {}  Color: {}", v.vehicle_type, v.year, v.color);
    println!("Estado: {}  Disponibilidad: {}", v.status.label(), v.availability);
    println!("Unidad: {}  Responsable: {}", v.operating_unit, v.responsible);
    if let Some(location) = &v.location {
        println!("Ubicación: {} ({:.4}, {:.4})", location.name, location.lat, location.lng);
    }
    println!(
        "Kilometraje: {} km  Combustible: {}% de {} gal  Consumo prom: {}",
        v.odometer_km, v.fuel_level, v.tank_capacity, v.average_consumption
    );
    println!(
        "Último mantenimiento: {}  Próximo: {} ({} días)",
        date(v.last_maintenance),
        date(v.next_maintenance),
        detail.days_until_maintenance(now)
    );
    println!(
        "Seguro: {}  Matrícula: {}",
        if v.insurance_valid { "vigente" } else { "vencido" },
        if v.registration_valid { "vigente" } else { "vencida" }
    );

    println!();
    println!("Historial de mantenimiento (${:.2}):", detail.maintenance_cost());
    for m in &detail.maintenance {
        println!(
            "  {} {:<12} {:>8} km ${:>9.2} {}",
            date(Some(m.date)),
            m.kind,
            m.odometer_km,
            m.cost,
            m.provider
        );
    }
    println!(
        "Historial de combustible ({:.1} gal, ${:.2}):",
        detail.fuel_gallons(),
        detail.fuel_cost()
    );
    for f in &detail.fuel {
        println!(
            "  {} {:>7.1} gal ${:>8.2} {}",
            date(Some(f.date)),
            f.gallons,
            f.total_cost(),
            f.station
        );
    }
}

fn alert_rows<'a>(alerts: impl Iterator<Item = &'a Alert>) {
    for a in alerts {
        println!(
            "  [{:<5}] {:<10} {:<10} {:<16} {} {}",
            a.severity.label(),
            a.id,
            a.vehicle_plate,
            a.kind,
            a.message,
            if a.attended { "(atendida)" } else { "" }
        );
    }
}

pub fn alerts(vm: &AlertsViewModel) {
    header("Centro de Alertas");
    let counts = vm.counts();
    println!(
        "Total: {}  Pendientes: {}  Alta: {}  Media: {}  Baja: {}",
        counts.total, counts.pending, counts.pending_high, counts.pending_medium, counts.pending_low
    );
    alert_rows(vm.filtered().into_iter());
}

pub fn map(snapshot: &MapSnapshot) {
    header("Mapa GPS - Monitoreo en Tiempo Real");
    let counts: Vec<String> = snapshot
        .counts
        .iter()
        .map(|(status, count)| format!("{}: {}", status.label(), count))
        .collect();
    println!("{}", counts.join("  "));
    for (location, marker) in snapshot.locations.iter().zip(&snapshot.markers) {
        println!(
            "  {:<10} {:<14} {:<30} x={:>5.1}% y={:>5.1}% {} km/h",
            location.plate,
            location.status.label(),
            location.place_name,
            marker.position.x,
            marker.position.y,
            location.speed_kmh
        );
    }
    println!(
        "{} vehículos mostrados de {}. Última actualización: {}",
        snapshot.locations.len(),
        snapshot.total,
        date_time(snapshot.last_updated)
    );
}

pub fn fuel(vm: &FuelViewModel) {
    header("Control de Combustible");
    println!("Consumo anual:   {:.0} gal", vm.annual_consumption());
    println!("Costo anual:     ${:.2}", vm.annual_cost());
    println!("Promedio mensual: {:.0} gal", vm.monthly_average());

    println!();
    println!("Consumo por tipo:");
    for t in vm.consumption_by_type() {
        println!("  {:<14} {}", t.vehicle_type, t.consumption);
    }

    println!("Mayores consumidores:");
    for (i, v) in vm.top_consumers().iter().enumerate() {
        println!(
            "  {:>2}. {:<10} {:<14} {}",
            i + 1,
            v.plate,
            v.vehicle_type,
            v.average_consumption
        );
    }

    let low = vm.low_fuel();
    println!("Bajo combustible ({}):", low.len());
    for v in low.iter().take(8) {
        println!("  {:<10} {:>3}%", v.plate, v.fuel_level);
    }
}

pub fn report(vm: &ReportsViewModel) {
    header("Reportes");
    println!(
        "Período: {}",
        period_name(&vm.period).unwrap_or(vm.period.as_str())
    );
    let Some(s) = vm.summary() else {
        println!("Resumen no disponible");
        return;
    };
    println!("Total de vehículos:   {}", s.total_vehicles);
    println!("Operativos:           {}", s.operational);
    println!("En mantenimiento:     {}", s.maintenance);
    println!("Estado crítico:       {}", s.critical);
    println!("Consumo total:        {} gal (${})", s.total_fuel_gallons, s.total_fuel_cost);
    println!("Costo mantenimiento:  ${}", s.total_maintenance_cost);
    println!("Kilometraje total:    {}", s.total_distance_km);
    println!("Índice de eficiencia: {}%", s.efficiency_index);
    println!(
        "Alertas:              {} generadas, {} atendidas ({:.0}%)",
        s.alerts_generated,
        s.alerts_attended,
        s.attended_ratio_pct()
    );

    let units = vm.units_by_size();
    if !units.is_empty() {
        println!();
        println!("Vehículos por unidad:");
        for u in units {
            println!("  {:<30} {}", u.unit, u.count);
        }
    }
}

pub fn users(vm: &SettingsViewModel) {
    header("Usuarios del Sistema");
    let users: &[SystemUser] = &vm.state.data;
    for u in users {
        println!(
            "  {:<4} {:<34} {:<14} {:<26} {}",
            u.id,
            u.display_name,
            u.role,
            u.unit,
            if u.active { "Activo" } else { "Inactivo" }
        );
    }
    println!("{} activos de {}", vm.active_users(), users.len());
    println!("Roles: {}", vm.roles().join(", "));
    let p = &vm.preferences;
    println!(
        "Actualización automática cada {} s, zona horaria {}",
        p.refresh_secs, p.time_zone
    );
}
