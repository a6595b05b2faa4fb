//! Booking status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display counts of clients, offerings, slots, and appointments.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let clients = state.client_service.list_clients().await?;
    let services = state.catalog_service.list_services().await?;
    let slots = state.slot_service.list_slots().await?;
    let appointments = state.appointment_service.list_appointments().await?;

    let booked = slots.iter().filter(|s| s.is_booked).count();
    let free = slots.len() - booked;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "clients": clients.len(),
            "services": services.len(),
            "slots": {
                "total": slots.len(),
                "booked": booked,
                "free": free,
            },
            "appointments": appointments.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Barber v{}",
        style("✂").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Directory ──").dim());
    println!("  Clients:  {}", style(clients.len()).bold());
    println!("  Services: {}", style(services.len()).bold());
    println!();

    println!("  {}", style("── Schedule ──").dim());
    println!("  Slots:        {}", style(slots.len()).bold());
    println!("  Free:         {}", style(free).green());
    println!("  Booked:       {}", style(booked).yellow());
    println!("  Appointments: {}", style(appointments.len()).bold());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!(
        "  Listen:   {}",
        style(format!("{}:{}", state.config.server.host, state.config.server.port)).dim()
    );
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
