//! Appointment CLI commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use barber_types::id::AppointmentId;
use barber_types::time::format_date_time;

use crate::state::AppState;

pub async fn list_appointments(state: &AppState, json: bool) -> Result<()> {
    let appointments = state.appointment_service.list_appointments().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&appointments)?);
        return Ok(());
    }

    if appointments.is_empty() {
        println!();
        println!("  {} No appointments booked.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Client").fg(Color::White),
        Cell::new("Service").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for appointment in &appointments {
        let client = state
            .client_service
            .get_client(&appointment.client_id)
            .await
            .map(|c| c.name)
            .unwrap_or_else(|_| appointment.client_id.to_string());
        let service = state
            .catalog_service
            .get_service(&appointment.service_id)
            .await
            .map(|s| s.service_type.description().to_string())
            .unwrap_or_else(|_| appointment.service_id.to_string());

        table.add_row(vec![
            Cell::new(format_date_time(&appointment.date_time)).fg(Color::Cyan),
            Cell::new(client),
            Cell::new(service),
            Cell::new(appointment.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Cancel an appointment, asking for confirmation unless `force`.
pub async fn cancel_appointment(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let id: AppointmentId = id
        .parse()
        .map_err(|_| anyhow::anyhow!("'{id}' is not a valid appointment id"))?;
    let appointment = state.appointment_service.get_appointment(&id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Cancel the appointment at {}?",
                style(format_date_time(&appointment.date_time)).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Kept.");
            return Ok(());
        }
    }

    state.appointment_service.delete_appointment(&id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"cancelled": true, "id": id.to_string(), "slot_id": appointment.slot_id.to_string()})
        );
    } else {
        println!(
            "  {} Appointment cancelled; slot {} is free again.",
            style("✓").red().bold(),
            style(appointment.slot_id).dim()
        );
    }

    Ok(())
}
