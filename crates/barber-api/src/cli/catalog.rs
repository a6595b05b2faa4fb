//! Service catalog CLI commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Seed the default offerings and report what was created.
pub async fn init_services(state: &AppState, json: bool) -> Result<()> {
    let created = state.catalog_service.ensure_defaults().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    if created.is_empty() {
        println!(
            "  {} Default services already exist.",
            style("✓").green().bold()
        );
        return Ok(());
    }

    for offering in &created {
        println!(
            "  {} Created {} ({}) at {}",
            style("✓").green().bold(),
            style(offering.service_type.description()).cyan(),
            offering.service_type,
            offering.price
        );
    }
    Ok(())
}

pub async fn list_services(state: &AppState, json: bool) -> Result<()> {
    let services = state.catalog_service.list_services().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }

    if services.is_empty() {
        println!();
        println!(
            "  {} No services yet. Seed them with: {}",
            style("i").blue().bold(),
            style("barber init services").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Type").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for offering in &services {
        table.add_row(vec![
            Cell::new(offering.service_type.to_string()).fg(Color::Cyan),
            Cell::new(offering.service_type.description()),
            Cell::new(offering.price.to_string()),
            Cell::new(offering.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}
