//! Available slot CLI commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use barber_types::time::{format_date, format_time, parse_date};

use crate::state::AppState;

/// List slots; with `date`, only that day's unbooked slots.
pub async fn list_slots(state: &AppState, date: Option<String>, json: bool) -> Result<()> {
    let slots = match date.as_deref() {
        Some(raw) => {
            let date = parse_date(raw).map_err(|e| anyhow::anyhow!(e))?;
            state.slot_service.list_unbooked_by_date(date).await?
        }
        None => state.slot_service.list_slots().await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    if slots.is_empty() {
        println!();
        println!("  {} No slots found.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::White),
        Cell::new("Start").fg(Color::White),
        Cell::new("End").fg(Color::White),
        Cell::new("State").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for slot in &slots {
        let state_cell = if slot.is_booked {
            Cell::new("● booked").fg(Color::Yellow)
        } else {
            Cell::new("○ free").fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(format_date(&slot.date)),
            Cell::new(format_time(&slot.start_time)),
            Cell::new(format_time(&slot.end_time)),
            state_cell,
            Cell::new(slot.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}
