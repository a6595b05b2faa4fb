//! Client CLI commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// List all clients as a table or JSON.
pub async fn list_clients(state: &AppState, json: bool) -> Result<()> {
    let clients = state.client_service.list_clients().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&clients)?);
        return Ok(());
    }

    if clients.is_empty() {
        println!();
        println!(
            "  {} No clients registered. Add one with: {}",
            style("i").blue().bold(),
            style("POST /clients").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("National ID").fg(Color::White),
        Cell::new("Phone").fg(Color::White),
        Cell::new("ID").fg(Color::White),
    ]);

    for client in &clients {
        table.add_row(vec![
            Cell::new(&client.name),
            Cell::new(format_cpf(&client.national_id)),
            Cell::new(&client.phone),
            Cell::new(client.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// `52998224725` -> `529.982.247-25`. Anything else is shown as is.
fn format_cpf(digits: &str) -> String {
    if digits.len() != 11 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("123"), "123");
    }
}
