//! Report formatting utilities for Shipyard outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::Ship;

const HEADERS: [&str; 9] = [
    "ID", "NAME", "PLANET", "TYPE", "PROD DATE", "USED", "SPEED", "CREW", "RATING",
];

/// Render ships as an aligned plain-text table.
pub fn render_ship_table(ships: &[Ship]) -> String {
    if ships.is_empty() {
        return "No ships found.\n".to_string();
    }

    let rows: Vec<[String; 9]> = ships.iter().map(ship_row).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    write_row(&mut output, &HEADERS.map(String::from), &widths);
    for row in &rows {
        write_row(&mut output, row, &widths);
    }
    output
}

/// Render a single ship as `key: value` lines.
pub fn render_ship_detail(ship: &Ship) -> String {
    let row = ship_row(ship);
    let mut output = String::new();
    for (header, value) in HEADERS.iter().zip(row.iter()) {
        let _ = writeln!(output, "{header:<10} {value}");
    }
    output
}

/// Render any serializable payload as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn ship_row(ship: &Ship) -> [String; 9] {
    [
        ship.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        ship.name.clone(),
        ship.planet.clone(),
        ship.ship_type.to_string(),
        ship.prod_date.format("%Y-%m-%d").to_string(),
        if ship.is_used { "yes" } else { "no" }.to_string(),
        format!("{:.2}", ship.speed),
        ship.crew_size.to_string(),
        format!("{:.2}", ship.rating),
    ]
}

fn write_row(output: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(output, "{}", line.trim_end());
}
