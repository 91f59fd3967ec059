//! List command handler: filtering and rendering of the record table.

use crate::args::ListArgs;
use crate::commands::{Out, OutputFormat};
use crate::model::{DailyRecord, Filter, Num};
use crate::store::Store;
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Listing results in the requested output format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of record objects, exactly as stored.
    Json(serde_json::Value),
    /// Aligned text table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}

/// Lists records, newest date first, filtered by the query and date range.
///
/// The filter never mutates stored records; it only derives the displayed
/// subset. The table and CSV forms include the derived distance; the JSON
/// form is the stored representation.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message with the number of records found.
/// - The rendered rows in the requested format.
pub fn list(config: Config, args: ListArgs) -> Result<Out<Rows>> {
    let records = config.store().load();
    let filter = Filter::new(args.query.unwrap_or_default(), args.from, args.to);
    let rows = records.filtered(&filter);

    let count = rows.len();
    let rendered = match args.format {
        OutputFormat::Table => Rows::Table(render_table(&rows)),
        OutputFormat::Json => Rows::Json(serde_json::to_value(&rows)?),
        OutputFormat::Csv => Rows::Csv(render_csv(&rows)?),
    };

    let message = format!("Found {} record{}", count, if count == 1 { "" } else { "s" });
    Ok(Out::new(message, rendered))
}

const TABLE_HEADERS: [&str; 11] = [
    "DATE",
    "KM START",
    "KM END",
    "DISTANCE",
    "REVENUE",
    "FUEL (L)",
    "FUEL (€)",
    "TRANSFERS",
    "CARD (€)",
    "NOTES",
    "ID",
];

/// Which table columns hold numbers and get right-aligned.
const RIGHT_ALIGNED: [bool; 11] = [
    false, true, true, true, true, true, true, true, true, false, false,
];

fn table_cells(record: &DailyRecord) -> [String; 11] {
    [
        record.date.clone(),
        record.odometer_start.display_plain(),
        record.odometer_end.display_plain(),
        Num::new(record.distance()).display_plain(),
        record.revenue_total.display_eur(),
        record.fuel_liters.display_plain(),
        record.fuel_cost.display_eur(),
        record.transfer_count.display_plain(),
        record.card_payments_total.display_eur(),
        record.notes.clone(),
        record.id.clone(),
    ]
}

fn render_table(rows: &[&DailyRecord]) -> String {
    if rows.is_empty() {
        return "No records.".to_string();
    }

    let body: Vec<[String; 11]> = rows.iter().map(|r| table_cells(r)).collect();

    // Column widths in characters, headers included.
    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS.map(String::from), &widths);
    for cells in &body {
        push_row(&mut out, cells, &widths);
    }
    out.pop(); // trailing newline
    out
}

fn push_row(out: &mut String, cells: &[String; 11], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let pad = widths[i].saturating_sub(cell.chars().count());
        if RIGHT_ALIGNED[i] {
            out.push_str(&" ".repeat(pad));
            out.push_str(cell);
        } else {
            out.push_str(cell);
            // No padding after the last column.
            if i < cells.len() - 1 {
                out.push_str(&" ".repeat(pad));
            }
        }
    }
    out.push('\n');
}

/// A `Num` as a machine-readable CSV cell: dot-decimal, empty when empty.
fn csv_cell(num: Num) -> String {
    num.value().map(|d| d.to_string()).unwrap_or_default()
}

fn render_csv(rows: &[&DailyRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "date",
        "odometerStart",
        "odometerEnd",
        "distanceTotal",
        "revenueTotal",
        "fuelLiters",
        "fuelCost",
        "transferCount",
        "cardPaymentsTotal",
        "notes",
        "distance",
    ])?;
    for record in rows {
        writer.write_record([
            record.id.clone(),
            record.date.clone(),
            csv_cell(record.odometer_start),
            csv_cell(record.odometer_end),
            csv_cell(record.distance_total),
            csv_cell(record.revenue_total),
            csv_cell(record.fuel_liters),
            csv_cell(record.fuel_cost),
            csv_cell(record.transfer_count),
            csv_cell(record.card_payments_total),
            record.notes.clone(),
            record.distance().to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish CSV output: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}
