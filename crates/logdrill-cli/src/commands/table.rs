//! The `logdrill table` command.

use anyhow::{Context, Result};

use logdrill_core::{IndexRange, LogTable, TableRow};

/// Fewest significant digits any logarithm in the table carries (index 1).
const MAX_DIGITS: usize = 18;

pub fn execute(min: u32, max: u32, digits: usize, format: String) -> Result<()> {
    anyhow::ensure!(
        (1..=MAX_DIGITS).contains(&digits),
        "digits must be between 1 and {MAX_DIGITS}"
    );
    let range = IndexRange::new(min, max).context("invalid table range")?;

    let rows: Vec<TableRow> = LogTable::new(range).rounded_rows(digits).collect();

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        "text" => print_table(&rows),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_table(rows: &[TableRow]) {
    use comfy_table::{Cell, CellAlignment, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "x", "log x"]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.index).set_alignment(CellAlignment::Right),
            Cell::new(&row.argument),
            Cell::new(&row.logarithm),
        ]);
    }

    println!("{table}");
}
