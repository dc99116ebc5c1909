use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;

use crate::models::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Table {
    Vehicles,
    Supervisors,
    Guards,
    History,
    Alerts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

/// Writes one table of the dataset and returns the number of rows written.
pub fn export_table<W: Write>(
    data: &Dataset,
    table: Table,
    format: Format,
    writer: W,
) -> anyhow::Result<usize> {
    match table {
        Table::Vehicles => write_rows(&data.vehicles, format, writer),
        Table::Supervisors => write_rows(&data.supervisors, format, writer),
        Table::Guards => write_rows(&data.guards, format, writer),
        Table::History => write_rows(&data.history, format, writer),
        Table::Alerts => write_rows(&data.alerts, format, writer),
    }
}

fn write_rows<T: Serialize, W: Write>(
    rows: &[T],
    format: Format,
    mut writer: W,
) -> anyhow::Result<usize> {
    match format {
        Format::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in rows {
                csv_writer.serialize(row).context("failed to write csv row")?;
            }
            csv_writer.flush().context("failed to flush csv")?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, rows).context("failed to write json")?;
            writeln!(writer)?;
            writer.flush().context("failed to flush json")?;
        }
    }

    Ok(rows.len())
}
