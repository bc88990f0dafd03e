use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::monte_carlo::aggregator::{GroupSummary, SUMMARY_COLUMNS};
use crate::domain::monte_carlo::record::{RECORD_COLUMNS, SimulationRecord};
use crate::error::Result;

/// Writes the header row followed by one row per item. The header is written even when
/// there are no rows.
fn write_table<W: Write, T: Serialize>(writer: W, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_wtr.write_record(headers)?;
    for row in rows {
        csv_wtr.serialize(row)?;
    }
    csv_wtr.flush()?;

    Ok(())
}

/// Writes the result table, columns in [`RECORD_COLUMNS`] order.
pub fn write_records<W: Write>(writer: W, records: &[SimulationRecord]) -> Result<()> {
    write_table(writer, &RECORD_COLUMNS, records)
}

pub fn write_records_file(path: impl AsRef<Path>, records: &[SimulationRecord]) -> Result<()> {
    let path = path.as_ref();
    write_records(BufWriter::new(File::create(path)?), records)?;
    log::info!("Wrote {} records to '{}'.", records.len(), path.display());
    Ok(())
}

/// Writes an aggregate summary, columns in [`SUMMARY_COLUMNS`] order.
pub fn write_summary<W: Write>(writer: W, summary: &[GroupSummary]) -> Result<()> {
    write_table(writer, &SUMMARY_COLUMNS, summary)
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &[GroupSummary]) -> Result<()> {
    let path = path.as_ref();
    write_summary(BufWriter::new(File::create(path)?), summary)?;
    log::info!("Wrote {} summary groups to '{}'.", summary.len(), path.display());
    Ok(())
}
