//! Export the merged roster as CSV or JSON

use crate::error::{Error, Result};
use crate::seat::Seat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Column header written to exported CSV files
pub const CSV_HEADER: [&str; 4] = ["table_number", "short_key", "display_name", "dietary_note"];

/// Output format for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Write seats as a seating CSV document (header plus one row per seat).
///
/// Ids are not written; they are reassigned when the file is merged again.
pub fn write_roster_csv<W: Write>(seats: &[Seat], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for seat in seats {
        csv_writer.write_record([
            seat.table_number.as_str(),
            seat.short_key.as_str(),
            seat.display_name.as_str(),
            seat.dietary_note.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export seats to a file, returning the number of seats written
pub fn export_roster<P: AsRef<Path>>(seats: &[Seat], path: P, format: ExportFormat) -> Result<usize> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => write_roster_csv(seats, &mut writer)?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, seats)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(seats.len())
}
