//! CSV parser for seating documents
//!
//! Seating sources are small, hand-edited CSV files. Fields containing
//! commas are wrapped in double quotes; there is no quote escaping.

use crate::seat::SeatDraft;
use tracing::trace;

/// Number of columns a seating line is expected to carry
pub const SEAT_COLUMNS: usize = 4;

/// Split one CSV line into trimmed fields.
///
/// A double quote toggles the in-quote state and is never copied into the
/// field. Commas inside quotes are kept. An unmatched opening quote keeps
/// every following comma inside the current field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Parse a seating document into drafts, skipping the header line.
///
/// Columns are read positionally as table number, short key, display name
/// and dietary note. Missing columns become empty strings.
pub fn parse_seats(document: &str) -> Vec<SeatDraft> {
    document
        .trim()
        .lines()
        .enumerate()
        .skip(1)
        .map(|(line_idx, line)| {
            let fields = parse_line(line);
            if fields.len() > SEAT_COLUMNS {
                trace!(
                    line = line_idx + 1,
                    columns = fields.len(),
                    "ignoring extra columns"
                );
            }
            SeatDraft::from_fields(&fields)
        })
        .collect()
}
