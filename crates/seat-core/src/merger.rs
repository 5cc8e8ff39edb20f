//! Merge engine for combining two seating sources into one roster

use crate::error::{Error, Result};
use crate::parser::parse_seats;
use crate::seat::{Seat, SeatDraft};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Seating source compiled into the library, taken as the primary list
pub const BUNDLED_PRIMARY: &str = include_str!("../data/media_seats.csv");

/// Seating source compiled into the library, merged after the primary list
pub const BUNDLED_SECONDARY: &str = include_str!("../data/ec_seats.csv");

/// The merged, ordered list of seats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    seats: Vec<Seat>,
}

impl Roster {
    /// Merge the two bundled sources
    pub fn bundled() -> Self {
        merge_sources(BUNDLED_PRIMARY, BUNDLED_SECONDARY)
    }

    /// Read two seating files from disk and merge them
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(primary: P, secondary: Q) -> Result<Self> {
        let primary = read_source(primary.as_ref())?;
        let secondary = read_source(secondary.as_ref())?;
        Ok(merge_sources(&primary, &secondary))
    }

    /// All seats in merge order
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Get the number of seats
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Check whether the roster has no seats
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Find a seat by id
    pub fn find_seat(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Id for the next appended seat: one past the highest numeric id
    pub fn next_id(&self) -> String {
        let max = self
            .seats
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Build a new roster with one more seat appended.
    /// The existing roster is left untouched.
    pub fn with_seat(&self, draft: SeatDraft) -> Self {
        let mut seats = self.seats.clone();
        seats.push(Seat::from_draft(self.next_id(), draft));
        Self { seats }
    }
}

/// Read a seating document from disk
pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Counts describing how a merge went
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Rows parsed from the primary source
    pub primary_count: usize,
    /// Rows parsed from the secondary source
    pub secondary_count: usize,
    /// Secondary rows whose short key already exists in the primary source
    pub duplicates_dropped: usize,
    /// Secondary rows without a short key
    pub unkeyed_dropped: usize,
}

impl MergeReport {
    /// Secondary rows that made it into the roster
    pub fn secondary_kept(&self) -> usize {
        self.secondary_count - self.duplicates_dropped - self.unkeyed_dropped
    }
}

/// Merge two seating documents into a roster
pub fn merge_sources(primary: &str, secondary: &str) -> Roster {
    merge_sources_with_report(primary, secondary).0
}

/// Merge two seating documents, also reporting what was dropped.
///
/// Every primary row is kept. A secondary row is kept only when its short
/// key is non-empty and not already used in the primary source, compared
/// case-insensitively. Ids are 1-based positions in the merged order.
pub fn merge_sources_with_report(primary: &str, secondary: &str) -> (Roster, MergeReport) {
    let primary = parse_seats(primary);
    let secondary = parse_seats(secondary);

    let mut report = MergeReport {
        primary_count: primary.len(),
        secondary_count: secondary.len(),
        ..MergeReport::default()
    };

    let existing: HashSet<String> = primary
        .iter()
        .filter(|d| !d.short_key.is_empty())
        .map(SeatDraft::normalized_key)
        .collect();

    let survivors: Vec<SeatDraft> = secondary
        .into_iter()
        .filter(|d| {
            if d.short_key.is_empty() {
                report.unkeyed_dropped += 1;
                false
            } else if existing.contains(&d.normalized_key()) {
                report.duplicates_dropped += 1;
                false
            } else {
                true
            }
        })
        .collect();

    let seats: Vec<Seat> = primary
        .into_iter()
        .chain(survivors)
        .enumerate()
        .map(|(i, draft)| Seat::from_draft((i + 1).to_string(), draft))
        .collect();

    debug!(
        primary = report.primary_count,
        secondary = report.secondary_count,
        duplicates = report.duplicates_dropped,
        unkeyed = report.unkeyed_dropped,
        total = seats.len(),
        "merged seating sources"
    );

    (Roster { seats }, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "table_number,short_id,english_name,dietary_note\n";

    fn doc(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    #[test]
    fn test_merge_assigns_sequential_ids() {
        let roster = merge_sources(&doc("1,A,x,\n1,B,y,\n"), &doc("2,C,z,\n"));

        let ids: Vec<&str> = roster.seats().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(roster.seats()[2].short_key, "C");
    }

    #[test]
    fn test_merge_is_deterministic() {
        let primary = doc("1,A,x,\n2,B,y,素\n");
        let secondary = doc("3,C,z,\n3,D,w,\n");

        assert_eq!(
            merge_sources(&primary, &secondary),
            merge_sources(&primary, &secondary)
        );
    }

    #[test]
    fn test_merge_dedupes_case_insensitive() {
        let (roster, report) =
            merge_sources_with_report(&doc("1,a1b2,Primary,\n"), &doc("4,A1B2,Secondary,\n"));

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.seats()[0].display_name, "Primary");
        assert_eq!(roster.seats()[0].table_number, "1");
        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(report.secondary_kept(), 0);
    }

    #[test]
    fn test_merge_keeps_unkeyed_primary_rows() {
        let roster = merge_sources(&doc("2,,,\n2,K,x,\n"), &doc(""));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.seats()[0].short_key, "");
        assert_eq!(roster.seats()[0].id, "1");
    }

    #[test]
    fn test_merge_drops_unkeyed_secondary_rows() {
        let (roster, report) = merge_sources_with_report(&doc("1,A,x,\n"), &doc("5,,Placeholder,\n5,B,y,\n"));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.seats()[1].short_key, "B");
        assert_eq!(report.unkeyed_dropped, 1);
    }

    #[test]
    fn test_merge_preserves_secondary_order() {
        let roster = merge_sources(&doc("1,A,x,\n"), &doc("2,Z,z,\n2,A,dup,\n2,M,m,\n"));

        let keys: Vec<&str> = roster.seats().iter().map(|s| s.short_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "Z", "M"]);
    }

    #[test]
    fn test_merge_keeps_secondary_internal_duplicates() {
        let roster = merge_sources(&doc("1,A,x,\n"), &doc("2,B,y,\n2,b,z,\n"));

        let keys: Vec<&str> = roster.seats().iter().map(|s| s.short_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "b"]);
        assert_eq!(roster.seats()[2].id, "3");
    }

    #[test]
    fn test_merge_empty_primary() {
        let roster = merge_sources("", &doc("3,Q,q,\n"));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.seats()[0].id, "1");
    }

    #[test]
    fn test_bundled_roster() {
        let (roster, report) = merge_sources_with_report(BUNDLED_PRIMARY, BUNDLED_SECONDARY);

        assert_eq!(report.primary_count, 10);
        assert_eq!(report.secondary_count, 7);
        assert_eq!(report.duplicates_dropped, 1);
        assert_eq!(report.unkeyed_dropped, 1);
        assert_eq!(roster.len(), 15);
        assert_eq!(roster, Roster::bundled());
    }

    #[test]
    fn test_with_seat_appends_next_id() {
        let roster = merge_sources(&doc("1,A,x,\n1,B,y,\n"), "");
        let extended = roster.with_seat(SeatDraft::new("9", "N1", "New", ""));

        assert_eq!(roster.len(), 2);
        assert_eq!(extended.len(), 3);
        assert_eq!(extended.seats()[2].id, "3");
        assert!(extended.find_seat("3").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Roster::load("/definitely/not/here.csv", "/nor/here.csv").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
