//! seat-core: Core library for looking up seat assignments
//!
//! This library provides functionality to:
//! - Parse seating CSV documents with a quote-aware line splitter
//! - Merge two seating sources, dropping duplicate short keys
//! - Look up seats by short key or table number
//! - Group tables by their meat/vegetarian headcount
//! - Export the merged roster as CSV or JSON

pub mod config;
pub mod error;
pub mod export;
pub mod merger;
pub mod parser;
pub mod query;
pub mod seat;
pub mod session;
pub mod stats;

pub use config::{QueryRules, SeatingConfig};
pub use error::{Error, Result};
pub use export::{export_roster, write_roster_csv, ExportFormat};
pub use merger::{merge_sources, merge_sources_with_report, MergeReport, Roster};
pub use parser::{parse_line, parse_seats};
pub use query::{search, QueryOutcome};
pub use seat::{Seat, SeatDraft};
pub use session::SeatFinder;
pub use stats::{compute_table_stats, TableStat};
