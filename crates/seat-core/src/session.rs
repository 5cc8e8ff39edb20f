//! Seat finder session: owns the roster and the current query
//!
//! The presentation layer submits queries and reads back the outcome. The
//! roster and outcome are replaced wholesale on every change.

use crate::config::{QueryRules, SeatingConfig};
use crate::error::{Error, Result};
use crate::merger::Roster;
use crate::query::{search, QueryOutcome};
use crate::seat::{Seat, SeatDraft};
use tracing::{info, warn};

/// Coordinator between the roster and a front end
#[derive(Debug, Clone)]
pub struct SeatFinder {
    roster: Roster,
    rules: QueryRules,
    query: String,
    outcome: QueryOutcome,
}

impl SeatFinder {
    /// Create a session over a roster
    pub fn new(roster: Roster, rules: QueryRules) -> Self {
        Self {
            roster,
            rules,
            query: String::new(),
            outcome: QueryOutcome::default(),
        }
    }

    /// Create a session over the bundled seating lists
    pub fn bundled() -> Self {
        Self::new(Roster::bundled(), QueryRules::default())
    }

    /// Create a session from a config
    pub fn from_config(config: &SeatingConfig) -> Result<Self> {
        Ok(Self::new(config.roster()?, config.rules.clone()))
    }

    /// Submit a query and recompute the outcome
    pub fn submit(&mut self, query: &str) -> &QueryOutcome {
        self.query = query.to_string();
        self.refresh();
        &self.outcome
    }

    /// The last submitted query, as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The outcome of the last submitted query
    pub fn outcome(&self) -> &QueryOutcome {
        &self.outcome
    }

    /// The current roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The rules queries are answered with
    pub fn rules(&self) -> &QueryRules {
        &self.rules
    }

    /// Append a seat to the roster.
    ///
    /// Short key and table number are required. The new seat gets the next
    /// free id and the current query is answered again against the new
    /// roster.
    pub fn add_seat(&mut self, draft: SeatDraft) -> Result<&Seat> {
        let draft = SeatDraft::new(
            draft.table_number.trim(),
            draft.short_key.trim(),
            draft.display_name.trim(),
            draft.dietary_note.trim(),
        );

        if draft.short_key.is_empty() {
            return Err(Error::InvalidSeat("short key is required".to_string()));
        }
        if draft.table_number.is_empty() {
            return Err(Error::InvalidSeat("table number is required".to_string()));
        }

        let key = draft.normalized_key();
        if self
            .roster
            .seats()
            .iter()
            .any(|s| s.short_key.to_lowercase() == key)
        {
            warn!(short_key = %draft.short_key, "appending seat with a short key already in use");
        }

        self.roster = self.roster.with_seat(draft);
        self.refresh();

        let seat = self
            .roster
            .seats()
            .last()
            .ok_or_else(|| Error::InvalidSeat("roster is empty after append".to_string()))?;
        info!(id = %seat.id, table = %seat.table_number, "added seat");
        Ok(seat)
    }

    fn refresh(&mut self) {
        self.outcome = search(self.roster.seats(), &self.query, &self.rules);
    }
}
