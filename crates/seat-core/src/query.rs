//! Query engine for seat lookup

use crate::config::QueryRules;
use crate::seat::Seat;
use crate::stats::{compute_table_stats, TableStat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a query produced: either seats to list, or the statistics view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Seats matched by short key or table number, in roster order
    Matches(Vec<Seat>),
    /// Tables grouped by headcount, returned for the sentinel query
    Statistics(Vec<TableStat>),
}

impl Default for QueryOutcome {
    fn default() -> Self {
        QueryOutcome::Matches(Vec::new())
    }
}

impl QueryOutcome {
    /// Check if this is the statistics view
    pub fn is_statistics(&self) -> bool {
        matches!(self, QueryOutcome::Statistics(_))
    }

    /// Matched seats, or an empty slice for the statistics view
    pub fn matches(&self) -> &[Seat] {
        match self {
            QueryOutcome::Matches(seats) => seats.as_slice(),
            QueryOutcome::Statistics(_) => &[],
        }
    }

    /// Statistics buckets, or an empty slice for a lookup
    pub fn statistics(&self) -> &[TableStat] {
        match self {
            QueryOutcome::Matches(_) => &[],
            QueryOutcome::Statistics(stats) => stats.as_slice(),
        }
    }

    /// Number of seats or buckets
    pub fn len(&self) -> usize {
        match self {
            QueryOutcome::Matches(seats) => seats.len(),
            QueryOutcome::Statistics(stats) => stats.len(),
        }
    }

    /// Check if nothing was produced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Answer a free-text query against the roster.
///
/// A blank query matches nothing. The sentinel query returns statistics
/// instead of seats. Otherwise a seat matches when its short key equals the
/// query ignoring case, or when its table number equals the query and the
/// seat has a short key.
pub fn search(seats: &[Seat], raw: &str, rules: &QueryRules) -> QueryOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return QueryOutcome::default();
    }

    let query = trimmed.to_lowercase();
    if query == rules.stats_sentinel.trim().to_lowercase() {
        debug!(sentinel = %query, "showing table statistics");
        return QueryOutcome::Statistics(compute_table_stats(seats, &rules.vegetarian_marker));
    }

    let matches: Vec<Seat> = seats
        .iter()
        .filter(|seat| seat_matches(seat, &query))
        .cloned()
        .collect();

    debug!(query = %query, matches = matches.len(), "seat lookup");
    QueryOutcome::Matches(matches)
}

fn seat_matches(seat: &Seat, query: &str) -> bool {
    if !seat.has_short_key() {
        return false;
    }
    seat.short_key.to_lowercase() == query || seat.table_number == query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::SeatDraft;

    fn roster() -> Vec<Seat> {
        vec![
            Seat::from_draft("1", SeatDraft::new("1", "a1b2", "Alice", "")),
            Seat::from_draft("2", SeatDraft::new("1", "C3D4", "Bob", "素")),
            Seat::from_draft("3", SeatDraft::new("2", "E5F6", "Carol", "")),
            Seat::from_draft("4", SeatDraft::new("7", "", "", "")),
            Seat::from_draft("5", SeatDraft::new("VIP", "G7H8", "Dan", "")),
        ]
    }

    fn rules() -> QueryRules {
        QueryRules::default()
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let seats = roster();
        assert_eq!(search(&seats, "", &rules()), QueryOutcome::Matches(vec![]));
        assert_eq!(search(&seats, "   \t", &rules()), QueryOutcome::Matches(vec![]));
    }

    #[test]
    fn test_short_key_case_insensitive() {
        let seats = roster();
        let outcome = search(&seats, "A1B2", &rules());

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.matches()[0].display_name, "Alice");

        let outcome = search(&seats, "  c3d4 ", &rules());
        assert_eq!(outcome.matches()[0].id, "2");
    }

    #[test]
    fn test_short_key_exact_only() {
        let seats = roster();
        assert!(search(&seats, "a1", &rules()).is_empty());
    }

    #[test]
    fn test_table_lookup_lists_all_keyed_seats() {
        let seats = roster();
        let outcome = search(&seats, "1", &rules());

        let ids: Vec<&str> = outcome.matches().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_table_with_only_unkeyed_seat() {
        let seats = roster();
        let outcome = search(&seats, "7", &rules());

        assert!(!outcome.is_statistics());
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_table_label_compared_after_lowercasing() {
        let seats = roster();
        assert!(search(&seats, "VIP", &rules()).is_empty());
        assert!(search(&seats, "vip", &rules()).is_empty());
    }

    #[test]
    fn test_sentinel_returns_statistics() {
        let seats = roster();
        let outcome = search(&seats, " 0 ", &rules());

        assert!(outcome.is_statistics());
        assert!(outcome.matches().is_empty());
        assert_eq!(outcome.statistics().len(), 2);
        assert_eq!(outcome.statistics()[0].meat_count, 1);
        assert_eq!(outcome.statistics()[0].vegetarian_count, 0);
        assert_eq!(outcome.statistics()[0].tables, vec!["VIP", "2"]);
    }

    #[test]
    fn test_sentinel_ignores_table_zero() {
        let mut seats = roster();
        seats.push(Seat::from_draft("6", SeatDraft::new("0", "Z0", "Zero", "")));

        let outcome = search(&seats, "0", &rules());
        assert!(outcome.is_statistics());
        assert!(outcome.matches().is_empty());
    }

    #[test]
    fn test_custom_sentinel() {
        let seats = roster();
        let rules = QueryRules {
            stats_sentinel: "stats".to_string(),
            ..QueryRules::default()
        };

        assert!(search(&seats, "stats", &rules).is_statistics());
        assert!(!search(&seats, "0", &rules).is_statistics());
    }

    #[test]
    fn test_custom_sentinel_ignores_case() {
        let seats = roster();
        let rules = QueryRules {
            stats_sentinel: "Stats".to_string(),
            ..QueryRules::default()
        };

        assert!(search(&seats, "STATS", &rules).is_statistics());
        assert!(search(&seats, " stats ", &rules).is_statistics());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = QueryOutcome::Matches(vec![]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "matches");
    }
}
