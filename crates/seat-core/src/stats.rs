//! Table statistics: tables grouped by meat/vegetarian headcount

use crate::seat::Seat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Tables sharing the same meat/vegetarian headcount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStat {
    pub meat_count: usize,
    pub vegetarian_count: usize,
    /// Table labels in ascending numeric order
    pub tables: Vec<String>,
}

/// Headcount for a single table
#[derive(Debug, Clone, Copy, Default)]
struct Headcount {
    meat: usize,
    vegetarian: usize,
}

/// Group tables into buckets by their exact (meat, vegetarian) headcount.
///
/// Only seats with both a table number and a short key are counted. Buckets
/// are ordered by meat count descending, then vegetarian count ascending.
pub fn compute_table_stats(seats: &[Seat], vegetarian_marker: &str) -> Vec<TableStat> {
    let mut per_table: BTreeMap<&str, Headcount> = BTreeMap::new();

    for seat in seats {
        if seat.table_number.is_empty() || !seat.has_short_key() {
            continue;
        }

        let count = per_table.entry(seat.table_number.as_str()).or_default();
        if seat.is_vegetarian(vegetarian_marker) {
            count.vegetarian += 1;
        } else {
            count.meat += 1;
        }
    }

    let mut buckets: BTreeMap<(usize, usize), Vec<String>> = BTreeMap::new();
    for (table, count) in per_table {
        buckets
            .entry((count.meat, count.vegetarian))
            .or_default()
            .push(table.to_string());
    }

    let mut stats: Vec<TableStat> = buckets
        .into_iter()
        .map(|((meat_count, vegetarian_count), mut tables)| {
            tables.sort_by(|a, b| compare_table_labels(a, b));
            TableStat {
                meat_count,
                vegetarian_count,
                tables,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.meat_count
            .cmp(&a.meat_count)
            .then(a.vegetarian_count.cmp(&b.vegetarian_count))
    });

    stats
}

/// Order table labels by numeric value.
///
/// Labels that are not integers sort before every numeric label and among
/// themselves lexicographically. The whole trimmed label must parse, so a
/// label with only a numeric prefix (`12A`) counts as non-numeric. Equal
/// numbers (`7`, `07`) fall back to the label text.
pub fn compare_table_labels(a: &str, b: &str) -> Ordering {
    match (table_value(a), table_value(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn table_value(label: &str) -> Option<i64> {
    label.trim().parse().ok()
}
