//! Core seat types for representing seating assignments

use serde::{Deserialize, Serialize};

/// A single seat assignment in a merged roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Sequential identifier assigned at merge time
    pub id: String,
    /// Short alphanumeric lookup key (may be empty)
    pub short_key: String,
    /// Table label, usually numeric
    pub table_number: String,
    /// Guest name shown next to the seat
    pub display_name: String,
    /// Free-text dietary note (may be empty)
    pub dietary_note: String,
}

impl Seat {
    /// Create a seat from a draft and an assigned id
    pub fn from_draft(id: impl Into<String>, draft: SeatDraft) -> Self {
        Self {
            id: id.into(),
            short_key: draft.short_key,
            table_number: draft.table_number,
            display_name: draft.display_name,
            dietary_note: draft.dietary_note,
        }
    }

    /// Whether this seat can be found by key or table lookup
    pub fn has_short_key(&self) -> bool {
        !self.short_key.is_empty()
    }

    /// Whether the dietary note carries the vegetarian marker
    pub fn is_vegetarian(&self, marker: &str) -> bool {
        !marker.is_empty() && self.dietary_note.contains(marker)
    }
}

/// A seat that has not been given an id yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeatDraft {
    pub short_key: String,
    pub table_number: String,
    pub display_name: String,
    pub dietary_note: String,
}

impl SeatDraft {
    /// Create a new draft
    pub fn new(
        table_number: impl Into<String>,
        short_key: impl Into<String>,
        display_name: impl Into<String>,
        dietary_note: impl Into<String>,
    ) -> Self {
        Self {
            short_key: short_key.into(),
            table_number: table_number.into(),
            display_name: display_name.into(),
            dietary_note: dietary_note.into(),
        }
    }

    /// Build a draft from parsed CSV fields in
    /// `table number, short key, display name, dietary note` order.
    /// Missing columns become empty strings.
    pub fn from_fields(fields: &[String]) -> Self {
        let field = |i: usize| fields.get(i).cloned().unwrap_or_default();
        Self {
            table_number: field(0),
            short_key: field(1),
            display_name: field(2),
            dietary_note: field(3),
        }
    }

    /// Short key normalized for case-insensitive comparison
    pub fn normalized_key(&self) -> String {
        self.short_key.to_lowercase()
    }
}
