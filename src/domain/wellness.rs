/// WellnessEntry entity for subjective check-ins
///
/// This module defines the WellnessEntry struct that records how the user
/// felt on a given day: an overall mood, three 1-10 ratings and optional
/// free text.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{EntryId, Mood, Rating};

/// A single mood/energy/stress/motivation check-in
///
/// Entries are never edited after creation. The store orders them by
/// `timestamp`, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessEntry {
    /// Unique identifier for this entry
    #[serde(default)]
    pub id: EntryId,
    /// Which day this check-in describes
    pub date: NaiveDate,
    pub mood: Mood,
    pub energy: Rating,
    pub stress: Rating,
    pub motivation: Rating,
    /// Free-form reflection ("How was your day?")
    #[serde(default)]
    pub notes: Option<String>,
    /// Something the user is grateful for
    #[serde(default)]
    pub gratitude: Option<String>,
    /// Exact creation instant
    pub timestamp: DateTime<Utc>,
}

impl WellnessEntry {
    /// Create an entry stamped with the current time
    ///
    /// Ratings are already range-checked by their type; blank text is
    /// normalised to `None`.
    pub fn new(
        date: NaiveDate,
        mood: Mood,
        energy: Rating,
        stress: Rating,
        motivation: Rating,
        notes: Option<String>,
        gratitude: Option<String>,
    ) -> Self {
        Self::with_timestamp(date, mood, energy, stress, motivation, notes, gratitude, Utc::now())
    }

    /// Create an entry with an explicit timestamp (imports and tests)
    #[allow(clippy::too_many_arguments)]
    pub fn with_timestamp(
        date: NaiveDate,
        mood: Mood,
        energy: Rating,
        stress: Rating,
        motivation: Rating,
        notes: Option<String>,
        gratitude: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            date,
            mood,
            energy,
            stress,
            motivation,
            notes: non_blank(notes),
            gratitude: non_blank(gratitude),
            timestamp,
        }
    }

    /// Check if this entry has notes
    pub fn has_notes(&self) -> bool {
        self.notes.is_some()
    }

    pub fn has_gratitude(&self) -> bool {
        self.gratitude.is_some()
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.and_then(|t| {
        let trimmed = t.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
