/// Tools for the wellness view
///
/// This module implements the wellness_log and wellness_list MCP tools.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{wellness_summary, WellnessSummary};
use crate::domain::{DomainError, Mood, Rating, WellnessEntry};
use crate::tools::{validate_text, ToolError};
use crate::tracker::Tracker;

/// Parameters for logging a wellness check-in
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct LogWellnessParams {
    /// Overall mood: great, good, okay or bad (required)
    pub mood: Option<String>,
    /// Energy level 1-10 (defaults to 5)
    pub energy: Option<i64>,
    /// Stress level 1-10 (defaults to 5)
    pub stress: Option<i64>,
    /// Motivation level 1-10 (defaults to 5)
    pub motivation: Option<i64>,
    /// How was your day? (optional)
    pub notes: Option<String>,
    /// Something you're grateful for (optional)
    pub gratitude: Option<String>,
}

/// Response from logging a check-in
#[derive(Debug, Serialize)]
pub struct LogWellnessResponse {
    pub success: bool,
    pub entry_id: String,
    pub message: String,
}

/// Record today's wellness check-in
pub fn log_wellness(
    tracker: &mut Tracker,
    params: LogWellnessParams,
    today: NaiveDate,
) -> Result<LogWellnessResponse, ToolError> {
    let mood: Mood = match params.mood.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse()?,
        _ => return Err(DomainError::validation("Please select a mood").into()),
    };
    let energy = parse_rating("Energy", params.energy)?;
    let stress = parse_rating("Stress", params.stress)?;
    let motivation = parse_rating("Motivation", params.motivation)?;
    validate_text("Notes", &params.notes)?;
    validate_text("Gratitude", &params.gratitude)?;

    let entry = WellnessEntry::new(
        today,
        mood,
        energy,
        stress,
        motivation,
        params.notes,
        params.gratitude,
    );
    let entry_id = entry.id.to_string();
    tracker.add_wellness_entry(entry)?;

    Ok(LogWellnessResponse {
        success: true,
        entry_id,
        message: format!(
            "{} Logged a {} day. Energy {}/10, stress {}/10, motivation {}/10",
            mood.emoji(),
            mood.display_name().to_lowercase(),
            energy.value(),
            stress.value(),
            motivation.value()
        ),
    })
}

/// Range-check an optional slider value, defaulting to the midpoint
fn parse_rating(field: &str, value: Option<i64>) -> Result<Rating, DomainError> {
    match value {
        None => Ok(Rating::default()),
        Some(v) => u8::try_from(v)
            .map_err(|_| DomainError::InvalidRating(format!("{} must be between 1 and 10", field)))
            .and_then(|v| {
                Rating::new(v).map_err(|_| {
                    DomainError::InvalidRating(format!("{} must be between 1 and 10", field))
                })
            }),
    }
}

/// Parameters for listing recent check-ins
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListWellnessParams {
    /// How many recent entries to include (default 7)
    pub limit: Option<usize>,
}

/// Response from listing check-ins
#[derive(Debug, Serialize)]
pub struct ListWellnessResponse {
    pub entries: Vec<WellnessEntry>,
    pub summary: WellnessSummary,
    pub message: String,
}

const DEFAULT_WELLNESS_LIMIT: usize = 7;

/// Most recent check-ins with their averages
pub fn list_wellness(
    tracker: &Tracker,
    params: ListWellnessParams,
) -> Result<ListWellnessResponse, ToolError> {
    let limit = params.limit.unwrap_or(DEFAULT_WELLNESS_LIMIT);
    let all = tracker.state().wellness_entries();
    let entries: Vec<WellnessEntry> = all.iter().take(limit).cloned().collect();
    let summary = wellness_summary(all, Some(limit));

    if all.is_empty() {
        return Ok(ListWellnessResponse {
            entries,
            summary,
            message: "No check-ins yet. Log how you feel today!".to_string(),
        });
    }

    let header = format!(
        "🧠 **Recent check-ins** ({} of {})\nAverages: energy {:.1}, stress {:.1}, motivation {:.1}",
        entries.len(),
        all.len(),
        summary.average_energy,
        summary.average_stress,
        summary.average_motivation
    );
    let lines = entries
        .iter()
        .map(|e| {
            let mut line = format!(
                "{} {} {}: energy {}, stress {}, motivation {}",
                e.date,
                e.mood.emoji(),
                e.mood.display_name(),
                e.energy.value(),
                e.stress.value(),
                e.motivation.value()
            );
            if let Some(notes) = &e.notes {
                line.push_str(&format!("\n   📝 {}", notes));
            }
            if let Some(gratitude) = &e.gratitude {
                line.push_str(&format!("\n   🙏 {}", gratitude));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(ListWellnessResponse {
        entries,
        summary,
        message: format!("{}\n\n{}", header, lines),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryId, TrackerState};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_log_wellness_with_defaults() {
        let mut tracker = Tracker::new(TrackerState::new());
        let response = log_wellness(
            &mut tracker,
            LogWellnessParams {
                mood: Some("Great".to_string()),
                notes: Some("Slept well".to_string()),
                ..Default::default()
            },
            today(),
        )
        .unwrap();

        assert!(response.success);
        let entry = &tracker.state().wellness_entries()[0];
        assert_eq!(entry.mood, Mood::Great);
        assert_eq!(entry.energy.value(), 5);
        assert_eq!(entry.date, today());
        assert_eq!(EntryId::from_string(&response.entry_id).unwrap(), entry.id);
    }

    #[test]
    fn test_log_wellness_validation() {
        let mut tracker = Tracker::new(TrackerState::new());

        let missing_mood = log_wellness(&mut tracker, LogWellnessParams::default(), today());
        assert!(matches!(missing_mood, Err(ToolError::Validation(DomainError::Validation { .. }))));

        let bad_mood = log_wellness(
            &mut tracker,
            LogWellnessParams { mood: Some("ecstatic".to_string()), ..Default::default() },
            today(),
        );
        assert!(matches!(bad_mood, Err(ToolError::Validation(DomainError::InvalidMood(_)))));

        for bad in [0, 11, -3, 300] {
            let result = log_wellness(
                &mut tracker,
                LogWellnessParams {
                    mood: Some("good".to_string()),
                    stress: Some(bad),
                    ..Default::default()
                },
                today(),
            );
            assert!(matches!(result, Err(ToolError::Validation(DomainError::InvalidRating(_)))));
        }

        let long_notes = log_wellness(
            &mut tracker,
            LogWellnessParams {
                mood: Some("good".to_string()),
                notes: Some("x".repeat(1001)),
                ..Default::default()
            },
            today(),
        );
        assert!(long_notes.is_err());

        assert!(tracker.state().wellness_entries().is_empty());
    }

    #[test]
    fn test_list_wellness() {
        let mut tracker = Tracker::new(TrackerState::new());
        let empty = list_wellness(&tracker, ListWellnessParams::default()).unwrap();
        assert!(empty.message.contains("No check-ins yet"));

        for mood in ["good", "bad", "okay"] {
            log_wellness(
                &mut tracker,
                LogWellnessParams { mood: Some(mood.to_string()), energy: Some(6), ..Default::default() },
                today(),
            )
            .unwrap();
        }

        let none = list_wellness(&tracker, ListWellnessParams { limit: Some(0) }).unwrap();
        assert!(none.entries.is_empty());
        assert!(!none.message.contains("No check-ins yet"));
        assert!(none.message.contains("(0 of 3)"));

        let listed = list_wellness(&tracker, ListWellnessParams { limit: Some(2) }).unwrap();
        assert_eq!(listed.entries.len(), 2);
        assert_eq!(listed.summary.average_energy, 6.0);
        assert!(listed.message.contains("(2 of 3)"));
    }
}
