/// Tool for setting a weight goal
///
/// This module implements the goal_set MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, GoalDirection, Weight};
use crate::tools::{parse_date, NumberInput, ToolError};
use crate::tracker::Tracker;

/// Parameters for setting a goal
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetGoalParams {
    /// Target weight in kg
    pub weight: Option<NumberInput>,
    /// Target date (YYYY-MM-DD, must be after today)
    pub date: Option<String>,
}

/// Response from setting a goal
#[derive(Debug, Serialize)]
pub struct SetGoalResponse {
    pub success: bool,
    pub target_weight: f64,
    pub target_date: NaiveDate,
    pub direction: Option<GoalDirection>,
    pub message: String,
}

/// Set the goal weight and date
pub fn set_goal(
    tracker: &mut Tracker,
    params: SetGoalParams,
    today: NaiveDate,
) -> Result<SetGoalResponse, ToolError> {
    // The goal form only asks for a positive number, not the 500 kg cap
    let weight = params
        .weight
        .as_ref()
        .map(|raw| match raw {
            NumberInput::Number(n) => Ok(*n),
            NumberInput::Text(s) => s.trim().parse::<f64>().map_err(|_| ()),
        })
        .and_then(Result::ok)
        .filter(|kg| kg.is_finite() && *kg > 0.0)
        .ok_or_else(|| DomainError::InvalidWeight("Please enter a valid goal weight".to_string()))?;
    let weight = Weight::new(weight)?;

    let date = match params.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_date(raw)?,
        _ => return Err(DomainError::validation("Please select a target date").into()),
    };
    if date <= today {
        return Err(DomainError::InvalidDate("Target date must be in the future".to_string()).into());
    }

    tracker.set_goal(Some(weight), Some(date))?;

    let current = tracker.state().current_weight();
    let direction = (current > 0.0).then(|| GoalDirection::between(current, weight.kg()));

    let mut message = format!("🎯 Goal set: {:.1} kg by {}", weight.kg(), date);
    if let Some(direction) = &direction {
        message.push_str(&format!("\n{} from your current {:.1} kg", direction.describe(), current));
    }

    Ok(SetGoalResponse {
        success: true,
        target_weight: weight.kg(),
        target_date: date,
        direction,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrackerState;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn params(weight: Option<NumberInput>, date: Option<&str>) -> SetGoalParams {
        SetGoalParams {
            weight,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_set_goal_reports_direction() {
        let mut tracker = Tracker::new(TrackerState::new());
        tracker.add_measurement(day("2024-01-01"), Weight::new(82.0).unwrap()).unwrap();

        let response = set_goal(&mut tracker, params(Some(75.0.into()), Some("2024-06-01")), day("2024-01-02")).unwrap();
        assert_eq!(response.direction, Some(GoalDirection::Lose(7.0)));
        assert!(response.message.contains("Lose 7.0 kg"));
        assert_eq!(tracker.state().goal().target_date, Some(day("2024-06-01")));
    }

    #[test]
    fn test_set_goal_validation() {
        let mut tracker = Tracker::new(TrackerState::new());
        let today = day("2024-01-02");

        assert!(set_goal(&mut tracker, params(None, Some("2024-06-01")), today).is_err());
        assert!(set_goal(&mut tracker, params(Some("-1".into()), Some("2024-06-01")), today).is_err());
        assert!(set_goal(&mut tracker, params(Some(70.0.into()), None), today).is_err());
        assert!(set_goal(&mut tracker, params(Some(70.0.into()), Some("2024-01-02")), today).is_err());
        assert!(!tracker.state().goal().is_set());
    }

    #[test]
    fn test_goal_without_measurements_has_no_direction() {
        let mut tracker = Tracker::new(TrackerState::new());
        let response = set_goal(&mut tracker, params(Some(70.0.into()), Some("2024-06-01")), day("2024-01-02")).unwrap();
        assert_eq!(response.direction, None);
    }
}
