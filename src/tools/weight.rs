/// Tools for the weight view
///
/// This module implements the weight_add, weight_delete, weight_set_start
/// and weight_summary MCP tools.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEngine, WeightSummary};
use crate::domain::{body_mass_index, DomainError, Weight};
use crate::tools::{parse_date, parse_weight, signed, NumberInput, ToolError};
use crate::tracker::Tracker;

/// Parameters for logging a weight measurement
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddMeasurementParams {
    /// Weight in kg (0-500, exclusive)
    pub weight: Option<NumberInput>,
    /// Date of the measurement (YYYY-MM-DD, defaults to today, cannot be in the future)
    pub date: Option<String>,
}

/// Response from logging a measurement
#[derive(Debug, Serialize)]
pub struct AddMeasurementResponse {
    pub success: bool,
    pub date: NaiveDate,
    pub weight: f64,
    pub current_weight: f64,
    pub total_change: f64,
    pub message: String,
}

/// Log a weight measurement
pub fn add_measurement(
    tracker: &mut Tracker,
    params: AddMeasurementParams,
    today: NaiveDate,
) -> Result<AddMeasurementResponse, ToolError> {
    let weight = parse_weight(params.weight.as_ref())?;

    let date = match params.date.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_date(raw)?,
        _ => today,
    };
    if date > today {
        return Err(DomainError::InvalidDate("Cannot log a weight for a future date".to_string()).into());
    }

    tracker.add_measurement(date, weight)?;

    let state = tracker.state();
    let total_change = state.total_change();
    Ok(AddMeasurementResponse {
        success: true,
        date,
        weight: weight.kg(),
        current_weight: state.current_weight(),
        total_change,
        message: format!(
            "✅ Logged {:.1} kg for {}. Current weight: {:.1} kg ({} kg since start)",
            weight.kg(),
            date,
            state.current_weight(),
            signed(total_change, 1)
        ),
    })
}

/// Parameters for deleting measurements
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteMeasurementParams {
    /// Date whose measurements should be removed (YYYY-MM-DD)
    pub date: String,
}

/// Response from deleting measurements
#[derive(Debug, Serialize)]
pub struct DeleteMeasurementResponse {
    pub success: bool,
    pub removed: usize,
    pub message: String,
}

/// Delete every measurement recorded on a date
pub fn delete_measurement(
    tracker: &mut Tracker,
    params: DeleteMeasurementParams,
) -> Result<DeleteMeasurementResponse, ToolError> {
    let date = parse_date(&params.date)?;
    let removed = tracker.delete_measurement(date)?;

    let message = match removed {
        0 => format!("No measurements found for {}", date),
        1 => format!("🗑️ Deleted the measurement for {}", date),
        n => format!("🗑️ Deleted {} measurements for {}", n, date),
    };

    Ok(DeleteMeasurementResponse {
        success: removed > 0,
        removed,
        message,
    })
}

/// Parameters for overriding the starting weight
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetStartingWeightParams {
    /// Starting weight in kg; omit to go back to the first measurement
    pub weight: Option<NumberInput>,
}

/// Response from setting the starting weight
#[derive(Debug, Serialize)]
pub struct SetStartingWeightResponse {
    pub success: bool,
    pub start_weight: f64,
    pub message: String,
}

/// Override (or clear) the starting weight
pub fn set_starting_weight(
    tracker: &mut Tracker,
    params: SetStartingWeightParams,
) -> Result<SetStartingWeightResponse, ToolError> {
    let weight: Option<Weight> = match params.weight {
        Some(raw) => Some(parse_weight(Some(&raw))?),
        None => None,
    };

    tracker.set_starting_weight(weight)?;

    let start = tracker.state().start_weight();
    let message = match weight {
        Some(w) => format!("Starting weight set to {:.1} kg", w.kg()),
        None => format!("Starting weight reset to first measurement ({:.1} kg)", start),
    };

    Ok(SetStartingWeightResponse {
        success: true,
        start_weight: start,
        message,
    })
}

/// Parameters for the weight summary
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct WeightSummaryParams {
    /// Height in cm, to include a body-mass index (optional)
    pub height_cm: Option<f64>,
}

/// Response from the weight summary
#[derive(Debug, Serialize)]
pub struct WeightSummaryResponse {
    pub summary: WeightSummary,
    pub bmi: Option<f64>,
    pub message: String,
}

/// Current, start and change figures plus goal progress
pub fn weight_summary(
    tracker: &Tracker,
    params: WeightSummaryParams,
) -> Result<WeightSummaryResponse, ToolError> {
    let state = tracker.state();
    let summary = AnalyticsEngine::new().weight_summary(state);

    if summary.entries == 0 {
        return Ok(WeightSummaryResponse {
            summary,
            bmi: None,
            message: "No measurements yet. Log your first weight to get started!".to_string(),
        });
    }

    let bmi = match (params.height_cm, state.measurements().last()) {
        (Some(height), Some(latest)) => body_mass_index(latest.weight, height),
        _ => None,
    };

    let mut lines = vec![
        format!("⚖️ **Weight Summary** ({} entries)", summary.entries),
        format!("- Current: {:.1} kg", summary.current_weight),
        format!("- Start: {:.1} kg", summary.start_weight),
        format!(
            "- Change: {} kg ({}%)",
            signed(summary.total_change, 1),
            signed(summary.change_percentage, 1)
        ),
    ];
    if let Some(bmi) = bmi {
        lines.push(format!("- BMI: {:.1}", bmi));
    }
    if let Some(goal) = summary.goal_weight {
        let when = summary
            .goal_date
            .map(|d| format!(" by {}", d))
            .unwrap_or_default();
        lines.push(format!(
            "🎯 Goal: {:.1} kg{} ({:.1}% there)",
            goal, when, summary.goal_progress
        ));
        if let Some(direction) = &summary.goal_direction {
            lines.push(format!("   {} to go", direction.describe()));
        }
    }

    Ok(WeightSummaryResponse {
        summary,
        bmi,
        message: lines.join("\n"),
    })
}
