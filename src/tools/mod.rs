/// MCP tools for fitness tracking
///
/// Each tool plays the part of one view: it parses and validates raw
/// client input, calls the tracker's mutating operations, and renders a
/// short text message. The tracker itself trusts its inputs, so every
/// range and date check lives here.

pub mod goal;
pub mod preferences;
pub mod report;
pub mod streak;
pub mod weight;
pub mod wellness;

// Re-export tool functions for easy access
pub use goal::*;
pub use preferences::*;
pub use report::*;
pub use streak::*;
pub use weight::*;
pub use wellness::*;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DomainError, Weight};
use crate::storage::StorageError;

/// Upper bound (exclusive) accepted by the weight forms, in kg
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Longest notes/gratitude text accepted
pub const MAX_TEXT_LEN: usize = 1000;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors a tool can return to the client
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    Validation(#[from] DomainError),

    #[error("Failed to save: {0}")]
    Storage(#[from] StorageError),
}

/// A number the client may send either as JSON number or as text
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        NumberInput::Number(value)
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        NumberInput::Text(value.to_string())
    }
}

impl NumberInput {
    /// Parse to a finite number; blank text is `Ok(None)`
    fn to_number(&self) -> Result<Option<f64>, DomainError> {
        match self {
            NumberInput::Number(n) => Ok(Some(*n)),
            NumberInput::Text(s) if s.trim().is_empty() => Ok(None),
            NumberInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| DomainError::InvalidWeight(format!("'{}' is not a number", s.trim()))),
        }
    }
}

/// Validate a weight the way the measurement form does
///
/// Required, numeric, and strictly between 0 and 500 kg.
pub fn parse_weight(input: Option<&NumberInput>) -> Result<Weight, DomainError> {
    let value = match input {
        Some(raw) => raw.to_number()?,
        None => None,
    };
    let Some(kg) = value else {
        return Err(DomainError::validation("Please enter your weight"));
    };
    if !kg.is_finite() || kg <= 0.0 || kg >= MAX_WEIGHT_KG {
        return Err(DomainError::InvalidWeight(
            "Please enter a valid weight (1-500 kg)".to_string(),
        ));
    }
    Weight::new(kg)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::InvalidDate(format!("'{}' is not a valid date (expected YYYY-MM-DD)", raw.trim()))
    })
}

/// Reject free text longer than the form allows
fn validate_text(field: &str, text: &Option<String>) -> Result<(), DomainError> {
    if let Some(t) = text {
        if t.chars().count() > MAX_TEXT_LEN {
            return Err(DomainError::validation(format!(
                "{} cannot be longer than {} characters",
                field, MAX_TEXT_LEN
            )));
        }
    }
    Ok(())
}

/// Format a signed change the way the stat cards do ("+1.2", "-0.5", "0")
pub fn signed(value: f64, decimals: usize) -> String {
    if value > 0.0 {
        format!("+{:.*}", decimals, value)
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(Some(&80.5.into())).unwrap().kg(), 80.5);
        assert_eq!(parse_weight(Some(&" 72.3 ".into())).unwrap().kg(), 72.3);

        assert!(matches!(parse_weight(None), Err(DomainError::Validation { .. })));
        assert!(matches!(parse_weight(Some(&"".into())), Err(DomainError::Validation { .. })));
        assert!(parse_weight(Some(&"abc".into())).is_err());
        assert!(parse_weight(Some(&0.0.into())).is_err());
        assert!(parse_weight(Some(&500.0.into())).is_err());
        assert!(parse_weight(Some(&(-2.0).into())).is_err());
        assert!(parse_weight(Some(&"NaN".into())).is_err());
    }

    #[test]
    fn test_number_input_accepts_number_or_text() {
        let n: NumberInput = serde_json::from_str("81.2").unwrap();
        assert_eq!(n, NumberInput::Number(81.2));
        let t: NumberInput = serde_json::from_str("\"81.2\"").unwrap();
        assert_eq!(t, NumberInput::Text("81.2".to_string()));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(1.26, 1), "+1.3");
        assert_eq!(signed(-0.5, 1), "-0.5");
        assert_eq!(signed(0.0, 2), "0");
    }
}
