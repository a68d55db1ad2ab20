/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Measurement, WellnessEntry,
/// StreakState, Goal), the validated value types they are built from, and
/// the TrackerState store that owns them all.

pub mod goal;
pub mod measurement;
pub mod state;
pub mod streak;
pub mod types;
pub mod wellness;

// Re-export public types for easy access
pub use goal::*;
pub use measurement::*;
pub use state::*;
pub use streak::*;
pub use types::*;
pub use wellness::*;

use thiserror::Error;

/// Errors raised when input fails validation
///
/// The store never produces these; they come from value-type constructors
/// and from the tools that parse user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid mood: {0}")]
    InvalidMood(String),

    #[error("Invalid view: {0}")]
    InvalidView(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
