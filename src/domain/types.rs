/// Core value types used throughout the domain layer
///
/// This module defines the validated numeric types (Weight, Rating), the
/// enums for mood, view and theme, and the ID type for wellness entries.
/// Every constructor here is fallible so that unvalidated input never
/// reaches the tracking store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a wellness entry
///
/// This is a wrapper around UUID to provide type safety when entries are
/// referenced from outside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A body weight in kilograms
///
/// Always finite and strictly positive. Persisted as a bare number, and a
/// stored value that breaks the invariant fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Create a weight, rejecting NaN, infinities, zero and negatives
    pub fn new(kg: f64) -> Result<Self, DomainError> {
        if !kg.is_finite() {
            return Err(DomainError::InvalidWeight(format!("{} is not a number", kg)));
        }
        if kg <= 0.0 {
            return Err(DomainError::InvalidWeight(format!(
                "Weight must be greater than 0, got {}",
                kg
            )));
        }
        Ok(Self(kg))
    }

    /// The weight in kilograms
    pub fn kg(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subjective 1-10 rating (energy, stress, motivation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Create a rating, rejecting anything outside 1-10
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidRating(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    /// Midpoint used by the wellness form before the user moves a slider
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// How the user feels overall in a wellness check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Great, Mood::Good, Mood::Okay, Mood::Bad];

    /// Get the display name for this mood
    pub fn display_name(&self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Bad => "Bad",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Great => "😊",
            Mood::Good => "🙂",
            Mood::Okay => "😐",
            Mood::Bad => "😔",
        }
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "great" => Ok(Mood::Great),
            "good" => Ok(Mood::Good),
            "okay" => Ok(Mood::Okay),
            "bad" => Ok(Mood::Bad),
            other => Err(DomainError::InvalidMood(format!(
                "Invalid mood '{}'. Valid options: great, good, okay, bad",
                other
            ))),
        }
    }
}

/// The view the user last had open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    /// Weight log, graph and goal
    #[default]
    WeightTracker,
    /// Mood and wellness check-ins
    Wellness,
    /// Weekly/monthly change statistics
    Analytics,
    /// Daily check-in streak and milestones
    Streak,
}

impl ActiveView {
    pub fn display_name(&self) -> &'static str {
        match self {
            ActiveView::WeightTracker => "Weight",
            ActiveView::Wellness => "Mind",
            ActiveView::Analytics => "Stats",
            ActiveView::Streak => "Streak",
        }
    }
}

impl FromStr for ActiveView {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" | "weight_tracker" => Ok(ActiveView::WeightTracker),
            "wellness" | "mind" | "psychology" => Ok(ActiveView::Wellness),
            "analytics" | "stats" => Ok(ActiveView::Analytics),
            "streak" | "calendar" => Ok(ActiveView::Streak),
            other => Err(DomainError::InvalidView(format!(
                "Invalid view '{}'. Valid options: weight, wellness, analytics, streak",
                other
            ))),
        }
    }
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Round half away from zero to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
