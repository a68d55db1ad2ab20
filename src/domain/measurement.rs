/// Measurement entity for body-weight tracking
///
/// A measurement is one dated weight record. The store keeps these sorted
/// ascending by date; the date acts as the key for deletion.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::Weight;

/// One dated body-weight record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Calendar day the weight was taken
    pub date: NaiveDate,
    /// Weight in kilograms
    pub weight: Weight,
}

impl Measurement {
    pub fn new(date: NaiveDate, weight: Weight) -> Self {
        Self { date, weight }
    }

    /// Weight as a plain number, for arithmetic in the analytics queries
    pub fn kg(&self) -> f64 {
        self.weight.kg()
    }
}
