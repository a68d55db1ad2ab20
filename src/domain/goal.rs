/// Weight goal and related helpers
///
/// The goal is a target weight plus a target date. Both are optional so a
/// fresh store has "no goal"; the goal view always sets both together.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{round_to, Weight};

/// Target weight and date set by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub target_weight: Option<Weight>,
    pub target_date: Option<NaiveDate>,
}

impl Goal {
    pub fn new(target_weight: Option<Weight>, target_date: Option<NaiveDate>) -> Self {
        Self {
            target_weight,
            target_date,
        }
    }

    pub fn is_set(&self) -> bool {
        self.target_weight.is_some()
    }

    /// Days remaining until the target date (negative once it has passed)
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.target_date.map(|d| (d - today).num_days())
    }
}

/// Which way the user has to move to reach a target weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "direction", content = "kg", rename_all = "snake_case")]
pub enum GoalDirection {
    Lose(f64),
    Gain(f64),
    Maintain,
}

impl GoalDirection {
    /// Compare a target against the current weight; amounts are one decimal
    pub fn between(current_kg: f64, target_kg: f64) -> Self {
        let delta = round_to((current_kg - target_kg).abs(), 1);
        if delta == 0.0 {
            GoalDirection::Maintain
        } else if target_kg < current_kg {
            GoalDirection::Lose(delta)
        } else {
            GoalDirection::Gain(delta)
        }
    }

    pub fn describe(&self) -> String {
        match self {
            GoalDirection::Lose(kg) => format!("Lose {:.1} kg", kg),
            GoalDirection::Gain(kg) => format!("Gain {:.1} kg", kg),
            GoalDirection::Maintain => "Maintain your current weight".to_string(),
        }
    }
}

/// Body-mass index for a weight and height, one decimal
pub fn body_mass_index(weight: Weight, height_cm: f64) -> Option<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round_to(weight.kg() / (height_m * height_m), 1))
}
