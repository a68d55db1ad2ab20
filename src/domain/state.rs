/// The tracking store: canonical application state and derived analytics
///
/// TrackerState owns every persisted entity (measurements, wellness entries,
/// streak counters, goal, starting weight, theme, active view). Mutations
/// keep the collections ordered; queries are pure functions of the current
/// state and are recomputed on every call.
///
/// Nothing here touches storage. Persistence hangs off the `Tracker`
/// wrapper as an observer of committed mutations.

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate, Utc};
use crate::domain::{
    round_to, ActiveView, Goal, Measurement, StreakState, StreakTransition, Theme, WellnessEntry,
    Weight,
};

/// Name of the persisted blob holding the serialized state
pub const STATE_BLOB_NAME: &str = "fitness-tracker-storage";

/// Calendar distance used by the monthly change query
const MONTH_WINDOW_DAYS: i64 = 30;

/// Number of positions looked back by the weekly change query
const WEEK_WINDOW_ENTRIES: usize = 7;

/// All persisted application state
///
/// Every field has a serde default so a partially written blob still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerState {
    theme: Theme,
    active_view: ActiveView,
    /// Sorted ascending by date
    measurements: Vec<Measurement>,
    /// Sorted descending by timestamp
    wellness_entries: Vec<WellnessEntry>,
    streak: StreakState,
    starting_weight: Option<Weight>,
    goal_weight: Option<Weight>,
    goal_date: Option<NaiveDate>,
}

impl TrackerState {
    /// Create an empty store with default preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore ordering after loading from an external source
    ///
    /// Stored blobs are written by this type and already ordered, but a
    /// hand-edited blob may not be.
    pub fn normalize(&mut self) {
        self.measurements.sort_by_key(|m| m.date);
        self.wellness_entries
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }

    // Entity accessors

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn wellness_entries(&self) -> &[WellnessEntry] {
        &self.wellness_entries
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn goal(&self) -> Goal {
        Goal::new(self.goal_weight, self.goal_date)
    }

    pub fn starting_weight(&self) -> Option<Weight> {
        self.starting_weight
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    // Mutating operations

    /// Insert a measurement and keep the collection sorted by date
    ///
    /// Measurements for an already-recorded date are kept alongside the
    /// existing ones. The first measurement ever added seeds the starting
    /// weight unless one was set explicitly.
    pub fn add_measurement(&mut self, date: NaiveDate, weight: Weight) {
        self.measurements.push(Measurement::new(date, weight));
        // Stable sort: same-day entries stay in insertion order
        self.measurements.sort_by_key(|m| m.date);

        if self.starting_weight.is_none() {
            self.starting_weight = self.measurements.first().map(|m| m.weight);
        }
    }

    /// Remove every measurement recorded for `date`, returning how many went
    pub fn delete_measurement(&mut self, date: NaiveDate) -> usize {
        let before = self.measurements.len();
        self.measurements.retain(|m| m.date != date);
        before - self.measurements.len()
    }

    /// Insert a wellness entry, newest first
    ///
    /// On a timestamp tie the entry added last comes first.
    pub fn add_wellness_entry(&mut self, entry: WellnessEntry) {
        let at = self
            .wellness_entries
            .partition_point(|e| e.timestamp > entry.timestamp);
        self.wellness_entries.insert(at, entry);
    }

    /// Check in for today (UTC calendar day)
    pub fn update_streak(&mut self) -> StreakTransition {
        self.update_streak_on(Utc::now().date_naive())
    }

    /// Check in for an explicit day
    pub fn update_streak_on(&mut self, today: NaiveDate) -> StreakTransition {
        let transition = self.streak.check_in(today);
        if transition == StreakTransition::ClockSkew {
            tracing::warn!(
                "Ignoring check-in for {}: last check-in is dated {:?}",
                today,
                self.streak.last_entry_date
            );
        }
        transition
    }

    /// Overwrite the goal
    pub fn set_goal(&mut self, weight: Option<Weight>, date: Option<NaiveDate>) {
        self.goal_weight = weight;
        self.goal_date = date;
    }

    /// Overwrite the starting weight
    pub fn set_starting_weight(&mut self, weight: Option<Weight>) {
        self.starting_weight = weight;
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Flip between light and dark, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    // Derived queries

    /// Weight of the chronologically last measurement, or 0 with no data
    pub fn current_weight(&self) -> f64 {
        self.measurements.last().map_or(0.0, Measurement::kg)
    }

    /// Starting weight if set, else the first measurement, else 0
    pub fn start_weight(&self) -> f64 {
        match self.starting_weight {
            Some(w) => w.kg(),
            None => self.measurements.first().map_or(0.0, Measurement::kg),
        }
    }

    /// Current minus start weight, one decimal
    pub fn total_change(&self) -> f64 {
        round_to(self.raw_total_change(), 1)
    }

    /// Total change as a percentage of the start weight, one decimal
    pub fn change_percentage(&self) -> f64 {
        let start = self.start_weight();
        if start == 0.0 {
            return 0.0;
        }
        round_to(self.raw_total_change() / start * 100.0, 1)
    }

    /// Latest weight minus the weight seven entries earlier, one decimal
    ///
    /// Looks back by position, not by calendar distance.
    pub fn weekly_change(&self) -> f64 {
        let data = &self.measurements;
        if data.len() < 2 {
            return 0.0;
        }
        let latest = data[data.len() - 1].kg();
        let reference = data[data.len().saturating_sub(WEEK_WINDOW_ENTRIES + 1)].kg();
        round_to(latest - reference, 1)
    }

    /// Latest weight minus the last weight dated at least 30 days earlier
    ///
    /// Falls back to the first measurement when nothing is that old. One
    /// decimal.
    pub fn monthly_change(&self) -> f64 {
        let data = &self.measurements;
        let (Some(first), Some(latest)) = (data.first(), data.last()) else {
            return 0.0;
        };
        if data.len() < 2 {
            return 0.0;
        }

        let cutoff = latest.date - Duration::days(MONTH_WINDOW_DAYS);
        let reference = data
            .iter()
            .take_while(|m| m.date <= cutoff)
            .last()
            .unwrap_or(first);

        round_to(latest.kg() - reference.kg(), 1)
    }

    /// Average change per 7 days over the whole history, two decimals
    pub fn average_weekly_change(&self) -> f64 {
        let span = self.day_span();
        if self.measurements.len() < 2 || span <= 0 {
            return 0.0;
        }
        round_to(self.raw_total_change() / span as f64 * 7.0, 2)
    }

    /// How far along the way from start to goal weight, 0-100, one decimal
    pub fn goal_progress_percentage(&self) -> f64 {
        let Some(goal) = self.goal_weight else {
            return 0.0;
        };
        let start = self.start_weight();
        let current = self.current_weight();
        let goal = goal.kg();

        if start == current || goal == start {
            return 0.0;
        }

        let progress = (current - start) / (goal - start) * 100.0;
        round_to(progress.clamp(0.0, 100.0), 1)
    }

    /// Calendar days between the first and last measurement
    pub fn day_span(&self) -> i64 {
        match (self.measurements.first(), self.measurements.last()) {
            (Some(first), Some(last)) => (last.date - first.date).num_days(),
            _ => 0,
        }
    }

    /// Most recent wellness check-in
    pub fn latest_wellness(&self) -> Option<&WellnessEntry> {
        self.wellness_entries.first()
    }

    fn raw_total_change(&self) -> f64 {
        self.current_weight() - self.start_weight()
    }
}
