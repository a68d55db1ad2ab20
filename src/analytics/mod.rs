/// Analytics engine for building reports from tracker state
///
/// The store answers single-number questions (current weight, weekly
/// change, goal progress). This module groups those answers into the
/// reports each view shows, and adds the few calculations that span the
/// whole history: the week-by-week breakdown, wellness averages and the
/// insight messages.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    round_to, GoalDirection, Measurement, MilestoneStatus, Mood, TrackerState, WellnessEntry,
};

/// Number of consecutive measurements grouped into one breakdown bucket
const BREAKDOWN_CHUNK: usize = 7;

/// Direction of a weight change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Down,
    Up,
    Flat,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change < 0.0 {
            Trend::Down
        } else if change > 0.0 {
            Trend::Up
        } else {
            Trend::Flat
        }
    }
}

/// One bar of the weekly breakdown chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekChange {
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub change: f64,
    pub trend: Trend,
}

/// Headline numbers for the weight view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSummary {
    pub entries: usize,
    pub current_weight: f64,
    pub start_weight: f64,
    pub total_change: f64,
    pub change_percentage: f64,
    pub goal_weight: Option<f64>,
    pub goal_date: Option<NaiveDate>,
    pub goal_progress: f64,
    pub goal_direction: Option<GoalDirection>,
}

/// Everything the analytics view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub weekly_change: f64,
    pub monthly_change: f64,
    pub average_weekly_change: f64,
    pub day_span: i64,
    pub weekly_breakdown: Vec<WeekChange>,
}

/// Streak counters plus milestone badges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakReport {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_entry_date: Option<NaiveDate>,
    pub checked_in_today: bool,
    pub milestones: Vec<MilestoneStatus>,
    pub message: String,
}

/// Averages over recent wellness check-ins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessSummary {
    pub entries: usize,
    pub average_energy: f64,
    pub average_stress: f64,
    pub average_motivation: f64,
    pub most_common_mood: Option<Mood>,
}

/// Split measurements into runs of seven and report each run's change
///
/// The last run may be shorter. Returns nothing with fewer than two
/// measurements.
pub fn weekly_breakdown(measurements: &[Measurement]) -> Vec<WeekChange> {
    if measurements.len() < 2 {
        return Vec::new();
    }

    measurements
        .chunks(BREAKDOWN_CHUNK)
        .enumerate()
        .filter_map(|(i, chunk)| {
            let (first, last) = (chunk.first()?, chunk.last()?);
            let change = round_to(last.kg() - first.kg(), 1);
            Some(WeekChange {
                label: format!("Week {}", i + 1),
                start_date: first.date,
                end_date: last.date,
                change,
                trend: Trend::of(change),
            })
        })
        .collect()
}

/// Averages over the newest `limit` wellness entries (all when `None`)
///
/// Entries are expected newest first, as the store keeps them.
pub fn wellness_summary(entries: &[WellnessEntry], limit: Option<usize>) -> WellnessSummary {
    let window = &entries[..limit.unwrap_or(entries.len()).min(entries.len())];
    if window.is_empty() {
        return WellnessSummary {
            entries: 0,
            average_energy: 0.0,
            average_stress: 0.0,
            average_motivation: 0.0,
            most_common_mood: None,
        };
    }

    let n = window.len() as f64;
    let avg = |f: fn(&WellnessEntry) -> u8| {
        round_to(window.iter().map(|e| f64::from(f(e))).sum::<f64>() / n, 1)
    };

    // Ties go to the more positive mood
    let most_common_mood = Mood::ALL
        .iter()
        .copied()
        .map(|mood| (mood, window.iter().filter(|e| e.mood == mood).count()))
        .filter(|(_, count)| *count > 0)
        .fold(None, |best: Option<(Mood, usize)>, (mood, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((mood, count)),
        })
        .map(|(mood, _)| mood);

    WellnessSummary {
        entries: window.len(),
        average_energy: avg(|e| e.energy.value()),
        average_stress: avg(|e| e.stress.value()),
        average_motivation: avg(|e| e.motivation.value()),
        most_common_mood,
    }
}

/// Analytics engine for processing tracker data
///
/// Stateless; it exists so reports are built in one place.
#[derive(Debug, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    pub fn weight_summary(&self, state: &TrackerState) -> WeightSummary {
        let goal = state.goal();
        let current = state.current_weight();
        let goal_direction = match goal.target_weight {
            Some(target) if current > 0.0 => Some(GoalDirection::between(current, target.kg())),
            _ => None,
        };

        WeightSummary {
            entries: state.measurements().len(),
            current_weight: current,
            start_weight: state.start_weight(),
            total_change: state.total_change(),
            change_percentage: state.change_percentage(),
            goal_weight: goal.target_weight.map(|w| w.kg()),
            goal_date: goal.target_date,
            goal_progress: state.goal_progress_percentage(),
            goal_direction,
        }
    }

    pub fn analytics_report(&self, state: &TrackerState) -> AnalyticsReport {
        AnalyticsReport {
            weekly_change: state.weekly_change(),
            monthly_change: state.monthly_change(),
            average_weekly_change: state.average_weekly_change(),
            day_span: state.day_span(),
            weekly_breakdown: weekly_breakdown(state.measurements()),
        }
    }

    pub fn streak_report(&self, state: &TrackerState, today: NaiveDate) -> StreakReport {
        let streak = state.streak();
        StreakReport {
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            last_entry_date: streak.last_entry_date,
            checked_in_today: !streak.needs_check_in(today),
            milestones: streak.milestones(),
            message: streak.motivational_message(),
        }
    }

    /// Generate short progress messages across weight, streak and wellness
    pub fn generate_insights(&self, state: &TrackerState, today: NaiveDate) -> Vec<String> {
        let mut insights = Vec::new();

        match state.measurements().len() {
            0 => insights.push("Log your first weight to start tracking progress.".to_string()),
            1 => insights.push("One measurement in. Log another to see your trend.".to_string()),
            _ => {
                let avg = state.average_weekly_change();
                match Trend::of(avg) {
                    Trend::Down => insights.push(format!(
                        "You're losing an average of {:.2} kg per week. Great progress!",
                        avg.abs()
                    )),
                    Trend::Up => insights.push(format!(
                        "You're gaining an average of {:.2} kg per week.",
                        avg
                    )),
                    Trend::Flat => insights.push("Your weight is holding steady.".to_string()),
                }
            }
        }

        // Goal progress against the empty-history sentinel weight is meaningless
        if state.goal().is_set() && !state.measurements().is_empty() {
            let progress = state.goal_progress_percentage();
            if progress >= 100.0 {
                insights.push("🏆 You've reached your goal weight!".to_string());
            } else {
                insights.push(format!("You're {:.1}% of the way to your goal.", progress));
            }
            if let Some(days) = state.goal().days_remaining(today) {
                if days < 0 && progress < 100.0 {
                    insights.push("Your goal date has passed. Consider setting a new one.".to_string());
                }
            }
        }

        let streak = state.streak();
        if streak.is_active_on(today) {
            if streak.needs_check_in(today) {
                insights.push(format!(
                    "Check in today to keep your {}-day streak alive!",
                    streak.current_streak
                ));
            }
        } else if streak.longest_streak > 0 {
            insights.push(format!(
                "Your best streak was {} days. Check in to start a new one.",
                streak.longest_streak
            ));
        }

        if let Some(latest) = state.latest_wellness() {
            if latest.stress.value() >= 8 {
                insights.push("Your last check-in showed high stress. Take some time to rest.".to_string());
            }
        }

        insights
    }
}
