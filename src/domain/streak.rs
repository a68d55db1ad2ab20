/// Daily check-in streak tracking
///
/// This module defines the StreakState struct that holds the user's
/// check-in streak counters, and the day-gap state machine that advances it.
/// It also carries the milestone and celebration tables shown by the
/// streak view.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Streak counters for the daily check-in
///
/// `longest_streak >= current_streak` holds after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive days checked in, ending at `last_entry_date`
    #[serde(default)]
    pub current_streak: u32,
    /// Best streak ever achieved
    #[serde(default)]
    pub longest_streak: u32,
    /// Day of the most recent check-in (None if never checked in)
    #[serde(default)]
    pub last_entry_date: Option<NaiveDate>,
}

/// What a check-in did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// First check-in ever
    Started,
    /// Checked in the day after the previous check-in
    Extended,
    /// Already checked in today; nothing changed
    AlreadyCheckedIn,
    /// More than one day since the previous check-in; streak restarts at 1
    Reset,
    /// The previous check-in is dated after today; nothing changed
    ClockSkew,
}

impl StreakTransition {
    /// Whether the transition modified the streak state
    pub fn changed_state(&self) -> bool {
        matches!(self, Self::Started | Self::Extended | Self::Reset)
    }
}

impl StreakState {
    /// Create an empty streak (no history)
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a check-in on `today`
    ///
    /// Transitions are driven only by the calendar-day gap between `today`
    /// and the last check-in.
    pub fn check_in(&mut self, today: NaiveDate) -> StreakTransition {
        let Some(last) = self.last_entry_date else {
            self.current_streak = 1;
            self.longest_streak = 1;
            self.last_entry_date = Some(today);
            return StreakTransition::Started;
        };

        match (today - last).num_days() {
            0 => StreakTransition::AlreadyCheckedIn,
            1 => {
                self.current_streak += 1;
                self.longest_streak = self.longest_streak.max(self.current_streak);
                self.last_entry_date = Some(today);
                StreakTransition::Extended
            }
            gap if gap > 1 => {
                self.current_streak = 1;
                // A persisted state with longest 0 would otherwise break the invariant
                self.longest_streak = self.longest_streak.max(1);
                self.last_entry_date = Some(today);
                StreakTransition::Reset
            }
            _ => StreakTransition::ClockSkew,
        }
    }

    /// Whether the streak is still alive on `today` (checked in today or yesterday)
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        match self.last_entry_date {
            None => false,
            Some(last) => {
                let days_since = (today - last).num_days();
                (0..=1).contains(&days_since)
            }
        }
    }

    /// Whether the user still needs to check in on `today`
    pub fn needs_check_in(&self, today: NaiveDate) -> bool {
        self.last_entry_date != Some(today)
    }

    /// Milestones reached so far, judged by the longest streak
    pub fn milestones(&self) -> Vec<MilestoneStatus> {
        MILESTONES
            .iter()
            .map(|m| MilestoneStatus {
                days: m.days,
                label: m.label,
                achieved: self.longest_streak >= m.days,
            })
            .collect()
    }

    /// The next milestone not yet reached by the longest streak
    pub fn next_milestone(&self) -> Option<&'static Milestone> {
        MILESTONES.iter().find(|m| self.longest_streak < m.days)
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Check in today to begin.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current_streak),
            30..=99 => format!("Incredible! {} days of consistency.", self.current_streak),
            _ => format!("Legendary! {} days of unwavering commitment.", self.current_streak),
        }
    }
}

/// A streak length worth a badge in the streak view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub days: u32,
    pub label: &'static str,
}

pub const MILESTONES: [Milestone; 6] = [
    Milestone { days: 7, label: "1 Week" },
    Milestone { days: 14, label: "2 Weeks" },
    Milestone { days: 30, label: "1 Month" },
    Milestone { days: 60, label: "2 Months" },
    Milestone { days: 90, label: "3 Months" },
    Milestone { days: 180, label: "6 Months" },
];

/// A milestone together with whether it has been achieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneStatus {
    pub days: u32,
    pub label: &'static str,
    pub achieved: bool,
}

/// Streak lengths that trigger a celebration on check-in
const CELEBRATIONS: [(u32, &str); 8] = [
    (7, "🎉 Amazing! 7 days strong!"),
    (14, "🔥 Two weeks! You're unstoppable!"),
    (21, "⭐ 3 weeks! You've built a habit!"),
    (30, "🏆 One month milestone! Incredible!"),
    (60, "💪 60 days! You're a champion!"),
    (90, "🌟 90 days! Elite level commitment!"),
    (180, "🎯 Half a year! Absolutely legendary!"),
    (365, "👑 ONE YEAR! You're an inspiration!"),
];

/// Whether reaching `streak` days deserves a celebration
pub fn should_celebrate(streak: u32) -> bool {
    CELEBRATIONS.iter().any(|(days, _)| *days == streak)
}

/// Celebration text for a streak length
pub fn celebration_message(streak: u32) -> String {
    CELEBRATIONS
        .iter()
        .find(|(days, _)| *days == streak)
        .map(|(_, msg)| msg.to_string())
        .unwrap_or_else(|| format!("🎊 {} days! Keep going!", streak))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(n)
    }

    #[test]
    fn test_new_streak() {
        let streak = StreakState::new();
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 0);
        assert_eq!(streak.last_entry_date, None);
        assert!(!streak.is_active_on(day(0)));
    }

    #[test]
    fn test_three_consecutive_days() {
        let mut streak = StreakState::new();
        assert_eq!(streak.check_in(day(0)), StreakTransition::Started);
        assert_eq!(streak.check_in(day(1)), StreakTransition::Extended);
        assert_eq!(streak.check_in(day(2)), StreakTransition::Extended);

        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.last_entry_date, Some(day(2)));
    }

    #[test]
    fn test_same_day_check_in_is_noop() {
        let mut streak = StreakState::new();
        streak.check_in(day(0));
        let before = streak.clone();

        assert_eq!(streak.check_in(day(0)), StreakTransition::AlreadyCheckedIn);
        assert_eq!(streak, before);
    }

    #[test]
    fn test_gap_resets_current_but_keeps_longest() {
        let mut streak = StreakState::new();
        for n in 0..4 {
            streak.check_in(day(n));
        }
        assert_eq!(streak.current_streak, 4);

        assert_eq!(streak.check_in(day(3 + 5)), StreakTransition::Reset);
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 4);
        assert_eq!(streak.last_entry_date, Some(day(8)));
    }

    #[test]
    fn test_backwards_clock_is_ignored() {
        let mut streak = StreakState::new();
        streak.check_in(day(5));
        let before = streak.clone();

        assert_eq!(streak.check_in(day(2)), StreakTransition::ClockSkew);
        assert_eq!(streak, before);
    }

    #[test]
    fn test_milestones_follow_longest_streak() {
        let streak = StreakState {
            current_streak: 2,
            longest_streak: 30,
            last_entry_date: Some(day(0)),
        };
        let achieved: Vec<u32> = streak
            .milestones()
            .into_iter()
            .filter(|m| m.achieved)
            .map(|m| m.days)
            .collect();

        assert_eq!(achieved, vec![7, 14, 30]);
        assert_eq!(streak.next_milestone().map(|m| m.days), Some(60));
    }

    #[test]
    fn test_celebrations() {
        assert!(should_celebrate(21));
        assert!(!should_celebrate(22));
        assert_eq!(celebration_message(7), "🎉 Amazing! 7 days strong!");
        assert_eq!(celebration_message(3), "🎊 3 days! Keep going!");
    }

    #[test]
    fn test_motivational_messages() {
        let mut streak = StreakState::new();
        assert!(streak.motivational_message().contains("Ready to start"));

        streak.current_streak = 1;
        assert!(streak.motivational_message().contains("Great start"));

        streak.current_streak = 10;
        assert!(streak.motivational_message().contains("10 days strong"));
    }
}
