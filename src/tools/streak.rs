/// Tools for the streak view
///
/// This module implements the streak_check_in and streak_status MCP tools.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{AnalyticsEngine, StreakReport};
use crate::domain::{celebration_message, should_celebrate, StreakTransition};
use crate::tools::ToolError;
use crate::tracker::Tracker;

/// Response from checking in
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub success: bool,
    pub transition: StreakTransition,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub celebrate: bool,
    pub message: String,
}

/// Check in for today
pub fn check_in(tracker: &mut Tracker, today: NaiveDate) -> Result<CheckInResponse, ToolError> {
    let transition = tracker.update_streak_on(today)?;
    let streak = tracker.state().streak();
    let current = streak.current_streak;

    let celebrate = transition == StreakTransition::Extended && should_celebrate(current);

    let mut message = match transition {
        StreakTransition::Started => "🔥 Streak started! Day 1.".to_string(),
        StreakTransition::Extended => format!("🔥 Checked in! Current streak: {} days", current),
        StreakTransition::AlreadyCheckedIn => {
            format!("Already checked in today. Current streak: {} day{}", current, plural(current))
        }
        StreakTransition::Reset => format!(
            "Streak restarted at 1 day. Your best is still {} days.",
            streak.longest_streak
        ),
        StreakTransition::ClockSkew => format!(
            "Your last check-in is dated after today; nothing changed. Current streak: {} day{}",
            current,
            plural(current)
        ),
    };
    if celebrate {
        message.push('\n');
        message.push_str(&celebration_message(current));
    }

    Ok(CheckInResponse {
        success: transition.changed_state(),
        transition,
        current_streak: current,
        longest_streak: streak.longest_streak,
        celebrate,
        message,
    })
}

/// Response from the streak status tool
#[derive(Debug, Serialize)]
pub struct StreakStatusResponse {
    pub report: StreakReport,
    pub message: String,
}

/// Current and best streak with milestone badges
pub fn streak_status(tracker: &Tracker, today: NaiveDate) -> Result<StreakStatusResponse, ToolError> {
    let report = AnalyticsEngine::new().streak_report(tracker.state(), today);

    let last = report
        .last_entry_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Not yet".to_string());
    let badges = report
        .milestones
        .iter()
        .map(|m| format!("{} {} ({} days)", if m.achieved { "✅" } else { "⬜" }, m.label, m.days))
        .collect::<Vec<_>>()
        .join("\n");
    let next = match tracker.state().streak().next_milestone() {
        Some(m) => format!("\nNext up: {} ({} more days)", m.label, m.days - report.longest_streak),
        None => "\nEvery milestone unlocked!".to_string(),
    };

    let message = format!(
        "🔥 **Streak**: {} day{} (best {})\nLast check-in: {}{}\n{}\n\n🏅 **Milestones**\n{}{}",
        report.current_streak,
        plural(report.current_streak),
        report.longest_streak,
        last,
        if report.checked_in_today { " ✓" } else { "" },
        report.message,
        badges,
        next
    );

    Ok(StreakStatusResponse { report, message })
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
