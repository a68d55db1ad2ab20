/// Tool for the analytics view
///
/// This module implements the analytics_report MCP tool: weekly, monthly
/// and average change, the week-by-week breakdown and insight messages.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{AnalyticsEngine, AnalyticsReport, Trend};
use crate::tools::{signed, ToolError};
use crate::tracker::Tracker;

/// Response from the analytics report
#[derive(Debug, Serialize)]
pub struct AnalyticsReportResponse {
    pub report: AnalyticsReport,
    pub insights: Vec<String>,
    pub message: String,
}

/// Build the analytics view
pub fn analytics_report(tracker: &Tracker, today: NaiveDate) -> Result<AnalyticsReportResponse, ToolError> {
    let engine = AnalyticsEngine::new();
    let report = engine.analytics_report(tracker.state());
    let insights = engine.generate_insights(tracker.state(), today);

    let average_note = match Trend::of(report.average_weekly_change) {
        Trend::Down => "Great progress!",
        _ => "Keep pushing!",
    };

    let mut sections = vec![format!(
        "📊 **Analytics**\n- Weekly change: {} kg\n- Monthly change: {} kg\n- Average weekly change: {:.2} kg/week ({})",
        signed(report.weekly_change, 1),
        signed(report.monthly_change, 1),
        report.average_weekly_change,
        average_note
    )];

    if !report.weekly_breakdown.is_empty() {
        let weeks = report
            .weekly_breakdown
            .iter()
            .map(|w| {
                let arrow = match w.trend {
                    Trend::Down => "📉",
                    Trend::Up => "📈",
                    Trend::Flat => "➖",
                };
                format!("{} {} ({} to {}): {} kg", arrow, w.label, w.start_date, w.end_date, signed(w.change, 1))
            })
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("📅 **Weekly breakdown**\n{}", weeks));
    }

    if !insights.is_empty() {
        sections.push(format!(
            "💡 **Insights**\n{}",
            insights.iter().map(|i| format!("- {}", i)).collect::<Vec<_>>().join("\n")
        ));
    }

    Ok(AnalyticsReportResponse {
        report,
        insights,
        message: sections.join("\n\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::{TrackerState, Weight};

    #[test]
    fn test_report_includes_breakdown_and_insights() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut state = TrackerState::new();
        for i in 0..8 {
            state.add_measurement(start + Duration::days(i), Weight::new(85.0 - i as f64 * 0.2).unwrap());
        }
        let tracker = Tracker::new(state);

        let response = analytics_report(&tracker, start + Duration::days(8)).unwrap();
        assert_eq!(response.report.weekly_breakdown.len(), 2);
        assert_eq!(response.report.weekly_change, -1.4);
        assert!(response.message.contains("Week 1"));
        assert!(response.message.contains("Great progress!"));
        assert!(!response.insights.is_empty());
    }

    #[test]
    fn test_report_on_empty_tracker() {
        let tracker = Tracker::new(TrackerState::new());
        let response = analytics_report(&tracker, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        assert!(response.report.weekly_breakdown.is_empty());
        assert!(response.message.contains("Weekly change: 0 kg"));
    }
}
