/// Unit tests for the tracking store through the public API
use chrono::{Duration, NaiveDate};
use fitness_tracker_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn kg(value: f64) -> Weight {
        Weight::new(value).unwrap()
    }

    #[test]
    fn test_first_measurement_sets_start() {
        let mut state = TrackerState::new();
        state.add_measurement(day("2024-01-01"), kg(80.0));

        assert_eq!(state.current_weight(), 80.0);
        assert_eq!(state.start_weight(), 80.0);
        assert_eq!(state.total_change(), 0.0);
    }

    #[test]
    fn test_measurements_stay_sorted() {
        let mut state = TrackerState::new();
        for (date, weight) in [
            ("2024-01-05", 79.0),
            ("2024-01-01", 81.0),
            ("2024-01-03", 80.0),
            ("2024-01-02", 80.5),
        ] {
            state.add_measurement(day(date), kg(weight));
            let dates: Vec<NaiveDate> = state.measurements().iter().map(|m| m.date).collect();
            let mut sorted = dates.clone();
            sorted.sort();
            assert_eq!(dates, sorted);
        }
        assert_eq!(state.current_weight(), 79.0);
    }

    #[test]
    fn test_three_day_streak_then_gap() {
        let mut state = TrackerState::new();
        let start = day("2024-03-01");
        for n in 0..3 {
            state.update_streak_on(start + Duration::days(n));
        }
        assert_eq!(state.streak().current_streak, 3);
        assert_eq!(state.streak().longest_streak, 3);

        state.update_streak_on(start + Duration::days(2 + 5));
        assert_eq!(state.streak().current_streak, 1);
        assert_eq!(state.streak().longest_streak, 3);
    }

    #[test]
    fn test_average_weekly_change_over_ten_days() {
        let mut state = TrackerState::new();
        state.add_measurement(day("2024-01-01"), kg(80.0));
        state.add_measurement(day("2024-01-11"), kg(79.0));
        assert_eq!(state.average_weekly_change(), -0.70);
    }

    #[test]
    fn test_goal_progress_clamps() {
        let mut state = TrackerState::new();
        state.set_starting_weight(Some(kg(80.0)));
        state.set_goal(Some(kg(70.0)), Some(day("2024-12-31")));

        state.add_measurement(day("2024-01-01"), kg(75.0));
        assert_eq!(state.goal_progress_percentage(), 50.0);

        state.add_measurement(day("2024-01-02"), kg(72.0));
        assert_eq!(state.goal_progress_percentage(), 80.0);

        state.add_measurement(day("2024-01-03"), kg(68.0));
        assert_eq!(state.goal_progress_percentage(), 100.0);
    }

    #[test]
    fn test_empty_store_has_zero_percentages() {
        let state = TrackerState::new();
        assert_eq!(state.change_percentage(), 0.0);
        assert_eq!(state.goal_progress_percentage(), 0.0);
        assert_eq!(state.weekly_change(), 0.0);
    }

    #[test]
    fn test_delete_by_date_keeps_order() {
        let mut state = TrackerState::new();
        state.add_measurement(day("2024-01-01"), kg(80.0));
        state.add_measurement(day("2024-01-02"), kg(79.8));
        state.add_measurement(day("2024-01-02"), kg(79.6));
        state.add_measurement(day("2024-01-03"), kg(79.4));

        assert_eq!(state.delete_measurement(day("2024-01-02")), 2);
        let left: Vec<f64> = state.measurements().iter().map(|m| m.kg()).collect();
        assert_eq!(left, vec![80.0, 79.4]);
    }

    #[test]
    fn test_weight_rejects_non_finite_and_non_positive() {
        assert!(Weight::new(f64::NAN).is_err());
        assert!(Weight::new(f64::INFINITY).is_err());
        assert!(Weight::new(0.0).is_err());
        assert!(Weight::new(-2.0).is_err());
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let state: TrackerState = serde_json::from_str(
            r#"{"theme":"light","measurements":[{"date":"2024-01-01","weight":80.0}]}"#,
        )
        .unwrap();

        assert_eq!(state.theme(), Theme::Light);
        assert_eq!(state.active_view(), ActiveView::WeightTracker);
        assert_eq!(state.measurements().len(), 1);
        assert!(state.wellness_entries().is_empty());
        assert_eq!(state.streak().current_streak, 0);
    }

    #[test]
    fn test_mood_and_view_parsing() {
        assert_eq!("Great".parse::<Mood>().unwrap(), Mood::Great);
        assert!("meh".parse::<Mood>().is_err());
        assert_eq!("wellness".parse::<ActiveView>().unwrap(), ActiveView::Wellness);
        assert!("settings".parse::<ActiveView>().is_err());
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = FitnessTrackerServer::new(temp_file.path().to_path_buf())
            .expect("Failed to create server");
        assert_eq!(server.tracker().observer_count(), 1);
        assert_eq!(*server.tracker().state(), TrackerState::default());
    }
}
