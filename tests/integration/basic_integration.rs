/// Integration tests: persistence across restarts and the MCP request flow
use chrono::{Duration, Utc};
use fitness_tracker_mcp::mcp::protocol::error_codes;
use fitness_tracker_mcp::mcp::McpServer;
use fitness_tracker_mcp::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn call_line(id: u64, name: &str, arguments: Value) -> String {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        })
        .to_string()
    }

    async fn call(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
        let response = server
            .handle_line(&call_line(id, name, arguments))
            .await
            .expect("tools/call always gets a response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let today = Utc::now().date_naive();

        {
            let mut server = FitnessTrackerServer::new(db_path.clone()).expect("Failed to create first server");
            let tracker = server.tracker_mut();
            tracker.add_measurement(today - Duration::days(10), Weight::new(80.0).unwrap()).unwrap();
            tracker.add_measurement(today, Weight::new(79.0).unwrap()).unwrap();
            tracker.set_goal(Some(Weight::new(75.0).unwrap()), Some(today + Duration::days(60))).unwrap();
            tracker.update_streak_on(today).unwrap();
            tracker.toggle_theme().unwrap();
        }

        let server = FitnessTrackerServer::new(db_path).expect("Failed to create second server");
        let state = server.tracker().state();
        assert_eq!(state.measurements().len(), 2);
        assert_eq!(state.current_weight(), 79.0);
        assert_eq!(state.average_weekly_change(), -0.70);
        assert_eq!(state.goal_progress_percentage(), 20.0);
        assert_eq!(state.streak().last_entry_date, Some(today));
        assert_eq!(state.theme(), Theme::Light);
    }

    #[test]
    fn test_corrupt_blob_starts_fresh() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let storage = SqliteStorage::new(db_path.clone()).expect("Failed to create storage");
        storage.save_blob(STATE_BLOB_NAME, "{\"measurements\": [oops").unwrap();
        drop(storage);

        let mut server = FitnessTrackerServer::new(db_path.clone()).expect("Failed to create server");
        assert_eq!(*server.tracker().state(), TrackerState::default());

        // The next mutation overwrites the corrupt payload
        server.tracker_mut().set_active_view(ActiveView::Streak).unwrap();
        let reader = SqliteStorage::new(db_path).unwrap();
        let saved = reader.load_state(STATE_BLOB_NAME).unwrap().unwrap();
        assert_eq!(saved.active_view(), ActiveView::Streak);
    }

    #[test]
    fn test_mcp_session_persists_tool_calls() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        tokio_test::block_on(async {
            let server = FitnessTrackerServer::new(db_path.clone()).expect("Failed to create server");
            let mut mcp = McpServer::new(server);

            let init = mcp
                .handle_line(r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{}}"#)
                .await
                .unwrap();
            let init = serde_json::to_value(init).unwrap();
            assert_eq!(init["result"]["serverInfo"]["name"], json!("Fitness Tracker MCP"));

            let list = mcp
                .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
                .await
                .unwrap();
            let list = serde_json::to_value(list).unwrap();
            assert_eq!(list["result"]["tools"].as_array().unwrap().len(), 12);

            let added = call(&mut mcp, 2, "weight_add", json!({ "weight": 82.5 })).await;
            assert_eq!(added["result"]["isError"], json!(false));

            let logged = call(
                &mut mcp,
                3,
                "wellness_log",
                json!({ "mood": "good", "energy": 7, "gratitude": "  " }),
            )
            .await;
            assert_eq!(logged["result"]["isError"], json!(false));

            let checked = call(&mut mcp, 4, "streak_check_in", json!({})).await;
            assert_eq!(checked["result"]["structuredContent"]["current_streak"], json!(1));

            let rejected = call(&mut mcp, 5, "wellness_log", json!({ "mood": "good", "stress": 12 })).await;
            assert_eq!(rejected["error"]["code"], json!(error_codes::VALIDATION_ERROR));

            let report = call(&mut mcp, 6, "analytics_report", json!({})).await;
            assert!(report["result"]["content"][0]["text"].as_str().unwrap().contains("Analytics"));
        });

        let reopened = FitnessTrackerServer::new(db_path).expect("Failed to reopen server");
        let state = reopened.tracker().state();
        assert_eq!(state.current_weight(), 82.5);
        assert_eq!(state.wellness_entries().len(), 1);
        assert_eq!(state.wellness_entries()[0].energy.value(), 7);
        assert!(state.wellness_entries()[0].gratitude.is_none());
        assert_eq!(state.streak().current_streak, 1);
    }

    #[tokio::test]
    async fn test_future_measurement_rejected_over_mcp() {
        let mut mcp = McpServer::new(FitnessTrackerServer::in_memory().unwrap());
        let later = (Utc::now().date_naive() + Duration::days(2)).to_string();

        let response = call(&mut mcp, 1, "weight_add", json!({ "weight": 80, "date": later })).await;
        assert_eq!(response["error"]["code"], json!(error_codes::VALIDATION_ERROR));
        assert!(mcp.fitness_tracker().tracker().state().measurements().is_empty());
    }
}
