mod support;

use chrono::NaiveDate;
use serde_json::Value;

use support::{Route, StubServer};
use worktracker::models::{ActivityLogRequest, ApiSettings, EndReason, SessionEventRequest, SessionEventType};
use worktracker::services::api_client::{ApiClient, RemoteError};

const SUMMARY: &str = "/api/activity/summary";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn client_for(server: &StubServer) -> ApiClient {
    ApiClient::new(&server.api_settings()).unwrap()
}

#[tokio::test]
async fn summary_request_carries_date_and_offset() {
    let server = StubServer::start(vec![Route::get(SUMMARY, 200, r#"[{"username":"parth","isActive":true}]"#)]).await;
    let client = client_for(&server);

    let members = client.get_summary(day()).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].username, "parth");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert!(requests[0].target.starts_with(SUMMARY));
    assert!(requests[0].target.contains("date=2026-10-19"));
    assert!(requests[0].target.contains("tzOffsetMinutes=330"));
}

#[tokio::test]
async fn envelope_payload_is_unwrapped() {
    let server = StubServer::start(vec![Route::get(
        SUMMARY,
        200,
        r#"{"success":true,"message":"ok","data":[{"username":"a"},{"username":"b"}]}"#,
    )])
    .await;
    let members = client_for(&server).get_summary(day()).await.unwrap();
    let names: Vec<&str> = members.iter().map(|m| m.username.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn server_error_uses_body_message() {
    let server = StubServer::start(vec![Route::get(SUMMARY, 500, r#"{"message":"db down"}"#)]).await;
    let err = client_for(&server).get_summary(day()).await.unwrap_err();
    assert_eq!(err.to_string(), "db down");
    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, RemoteError::Http { .. }));
}

#[tokio::test]
async fn not_found_without_message_uses_fallback() {
    let server = StubServer::start(vec![Route::get(SUMMARY, 404, "")]).await;
    let err = client_for(&server).get_summary(day()).await.unwrap_err();
    assert_eq!(err.to_string(), "An error occurred");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unsuccessful_envelope_is_logical_failure() {
    let server = StubServer::start(vec![Route::get(SUMMARY, 200, r#"{"success":false,"message":"no data"}"#)]).await;
    let err = client_for(&server).get_summary(day()).await.unwrap_err();
    assert_eq!(err.to_string(), "no data");
    assert_eq!(err.status(), None);
    assert!(matches!(err, RemoteError::Logical { .. }));
}

#[tokio::test]
async fn member_name_is_path_encoded() {
    let server = StubServer::start(vec![Route::get(
        "/api/activity/dashboard/first%20last",
        200,
        r#"{"username":"first last","totalActiveMinutes":12}"#,
    )])
    .await;
    let dashboard = client_for(&server).get_dashboard("first last", day()).await.unwrap();
    assert_eq!(dashboard.username, "first last");
    assert_eq!(dashboard.hourly_slots().len(), 24);
}

#[tokio::test]
async fn log_activity_posts_camel_case_body() {
    let server = StubServer::start(vec![Route::post("/api/activity", 200, r#"{"success":true,"data":{"id":7}}"#)]).await;
    let entry = ActivityLogRequest::new("parth", "Code").with_window_title("main.rs");

    let response = client_for(&server).log_activity(&entry).await.unwrap();
    assert_eq!(response["id"], 7);

    let requests = server.requests();
    assert_eq!(requests[0].method, "POST");
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["username"], "parth");
    assert_eq!(body["applicationName"], "Code");
    assert_eq!(body["windowTitle"], "main.rs");
}

#[tokio::test]
async fn session_endpoints_hit_sessions_base() {
    let server = StubServer::start(vec![
        Route::post("/api/sessions", 200, r#"{"success":true,"data":null}"#),
        Route::post("/api/sessions/heartbeat", 200, r#"{"success":true,"data":null}"#),
        Route::post("/api/sessions/logout", 200, r#"{"success":true,"data":null}"#),
        Route::get("/api/sessions/active", 200, r#"[{"username":"parth"}]"#),
    ])
    .await;
    let client = client_for(&server);

    let event = SessionEventRequest {
        username: "parth".to_string(),
        application_name: "Slack".to_string(),
        process_name: Some("slack.exe".to_string()),
        event_type: SessionEventType::End,
        end_reason: Some(EndReason::Killed),
    };
    client.send_session_event(&event).await.unwrap();
    client.send_heartbeat("parth", "Slack").await.unwrap();
    client.logout("parth").await.unwrap();
    let active = client.get_active_sessions().await.unwrap();
    assert_eq!(active[0]["username"], "parth");

    let requests = server.requests();
    let event_body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(event_body["eventType"], "end");
    assert_eq!(event_body["endReason"], "killed");
    let heartbeat_body: Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(heartbeat_body["applicationName"], "Slack");
    assert_eq!(requests[2].target, "/api/sessions/logout");
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let settings = ApiSettings {
        base_url: format!("http://127.0.0.1:{}/api", port),
        request_timeout_secs: 2,
        tz_offset_minutes: Some(0),
    };
    let err = ApiClient::new(&settings).unwrap().get_summary(day()).await.unwrap_err();
    assert!(matches!(err, RemoteError::Network { .. }));
    assert!(err.to_string().starts_with("Failed to connect to server"));
}

#[tokio::test]
async fn resources_request_has_no_date_query() {
    let server = StubServer::start(vec![Route::get(
        "/api/activity/resources/parth",
        200,
        r#"{"success":true,"message":"ok","data":{"cpu":12.5,"memory":40}}"#,
    )])
    .await;
    let resources = client_for(&server).get_resources("parth").await.unwrap();
    assert_eq!(resources["cpu"], 12.5);
    assert_eq!(resources["memory"], 40);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].target, "/api/activity/resources/parth");
}

#[tokio::test]
async fn session_members_are_unwrapped() {
    let server = StubServer::start(vec![Route::get(
        "/api/sessions/members",
        200,
        r#"{"success":true,"data":["parth","yash"]}"#,
    )])
    .await;
    let members = client_for(&server).get_session_members().await.unwrap();
    assert_eq!(members, serde_json::json!(["parth", "yash"]));
    assert_eq!(server.requests()[0].target, "/api/sessions/members");
}
