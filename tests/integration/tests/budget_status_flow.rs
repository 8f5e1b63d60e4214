//! End-to-end flow: real gateway router against a mocked tracker API.

use std::sync::Arc;

use girder_gateway::{build_budget_gateway_router, BudgetGatewayConfig, BudgetGatewayState};
use girder_metrics::{BudgetRuntimeConfig, BudgetStatusRuntime};
use girder_tracker::TrackerApiClient;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const EXPECTED_REPORT: &str = "# Construction Project Budget Summary\n\
     \n\
     ## Overall Budget\n\
     - Total Estimated Budget: $350.00\n\
     - Total Actual Cost Incurred: $320.00\n\
     - Remaining Budget: $30.00\n\
     - Budget Utilization: 91.4%\n\
     \n\
     ## Progress\n\
     - Total Tasks: 3\n\
     - Completed Tasks (with actual costs): 2\n\
     - Project Completion: 66.7%\n\
     \n\
     ## Overbudget Items\n\
     - task A: Estimated $100.00, Actual $120.00 ($20.00 over budget)\n\
     Total Amount Over Budget: $20.00\n";

async fn spawn_gateway(tracker_base: &str) -> String {
    let client = TrackerApiClient::new(tracker_base.to_string(), "token-test".to_string())
        .expect("tracker client");
    let runtime = BudgetStatusRuntime::new(
        client.clone(),
        BudgetRuntimeConfig {
            project_gid: "900".to_string(),
            estimated_field_name: "Estimated Cost".to_string(),
            actual_field_name: "Actual Cost".to_string(),
            status_task_name: "Project Status".to_string(),
        },
    );
    let state = Arc::new(BudgetGatewayState::new(
        runtime,
        client,
        BudgetGatewayConfig {
            bind: "127.0.0.1:0".to_string(),
            public_base_url: "https://girder.example".to_string(),
            recompute_on_heartbeat: false,
        },
    ));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let app = build_budget_gateway_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve gateway");
    });
    format!("http://{addr}")
}

fn task_detail_body(gid: &str, name: &str, estimated: f64, actual: Option<f64>) -> Value {
    json!({
        "data": {
            "gid": gid,
            "name": name,
            "custom_fields": [
                {"gid": "f-est", "name": "Estimated Cost", "number_value": estimated},
                {"gid": "f-act", "name": "Actual Cost", "number_value": actual}
            ]
        }
    })
}

fn mock_project_fixture(tracker: &MockServer) {
    tracker
        .mock(|when, then| {
            when.method(GET).path("/projects/900/custom_field_settings");
            then.status(200).json_body(json!({
                "data": [
                    {"custom_field": {"gid": "f-est", "name": "Estimated Cost"}},
                    {"custom_field": {"gid": "f-act", "name": "Actual Cost"}}
                ]
            }));
        });
    tracker
        .mock(|when, then| {
            when.method(GET).path("/projects/900/tasks");
            then.status(200).json_body(json!({
                "data": [
                    {"gid": "1", "name": "task A"},
                    {"gid": "2", "name": "task B"},
                    {"gid": "3", "name": "task C"},
                    {"gid": "9", "name": "Project Status"}
                ]
            }));
        });
    for (gid, name, estimated, actual) in [
        ("1", "task A", 100.0, Some(120.0)),
        ("2", "task B", 50.0, None),
        ("3", "task C", 200.0, Some(200.0)),
    ] {
        tracker
            .mock(|when, then| {
                when.method(GET).path(format!("/tasks/{gid}"));
                then.status(200)
                    .json_body(task_detail_body(gid, name, estimated, actual));
            });
    }
}

#[tokio::test]
async fn setup_then_webhook_publishes_identical_reports() {
    let tracker = MockServer::start();
    mock_project_fixture(&tracker);
    let update_mock = tracker
        .mock(|when, then| {
            when.method(PUT)
                .path("/tasks/9")
                .json_body(json!({"data": {"notes": EXPECTED_REPORT}}));
            then.status(200).json_body(json!({"data": {"gid": "9"}}));
        });
    let base = spawn_gateway(&tracker.base_url()).await;
    let http = reqwest::Client::new();

    let setup = http
        .get(format!("{base}/setup"))
        .send()
        .await
        .expect("setup response");
    assert_eq!(setup.status().as_u16(), 200);
    let setup_body: Value = setup.json().await.expect("setup body");
    assert_eq!(setup_body["status"], "success");
    assert!(setup_body["message"]
        .as_str()
        .expect("message")
        .contains("across 3 tasks"));

    let webhook = http
        .post(format!("{base}/webhook"))
        .json(&json!({
            "events": [{
                "action": "changed",
                "resource": {"gid": "1", "resource_type": "task"},
                "change": {"field": "custom_fields", "action": "changed"},
            }]
        }))
        .send()
        .await
        .expect("webhook response");
    assert_eq!(webhook.status().as_u16(), 200);
    let webhook_body: Value = webhook.json().await.expect("webhook body");
    assert_eq!(webhook_body["status"], "received");

    // Both runs overwrote the status task notes with byte-identical text;
    // the exact-body matcher would have rejected any drift.
    update_mock.assert_calls(2);
}

#[tokio::test]
async fn handshake_then_register_round_trip() {
    let tracker = MockServer::start();
    let register_mock = tracker
        .mock(|when, then| {
            when.method(POST).path("/webhooks").json_body(json!({
                "data": {
                    "resource": "900",
                    "target": "https://girder.example/webhook",
                }
            }));
            then.status(201).json_body(json!({"data": {"gid": "hook-1"}}));
        });
    let base = spawn_gateway(&tracker.base_url()).await;
    let http = reqwest::Client::new();

    let handshake = http
        .post(format!("{base}/webhook"))
        .header("X-Hook-Secret", "secret-77")
        .send()
        .await
        .expect("handshake response");
    assert_eq!(handshake.status().as_u16(), 200);
    assert_eq!(
        handshake
            .headers()
            .get("X-Hook-Secret")
            .and_then(|value| value.to_str().ok()),
        Some("secret-77")
    );

    let register = http
        .get(format!("{base}/register-webhook"))
        .send()
        .await
        .expect("register response");
    register_mock.assert_calls(1);
    assert_eq!(register.status().as_u16(), 200);
    let body: Value = register.json().await.expect("register body");
    assert_eq!(body["webhook_gid"], "hook-1");

    let health = http
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("health response");
    assert_eq!(health.status().as_u16(), 200);
}
