use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use mindscreen_instruments::instruments::bdi2::Bdi2;
use mindscreen_server::router;
use mindscreen_server::state::{AppState, spawn_idle_sweep};
use mindscreen_session::event::PresentationMode;
use mindscreen_speech::BrowserSpeech;

fn state_with(mode: PresentationMode, narration: bool) -> AppState {
    AppState::new(Arc::new(Bdi2), Arc::new(BrowserSpeech), mode, narration)
}

fn app_with(mode: PresentationMode, narration: bool) -> Router {
    router(state_with(mode, narration))
}

fn app() -> Router {
    app_with(PresentationMode::AllAtOnce, false)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, body: Value) -> String {
    let (status, created) = send(app, json_request("POST", "/sessions", body)).await;
    assert_eq!(status, StatusCode::OK);
    created["id"].as_str().unwrap().to_string()
}

async fn event(app: &Router, id: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        json_request("POST", &format!("/sessions/{id}/events"), body),
    )
    .await
}

async fn intake(app: &Router, id: &str) {
    let (status, resp) = event(
        app,
        id,
        json!({"type": "submit_intake", "name": "Jane Doe", "age": "34", "assessment_date": "2024-03-02"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["view"]["phase"], "answering");
}

async fn answer_all(app: &Router, id: &str, ordinal: u8) {
    for position in 0..21 {
        let (status, _) = event(
            app,
            id,
            json!({"type": "select_answer", "position": position, "ordinal": ordinal}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, body) = send(&app(), empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn index_serves_html_client() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn instrument_lists_all_items() {
    let (status, body) = send(&app(), empty_request("GET", "/instrument")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "bdi2");
    assert_eq!(body["max_score"], 63);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 21);
    assert_eq!(items[0]["title"], "Sadness");
    assert_eq!(items[0]["options"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn new_session_starts_at_intake_with_configured_mode() {
    let app = app_with(PresentationMode::StepByStep, true);
    let (status, body) = send(&app, json_request("POST", "/sessions", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["phase"], "intake");
    assert_eq!(body["view"]["mode"], "step_by_step");
    assert_eq!(body["view"]["narration"], true);

    let (_, body) = send(
        &app,
        json_request("POST", "/sessions", json!({"mode": "all_at_once", "narration": false})),
    )
    .await;
    assert_eq!(body["view"]["mode"], "all_at_once");
    assert_eq!(body["view"]["narration"], false);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = app();
    let missing = "00000000-0000-0000-0000-000000000000";
    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{missing}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = event(&app, missing, json!({"type": "submit"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_intake_is_a_warning_and_keeps_phase() {
    let app = app();
    let id = create(&app, json!({})).await;

    let (status, body) = event(
        &app,
        &id,
        json!({"type": "submit_intake", "name": "  ", "age": "34"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["warning"], true);

    let (_, view) = send(&app, empty_request("GET", &format!("/sessions/{id}"))).await;
    assert_eq!(view["phase"], "intake");
}

#[tokio::test]
async fn incomplete_submit_is_rejected() {
    let app = app();
    let id = create(&app, json!({})).await;
    intake(&app, &id).await;

    let (status, _) = event(
        &app,
        &id,
        json!({"type": "select_answer", "position": 3, "ordinal": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = event(&app, &id, json!({"type": "submit"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("answer all questions"));

    let (_, view) = send(&app, empty_request("GET", &format!("/sessions/{id}"))).await;
    assert_eq!(view["phase"], "answering");
    assert_eq!(view["answered"], 1);
}

#[tokio::test]
async fn full_flow_scores_and_downloads_report() {
    let app = app();
    let id = create(&app, json!({})).await;
    intake(&app, &id).await;
    answer_all(&app, &id, 1).await;

    let (status, body) = event(&app, &id, json!({"type": "submit"})).await;
    assert_eq!(status, StatusCode::OK);
    let view = &body["view"];
    assert_eq!(view["phase"], "submitted");
    assert_eq!(view["outcome"]["score"]["total"], 21);
    assert_eq!(view["outcome"]["severity"], "moderate");
    assert_eq!(view["outcome"]["show_crisis_advisory"], true);
    assert_eq!(view["report_available"], true);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/sessions/{id}/report")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "application/pdf"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("bdi-ii-report_Jane_Doe_2024-03-02.pdf"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn report_before_submit_is_a_conflict() {
    let app = app();
    let id = create(&app, json!({})).await;
    intake(&app, &id).await;

    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{id}/report"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn crisis_answer_surfaces_advisory_at_low_score() {
    let app = app();
    let id = create(&app, json!({})).await;
    intake(&app, &id).await;
    answer_all(&app, &id, 0).await;

    let (_, body) = event(
        &app,
        &id,
        json!({"type": "select_answer", "position": 8, "ordinal": 1}),
    )
    .await;
    assert_eq!(body["view"]["crisis_flag"], true);

    let (_, body) = event(&app, &id, json!({"type": "submit"})).await;
    assert_eq!(body["view"]["outcome"]["severity"], "minimal");
    assert!(body["view"]["crisis_advisory"].is_string());
}

#[tokio::test]
async fn browser_narration_returns_utterances_once() {
    let app = app_with(PresentationMode::StepByStep, true);
    let id = create(&app, json!({})).await;

    let (_, body) = event(
        &app,
        &id,
        json!({"type": "submit_intake", "name": "Jane Doe", "age": "34"}),
    )
    .await;
    let speak = body["speak"].as_array().unwrap();
    assert_eq!(speak.len(), 1);
    assert!(speak[0].as_str().unwrap().starts_with("Question 1 of 21."));

    // Same question still current: nothing new to say.
    let (_, body) = event(
        &app,
        &id,
        json!({"type": "select_answer", "position": 0, "ordinal": 2}),
    )
    .await;
    assert!(body["speak"].as_array().unwrap().is_empty());

    let (_, body) = event(&app, &id, json!({"type": "next"})).await;
    assert!(
        body["speak"][0]
            .as_str()
            .unwrap()
            .starts_with("Question 2 of 21.")
    );
}

#[tokio::test]
async fn step_navigation_rules_are_enforced() {
    let app = app_with(PresentationMode::StepByStep, false);
    let id = create(&app, json!({})).await;
    intake(&app, &id).await;

    let (status, _) = event(&app, &id, json!({"type": "next"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = event(&app, &id, json!({"type": "back"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = event(
        &app,
        &id,
        json!({"type": "select_answer", "position": 5, "ordinal": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn take_again_and_start_over() {
    let app = app();
    let id = create(&app, json!({})).await;
    intake(&app, &id).await;
    answer_all(&app, &id, 2).await;
    event(&app, &id, json!({"type": "submit"})).await;

    let (status, body) = event(&app, &id, json!({"type": "take_again"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["phase"], "answering");
    assert_eq!(body["view"]["answered"], 0);
    assert_eq!(body["view"]["patient"]["name"], "Jane Doe");

    answer_all(&app, &id, 0).await;
    event(&app, &id, json!({"type": "submit"})).await;

    let (status, body) = event(&app, &id, json!({"type": "start_over"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["phase"], "intake");
    assert!(body["view"]["patient"].is_null());
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = app();
    let id = create(&app, json!({})).await;

    let (status, _) = send(&app, empty_request("DELETE", &format!("/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn abandoned_sessions_are_evicted_when_idle() {
    let state = state_with(PresentationMode::AllAtOnce, false);
    let app = router(state.clone());

    for _ in 0..50 {
        let id = create(&app, json!({})).await;
        intake(&app, &id).await;
    }
    assert_eq!(state.sessions.lock().await.len(), 50);

    let max_idle = Duration::from_secs(30 * 60);
    assert_eq!(state.evict_idle(Instant::now(), max_idle).await, 0);

    let later = Instant::now() + max_idle;
    assert_eq!(state.evict_idle(later, max_idle).await, 50);
    assert!(state.sessions.lock().await.is_empty());
}

#[tokio::test]
async fn activity_keeps_a_session_alive() {
    let state = state_with(PresentationMode::AllAtOnce, false);
    let app = router(state.clone());
    let max_idle = Duration::from_millis(200);

    let stale = create(&app, json!({})).await;
    let active = create(&app, json!({})).await;
    tokio::time::sleep(Duration::from_millis(250)).await;

    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{active}"))).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(state.evict_idle(Instant::now(), max_idle).await, 1);
    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{stale}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{active}"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn sweep_task_discards_idle_sessions() {
    let state = state_with(PresentationMode::AllAtOnce, false);
    let app = router(state.clone());
    let id = create(&app, json!({})).await;

    let sweep = spawn_idle_sweep(state.clone(), Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(2500)).await;
    sweep.abort();

    let (status, _) = send(&app, empty_request("GET", &format!("/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn index_page_releases_session_on_close() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("pagehide"));
    assert!(html.contains("keepalive: true"));
}

#[tokio::test]
async fn index_page_prefills_assessment_date() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains(r#"elements["assessment_date"].value = todayInput()"#));
}
