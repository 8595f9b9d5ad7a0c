//! End-to-end tests against a stub sentiment API served with axum.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sentiment_dashboard::panels::HealthStatus;
use sentiment_dashboard::{
    ApiClientConfig, DashboardError, DashboardSession, FetchError, RenderOutcome,
    SentimentApiClient, StalenessPolicy,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
struct StubState {
    hits: Arc<AtomicUsize>,
    fail_trends: Arc<AtomicBool>,
}

async fn health(State(state): State<StubState>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"status": "healthy", "timestamp": "2024-01-01T00:00:00"}))
}

async fn analyze(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"text": body["text"], "sentiment": "positive", "method": "textblob"}))
}

async fn twitter(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "keyword": params.get("keyword"),
        "statistics": {
            "positive_percentage": 50.0,
            "negative_percentage": 25.0,
            "neutral_percentage": 25.0,
            "total_tweets": params.get("count").and_then(|c| c.parse::<u64>().ok())
        },
        "tweets": [{"text": "love it", "user": "user_0", "sentiment": "positive"}]
    }))
}

async fn trends(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    if state.fail_trends.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "boom"})),
        )
            .into_response();
    }

    let keyword = params.get("keyword").cloned().unwrap_or_default();
    Json(json!({
        "current_sentiment": {"positive": 3, "neutral": 1},
        "hourly_sentiment": [
            {"hour": keyword, "positive": 3, "negative": 1, "neutral": 2},
            {"hour": format!("hit-{}", n), "positive": 5, "negative": 0, "neutral": 1}
        ]
    }))
    .into_response()
}

async fn batch(State(state): State<StubState>, Json(body): Json<Value>) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let results: Vec<Value> = body["texts"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|t| json!({"text": t, "sentiment": "neutral"}))
        .collect();
    Json(json!({
        "statistics": {
            "positive_percentage": 33.333,
            "negative_percentage": 33.333,
            "neutral_percentage": 33.334
        },
        "results": results
    }))
}

async fn not_json() -> &'static str {
    "<html>oops</html>"
}

async fn spawn_stub() -> (String, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze/sentiment", post(analyze))
        .route("/api/twitter/sentiment", get(twitter))
        .route("/api/twitter/trends", get(trends))
        .route("/api/analyze/batch", post(batch))
        .route("/api/not-json", get(not_json))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), state)
}

fn client(base_url: &str) -> SentimentApiClient {
    SentimentApiClient::new(ApiClientConfig {
        base_url: base_url.to_string(),
        request_timeout_ms: Some(5000),
    })
    .unwrap()
}

fn session(base_url: &str, policy: StalenessPolicy) -> DashboardSession {
    DashboardSession::with_client(client(base_url), policy, Duration::from_secs(60), 100)
}

#[tokio::test]
async fn test_health_check() {
    let (url, _) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::default());

    assert_eq!(session.check_health().await, HealthStatus::Healthy);
    assert_eq!(session.panels().await.health, HealthStatus::Healthy);
}

#[tokio::test]
async fn test_trends_render_chart_and_panel() {
    let (url, _) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::default());

    let outcome = session.load_trends("rust & c#").await.unwrap();
    assert_eq!(outcome, RenderOutcome::Applied(1));

    let series = session.chart().snapshot().await;
    assert_eq!(series.labels(), ["rust & c#", "hit-0"]);
    assert_eq!(series.positive(), [3, 5]);
    assert_eq!(series.negative(), [1, 0]);
    assert_eq!(series.neutral(), [2, 1]);

    let panel = session.panels().await.trends.content.unwrap();
    assert_eq!(panel.current[0].value, "3");
    assert_eq!(panel.current[1].value, "0");
    assert_eq!(panel.hourly[0].total, 6);
}

#[tokio::test]
async fn test_status_error_keeps_chart() {
    let (url, state) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::default());

    session.load_trends("rust").await.unwrap();
    let shown = session.chart().snapshot().await;

    state.fail_trends.store(true, Ordering::SeqCst);
    let err = session.load_trends("rust").await.unwrap_err();
    match err {
        DashboardError::Fetch(e) => assert_eq!(e.status(), Some(500)),
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(session.chart().snapshot().await, shown);
    assert_eq!(
        session.panels().await.trends.error(),
        Some("Failed to load trends. Please try again.")
    );
}

#[tokio::test]
async fn test_empty_batch_sends_nothing() {
    let (url, state) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::default());

    let err = session.analyze_batch("\n  \n\n").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(state.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_batch_results() {
    let (url, _) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::default());

    let view = session.analyze_batch("good\n\nbad\n").await.unwrap();
    assert_eq!(view.results.len(), 2);
    assert_eq!(view.results[1].text, "bad");
    let values: Vec<&str> = view.cards.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["33.3%", "33.3%", "33.3%"]);
}

#[tokio::test]
async fn test_text_and_twitter() {
    let (url, _) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::default());

    let text = session.analyze_text("  I love this  ").await.unwrap();
    assert_eq!(text.text, "I love this");
    assert_eq!(text.method, "textblob");

    let twitter = session.analyze_twitter("rust", Some(10)).await.unwrap();
    assert_eq!(twitter.summary, "Analyzed 10 tweets for \"rust\"");
    assert_eq!(twitter.cards[0].value, "50.0%");
    assert_eq!(twitter.tweets[0].user, "user_0");
}

#[tokio::test]
async fn test_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}/api", addr));
    let err = client.trends("rust").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_decode_error() {
    let (url, _) = spawn_stub().await;
    let err = client(&url)
        .fetch_json(reqwest::Method::GET, "/not-json", &[], None::<&()>)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_auto_refresh_redraws() {
    let (url, state) = spawn_stub().await;
    let session = session(&url, StalenessPolicy::LatestIssued);
    let mut changes = session.coordinator().subscribe();

    session
        .start_auto_refresh("rust", Some(Duration::from_millis(50)))
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), changes.changed())
        .await
        .expect("no refresh within timeout")
        .unwrap();
    session.stop_auto_refresh();

    assert!(state.hits.load(Ordering::SeqCst) >= 1);
    assert_eq!(session.chart().snapshot().await.labels()[0], "rust");
}
