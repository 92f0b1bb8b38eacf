//! Route tests against the in-process router.

use atlas_common::remote::weather::OPENWEATHER_ENDPOINT;
use atlas_common::remote::WeatherSettings;
use atlas_common::{Dispatcher, FakeJsonFetcher, FetchError, ScriptedRandom, DEFAULT_LOCATION};
use atlasd::server::{app, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router(fetcher: FakeJsonFetcher, script: Vec<i64>) -> Router {
    let dispatcher = Dispatcher::new(
        Arc::new(fetcher),
        Arc::new(ScriptedRandom::new(script)),
        WeatherSettings {
            api_key: "test-key".to_string(),
            ..WeatherSettings::default()
        },
        DEFAULT_LOCATION,
    );
    app(AppState::new(dispatcher))
}

fn london_weather() -> FakeJsonFetcher {
    FakeJsonFetcher::new().with_response(
        OPENWEATHER_ENDPOINT,
        json!({
            "cod": 200,
            "weather": [{"description": "light rain"}],
            "main": {"temp": 12.5}
        }),
    )
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_query(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn query_routes_to_weather_agent() {
    let (status, body) = send(
        router(london_weather(), vec![]),
        post_query(r#"{"query": "What's the weather in London?"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "query": "What's the weather in London?",
            "agent_used": "Weather Agent",
            "response": "Weather in London: light rain, temperature 12.5°C.",
            "success": true
        })
    );
}

#[tokio::test]
async fn query_routes_to_math_agent() {
    let (status, body) = send(
        router(FakeJsonFetcher::new(), vec![]),
        post_query(r#"{"query": "Calculate 15 + 25"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent_used"], "Math Agent");
    assert_eq!(body["response"], "15.0 + 25.0 = 40");
}

#[tokio::test]
async fn query_degraded_fact_is_still_success() {
    let fetcher = FakeJsonFetcher::new()
        .with_error("https://catfact.ninja/fact", FetchError::Timeout(5));
    let (status, body) = send(
        router(fetcher, vec![]),
        post_query(r#"{"query": "cat fact please"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent_used"], "API Agent");
    assert_eq!(body["response"], "⏰ API request timed out. Please try again.");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn missing_or_blank_query_is_rejected() {
    for payload in [r#"{}"#, r#"{"query": ""}"#, r#"{"query": "   "}"#] {
        let (status, body) = send(router(FakeJsonFetcher::new(), vec![]), post_query(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
        assert_eq!(body, json!({"error": "No query provided", "success": false}));
    }
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, body) = send(
        router(FakeJsonFetcher::new(), vec![]),
        post_query("not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn weather_route_decodes_location() {
    let fetcher = london_weather();
    let (status, body) = send(router(fetcher, vec![]), get("/api/weather/New%20York")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "New York");
    assert_eq!(
        body["response"],
        "Weather in New York: light rain, temperature 12.5°C."
    );
}

#[tokio::test]
async fn math_route_returns_problem() {
    // basic kind, a=3, b=4, then Add
    let (status, body) = send(router(FakeJsonFetcher::new(), vec![0, 3, 4, 0]), get("/api/math")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "3 + 4 = 7", "success": true}));
}

#[tokio::test]
async fn sample_route_returns_trivia() {
    let fetcher = FakeJsonFetcher::new().with_response(
        "https://uselessfacts.jsph.pl/random.json",
        json!({"text": "Honey never spoils."}),
    );
    let (status, body) = send(router(fetcher, vec![]), get("/api/sample")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "🤓 Random Fact: Honey never spoils.");
}

#[tokio::test]
async fn health_reports_version() {
    let (status, body) = send(router(FakeJsonFetcher::new(), vec![]), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_u64());
}
