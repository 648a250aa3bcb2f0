//! HTTP tests against the in-process router
//!
//! The full middleware stack runs; storage is in memory.
//!
//! Run with: cargo test -p integration-tests --test http_tests

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use integration_tests::{
    eventually, fixtures::*, request, send, test_app_config, token_for, FakeBackend,
    TEST_ACTIVITY, TEST_JWT_SECRET,
};
use serde_json::json;
use vote_common::JwtService;
use vote_core::CountCache;

const VOTE_PATH: &str = "/activities/act1/vote";
const COUNTS_PATH: &str = "/activities/act1/counts";

fn app() -> (FakeBackend, axum::Router) {
    let backend = FakeBackend::new();
    let app = backend.app(test_app_config()).unwrap();
    (backend, app)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (_backend, app) = app();
    let response = send(&app, request("GET", "/health", None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
    assert!(response.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let (backend, app) = app();

    let ok = send(&app, request("GET", "/health/ready", None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(ok.status, StatusCode::OK);
    let body: ReadinessBody = ok.parse().unwrap();
    assert_eq!(body.status, "ready");

    backend.cache.set_offline(true);
    let degraded = send(&app, request("GET", "/health/ready", None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(degraded.status, StatusCode::OK);
    let body: ReadinessBody = degraded.parse().unwrap();
    assert_eq!(body.status, "degraded");
    assert_eq!(body.checks.redis, "unhealthy");

    backend.repo.set_offline(true);
    let down = send(&app, request("GET", "/health/ready", None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
    let body: ReadinessBody = down.parse().unwrap();
    assert_eq!(body.status, "not_ready");
    assert_eq!(body.checks.database, "unhealthy");
}

// ============================================================================
// Activity
// ============================================================================

#[tokio::test]
async fn test_get_activity() {
    let (_backend, app) = app();

    for path in ["/activities/act1", "/activities/active"] {
        let response = send(&app, request("GET", path, None, None).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);

        let body: Envelope<ActivityBody> = response.parse().unwrap();
        assert!(body.success);
        assert_eq!(body.data.id, TEST_ACTIVITY);
        assert!(body.data.is_open);
        let ids: Vec<_> = body.data.teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(body.data.teams[1].display_name, "Team B");
    }
}

#[tokio::test]
async fn test_get_unknown_activity() {
    let (_backend, app) = app();
    let response = send(&app, request("GET", "/activities/nope", None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let body: ErrorEnvelope = response.parse().unwrap();
    assert!(!body.success);
    assert_eq!(body.error.code, "UNKNOWN_ACTIVITY");
}

// ============================================================================
// Voting
// ============================================================================

#[tokio::test]
async fn test_submit_vote_created() {
    let (backend, app) = app();
    let token = token_for("u1");

    let response = send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team_id": "b"}))).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::CREATED);
    let body: Envelope<ReceiptBody> = response.parse().unwrap();
    assert!(body.success);
    assert_eq!(body.data.vote.user_id, "u1");
    assert_eq!(body.data.vote.team_id, "b");
    assert_eq!(body.data.vote.activity_id, TEST_ACTIVITY);
    assert_eq!(body.data.team_name, "Team B");
    assert_eq!(body.data.total_votes, Some(1));
    assert_eq!(backend.repo.len(), 1);
}

#[tokio::test]
async fn test_submit_twice_conflicts() {
    let (backend, app) = app();
    let token = token_for("u1");

    let first = send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team_id": "a"}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team_id": "c"}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(second.status, StatusCode::CONFLICT);
    let body: ErrorEnvelope = second.parse().unwrap();
    assert_eq!(body.error.code, "ALREADY_VOTED");
    assert_eq!(backend.repo.len(), 1);
}

#[tokio::test]
async fn test_submit_requires_token() {
    let (backend, app) = app();

    let missing = send(
        &app,
        request("POST", VOTE_PATH, None, Some(json!({"team_id": "a"}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    let body: ErrorEnvelope = missing.parse().unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");

    let forged = send(
        &app,
        request(
            "POST",
            VOTE_PATH,
            Some("not.a.token"),
            Some(json!({"team_id": "a"})),
        )
        .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    let body: ErrorEnvelope = forged.parse().unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");

    let stale = JwtService::new(TEST_JWT_SECRET, 900)
        .encode_token("u1", -3600)
        .unwrap();
    let expired = send(
        &app,
        request("POST", VOTE_PATH, Some(&stale), Some(json!({"team_id": "a"}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    let body: ErrorEnvelope = expired.parse().unwrap();
    assert_eq!(body.error.code, "TOKEN_EXPIRED");

    assert!(backend.repo.is_empty());
}

#[tokio::test]
async fn test_submit_bad_input() {
    let (backend, app) = app();
    let token = token_for("u1");

    let unknown = send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team_id": "Z"}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    let body: ErrorEnvelope = unknown.parse().unwrap();
    assert_eq!(body.error.code, "INVALID_TEAM");

    let empty = send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team_id": ""}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    let body: ErrorEnvelope = empty.parse().unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.is_some());

    let malformed = send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team": "a"}))).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    let body: ErrorEnvelope = malformed.parse().unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");

    let elsewhere = send(
        &app,
        request(
            "POST",
            "/activities/other/vote",
            Some(&token),
            Some(json!({"team_id": "a"})),
        )
        .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(elsewhere.status, StatusCode::BAD_REQUEST);

    assert!(backend.repo.is_empty());
}

#[tokio::test]
async fn test_submit_after_close_forbidden() {
    let backend = FakeBackend::new();
    let mut config = test_app_config();
    config.campaign.ends_at = Some(chrono::Utc::now() - chrono::Duration::hours(1));
    let app = backend.app(config).unwrap();

    let response = send(
        &app,
        request(
            "POST",
            VOTE_PATH,
            Some(&token_for("u1")),
            Some(json!({"team_id": "a"})),
        )
        .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    let body: ErrorEnvelope = response.parse().unwrap();
    assert_eq!(body.error.code, "VOTING_CLOSED");
}

#[tokio::test]
async fn test_store_down_is_retryable() {
    let (backend, app) = app();
    backend.repo.set_offline(true);

    let response = send(
        &app,
        request(
            "POST",
            VOTE_PATH,
            Some(&token_for("u1")),
            Some(json!({"team_id": "a"})),
        )
        .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), Some("2"));
    let body: ErrorEnvelope = response.parse().unwrap();
    assert!(!body.error.message.contains("connection refused"));
}

#[tokio::test]
async fn test_get_my_vote() {
    let (_backend, app) = app();
    let token = token_for("u7");

    let before = send(&app, request("GET", VOTE_PATH, Some(&token), None).unwrap())
        .await
        .unwrap();
    assert_eq!(before.status, StatusCode::NOT_FOUND);
    let body: ErrorEnvelope = before.parse().unwrap();
    assert_eq!(body.error.code, "VOTE_NOT_FOUND");

    send(
        &app,
        request("POST", VOTE_PATH, Some(&token), Some(json!({"team_id": "c"}))).unwrap(),
    )
    .await
    .unwrap();

    let after = send(
        &app,
        request("GET", "/activities/active/vote", Some(&token), None).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(after.status, StatusCode::OK);
    let body: Envelope<MyVoteBody> = after.parse().unwrap();
    assert_eq!(body.data.vote.team_id, "c");
    assert_eq!(body.data.vote.user_id, "u7");
}

// ============================================================================
// Counts
// ============================================================================

#[tokio::test]
async fn test_counts_zero_filled() {
    let (_backend, app) = app();
    let response = send(&app, request("GET", COUNTS_PATH, None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("cache-control"),
        Some("public, max-age=0, s-maxage=5, stale-while-revalidate=30")
    );
    assert!(response.header("etag").is_some_and(|e| e.starts_with('"')));

    let body: Envelope<CountsBody> = response.parse().unwrap();
    assert_eq!(body.data.activity_id, TEST_ACTIVITY);
    assert_eq!(body.data.source, "store");
    assert_eq!(body.data.counts.len(), 3);
    assert!(body.data.counts.values().all(|c| *c == 0));
}

#[tokio::test]
async fn test_counts_conditional_get() {
    let (backend, app) = app();
    let first = send(&app, request("GET", COUNTS_PATH, None, None).unwrap())
        .await
        .unwrap();
    let etag = first.header("etag").unwrap().to_string();

    let cache = backend.cache.clone();
    assert!(eventually(|| cache.peek(TEST_ACTIVITY).is_some()).await);

    let mut conditional = request("GET", COUNTS_PATH, None, None).unwrap();
    conditional
        .headers_mut()
        .insert("if-none-match", etag.parse().unwrap());
    let not_modified = send(&app, conditional).await.unwrap();

    assert_eq!(not_modified.status, StatusCode::NOT_MODIFIED);
    assert!(not_modified.body.is_empty());
    assert_eq!(not_modified.header("etag"), Some(etag.as_str()));
    assert!(not_modified.header("cache-control").is_some());

    let mut weak = request("GET", COUNTS_PATH, None, None).unwrap();
    weak.headers_mut()
        .insert("if-none-match", format!("\"other\", W/{etag}").parse().unwrap());
    assert_eq!(send(&app, weak).await.unwrap().status, StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_counts_etag_changes_with_counts() {
    let (backend, app) = app();
    let before = send(&app, request("GET", COUNTS_PATH, None, None).unwrap())
        .await
        .unwrap();
    let before_etag = before.header("etag").unwrap().to_string();

    send(
        &app,
        request(
            "POST",
            VOTE_PATH,
            Some(&token_for("u1")),
            Some(json!({"team_id": "a"})),
        )
        .unwrap(),
    )
    .await
    .unwrap();

    // Wait out the background write, then drop it so the next read hits the store
    let cache = backend.cache.clone();
    assert!(eventually(|| cache.peek(TEST_ACTIVITY).is_some()).await);
    backend.cache.invalidate(TEST_ACTIVITY).await.unwrap();

    let mut conditional = request("GET", COUNTS_PATH, None, None).unwrap();
    conditional
        .headers_mut()
        .insert("if-none-match", before_etag.parse().unwrap());
    let after = send(&app, conditional).await.unwrap();

    assert_eq!(after.status, StatusCode::OK);
    assert_ne!(after.header("etag"), Some(before_etag.as_str()));
    let body: Envelope<CountsBody> = after.parse().unwrap();
    assert_eq!(body.data.counts["a"], 1);
}

#[tokio::test]
async fn test_counts_survive_cache_outage() {
    let (backend, app) = app();
    send(
        &app,
        request(
            "POST",
            VOTE_PATH,
            Some(&token_for("u1")),
            Some(json!({"team_id": "b"})),
        )
        .unwrap(),
    )
    .await
    .unwrap();
    backend.cache.set_offline(true);

    let response = send(&app, request("GET", COUNTS_PATH, None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::OK);
    let body: Envelope<CountsBody> = response.parse().unwrap();
    assert_eq!(body.data.source, "store");
    assert_eq!(body.data.counts["b"], 1);
}

#[tokio::test]
async fn test_counts_store_down_503() {
    let (backend, app) = app();
    backend.repo.set_offline(true);

    let response = send(&app, request("GET", COUNTS_PATH, None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), Some("2"));
    assert!(response.header("etag").is_none());
}

#[tokio::test]
async fn test_counts_request_budget() {
    let backend = FakeBackend::new();
    let mut config = test_app_config();
    config.counts.request_timeout_ms = 50;
    config.counts.cache_timeout_ms = 1_000;
    let app = backend.app(config).unwrap();
    backend.cache.set_delay(Some(Duration::from_millis(500)));

    let response = send(&app, request("GET", COUNTS_PATH, None, None).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.header("retry-after"), Some("2"));
}

// ============================================================================
// Rate limiting
// ============================================================================

fn limited_app(trust_proxy_headers: bool) -> axum::Router {
    let mut config = test_app_config();
    config.rate_limit.requests_per_second = 1;
    config.rate_limit.burst = 1;
    config.rate_limit.trust_proxy_headers = trust_proxy_headers;
    FakeBackend::new().app(config).unwrap()
}

/// Same TCP peer every time, a different forwarded address each call
fn from_peer(forwarded_for: &str) -> axum::http::Request<axum::body::Body> {
    let mut req = request("GET", "/activities/act1", None, None).unwrap();
    req.headers_mut()
        .insert("x-forwarded-for", forwarded_for.parse().unwrap());
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 40_000))));
    req
}

#[tokio::test]
async fn test_forwarded_for_ignored_by_default() {
    let app = limited_app(false);

    let first = send(&app, from_peer("198.51.100.1")).await.unwrap();
    assert_eq!(first.status, StatusCode::OK);

    let second = send(&app, from_peer("198.51.100.2")).await.unwrap();
    assert_eq!(second.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_forwarded_for_keys_clients_behind_proxy() {
    let app = limited_app(true);

    let first = send(&app, from_peer("198.51.100.1")).await.unwrap();
    assert_eq!(first.status, StatusCode::OK);

    let other_client = send(&app, from_peer("198.51.100.2")).await.unwrap();
    assert_eq!(other_client.status, StatusCode::OK);

    let repeat = send(&app, from_peer("198.51.100.1")).await.unwrap();
    assert_eq!(repeat.status, StatusCode::TOO_MANY_REQUESTS);
}
