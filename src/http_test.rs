use super::*;
use crate::test_support::{MockApi, client};
use serde_json::{Value, json};

// =============================================================================
// Token attachment
// =============================================================================

#[tokio::test]
async fn no_token_sends_no_authorization() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 200, json!([]));
    let http = client(&api.serve().await);

    let _: Value = http.get_json("/devices", None).await.unwrap();
    assert_eq!(api.requests()[0].authorization, None);
}

#[tokio::test]
async fn durable_token_is_attached() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 200, json!([]));
    let http = client(&api.serve().await);
    http.session().persist("stored").unwrap();

    let _: Value = http.get_json("/devices", None).await.unwrap();
    assert_eq!(api.requests()[0].authorization.as_deref(), Some("Bearer stored"));
}

#[tokio::test]
async fn cookie_token_is_fallback() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 200, json!([]));
    let http = client(&api.serve().await);
    http.session().persist("mirrored").unwrap();
    http.session().clear_durable().unwrap();

    let _: Value = http.get_json("/devices", None).await.unwrap();
    assert_eq!(api.requests()[0].authorization.as_deref(), Some("Bearer mirrored"));
}

#[tokio::test]
async fn explicit_token_wins_over_session() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 200, json!([]));
    let http = client(&api.serve().await);
    http.session().persist("stored").unwrap();

    let _: Value = http.get_json("/devices", Some("explicit")).await.unwrap();
    assert_eq!(api.requests()[0].authorization.as_deref(), Some("Bearer explicit"));
}

#[tokio::test]
async fn empty_explicit_token_uses_session() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 200, json!([]));
    let http = client(&api.serve().await);
    http.session().persist("stored").unwrap();

    let _: Value = http.get_json("/devices", Some("")).await.unwrap();
    assert_eq!(api.requests()[0].authorization.as_deref(), Some("Bearer stored"));
}

// =============================================================================
// Response handling
// =============================================================================

#[tokio::test]
async fn unauthorized_clears_durable_token_and_propagates() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 401, json!({ "message": "expired" }));
    let http = client(&api.serve().await);
    http.session().persist("stale").unwrap();

    let err = http.get_json::<Value>("/devices", None).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(http.session().durable_token(), None);
    assert_eq!(http.session().cookie_token().as_deref(), Some("stale"));
}

#[tokio::test]
async fn unauthorized_on_any_method_clears_token() {
    let api = MockApi::new();
    api.respond("DELETE", "/api-keys/k1", 401, json!({}));
    let http = client(&api.serve().await);
    http.session().persist("stale").unwrap();

    let err = http.delete("/api-keys/k1", None).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(http.session().durable_token(), None);
}

#[tokio::test]
async fn server_error_keeps_token() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 500, json!({ "error": "boom" }));
    let http = client(&api.serve().await);
    http.session().persist("keep").unwrap();

    let err = http.get_json::<Value>("/devices", None).await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(http.session().durable_token().as_deref(), Some("keep"));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let http = client(&format!("http://{addr}"));

    let err = http.get_json::<Value>("/devices", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let api = MockApi::new();
    api.respond("GET", "/devices", 200, json!({ "not": "a list" }));
    let http = client(&api.serve().await);

    let err = http.get_json::<Vec<Value>>("/devices", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn json_body_is_sent() {
    let api = MockApi::new();
    api.respond("PATCH", "/devices/d1", 200, json!({ "ok": true }));
    let http = client(&api.serve().await);

    let _: Value = http
        .patch_json("/devices/d1", &json!({ "room": "Den" }), None)
        .await
        .unwrap();
    let req = &api.requests()[0];
    assert_eq!(req.method, "PATCH");
    assert_eq!(req.body, Some(json!({ "room": "Den" })));
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let http = client("http://localhost:9999/");
    assert_eq!(http.base_url(), "http://localhost:9999");
}
