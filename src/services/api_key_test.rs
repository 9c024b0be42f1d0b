use super::*;
use crate::test_support::{MockApi, client};
use serde_json::json;

async fn service(api: &MockApi) -> ApiKeyService {
    ApiKeyService::new(client(&api.serve().await))
}

#[tokio::test]
async fn get_api_keys_normalizes_ids() {
    let api = MockApi::new();
    api.respond(
        "GET",
        "/api-keys",
        200,
        json!([
            { "id": "a", "key": "hm_a", "name": "A", "createdAt": "2024-01-01T00:00:00Z", "userId": "u1" },
            { "api_key_id": 17, "key": "hm_b", "name": "B", "created_at": "2024-02-01T00:00:00Z", "user_id": "u1" },
            { "_id": "mongo", "key": "hm_c", "name": "C" },
            { "key": "hm_d", "name": "D" }
        ]),
    );
    let svc = service(&api).await;

    let keys = svc.get_api_keys(None).await.unwrap();
    let ids: Vec<&str> = keys.iter().map(|k| k.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "17", "mongo", ""]);
    assert_eq!(keys[1].created_at, "2024-02-01T00:00:00Z");
    assert_eq!(keys[1].user_id, "u1");
}

#[tokio::test]
async fn create_api_key_posts_name() {
    let api = MockApi::new();
    api.respond("POST", "/api-keys", 201, json!({ "_id": 99, "key": "hm_new", "name": "Test Key" }));
    let svc = service(&api).await;

    let key = svc.create_api_key("Test Key", Some("tok")).await.unwrap();
    assert_eq!(key.id, "99");
    assert_eq!(key.key, "hm_new");

    let req = &api.requests()[0];
    assert_eq!(req.body, Some(json!({ "name": "Test Key" })));
    assert_eq!(req.authorization.as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn create_api_key_failure_propagates() {
    let api = MockApi::new();
    api.respond("POST", "/api-keys", 403, json!({ "error": "limit reached" }));
    let svc = service(&api).await;

    let err = svc.create_api_key("Too many", None).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn delete_api_key_hits_id_path() {
    let api = MockApi::new();
    api.respond("DELETE", "/api-keys/k1", 200, json!({ "deleted": true }));
    let svc = service(&api).await;

    svc.delete_api_key("k1", None).await.unwrap();
    assert_eq!(api.requests()[0].path, "/api-keys/k1");
}

#[tokio::test]
async fn missing_route_is_not_found() {
    let api = MockApi::new();
    let svc = service(&api).await;

    let err = svc.delete_api_key("nope", None).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn delete_api_key_encodes_id() {
    let api = MockApi::new();
    api.respond("DELETE", "/api-keys/k%2F1%3Fx%3D1", 200, json!({}));
    let svc = service(&api).await;

    svc.delete_api_key("k/1?x=1", None).await.unwrap();
    assert_eq!(api.requests()[0].path, "/api-keys/k%2F1%3Fx%3D1");
}
