use super::*;
use serde_json::json;

fn decode(value: serde_json::Value) -> ApiKey {
    serde_json::from_value(value).unwrap()
}

#[test]
fn id_field_wins() {
    let key = decode(json!({ "id": "a", "api_key_id": "b", "_id": "c", "key": "hm_x", "name": "Main" }));
    assert_eq!(key.id, "a");
}

#[test]
fn api_key_id_is_second_choice() {
    let key = decode(json!({ "api_key_id": "b", "_id": "c" }));
    assert_eq!(key.id, "b");
}

#[test]
fn underscore_id_is_coerced_to_string() {
    let key = decode(json!({ "_id": 42, "key": "hm_x", "name": "Main" }));
    assert_eq!(key.id, "42");
}

#[test]
fn numeric_id_is_rendered_in_decimal() {
    let key = decode(json!({ "id": 7 }));
    assert_eq!(key.id, "7");
}

#[test]
fn missing_id_is_empty_string() {
    let key = decode(json!({ "key": "hm_x", "name": "Orphan" }));
    assert_eq!(key.id, "");
}

#[test]
fn falsy_ids_are_skipped() {
    let key = decode(json!({ "id": "", "api_key_id": 0, "_id": "real" }));
    assert_eq!(key.id, "real");
}

#[test]
fn created_at_precedence() {
    let key = decode(json!({ "id": "a", "createdAt": "2024-01-01T00:00:00Z", "created_at": "2023-01-01T00:00:00Z" }));
    assert_eq!(key.created_at, "2024-01-01T00:00:00Z");

    let key = decode(json!({ "id": "a", "created_at": "2023-01-01T00:00:00Z" }));
    assert_eq!(key.created_at, "2023-01-01T00:00:00Z");
}

#[test]
fn missing_created_at_defaults_to_now() {
    let key = decode(json!({ "id": "a" }));
    let parsed = OffsetDateTime::parse(&key.created_at, &Rfc3339).unwrap();
    let age = OffsetDateTime::now_utc() - parsed;
    assert!(age.whole_seconds() < 60);
}

#[test]
fn user_id_accepts_both_spellings() {
    assert_eq!(decode(json!({ "userId": "u1" })).user_id, "u1");
    assert_eq!(decode(json!({ "user_id": "u2" })).user_id, "u2");
}

#[test]
fn serializes_camel_case() {
    let key = decode(json!({ "_id": "k", "key": "hm_x", "name": "Main", "created_at": "t", "user_id": "u" }));
    let out = serde_json::to_value(&key).unwrap();
    assert_eq!(out, json!({ "id": "k", "key": "hm_x", "name": "Main", "createdAt": "t", "userId": "u" }));
}
