use super::*;

#[test]
fn only_transport_and_server_side_statuses_retry() {
    assert!(LlmError::Transport("reset".into()).retryable());
    assert!(LlmError::Status { status: 429, body: String::new() }.retryable());
    assert!(LlmError::Status { status: 502, body: String::new() }.retryable());

    assert!(!LlmError::Status { status: 400, body: String::new() }.retryable());
    assert!(!LlmError::Refused("no".into()).retryable());
    assert!(!LlmError::Decode("eof".into()).retryable());
}

#[test]
fn codes_are_namespaced() {
    assert_eq!(LlmError::MissingApiKey { var: "LLM_API_KEY" }.error_code(), "E_LLM_MISSING_API_KEY");
    assert_eq!(LlmError::Refused("no".into()).error_code(), "E_LLM_REFUSED");
}
