//! Wire shape of the greeting body.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hello_core::{GreetingResponse, HelloError, DEFAULT_GREETING};

#[test]
fn default_payload_bytes() {
    let body = serde_json::to_string(&GreetingResponse::default()).unwrap();
    assert_eq!(body, r#"{"message":"Hello from Spring Boot on Cloud Foundry!"}"#);
}

#[test]
fn custom_message_keeps_single_key() {
    let body = serde_json::to_value(GreetingResponse::new("hi")).unwrap();
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(obj["message"], "hi");
}

#[test]
fn parses_back_from_wire() {
    let resp: GreetingResponse =
        serde_json::from_str(r#"{"message":"Hello from Spring Boot on Cloud Foundry!"}"#).unwrap();
    assert_eq!(resp.message, DEFAULT_GREETING);
}

#[test]
fn client_codes_are_stable() {
    assert_eq!(HelloError::UnsupportedVersion.client_code().as_str(), "UNSUPPORTED_VERSION");
    assert_eq!(HelloError::Metrics("x".into()).client_code().as_str(), "METRICS");
    assert_eq!(HelloError::NotFound("/x".into()).client_code().as_str(), "NOT_FOUND");
    assert_eq!(HelloError::Forbidden("o".into()).client_code().as_str(), "FORBIDDEN");
}
