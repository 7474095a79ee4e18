#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that pulls in `common`.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Read a response body as JSON, panicking with the raw body when it isn't.
pub async fn read_json(resp: ServiceResponse<BoxBody>) -> Value {
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");
    serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("Response body is not JSON. Raw body: {body_str}"))
}

/// Assert the bare-404 contract: status 404 and nothing in the body.
pub async fn assert_empty_not_found(resp: ServiceResponse<BoxBody>) {
    assert_eq!(resp.status().as_u16(), 404);
    let body = test::read_body(resp).await;
    assert!(
        body.is_empty(),
        "404 responses carry no body (got {:?})",
        String::from_utf8_lossy(&body)
    );
}
