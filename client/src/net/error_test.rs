use super::*;

#[test]
fn non_json_truncates_body_snippet() {
    let body = "x".repeat(500);
    let ApiError::NonJsonResponse { status, snippet } = ApiError::non_json(502, &body) else {
        panic!("expected NonJsonResponse");
    };
    assert_eq!(status, 502);
    assert_eq!(snippet.chars().count(), SNIPPET_CHARS);
}

#[test]
fn non_json_truncates_on_char_boundaries() {
    let body = "₹".repeat(200);
    let err = ApiError::non_json(200, &body);
    assert!(err.to_string().starts_with("Server did not return JSON (200). ₹"));
}

#[test]
fn request_failed_prefers_server_message() {
    let err = ApiError::request_failed(400, Some("Invalid phone"));
    assert_eq!(err.to_string(), "Invalid phone");
}

#[test]
fn request_failed_falls_back_to_status() {
    assert_eq!(ApiError::request_failed(503, None).to_string(), "HTTP 503");
    assert_eq!(ApiError::request_failed(404, Some("   ")).to_string(), "HTTP 404");
}

#[test]
fn cancelled_has_no_user_message() {
    assert_eq!(ApiError::Cancelled.user_message(), None);
    assert_eq!(
        ApiError::Network("offline".to_owned()).user_message(),
        Some("Network error: offline".to_owned())
    );
}

#[test]
fn validation_from_static_str() {
    let err: ApiError = "Please enter your name.".into();
    assert_eq!(err, ApiError::Validation("Please enter your name.".to_owned()));
    assert_eq!(err.to_string(), "Please enter your name.");
}
