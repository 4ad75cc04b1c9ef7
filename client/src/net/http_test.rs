use super::*;

fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: content_type.map(str::to_owned), body: body.to_owned() }
}

// =============================================================
// build_url
// =============================================================

#[test]
fn build_url_trims_trailing_slashes_and_joins_path() {
    let url = build_url("https://api.example.com///", "/user/settings", &[], None).unwrap();
    assert_eq!(url, "https://api.example.com/user/settings");
}

#[test]
fn build_url_adds_leading_slash_when_missing() {
    let url = build_url("https://api.example.com", "withdraw/all", &[], None).unwrap();
    assert_eq!(url, "https://api.example.com/withdraw/all");
}

#[test]
fn build_url_appends_query_then_cache_buster() {
    let url = build_url("https://api.example.com", "/x", &[("code", "AB C")], Some(1_700_000_000_123)).unwrap();
    assert_eq!(url, "https://api.example.com/x?code=AB+C&_=1700000000123");
}

#[test]
fn build_url_rejects_missing_base() {
    assert_eq!(build_url("", "/x", &[], None), Err(ApiError::Config));
    assert_eq!(build_url("  /  ", "/x", &[], None), Err(ApiError::Config));
}

#[test]
fn build_url_rejects_relative_base() {
    assert_eq!(build_url("not a url", "/x", &[], None), Err(ApiError::Config));
}

// =============================================================
// build_headers
// =============================================================

#[test]
fn headers_include_bearer_only_when_token_present() {
    let with = build_headers(Some("tok"), false);
    assert!(with.contains(&("Authorization".to_owned(), "Bearer tok".to_owned())));

    let without = build_headers(None, false);
    assert!(without.iter().all(|(k, _)| k != "Authorization"));

    let blank = build_headers(Some("  "), false);
    assert!(blank.iter().all(|(k, _)| k != "Authorization"));
}

#[test]
fn headers_declare_json_body_only_when_sending_one() {
    assert!(build_headers(None, true).iter().any(|(k, _)| k == "Content-Type"));
    assert!(build_headers(None, false).iter().all(|(k, _)| k != "Content-Type"));
    assert_eq!(build_headers(None, false)[0], ("Accept".to_owned(), "application/json".to_owned()));
}

#[test]
fn request_header_lookup_is_case_insensitive() {
    let req = HttpRequest {
        method: Method::Get,
        url: "https://x".to_owned(),
        headers: build_headers(Some("t"), false),
        body: None,
        no_store: true,
    };
    assert_eq!(req.header("authorization"), Some("Bearer t"));
    assert_eq!(req.header("content-type"), None);
}

// =============================================================
// interpret_response
// =============================================================

#[test]
fn html_response_is_non_json_even_when_body_looks_like_json() {
    let resp = response(200, Some("text/html; charset=utf-8"), r#"{"message":"hello"}"#);
    assert!(matches!(interpret_response(&resp), Err(ApiError::NonJsonResponse { status: 200, .. })));
}

#[test]
fn missing_content_type_is_non_json() {
    let resp = response(500, None, "<html>boom</html>");
    assert_eq!(
        interpret_response(&resp),
        Err(ApiError::NonJsonResponse { status: 500, snippet: "<html>boom</html>".to_owned() })
    );
}

#[test]
fn content_type_match_ignores_case_and_parameters() {
    let resp = response(200, Some("Application/JSON; charset=utf-8"), r#"{"ok":true}"#);
    assert_eq!(interpret_response(&resp), Ok(serde_json::json!({ "ok": true })));
}

#[test]
fn error_status_uses_body_message() {
    let resp = response(401, Some("application/json"), r#"{"message":"Invalid credentials"}"#);
    assert_eq!(
        interpret_response(&resp),
        Err(ApiError::RequestFailed { status: 401, message: "Invalid credentials".to_owned() })
    );
}

#[test]
fn error_status_without_message_uses_status_text() {
    let resp = response(500, Some("application/json"), "{}");
    assert_eq!(interpret_response(&resp).unwrap_err().to_string(), "HTTP 500");
}

#[test]
fn malformed_json_is_reported_as_non_json() {
    let resp = response(200, Some("application/json"), "{not json");
    assert!(matches!(interpret_response(&resp), Err(ApiError::NonJsonResponse { .. })));
}

#[test]
fn empty_json_body_is_null() {
    let resp = response(200, Some("application/json"), "");
    assert_eq!(interpret_response(&resp), Ok(serde_json::Value::Null));
}

// =============================================================
// CancelToken
// =============================================================

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let clone = token.clone();
    assert!(clone.check().is_ok());
    token.cancel();
    assert!(clone.is_cancelled());
    assert_eq!(clone.check(), Err(ApiError::Cancelled));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_transport_never_fetches() {
    let request = HttpRequest {
        method: Method::Get,
        url: "https://api.example.com/user/settings".to_owned(),
        headers: Vec::new(),
        body: None,
        no_store: true,
    };
    let err = futures::executor::block_on(ServerTransport.send(request)).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
