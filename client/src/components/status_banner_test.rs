use super::*;

#[test]
fn cancellations_produce_no_message() {
    assert_eq!(StatusMessage::from_api_error(&ApiError::Cancelled), None);
}

#[test]
fn api_errors_render_verbatim() {
    let message = StatusMessage::from_api_error(&ApiError::request_failed(400, Some("Insufficient balance")));
    assert_eq!(message, Some(StatusMessage::error("Insufficient balance")));
}

#[test]
fn success_prefers_server_message() {
    assert_eq!(StatusMessage::success_or(Some("Saved!"), "Done"), StatusMessage::success("Saved!"));
    assert_eq!(StatusMessage::success_or(Some("  "), "Done"), StatusMessage::success("Done"));
    assert_eq!(StatusMessage::success_or(None, "Done").kind, StatusKind::Success);
}

#[test]
fn css_class_tracks_kind() {
    assert!(StatusMessage::error("x").css_class().ends_with("--error"));
    assert!(StatusMessage::success("x").css_class().ends_with("--success"));
}
