use super::*;
use crate::net::testing::{FakeTransport, html_response};
use futures::executor::block_on;
use serde_json::json;

const BASE: &str = "https://api.placify.test";

fn client(transport: &FakeTransport, token: Option<&str>) -> ApiClient<FakeTransport> {
    ApiClient::new(&ClientConfig::new(Some(BASE), None), token.map(str::to_owned), transport.clone())
}

fn settings_body() -> serde_json::Value {
    json!({
        "rewardPerStudent": 2,
        "cooldownSeconds": 60,
        "maxStudentsBeforeBlock": 10,
        "blockDurationMinutes": 30,
    })
}

#[test]
fn missing_base_url_fails_without_sending() {
    let transport = FakeTransport::new();
    let api = ApiClient::new(&ClientConfig::default(), None, transport.clone());
    let err = block_on(api.fetch_settings(&CancelToken::new())).unwrap_err();
    assert_eq!(err, ApiError::Config);
    assert!(transport.sent().is_empty());
}

#[test]
fn html_response_maps_to_non_json_error() {
    let transport = FakeTransport::new();
    transport.reply(Ok(html_response(200, "<!DOCTYPE html><html>login</html>")));
    let err = block_on(client(&transport, None).fetch_settings(&CancelToken::new())).unwrap_err();
    assert_eq!(
        err,
        ApiError::NonJsonResponse { status: 200, snippet: "<!DOCTYPE html><html>login</html>".to_owned() }
    );
    assert!(err.to_string().starts_with("Server did not return JSON (200)."));
}

#[test]
fn get_requests_bust_cache_and_skip_content_type() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "settings": settings_body() }));
    let settings = block_on(client(&transport, Some("tok")).fetch_settings(&CancelToken::new())).unwrap();
    assert_eq!(settings.reward_per_student, 2.0);
    assert_eq!(settings.block_duration_minutes, 30.0);

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert!(sent[0].url.starts_with(&format!("{BASE}/user/settings?_=")));
    assert!(sent[0].no_store);
    assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
    assert_eq!(sent[0].header("content-type"), None);
}

#[test]
fn repeated_loads_are_idempotent() {
    let transport = FakeTransport::new();
    transport.reply_json(200, settings_body()).reply_json(200, settings_body());
    let api = client(&transport, None);
    let first = block_on(api.fetch_settings(&CancelToken::new())).unwrap();
    let second = block_on(api.fetch_settings(&CancelToken::new())).unwrap();
    assert_eq!(first, second);
    assert_eq!(transport.sent().len(), 2);
}

#[test]
fn withdrawal_posts_json_body_to_amount_endpoint() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "message": "Withdrawal requested" }));
    let payload = WithdrawalPayload { name: "Asha".to_owned(), upi_id: "asha@upi".to_owned(), amount: 150.0 };
    let resp = block_on(client(&transport, Some("tok")).request_withdrawal(&payload, &CancelToken::new())).unwrap();
    assert_eq!(resp.message.as_deref(), Some("Withdrawal requested"));

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, format!("{BASE}/withdraw/amount"));
    assert_eq!(sent[0].header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "name": "Asha", "upiId": "asha@upi", "amount": 150.0 }));
}

#[test]
fn failed_status_surfaces_server_message() {
    let transport = FakeTransport::new();
    transport.reply_json(400, json!({ "message": "Insufficient balance" }));
    let payload = WithdrawalPayload { name: "A".to_owned(), upi_id: "a@upi".to_owned(), amount: 900.0 };
    let err = block_on(client(&transport, None).request_withdrawal(&payload, &CancelToken::new())).unwrap_err();
    assert_eq!(err.to_string(), "Insufficient balance");
}

#[test]
fn settings_update_uses_put() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "message": "Saved", "settings": settings_body() }));
    let update = SettingsUpdate {
        reward_per_student: 2.0,
        cooldown_seconds: 60.0,
        max_students_before_block: 10.0,
        block_duration_minutes: 30.0,
    };
    let resp = block_on(client(&transport, None).update_settings(&update, &CancelToken::new())).unwrap();
    assert_eq!(resp.settings.map(|s| s.cooldown_seconds), Some(60.0));
    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Put);
    assert_eq!(sent[0].url, format!("{BASE}/user/updatesetting"));
}

#[test]
fn users_unwrap_envelope_and_sort_newest_first() {
    let transport = FakeTransport::new();
    transport.reply_json(
        200,
        json!({ "users": [
            { "_id": "a", "createdAt": "2023-01-01T00:00:00Z" },
            { "_id": "b", "createdAt": "2024-01-01T00:00:00Z", "reward": "12" },
        ]}),
    );
    let users = block_on(client(&transport, None).fetch_users(&CancelToken::new())).unwrap();
    assert_eq!(users[0].id.as_deref(), Some("b"));
    assert_eq!(users[0].reward, Some(12.0));
    assert_eq!(users[1].id.as_deref(), Some("a"));
}

#[test]
fn bare_array_lists_are_accepted() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!([{ "_id": "w1", "amount": 75, "status": "pending" }]));
    let rows = block_on(client(&transport, None).fetch_withdrawals(&CancelToken::new())).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "75");
}

#[test]
fn path_parameters_are_encoded() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "data": [] }));
    let rows = block_on(client(&transport, None).fetch_referral_history("AB/12", &CancelToken::new())).unwrap();
    assert!(rows.is_empty());
    assert!(transport.sent()[0].url.starts_with(&format!("{BASE}/referral/getAllreferral/AB%2F12?_=")));
}

#[test]
fn path_parameters_encode_spaces_as_percent_twenty() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "data": [] }));
    block_on(client(&transport, None).fetch_referral_history("AB 12", &CancelToken::new())).unwrap();
    assert!(transport.sent()[0].url.starts_with(&format!("{BASE}/referral/getAllreferral/AB%2012?_=")));
}

#[test]
fn encode_segment_keeps_unreserved_characters() {
    assert_eq!(encode_segment("s1-abc_9.x~"), "s1-abc_9.x~");
    assert_eq!(encode_segment("a b/c?d#e"), "a%20b%2Fc%3Fd%23e");
}

#[test]
fn users_accept_unquoted_phone_numbers() {
    let transport = FakeTransport::new();
    transport.reply_json(
        200,
        json!({ "users": [{ "_id": "u1", "email": "asha@example.com", "phone": 9876543210_u64, "role": "student" }]}),
    );
    let users = block_on(client(&transport, None).fetch_users(&CancelToken::new())).unwrap();
    assert_eq!(users[0].phone.as_deref(), Some("9876543210"));
    assert_eq!(users[0].email.as_deref(), Some("asha@example.com"));
}

#[test]
fn login_accepts_unquoted_phone_number() {
    let transport = FakeTransport::new();
    transport.reply_json(
        200,
        json!({ "token": "t1", "user": { "_id": "s9", "email": "ravi@example.com", "phone": 9123456789_u64 } }),
    );
    let creds = LoginRequest { email: "ravi@example.com".to_owned(), phone: "9123456789".to_owned() };
    let resp = block_on(client(&transport, None).login(&creds, &CancelToken::new())).unwrap();
    let user = resp.user.unwrap();
    assert_eq!(user.phone.as_deref(), Some("9123456789"));
    assert_eq!(user.id.as_deref(), Some("s9"));
}

#[test]
fn cancelled_token_short_circuits_before_send() {
    let transport = FakeTransport::new();
    let token = CancelToken::new();
    token.cancel();
    let err = block_on(client(&transport, None).fetch_users(&token)).unwrap_err();
    assert!(err.is_cancelled());
    assert!(transport.sent().is_empty());
}

#[test]
fn cancellation_during_flight_discards_response() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "users": [] }));
    let token = CancelToken::new();
    transport.cancel_on_send(&token);
    let err = block_on(client(&transport, None).fetch_users(&token)).unwrap_err();
    assert_eq!(err, ApiError::Cancelled);
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn shape_mismatch_is_a_decode_error() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "token": 42 }));
    let creds = LoginRequest { email: "a@b.com".to_owned(), phone: "9".to_owned() };
    let err = block_on(client(&transport, None).login(&creds, &CancelToken::new())).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn student_stats_hit_details_endpoint() {
    let transport = FakeTransport::new();
    transport.reply_json(200, json!({ "totalStudents": 4, "todayStudents": 1, "totalReward": 8 }));
    let stats = block_on(client(&transport, None).fetch_student_stats("s1", &CancelToken::new())).unwrap();
    assert_eq!(stats.total_entries, 4.0);
    assert!(transport.sent()[0].url.starts_with(&format!("{BASE}/user/s1/details?_=")));
}
