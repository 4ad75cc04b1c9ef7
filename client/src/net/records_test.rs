use super::*;
use serde_json::json;

// =============================================================
// WithdrawalRow
// =============================================================

#[test]
fn withdrawal_row_falls_back_to_nested_user_and_epoch_seconds() {
    let record = json!({
        "_id": "w1",
        "amount": 150,
        "status": "pending",
        "user": { "email": "a@b.com" },
        "createdAt": 1_700_000_000
    });
    let row = WithdrawalRow::from_record(&record);
    assert_eq!(row.email, "a@b.com");
    assert_eq!(row.date, "15/11/2023, 03:43:20 am");
    assert_eq!(row.phone, "");
    assert_eq!(row.id, "w1");
    assert_eq!(row.amount, "150");
}

#[test]
fn withdrawal_row_prefers_request_id_and_flat_contact() {
    let record = json!({
        "requestId": "REQ-7",
        "_id": "doc",
        "email": "flat@x.com",
        "mobile": "9000000000",
        "user": { "email": "nested@x.com", "phone": "1" },
        "date": "2024-01-05T10:00:00Z"
    });
    let row = WithdrawalRow::from_record(&record);
    assert_eq!(row.id, "REQ-7");
    assert_eq!(row.email, "flat@x.com");
    assert_eq!(row.phone, "9000000000");
    assert_eq!(row.date, "05/01/2024, 03:30:00 pm");
}

#[test]
fn withdrawal_row_reads_requested_by_last() {
    let record = json!({ "requestedBy": { "userEmail": "rb@x.com", "userPhone": "12" } });
    let row = WithdrawalRow::from_record(&record);
    assert_eq!(row.email, "rb@x.com");
    assert_eq!(row.phone, "12");
}

#[test]
fn withdrawal_row_uses_placeholders_when_empty() {
    let row = WithdrawalRow::from_record(&json!({}));
    assert_eq!(row.id, MISSING);
    assert_eq!(row.amount, MISSING);
    assert_eq!(row.status, MISSING);
    assert_eq!(row.email, MISSING);
    assert_eq!(row.date, MISSING);
}

#[test]
fn withdrawal_row_keeps_string_amounts_and_zero() {
    assert_eq!(WithdrawalRow::from_record(&json!({ "amount": "200" })).amount, "200");
    assert_eq!(WithdrawalRow::from_record(&json!({ "amount": 0 })).amount, "0");
}

#[test]
fn withdrawal_row_echoes_opaque_dates() {
    let row = WithdrawalRow::from_record(&json!({ "timestamp": "yesterday" }));
    assert_eq!(row.date, "yesterday");
}

// =============================================================
// ReferralRow
// =============================================================

#[test]
fn referral_row_prefers_friend_fields() {
    let record = json!({
        "friendName": "Ravi",
        "name": "ignored",
        "friendEmail": "ravi@x.com",
        "phone": "98",
        "date": 1_700_000_000
    });
    let row = ReferralRow::from_record(&record);
    assert_eq!(row.name, "Ravi");
    assert_eq!(row.email, "ravi@x.com");
    assert_eq!(row.phone, "98");
    assert_eq!(row.display_date(), "15/11/2023");
}

#[test]
fn referral_row_status_defaults_to_success() {
    assert_eq!(ReferralRow::from_record(&json!({})).status, DEFAULT_REFERRAL_STATUS);
    assert_eq!(ReferralRow::from_record(&json!({ "status": "Pending" })).status, "Pending");
}

// =============================================================
// StudentStats / referral code
// =============================================================

#[test]
fn student_stats_read_primary_then_nested_user() {
    let stats = StudentStats::from_record(&json!({
        "todayStudents": 3,
        "user": { "studentCount": 12, "reward": 24 }
    }));
    assert_eq!(stats, StudentStats { total_entries: 12.0, today_entries: 3.0, total_earnings: 24.0 });
}

#[test]
fn student_stats_zero_out_non_numeric_values() {
    let stats = StudentStats::from_record(&json!({ "totalStudents": "many", "totalReward": "10" }));
    assert_eq!(stats.total_entries, 0.0);
    assert_eq!(stats.total_earnings, 10.0);
}

#[test]
fn referral_code_from_checks_envelopes_in_order() {
    assert_eq!(referral_code_from(&json!({ "data": { "referralCode": "D1" } })), Some("D1".to_owned()));
    assert_eq!(
        referral_code_from(&json!({ "referralCode": "TOP", "user": { "referralCode": "U1" } })),
        Some("TOP".to_owned())
    );
    assert_eq!(referral_code_from(&json!({})), None);
}

// =============================================================
// User list ordering
// =============================================================

fn user(id: &str, created_at: Option<serde_json::Value>) -> UserRecord {
    UserRecord { id: Some(id.to_owned()), created_at, ..UserRecord::default() }
}

#[test]
fn users_sort_newest_first_with_missing_last() {
    let mut users = vec![
        user("old", Some(json!("2023-01-01T00:00:00Z"))),
        user("none", None),
        user("new", Some(json!("2024-06-01T00:00:00Z"))),
        user("mid", Some(json!(1_690_000_000))),
    ];
    sort_users_newest_first(&mut users);
    let order: Vec<_> = users.iter().map(|u| u.id.clone().unwrap()).collect();
    assert_eq!(order, ["new", "mid", "old", "none"]);
}

#[test]
fn display_number_trims_whole_values() {
    assert_eq!(display_number(5.0), "5");
    assert_eq!(display_number(2.5), "2.5");
}
