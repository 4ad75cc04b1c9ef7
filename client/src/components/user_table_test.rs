use super::*;
use serde_json::json;

#[test]
fn row_renders_known_fields() {
    let user = UserRecord {
        id: Some("u1".to_owned()),
        email: Some("asha@x.com".to_owned()),
        phone: Some("90".to_owned()),
        reward: Some(12.0),
        student_count: Some(6.0),
        referral_code: Some("ASH6".to_owned()),
        role: Some("student".to_owned()),
        created_at: Some(json!("2024-01-05T10:00:00Z")),
    };
    let row = UserRow::from_record(&user);
    assert_eq!(row.key, "u1");
    assert_eq!(row.reward, "12");
    assert_eq!(row.students, "6");
    assert_eq!(row.created, "05/01/2024, 03:30:00 pm");
}

#[test]
fn row_uses_placeholders_for_missing_fields() {
    let row = UserRow::from_record(&UserRecord::default());
    assert_eq!(row.email, "-");
    assert_eq!(row.phone, "-");
    assert_eq!(row.reward, "-");
    assert_eq!(row.students, "-");
    assert_eq!(row.referral_code, "-");
    assert_eq!(row.role, "-");
    assert_eq!(row.created, "-");
}

#[test]
fn zero_reward_is_shown_not_hidden() {
    let user = UserRecord { reward: Some(0.0), ..UserRecord::default() };
    assert_eq!(UserRow::from_record(&user).reward, "0");
}

#[test]
fn key_falls_back_to_contact() {
    let user = UserRecord { email: Some("a@b.com".to_owned()), phone: Some("1".to_owned()), ..UserRecord::default() };
    assert_eq!(UserRow::from_record(&user).key, "a@b.com-1");
}
