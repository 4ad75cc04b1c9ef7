use super::*;
use serde_json::json;

const EMAIL_RULES: FieldRules = &["email", "user.email", "requestedBy.email"];

#[test]
fn lookup_walks_dotted_paths() {
    let record = json!({ "user": { "email": "a@b.com" } });
    assert_eq!(lookup(&record, "user.email"), Some(&json!("a@b.com")));
    assert_eq!(lookup(&record, "user.phone"), None);
    assert_eq!(lookup(&record, "missing.email"), None);
}

#[test]
fn resolve_prefers_earlier_rules() {
    let record = json!({ "email": "flat@x.com", "user": { "email": "nested@x.com" } });
    assert_eq!(resolve_text(&record, EMAIL_RULES), Some("flat@x.com".to_owned()));
}

#[test]
fn resolve_skips_empty_and_null_candidates() {
    let record = json!({
        "email": "",
        "user": { "email": null },
        "requestedBy": { "email": "deep@x.com" }
    });
    assert_eq!(resolve_text(&record, EMAIL_RULES), Some("deep@x.com".to_owned()));
}

#[test]
fn resolve_returns_none_when_nothing_matches() {
    assert_eq!(resolve_text(&json!({ "name": "x" }), EMAIL_RULES), None);
}

#[test]
fn resolve_defined_keeps_zero() {
    let record = json!({ "totalStudents": 0, "user": { "studentCount": 7 } });
    assert_eq!(resolve_count(&record, &["totalStudents", "user.studentCount"]), 0.0);
    assert_eq!(resolve_count(&json!({ "user": { "studentCount": 7 } }), &["totalStudents", "user.studentCount"]), 7.0);
}

#[test]
fn resolve_count_coerces_strings_and_drops_garbage() {
    assert_eq!(resolve_count(&json!({ "n": "12" }), &["n"]), 12.0);
    assert_eq!(resolve_count(&json!({ "n": "abc" }), &["n"]), 0.0);
    assert_eq!(resolve_count(&json!({}), &["n"]), 0.0);
}

#[test]
fn value_number_follows_form_input_coercion() {
    assert_eq!(value_number(&json!(" ")), Some(0.0));
    assert_eq!(value_number(&json!("4.5")), Some(4.5));
    assert_eq!(value_number(&json!(null)), None);
}

#[test]
fn unwrap_list_accepts_bare_arrays_and_envelopes() {
    assert_eq!(unwrap_list(json!([1, 2]), &["users"]).len(), 2);
    assert_eq!(unwrap_list(json!({ "users": [1, 2, 3] }), &["users"]).len(), 3);
    assert_eq!(unwrap_list(json!({ "referrals": [1] }), &["data", "referrals"]).len(), 1);
    assert!(unwrap_list(json!({ "users": "nope" }), &["users"]).is_empty());
    assert!(unwrap_list(json!(null), &["users"]).is_empty());
}

#[test]
fn unwrap_object_reads_envelope_or_passes_through() {
    let wrapped = json!({ "settings": { "rewardPerStudent": 5 } });
    assert_eq!(unwrap_object(wrapped, "settings"), json!({ "rewardPerStudent": 5 }));
    let bare = json!({ "rewardPerStudent": 5 });
    assert_eq!(unwrap_object(bare.clone(), "settings"), bare);
}
