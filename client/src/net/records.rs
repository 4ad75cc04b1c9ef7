//! Display rows resolved from loosely shaped backend records.
//!
//! Each target field is an ordered rule table applied by `util::fields`.
//! Tables are listed most-specific first; the first usable value wins.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use serde_json::Value;

use super::types::UserRecord;
use crate::util::date::{self, MISSING};
use crate::util::fields::{self, FieldRules};

pub const WITHDRAWAL_ID_RULES: FieldRules = &["requestId", "_id", "id"];

pub const WITHDRAWAL_EMAIL_RULES: FieldRules = &[
    "email",
    "userEmail",
    "contactEmail",
    "user.email",
    "user.userEmail",
    "requestedBy.email",
    "requestedBy.userEmail",
];

pub const WITHDRAWAL_PHONE_RULES: FieldRules = &[
    "phone",
    "mobile",
    "userPhone",
    "user.phone",
    "user.mobile",
    "user.userPhone",
    "requestedBy.phone",
    "requestedBy.mobile",
    "requestedBy.userPhone",
];

pub const WITHDRAWAL_DATE_RULES: FieldRules =
    &["date", "createdAt", "created_on", "requestedAt", "timestamp", "updatedAt"];

pub const REFERRAL_NAME_RULES: FieldRules = &["friendName", "name"];
pub const REFERRAL_EMAIL_RULES: FieldRules = &["friendEmail", "email"];
pub const REFERRAL_PHONE_RULES: FieldRules = &["friendPhone", "phone"];
pub const REFERRAL_DATE_RULES: FieldRules = &["createdAt", "date", "updatedAt"];
pub const REFERRAL_STATUS_RULES: FieldRules = &["status"];

/// Status shown for recorded referrals when the backend does not report one.
pub const DEFAULT_REFERRAL_STATUS: &str = "Success";

pub const REFERRAL_CODE_RULES: FieldRules = &["referralCode", "data.referralCode", "user.referralCode"];

pub const STATS_TOTAL_RULES: FieldRules = &["totalStudents", "user.studentCount"];
pub const STATS_TODAY_RULES: FieldRules = &["todayStudents"];
pub const STATS_EARNINGS_RULES: FieldRules = &["totalReward", "user.reward"];

/// Envelope keys that may wrap each list endpoint's array.
pub const USER_LIST_KEYS: &[&str] = &["users"];
pub const WITHDRAWAL_LIST_KEYS: &[&str] = &["requests"];
pub const REFERRAL_LIST_KEYS: &[&str] = &["data", "referrals"];

/// One admin withdrawal-table row.
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawalRow {
    pub id: String,
    pub amount: String,
    pub status: String,
    pub email: String,
    /// Empty when no phone is known; the cell then shows only the email.
    pub phone: String,
    pub date: String,
}

impl WithdrawalRow {
    pub fn from_record(record: &Value) -> Self {
        let amount = match record.get("amount") {
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => fields::is_truthy(other)
                .then(|| fields::value_text(other))
                .flatten()
                .unwrap_or_else(|| MISSING.to_owned()),
            None => MISSING.to_owned(),
        };
        Self {
            id: fields::resolve_text(record, WITHDRAWAL_ID_RULES).unwrap_or_else(|| MISSING.to_owned()),
            amount,
            status: fields::resolve_text(record, &["status"]).unwrap_or_else(|| MISSING.to_owned()),
            email: fields::resolve_text(record, WITHDRAWAL_EMAIL_RULES).unwrap_or_else(|| MISSING.to_owned()),
            phone: fields::resolve_text(record, WITHDRAWAL_PHONE_RULES).unwrap_or_default(),
            date: date::normalize_date(fields::resolve(record, WITHDRAWAL_DATE_RULES)),
        }
    }
}

/// One referral-history row.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferralRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    /// Raw date value; rendered with `normalize_day` at display time.
    pub created_at: Option<Value>,
}

impl ReferralRow {
    pub fn from_record(record: &Value) -> Self {
        Self {
            name: fields::resolve_text(record, REFERRAL_NAME_RULES).unwrap_or_default(),
            email: fields::resolve_text(record, REFERRAL_EMAIL_RULES).unwrap_or_default(),
            phone: fields::resolve_text(record, REFERRAL_PHONE_RULES).unwrap_or_default(),
            status: fields::resolve_text(record, REFERRAL_STATUS_RULES)
                .unwrap_or_else(|| DEFAULT_REFERRAL_STATUS.to_owned()),
            created_at: fields::resolve(record, REFERRAL_DATE_RULES).cloned(),
        }
    }

    pub fn display_date(&self) -> String {
        date::normalize_day(self.created_at.as_ref())
    }
}

/// Per-student aggregates shown in the navbar stats bar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StudentStats {
    pub total_entries: f64,
    pub today_entries: f64,
    pub total_earnings: f64,
}

impl StudentStats {
    pub fn from_record(record: &Value) -> Self {
        Self {
            total_entries: fields::resolve_count(record, STATS_TOTAL_RULES),
            today_entries: fields::resolve_count(record, STATS_TODAY_RULES),
            total_earnings: fields::resolve_count(record, STATS_EARNINGS_RULES),
        }
    }
}

/// Referral code from a `GET /referral/share` response, if any.
pub fn referral_code_from(record: &Value) -> Option<String> {
    fields::resolve_text(record, REFERRAL_CODE_RULES)
}

/// Newest accounts first; accounts without a creation time sort last.
pub fn sort_users_newest_first(users: &mut [UserRecord]) {
    users.sort_by_key(|u| std::cmp::Reverse(date::sort_key(u.created_at.as_ref())));
}

/// Render a number without a trailing `.0` for whole values.
pub fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 { format!("{n:.0}") } else { n.to_string() }
}
