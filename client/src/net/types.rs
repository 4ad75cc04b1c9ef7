//! Wire DTOs for the Placify Connect backend.
//!
//! DESIGN
//! ======
//! Request bodies are strict and serialize exactly the camelCase keys the
//! backend expects. Response types are lenient: every field is optional or
//! defaulted and numbers may arrive as strings, because the backend has
//! shipped several shapes for the same endpoint. Records whose key names
//! vary between endpoints are kept as raw JSON and resolved in `records`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// `POST /user/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub phone: String,
}

/// `POST /user/login` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The account embedded in a login response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    /// Backend document id; doubles as the student id.
    #[serde(rename = "_id", default, deserialize_with = "deserialize_opt_string_lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub referral_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub student_count: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub reward: Option<f64>,
}

/// Platform settings snapshot from `GET /user/settings`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettings {
    /// Reward credited per submitted student, in rupees.
    #[serde(default, deserialize_with = "deserialize_f64_lenient")]
    pub reward_per_student: f64,
    /// Minimum gap between two submissions.
    #[serde(default, deserialize_with = "deserialize_f64_lenient")]
    pub cooldown_seconds: f64,
    /// Submissions allowed before a temporary block kicks in.
    #[serde(default, deserialize_with = "deserialize_f64_lenient")]
    pub max_students_before_block: f64,
    /// Length of the temporary block.
    #[serde(default, deserialize_with = "deserialize_f64_lenient")]
    pub block_duration_minutes: f64,
    /// Last server-side modification, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<serde_json::Value>,
}

/// `PUT /user/updatesetting` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub reward_per_student: f64,
    pub cooldown_seconds: f64,
    pub max_students_before_block: f64,
    pub block_duration_minutes: f64,
}

/// `PUT /user/updatesetting` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SettingsUpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub settings: Option<PlatformSettings>,
}

/// One row of `GET /user/getallusers`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", default, deserialize_with = "deserialize_opt_string_lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub reward: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub student_count: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub referral_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string_lenient")]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<serde_json::Value>,
}

impl UserRecord {
    /// Stable row key: the document id, else email + phone.
    pub fn row_key(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            format!(
                "{}-{}",
                self.email.as_deref().unwrap_or_default(),
                self.phone.as_deref().unwrap_or_default()
            )
        })
    }
}

/// `POST /user/addstudent` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentApplication {
    pub student_name: String,
    /// `YYYY-MM-DD`.
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub course_applied: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_year: Option<u32>,
    pub college: String,
}

/// `POST /user/addstudent` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AddStudentResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub student: Option<CreatedStudent>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub reward: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStudent {
    #[serde(default)]
    pub student_id: Option<serde_json::Value>,
}

/// `POST /withdraw/amount` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPayload {
    pub name: String,
    pub upi_id: String,
    pub amount: f64,
}

/// `POST /referral/share` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSharePayload {
    pub friend_name: String,
    pub friend_email: String,
    pub friend_phone: String,
    pub referral_code: String,
}

/// Any response that only carries an optional human-readable message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Accept a number, a numeric string, or null/blank (as zero).
fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_f64_lenient(deserializer)?.unwrap_or(0.0))
}

fn deserialize_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected finite number")),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected numeric string, got {s:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}

/// Accept a string, or a bare number/bool rendered as text. Phones and ids
/// sometimes arrive unquoted.
fn deserialize_opt_string_lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        serde_json::Value::Bool(flag) => Ok(Some(flag.to_string())),
        _ => Err(D::Error::custom("expected string")),
    }
}
