//! Editable form state and local validation for every submitting panel.
//!
//! Each `validate` turns raw input into the exact request body the backend
//! expects, or a plain status message. Failing validation never reaches the
//! network.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use super::draft::{Draft, coerce_number, number_differs};
use crate::net::records::display_number;
use crate::net::types::{
    PlatformSettings, ReferralSharePayload, SettingsUpdate, StudentApplication, WithdrawalPayload,
};

/// Smallest amount a student may withdraw, in rupees.
pub const MIN_WITHDRAWAL: f64 = 50.0;

pub const MAX_PHONE_DIGITS: usize = 15;
pub const ADMISSION_YEAR_DIGITS: usize = 4;

/// How long a success status stays visible.
pub const SUCCESS_STATUS_MS: u32 = 2_000;

// =============================================================
// Settings
// =============================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    RewardPerStudent,
    CooldownSeconds,
    MaxStudentsBeforeBlock,
    BlockDurationMinutes,
}

impl SettingsField {
    pub const ALL: [Self; 4] = [
        Self::RewardPerStudent,
        Self::CooldownSeconds,
        Self::MaxStudentsBeforeBlock,
        Self::BlockDurationMinutes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RewardPerStudent => "Reward per Student (₹)",
            Self::CooldownSeconds => "Cooldown (seconds)",
            Self::MaxStudentsBeforeBlock => "Max Students Before Block",
            Self::BlockDurationMinutes => "Block Duration (minutes)",
        }
    }

    pub fn minimum(self) -> f64 {
        match self {
            Self::RewardPerStudent | Self::CooldownSeconds => 0.0,
            Self::MaxStudentsBeforeBlock | Self::BlockDurationMinutes => 1.0,
        }
    }

    pub fn baseline(self, settings: &PlatformSettings) -> f64 {
        match self {
            Self::RewardPerStudent => settings.reward_per_student,
            Self::CooldownSeconds => settings.cooldown_seconds,
            Self::MaxStudentsBeforeBlock => settings.max_students_before_block,
            Self::BlockDurationMinutes => settings.block_duration_minutes,
        }
    }

    pub fn get(self, draft: &SettingsDraft) -> &str {
        match self {
            Self::RewardPerStudent => &draft.reward_per_student,
            Self::CooldownSeconds => &draft.cooldown_seconds,
            Self::MaxStudentsBeforeBlock => &draft.max_students_before_block,
            Self::BlockDurationMinutes => &draft.block_duration_minutes,
        }
    }

    pub fn set(self, draft: &mut SettingsDraft, value: String) {
        let slot = match self {
            Self::RewardPerStudent => &mut draft.reward_per_student,
            Self::CooldownSeconds => &mut draft.cooldown_seconds,
            Self::MaxStudentsBeforeBlock => &mut draft.max_students_before_block,
            Self::BlockDurationMinutes => &mut draft.block_duration_minutes,
        };
        *slot = value;
    }
}

/// Raw text of the four settings inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsDraft {
    pub reward_per_student: String,
    pub cooldown_seconds: String,
    pub max_students_before_block: String,
    pub block_duration_minutes: String,
}

impl Draft for SettingsDraft {
    type Baseline = PlatformSettings;

    fn from_baseline(baseline: &PlatformSettings) -> Self {
        let mut draft = Self::default();
        for field in SettingsField::ALL {
            field.set(&mut draft, display_number(field.baseline(baseline)));
        }
        draft
    }

    fn differs_from(&self, baseline: &PlatformSettings) -> bool {
        SettingsField::ALL.iter().any(|f| number_differs(f.get(self), f.baseline(baseline)))
    }
}

impl SettingsDraft {
    /// # Errors
    ///
    /// Names the first field that is not a number or is below its minimum.
    pub fn validate(&self) -> Result<SettingsUpdate, String> {
        let mut values = [0.0; 4];
        for (slot, field) in values.iter_mut().zip(SettingsField::ALL) {
            let raw = field.get(self);
            let value = coerce_number(raw);
            if raw.trim().is_empty() || !value.is_finite() {
                return Err(format!("{} must be a number.", field.label()));
            }
            if value < field.minimum() {
                return Err(format!("{} must be at least {}.", field.label(), display_number(field.minimum())));
            }
            *slot = value;
        }
        let [reward_per_student, cooldown_seconds, max_students_before_block, block_duration_minutes] = values;
        Ok(SettingsUpdate { reward_per_student, cooldown_seconds, max_students_before_block, block_duration_minutes })
    }
}

// =============================================================
// Withdrawal
// =============================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalDraft {
    pub name: String,
    pub upi_id: String,
    pub amount: String,
}

impl WithdrawalDraft {
    /// # Errors
    ///
    /// The first failing check, in form order.
    pub fn validate(&self) -> Result<WithdrawalPayload, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter your name.");
        }
        let upi_id = self.upi_id.trim();
        if upi_id.is_empty() {
            return Err("Please enter a valid UPI ID.");
        }
        let amount = coerce_number(&self.amount);
        if !amount.is_finite() || amount < MIN_WITHDRAWAL {
            return Err("Minimum withdrawal amount is ₹50.");
        }
        Ok(WithdrawalPayload { name: name.to_owned(), upi_id: upi_id.to_owned(), amount })
    }
}

// =============================================================
// Referral share
// =============================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferralDraft {
    pub friend_name: String,
    pub friend_email: String,
    pub friend_phone: String,
    /// Code typed by the user; empty means "use my own code".
    pub referral_code: String,
}

impl ReferralDraft {
    /// Code that will be sent: the typed one, else `own_code`.
    pub fn effective_code<'a>(&'a self, own_code: Option<&'a str>) -> Option<&'a str> {
        Some(self.referral_code.trim())
            .filter(|c| !c.is_empty())
            .or_else(|| own_code.map(str::trim).filter(|c| !c.is_empty()))
    }

    /// # Errors
    ///
    /// Every field, including a resolvable referral code, is required.
    pub fn validate(&self, own_code: Option<&str>) -> Result<ReferralSharePayload, &'static str> {
        let missing = [&self.friend_name, &self.friend_email, &self.friend_phone]
            .iter()
            .any(|v| v.trim().is_empty());
        match self.effective_code(own_code) {
            Some(code) if !missing => Ok(ReferralSharePayload {
                friend_name: self.friend_name.trim().to_owned(),
                friend_email: self.friend_email.trim().to_owned(),
                friend_phone: self.friend_phone.trim().to_owned(),
                referral_code: code.to_owned(),
            }),
            _ => Err("Please fill all the details."),
        }
    }
}

// =============================================================
// Student application
// =============================================================

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentField {
    StudentName,
    Dob,
    Gender,
    Phone,
    Email,
    City,
    State,
    CourseApplied,
    AdmissionYear,
    College,
}

impl StudentField {
    pub const ALL: [Self; 10] = [
        Self::StudentName,
        Self::Dob,
        Self::Gender,
        Self::Phone,
        Self::Email,
        Self::City,
        Self::State,
        Self::CourseApplied,
        Self::AdmissionYear,
        Self::College,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::StudentName => "Student Name",
            Self::Dob => "Date of Birth",
            Self::Gender => "Gender",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::City => "City",
            Self::State => "State",
            Self::CourseApplied => "Course Applied",
            Self::AdmissionYear => "Admission Year",
            Self::College => "College",
        }
    }

    pub fn get(self, draft: &StudentDraft) -> &str {
        match self {
            Self::StudentName => &draft.student_name,
            Self::Dob => &draft.dob,
            Self::Gender => &draft.gender,
            Self::Phone => &draft.phone,
            Self::Email => &draft.email,
            Self::City => &draft.city,
            Self::State => &draft.state,
            Self::CourseApplied => &draft.course_applied,
            Self::AdmissionYear => &draft.admission_year,
            Self::College => &draft.college,
        }
    }

    /// Store input, sanitizing the digit-only fields on the way in.
    pub fn set(self, draft: &mut StudentDraft, value: &str) {
        let slot = match self {
            Self::Phone => {
                draft.phone = digits_only(value, MAX_PHONE_DIGITS);
                return;
            }
            Self::AdmissionYear => {
                draft.admission_year = digits_only(value, ADMISSION_YEAR_DIGITS);
                return;
            }
            Self::StudentName => &mut draft.student_name,
            Self::Dob => &mut draft.dob,
            Self::Gender => &mut draft.gender,
            Self::Email => &mut draft.email,
            Self::City => &mut draft.city,
            Self::State => &mut draft.state,
            Self::CourseApplied => &mut draft.course_applied,
            Self::College => &mut draft.college,
        };
        value.clone_into(slot);
    }
}

/// Keep only ASCII digits, at most `max` of them.
pub fn digits_only(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub student_name: String,
    /// `YYYY-MM-DD` from the date input.
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub course_applied: String,
    pub admission_year: String,
    pub college: String,
}

impl StudentDraft {
    /// # Errors
    ///
    /// Names the first empty field, or rejects a malformed admission year.
    pub fn validate(&self) -> Result<StudentApplication, String> {
        if let Some(field) = StudentField::ALL.iter().find(|f| f.get(self).trim().is_empty()) {
            return Err(format!("Please fill in {}.", field.label()));
        }
        if self.admission_year.len() != ADMISSION_YEAR_DIGITS {
            return Err("Admission year must be 4 digits.".to_owned());
        }
        let admission_year = self.admission_year.parse().map_err(|_| "Admission year must be 4 digits.".to_owned())?;
        Ok(StudentApplication {
            student_name: self.student_name.trim().to_owned(),
            dob: self.dob.trim().to_owned(),
            gender: self.gender.trim().to_owned(),
            phone: self.phone.clone(),
            email: self.email.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            course_applied: self.course_applied.trim().to_owned(),
            admission_year: Some(admission_year),
            college: self.college.trim().to_owned(),
        })
    }
}

/// What the form shows after a successful submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreatedStudentInfo {
    pub student_id: Option<String>,
    pub reward: Option<f64>,
}

impl CreatedStudentInfo {
    pub fn from_response(response: &crate::net::types::AddStudentResponse) -> Self {
        let student_id = response
            .student
            .as_ref()
            .and_then(|s| s.student_id.as_ref())
            .and_then(crate::util::fields::value_text);
        Self { student_id, reward: response.reward }
    }
}
