//! Typed calls against the Placify Connect backend.
//!
//! `ApiClient` is generic over the `Transport` so the whole request
//! lifecycle (URL building, headers, cancellation checks, JSON/HTTP error
//! mapping, decoding) runs identically in the browser and in tests.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. The cancellation token is
//! checked before sending and again when the response arrives, so a torn
//! down view never receives a result, only `ApiError::Cancelled`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::http::{self, CancelToken, HttpRequest, Method, Transport};
use super::records::{self, ReferralRow, StudentStats, WithdrawalRow};
use super::types::{
    AddStudentResponse, LoginRequest, LoginResponse, MessageResponse, PlatformSettings, ReferralSharePayload,
    SettingsUpdate, SettingsUpdateResponse, StudentApplication, UserRecord, WithdrawalPayload,
};
use crate::config::ClientConfig;
use crate::util::fields;

pub const LOGIN_PATH: &str = "/user/login";
pub const SETTINGS_PATH: &str = "/user/settings";
pub const UPDATE_SETTINGS_PATH: &str = "/user/updatesetting";
pub const USERS_PATH: &str = "/user/getallusers";
pub const ADD_STUDENT_PATH: &str = "/user/addstudent";
pub const WITHDRAWALS_PATH: &str = "/withdraw/all";
pub const WITHDRAW_PATH: &str = "/withdraw/amount";
pub const REFERRAL_SHARE_PATH: &str = "/referral/share";

/// Percent-encode one path segment (space as `%20`, `/` as `%2F`).
fn encode_segment(raw: &str) -> String {
    let Ok(mut url) = url::Url::parse("http://segment.invalid/") else {
        return url::form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(raw);
    }
    url.path().trim_start_matches('/').to_owned()
}

fn student_details_path(student_id: &str) -> String {
    format!("/user/{}/details", encode_segment(student_id))
}

fn referral_history_path(code: &str) -> String {
    format!("/referral/getAllreferral/{}", encode_segment(code))
}

/// Backend client bound to one base URL and (optionally) one bearer token.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    base_url: Option<String>,
    token: Option<String>,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: &ClientConfig, token: Option<String>, transport: T) -> Self {
        Self { base_url: config.api_base_url.clone(), token, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<String>,
        cancel: &CancelToken,
    ) -> Result<Value, ApiError> {
        cancel.check()?;
        let base = self.base_url.as_deref().ok_or(ApiError::Config)?;
        let cache_buster = (method == Method::Get).then(http::now_millis);
        let request = HttpRequest {
            method,
            url: http::build_url(base, path, query, cache_buster)?,
            headers: http::build_headers(self.token.as_deref(), body.is_some()),
            body,
            no_store: true,
        };
        let sent = self.transport.send(request).await;
        cancel.check()?;
        http::interpret_response(&sent?)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Any `ApiError`; `Cancelled` when `cancel` fires first.
    pub async fn load_value(&self, path: &str, query: &[(&str, &str)], cancel: &CancelToken) -> Result<Value, ApiError> {
        self.request(Method::Get, path, query, None, cancel).await
    }

    /// `GET` and decode a JSON resource.
    ///
    /// # Errors
    ///
    /// Any `ApiError`; `Decode` when the JSON does not fit `R`.
    pub async fn load<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cancel: &CancelToken,
    ) -> Result<R, ApiError> {
        decode(self.load_value(path, query, cancel).await?)
    }

    /// Send a JSON body and decode the server's canonical response.
    ///
    /// # Errors
    ///
    /// Any `ApiError`; `Decode` when the JSON does not fit `R`.
    pub async fn submit<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: &B,
        cancel: &CancelToken,
    ) -> Result<R, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        decode(self.request(method, path, &[], Some(body), cancel).await?)
    }

    // ---------------- Session ----------------

    /// `POST /user/login`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn login(&self, credentials: &LoginRequest, cancel: &CancelToken) -> Result<LoginResponse, ApiError> {
        self.submit(LOGIN_PATH, Method::Post, credentials, cancel).await
    }

    // ---------------- Admin ----------------

    /// `GET /user/settings`; accepts the bare snapshot or `{ settings }`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn fetch_settings(&self, cancel: &CancelToken) -> Result<PlatformSettings, ApiError> {
        let value = self.load_value(SETTINGS_PATH, &[], cancel).await?;
        decode(fields::unwrap_object(value, "settings"))
    }

    /// `PUT /user/updatesetting`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn update_settings(
        &self,
        update: &SettingsUpdate,
        cancel: &CancelToken,
    ) -> Result<SettingsUpdateResponse, ApiError> {
        self.submit(UPDATE_SETTINGS_PATH, Method::Put, update, cancel).await
    }

    /// `GET /user/getallusers`, newest accounts first.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn fetch_users(&self, cancel: &CancelToken) -> Result<Vec<UserRecord>, ApiError> {
        let value = self.load_value(USERS_PATH, &[], cancel).await?;
        let mut users = fields::unwrap_list(value, records::USER_LIST_KEYS)
            .into_iter()
            .map(decode::<UserRecord>)
            .collect::<Result<Vec<_>, _>>()?;
        records::sort_users_newest_first(&mut users);
        Ok(users)
    }

    /// `GET /withdraw/all`, resolved into display rows.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn fetch_withdrawals(&self, cancel: &CancelToken) -> Result<Vec<WithdrawalRow>, ApiError> {
        let value = self.load_value(WITHDRAWALS_PATH, &[], cancel).await?;
        Ok(fields::unwrap_list(value, records::WITHDRAWAL_LIST_KEYS)
            .iter()
            .map(WithdrawalRow::from_record)
            .collect())
    }

    // ---------------- Student ----------------

    /// `GET /user/:studentId/details`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn fetch_student_stats(&self, student_id: &str, cancel: &CancelToken) -> Result<StudentStats, ApiError> {
        let value = self.load_value(&student_details_path(student_id), &[], cancel).await?;
        Ok(StudentStats::from_record(&value))
    }

    /// `POST /user/addstudent`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn add_student(
        &self,
        application: &StudentApplication,
        cancel: &CancelToken,
    ) -> Result<AddStudentResponse, ApiError> {
        self.submit(ADD_STUDENT_PATH, Method::Post, application, cancel).await
    }

    /// `POST /withdraw/amount`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn request_withdrawal(
        &self,
        payload: &WithdrawalPayload,
        cancel: &CancelToken,
    ) -> Result<MessageResponse, ApiError> {
        self.submit(WITHDRAW_PATH, Method::Post, payload, cancel).await
    }

    // ---------------- Referral ----------------

    /// `GET /referral/share`: fallback lookup of the caller's referral code.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn fetch_referral_code(&self, cancel: &CancelToken) -> Result<Option<String>, ApiError> {
        let value = self.load_value(REFERRAL_SHARE_PATH, &[], cancel).await?;
        Ok(records::referral_code_from(&value))
    }

    /// `POST /referral/share`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn share_referral(
        &self,
        payload: &ReferralSharePayload,
        cancel: &CancelToken,
    ) -> Result<MessageResponse, ApiError> {
        self.submit(REFERRAL_SHARE_PATH, Method::Post, payload, cancel).await
    }

    /// `GET /referral/getAllreferral/:code`.
    ///
    /// # Errors
    ///
    /// Any `ApiError`.
    pub async fn fetch_referral_history(&self, code: &str, cancel: &CancelToken) -> Result<Vec<ReferralRow>, ApiError> {
        let value = self.load_value(&referral_history_path(code), &[], cancel).await?;
        Ok(fields::unwrap_list(value, records::REFERRAL_LIST_KEYS)
            .iter()
            .map(ReferralRow::from_record)
            .collect())
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Client wired to the browser's Fetch API.
pub type BrowserApi = ApiClient<http::BrowserTransport>;

/// Build a browser client for the current configuration and session token.
pub fn browser_api(config: &ClientConfig, token: Option<String>) -> BrowserApi {
    ApiClient::new(config, token, http::BrowserTransport::default())
}
