//! Wire types exchanged with the todolist API.

use super::error::ApiError;
use fake::Dummy;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application-level outcome embedded in every enveloped response body.
///
/// Distinct from the HTTP status: the server answers `200 OK` and reports
/// validation or authorization failures through this code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ResultCode {
    Success,
    Error,
    CaptchaError,
    Other(i32),
}

impl ResultCode {
    /// Only `0` counts as success. Every other code is an application failure.
    ///
    pub fn is_success(self) -> bool {
        self == ResultCode::Success
    }
}

impl From<i32> for ResultCode {
    fn from(code: i32) -> Self {
        match code {
            0 => ResultCode::Success,
            1 => ResultCode::Error,
            10 => ResultCode::CaptchaError,
            other => ResultCode::Other(other),
        }
    }
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Success => 0,
            ResultCode::Error => 1,
            ResultCode::CaptchaError => 10,
            ResultCode::Other(other) => other,
        }
    }
}

/// Validation message attached to a single input field.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Envelope returned by every endpoint except the todo-list listing.
///
/// `data` stays untyped until the caller has checked `result_code`: failed
/// responses carry `{}` where the success payload would be.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    pub result_code: ResultCode,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub fields_errors: Vec<FieldError>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl BaseResponse {
    /// Decode the payload of a successful response.
    ///
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Defines todo-list data structure as stored by the server.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: String,
    pub title: String,
    pub added_date: String,
    pub order: i64,
}

/// Credentials accepted by the login endpoint.
///
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

impl fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginArgs")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .field("captcha", &self.captcha)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: i64,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MeData {
    pub id: i64,
    pub email: String,
    pub login: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CreateTodolistData {
    pub item: Todolist,
}
