//! Global request status slice.

use super::Slice;
use crate::api::FieldError;
use std::fmt;

/// Progress of the most recent request, globally or per record.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Succeeded => "succeeded",
            RequestStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Single shared status slot written by every asynchronous operation.
///
/// Concurrent operations overwrite each other; the last write wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppState {
    status: RequestStatus,
    error: Option<String>,
    field_errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    SetStatus(RequestStatus),
    SetError(Option<String>),
    SetFieldErrors(Vec<FieldError>),
}

impl AppState {
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }
}

impl Slice for AppState {
    type Action = AppAction;

    fn reduce(&mut self, action: AppAction) {
        match action {
            AppAction::SetStatus(status) => self.status = status,
            AppAction::SetError(error) => self.error = error,
            AppAction::SetFieldErrors(field_errors) => self.field_errors = field_errors,
        }
    }
}
