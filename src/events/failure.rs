//! Translation of failed requests into global status updates.

use crate::api::{ApiError, BaseResponse};
use crate::state::{AppAction, RequestStatus, State};
use log::*;

/// Message shown when the server reports a failure without one.
pub const DEFAULT_ERROR_MESSAGE: &str = "Some error occurred";

/// Record an application-level failure: first server message (or the default),
/// per-field validation messages, and a failed status.
///
pub fn handle_server_app_error(response: &BaseResponse, state: &mut State) {
    let message = response
        .messages
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
    warn!(
        "Server rejected request with result code {:?}: {}",
        response.result_code, message
    );
    state
        .dispatch(AppAction::SetError(Some(message)))
        .dispatch(AppAction::SetFieldErrors(response.fields_errors.clone()))
        .dispatch(AppAction::SetStatus(RequestStatus::Failed));
}

/// Record a transport-level failure using the error's own description. Field
/// errors only come with application failures, so any earlier ones are dropped.
///
pub fn handle_server_network_error(error: &ApiError, state: &mut State) {
    error!("Request failed: {}", error);
    state
        .dispatch(AppAction::SetError(Some(error.to_string())))
        .dispatch(AppAction::SetFieldErrors(Vec::new()))
        .dispatch(AppAction::SetStatus(RequestStatus::Failed));
}
