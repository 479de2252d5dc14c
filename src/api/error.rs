//! API transport error types.

/// Errors that can occur while talking to the todolist API.
///
/// All of these are transport-level failures. Application failures arrive as
/// a decoded `BaseResponse` with a non-zero result code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Request failed with status code {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),
}
