//! HTTP client for todolist API requests.
//!
//! This module provides a low-level HTTP client wrapper that attaches the API
//! key and session token to every request and decodes JSON responses.

use super::error::ApiError;
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Makes requests to the API and tries to conform response data to the given type.
///
pub struct Client {
    base_url: String,
    api_key: Option<String>,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional API key.
    ///
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, ApiError> {
        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.map(str::to_owned),
            token: None,
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// Replace the bearer token sent with subsequent requests.
    ///
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Make request with optional JSON body and decode the response body.
    ///
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let request_url = format!("{}/{}", self.base_url, path);
        log::trace!("{} {}", method, request_url);

        let mut request = self.http_client.request(method, &request_url);
        if let Some(api_key) = &self.api_key {
            request = request.header("API-KEY", api_key);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        // Check status before trying to deserialize
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("Unable to read response"));
            log::error!("API request failed with status {}: {}", status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let response_bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&response_bytes).map_err(|e| {
            log::error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&response_bytes)
            );
            ApiError::Deserialization(e)
        })
    }
}
