mod client;
mod error;
mod models;

pub use error::ApiError;
pub use models::*;

use client::Client;
use log::*;
use reqwest::Method;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://social-network.samuraijs.com/api/1.1";

/// Responsible for asynchronous interaction with the todolist API including
/// transformation of response data into explicitly-defined types.
///
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given base URL and optional API key.
    ///
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Api, ApiError> {
        debug!("Initializing API client for {}...", base_url);
        Ok(Api {
            client: Client::new(base_url, api_key)?,
        })
    }

    /// Install or drop the session token used for authorization.
    ///
    pub fn set_token(&mut self, token: Option<String>) {
        self.client.set_token(token);
    }

    pub fn has_token(&self) -> bool {
        self.client.has_token()
    }

    /// Returns the current session details, if any.
    ///
    pub async fn me(&self) -> Result<BaseResponse, ApiError> {
        debug!("Requesting session details...");
        self.client.call(Method::GET, "auth/me", None).await
    }

    pub async fn login(&self, args: &LoginArgs) -> Result<BaseResponse, ApiError> {
        debug!("Requesting login for {}...", args.email);
        let body = serde_json::to_value(args)?;
        self.client.call(Method::POST, "auth/login", Some(body)).await
    }

    pub async fn logout(&self) -> Result<BaseResponse, ApiError> {
        debug!("Requesting logout...");
        self.client.call(Method::DELETE, "auth/login", None).await
    }

    /// Returns every todo-list of the session in server order. This endpoint
    /// has no result-code envelope.
    ///
    pub async fn get_todolists(&self) -> Result<Vec<Todolist>, ApiError> {
        debug!("Requesting todo-lists...");
        let todolists: Vec<Todolist> = self.client.call(Method::GET, "todo-lists", None).await?;
        debug!("Retrieved {} todo-lists", todolists.len());
        Ok(todolists)
    }

    pub async fn create_todolist(&self, title: &str) -> Result<BaseResponse, ApiError> {
        debug!("Creating todo-list '{}'...", title);
        self.client
            .call(Method::POST, "todo-lists", Some(json!({ "title": title })))
            .await
    }

    pub async fn update_todolist(&self, id: &str, title: &str) -> Result<BaseResponse, ApiError> {
        debug!("Renaming todo-list {} to '{}'...", id, title);
        self.client
            .call(
                Method::PUT,
                &format!("todo-lists/{}", id),
                Some(json!({ "title": title })),
            )
            .await
    }

    pub async fn delete_todolist(&self, id: &str) -> Result<BaseResponse, ApiError> {
        debug!("Deleting todo-list {}...", id);
        self.client
            .call(Method::DELETE, &format!("todo-lists/{}", id), None)
            .await
    }
}
