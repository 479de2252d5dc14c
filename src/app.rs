use crate::api::Api;
use crate::config::Config;
use crate::error::AppResult;
use crate::events::network::{Event, Handler, Outcome};
use crate::state::{Action, State};
use crate::storage::{FileStorage, Storage, TOKEN_KEY};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Oversees event processing and state management.
///
pub struct App {
    state: Arc<Mutex<State>>,
    api: Api,
    storage: Box<dyn Storage>,
}

impl App {
    /// Build the application according to the given configuration, restoring
    /// a previously persisted session token.
    ///
    pub fn new(config: &Config) -> AppResult<App> {
        let storage = FileStorage::new(config.dir_path());
        let api = Api::new(&config.base_url, config.api_key.as_deref())?;
        App::with_parts(api, Box::new(storage))
    }

    /// Build the application from an existing client and storage.
    ///
    pub fn with_parts(mut api: Api, storage: Box<dyn Storage>) -> AppResult<App> {
        let token = storage.get(TOKEN_KEY)?;
        if token.is_some() {
            debug!("Restored session token from storage.");
        }
        api.set_token(token);
        Ok(App {
            state: Arc::new(Mutex::new(State::new())),
            api,
            storage,
        })
    }

    /// Shared state for selector reads.
    ///
    pub fn state(&self) -> Arc<Mutex<State>> {
        Arc::clone(&self.state)
    }

    /// Run an asynchronous operation to completion.
    ///
    pub async fn dispatch(&mut self, event: Event) -> Outcome {
        Handler::new(&self.state, &mut self.api, self.storage.as_ref())
            .handle(event)
            .await
    }

    /// Apply a synchronous action.
    ///
    pub async fn reduce(&self, action: impl Into<Action>) {
        self.state.lock().await.dispatch(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FilterValues, TodolistsAction};
    use crate::storage::MemoryStorage;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn with_parts_restores_token() -> AppResult<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/auth/me")
                    .header("Authorization", "Bearer stored");
                then.status(200).json_body(json!({
                    "resultCode": 0,
                    "messages": [],
                    "data": { "id": 1, "email": "user@example.com", "login": "user" }
                }));
            })
            .await;

        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "stored")?;
        let mut app = App::with_parts(Api::new(&server.base_url(), None)?, Box::new(storage))?;
        assert_eq!(app.dispatch(Event::CheckSession).await, Ok(()));
        assert!(app.state().lock().await.select_is_logged_in());
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn reduce_applies_synchronous_action() -> AppResult<()> {
        let app = App::with_parts(
            Api::new("http://127.0.0.1:1", None)?,
            Box::new(MemoryStorage::new()),
        )?;
        app.reduce(TodolistsAction::ChangeTodolistFilter {
            id: "missing".to_string(),
            filter: FilterValues::Active,
        })
        .await;
        assert!(app.state().lock().await.select_todolists().is_empty());
        Ok(())
    }
}
