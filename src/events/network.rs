use super::failure::{handle_server_app_error, handle_server_network_error};
use crate::api::{Api, ApiError, BaseResponse, CreateTodolistData, LoginArgs, LoginData};
use crate::state::{Action, AppAction, AuthAction, RequestStatus, State, TodolistsAction};
use crate::storage::{Storage, TOKEN_KEY};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Payload-free rejection of an asynchronous operation. By the time it is
/// returned the failure has already been written to the global status.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Operation rejected")]
pub struct Rejected;

pub type Outcome = Result<(), Rejected>;

/// Specify different network event types.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CheckSession,
    Login(LoginArgs),
    Logout,
    FetchTodolists,
    AddTodolist { title: String },
    RemoveTodolist { id: String },
    UpdateTodolistTitle { id: String, title: String },
}

/// Specify struct for managing state with network events.
///
/// The state lock is taken only around reducer dispatches, never across a
/// request, so independent operations interleave at the network boundary.
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a mut Api,
    storage: &'a dyn Storage,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(
        state: &'a Arc<Mutex<State>>,
        api: &'a mut Api,
        storage: &'a dyn Storage,
    ) -> Self {
        Handler {
            state,
            api,
            storage,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Outcome {
        debug!("Processing network event '{:?}'...", event);
        let outcome = match event {
            Event::CheckSession => self.check_session().await,
            Event::Login(args) => self.login(args).await,
            Event::Logout => self.logout().await,
            Event::FetchTodolists => self.fetch_todolists().await,
            Event::AddTodolist { title } => self.add_todolist(title).await,
            Event::RemoveTodolist { id } => self.remove_todolist(id).await,
            Event::UpdateTodolistTitle { id, title } => {
                self.update_todolist_title(id, title).await
            }
        };
        if outcome.is_err() {
            debug!("Network event rejected.");
        }
        outcome
    }

    /// Confirm whether the stored session is still valid. Marks the
    /// application initialized whatever the outcome.
    ///
    pub async fn check_session(&mut self) -> Outcome {
        info!("Checking session...");
        let outcome = self.me().await;
        self.dispatch(AuthAction::Initialized).await;
        outcome
    }

    async fn me(&mut self) -> Outcome {
        self.begin_request().await;
        match self.api.me().await {
            Ok(response) if response.result_code.is_success() => {
                let mut state = self.state.lock().await;
                state
                    .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
                    .dispatch(AuthAction::SetIsLoggedIn(true));
                info!("Session is active.");
                Ok(())
            }
            Ok(response) => self.reject_app_error(&response).await,
            Err(e) => self.reject_network_error(&e).await,
        }
    }

    /// Log in and persist the issued session token.
    ///
    pub async fn login(&mut self, args: LoginArgs) -> Outcome {
        info!("Logging in as {}...", args.email);
        self.begin_request().await;
        let response = match self.api.login(&args).await {
            Ok(response) => response,
            Err(e) => return self.reject_network_error(&e).await,
        };
        if !response.result_code.is_success() {
            return self.reject_app_error(&response).await;
        }
        let data: LoginData = match response.into_data() {
            Ok(data) => data,
            Err(e) => return self.reject_network_error(&e).await,
        };

        if let Err(e) = self.storage.set(TOKEN_KEY, &data.token) {
            warn!("Failed to persist session token: {}", e);
        }
        self.api.set_token(Some(data.token));
        {
            let mut state = self.state.lock().await;
            state
                .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
                .dispatch(AuthAction::SetIsLoggedIn(true));
        }
        info!("Logged in as user {}.", data.user_id);
        Ok(())
    }

    /// Log out, invalidate every slice holding session data and forget the
    /// persisted token.
    ///
    pub async fn logout(&mut self) -> Outcome {
        info!("Logging out...");
        self.begin_request().await;
        match self.api.logout().await {
            Ok(response) if response.result_code.is_success() => {
                {
                    let mut state = self.state.lock().await;
                    state
                        .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
                        .dispatch(AuthAction::SetIsLoggedIn(false))
                        .dispatch(Action::SessionEnded);
                }
                if let Err(e) = self.storage.remove(TOKEN_KEY) {
                    warn!("Failed to remove session token: {}", e);
                }
                self.api.set_token(None);
                info!("Logged out.");
                Ok(())
            }
            Ok(response) => self.reject_app_error(&response).await,
            Err(e) => self.reject_network_error(&e).await,
        }
    }

    /// Replace the todo-list sequence with the server's. The listing has no
    /// result code, so any decoded response counts as success.
    ///
    pub async fn fetch_todolists(&mut self) -> Outcome {
        info!("Fetching todo-lists...");
        self.begin_request().await;
        match self.api.get_todolists().await {
            Ok(todolists) => {
                info!("Received {} todo-lists.", todolists.len());
                let mut state = self.state.lock().await;
                state
                    .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
                    .dispatch(TodolistsAction::SetTodolists(todolists));
                Ok(())
            }
            Err(e) => self.reject_network_error(&e).await,
        }
    }

    /// Create a todo-list and put it at the head of the sequence.
    ///
    pub async fn add_todolist(&mut self, title: String) -> Outcome {
        info!("Creating todo-list '{}'...", title);
        self.begin_request().await;
        let response = match self.api.create_todolist(&title).await {
            Ok(response) => response,
            Err(e) => return self.reject_network_error(&e).await,
        };
        if !response.result_code.is_success() {
            return self.reject_app_error(&response).await;
        }
        let data: CreateTodolistData = match response.into_data() {
            Ok(data) => data,
            Err(e) => return self.reject_network_error(&e).await,
        };

        info!("Todo-list '{}' created with id {}.", data.item.title, data.item.id);
        let mut state = self.state.lock().await;
        state
            .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
            .dispatch(TodolistsAction::AddTodolist(data.item));
        Ok(())
    }

    /// Delete a todo-list. The record shows `Loading` while the request is in
    /// flight and `Failed` if it does not go through.
    ///
    pub async fn remove_todolist(&mut self, id: String) -> Outcome {
        info!("Deleting todo-list {}...", id);
        {
            let mut state = self.state.lock().await;
            state
                .dispatch(AppAction::SetStatus(RequestStatus::Loading))
                .dispatch(AppAction::SetFieldErrors(Vec::new()))
                .dispatch(TodolistsAction::ChangeTodolistEntityStatus {
                    id: id.clone(),
                    entity_status: RequestStatus::Loading,
                });
        }
        let outcome = match self.api.delete_todolist(&id).await {
            Ok(response) if response.result_code.is_success() => {
                let mut state = self.state.lock().await;
                state
                    .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
                    .dispatch(TodolistsAction::RemoveTodolist { id });
                info!("Todo-list deleted.");
                return Ok(());
            }
            Ok(response) => self.reject_app_error(&response).await,
            Err(e) => self.reject_network_error(&e).await,
        };
        self.dispatch(TodolistsAction::ChangeTodolistEntityStatus {
            id,
            entity_status: RequestStatus::Failed,
        })
        .await;
        outcome
    }

    /// Rename a todo-list on the server, then locally.
    ///
    pub async fn update_todolist_title(&mut self, id: String, title: String) -> Outcome {
        info!("Renaming todo-list {} to '{}'...", id, title);
        self.begin_request().await;
        match self.api.update_todolist(&id, &title).await {
            Ok(response) if response.result_code.is_success() => {
                let mut state = self.state.lock().await;
                state
                    .dispatch(AppAction::SetStatus(RequestStatus::Succeeded))
                    .dispatch(TodolistsAction::ChangeTodolistTitle { id, title });
                Ok(())
            }
            Ok(response) => self.reject_app_error(&response).await,
            Err(e) => self.reject_network_error(&e).await,
        }
    }

    /// Mark the global status as loading and drop field errors left over
    /// from an earlier failure.
    ///
    async fn begin_request(&self) {
        let mut state = self.state.lock().await;
        state
            .dispatch(AppAction::SetStatus(RequestStatus::Loading))
            .dispatch(AppAction::SetFieldErrors(Vec::new()));
    }

    async fn dispatch(&self, action: impl Into<Action>) {
        self.state.lock().await.dispatch(action);
    }

    async fn reject_app_error(&self, response: &BaseResponse) -> Outcome {
        let mut state = self.state.lock().await;
        handle_server_app_error(response, &mut state);
        Err(Rejected)
    }

    async fn reject_network_error(&self, error: &ApiError) -> Outcome {
        let mut state = self.state.lock().await;
        handle_server_network_error(error, &mut state);
        Err(Rejected)
    }
}
