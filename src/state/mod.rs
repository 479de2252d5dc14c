//! Application state management module.
//!
//! This module contains the normalized store for the application:
//! - `State` root holding every slice
//! - `Action` routing synchronous updates to slice reducers
//! - Global status, authentication and todo-list slices
//!
//! Reducers are pure and synchronous. Side effects live in the network event
//! handler, which dispatches actions before and after each request.

mod app;
mod auth;
mod todolists;

pub use app::{AppAction, AppState, RequestStatus};
pub use auth::{AuthAction, AuthState};
pub use todolists::{DomainTodolist, FilterValues, TodolistsAction, TodolistsState};

use crate::api::FieldError;
use log::*;

/// Independently owned piece of state with its own reducer.
///
pub trait Slice {
    type Action;

    fn reduce(&mut self, action: Self::Action);

    /// Invalidation handler run when the session ends.
    ///
    fn session_ended(&mut self) {}
}

/// Every synchronous update the store accepts.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    App(AppAction),
    Auth(AuthAction),
    Todolists(TodolistsAction),
    /// Broadcast to every slice once the server confirms logout.
    SessionEnded,
}

impl From<AppAction> for Action {
    fn from(action: AppAction) -> Self {
        Action::App(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<TodolistsAction> for Action {
    fn from(action: TodolistsAction) -> Self {
        Action::Todolists(action)
    }
}

/// Houses data representative of application state.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct State {
    app: AppState,
    auth: AuthState,
    todolists: TodolistsState,
}

impl State {
    pub fn new() -> State {
        State::default()
    }

    /// Apply an action to the slice it targets.
    ///
    pub fn dispatch(&mut self, action: impl Into<Action>) -> &mut Self {
        let action = action.into();
        trace!("Reducing {:?}", action);
        match action {
            Action::App(action) => self.app.reduce(action),
            Action::Auth(action) => self.auth.reduce(action),
            Action::Todolists(action) => self.todolists.reduce(action),
            Action::SessionEnded => {
                self.app.session_ended();
                self.auth.session_ended();
                self.todolists.session_ended();
            }
        }
        self
    }

    pub fn select_app_status(&self) -> RequestStatus {
        self.app.status()
    }

    pub fn select_app_error(&self) -> Option<&str> {
        self.app.error()
    }

    pub fn select_field_errors(&self) -> &[FieldError] {
        self.app.field_errors()
    }

    pub fn select_is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    pub fn select_is_initialized(&self) -> bool {
        self.auth.is_initialized()
    }

    pub fn select_todolists(&self) -> &[DomainTodolist] {
        self.todolists.todolists()
    }
}
