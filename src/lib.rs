//! Session and todo-list state management for the todolist API.
//!
//! The crate is organized as a predictable state container:
//! - `state`: normalized store, pure reducers, dispatched actions, selectors
//! - `events`: asynchronous operations that call the API and dispatch actions
//! - `api`: HTTP transport and wire types
//! - `storage`: durable client storage for the session token
//! - `app`: wiring of the above for embedders and the CLI

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod storage;
