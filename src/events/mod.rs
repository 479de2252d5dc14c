//! Event handling module.
//!
//! This module contains the asynchronous side of the store:
//! - Network events: API interactions and the state updates around them
//! - Failure normalization: mapping failed requests onto the global status

pub mod failure;
pub mod network;
