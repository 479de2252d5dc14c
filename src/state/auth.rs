//! Authentication slice.

use super::Slice;

/// Session flags. `is_initialized` gates the first render and flips to `true`
/// once the start-up session check has settled.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuthState {
    is_logged_in: bool,
    is_initialized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    SetIsLoggedIn(bool),
    SetIsInitialized(bool),
    /// Settle hook of the session check; never clears the flag.
    Initialized,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Slice for AuthState {
    type Action = AuthAction;

    fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::SetIsLoggedIn(flag) => self.is_logged_in = flag,
            AuthAction::SetIsInitialized(flag) => self.is_initialized = flag,
            AuthAction::Initialized => self.is_initialized = true,
        }
    }
}
