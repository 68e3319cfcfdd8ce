// Console error taxonomy and the propagation policy the navigation guard
// enforces.

use thiserror::Error;

use crate::api::TransportError;
use crate::routes::ConvertError;
use crate::session::SessionError;

/// Union of the failures that can surface through the navigation pipeline.
///
/// Only three things unwind to a full session reset: a backend 401 from any
/// call, a profile fetch failure, and an unconvertible route descriptor.
/// Everything else is contained at the call site that produced it.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ConsoleError {
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ConsoleError::Session(e) => e.is_unauthorized(),
            ConsoleError::Transport(e) => e.is_unauthorized(),
            ConsoleError::Convert(_) => false,
        }
    }

    /// Whether this failure forces a logout (session + route state reset,
    /// redirect to the login page)
    pub fn is_fatal(&self) -> bool {
        if self.is_unauthorized() {
            return true;
        }
        match self {
            ConsoleError::Convert(_) => true,
            ConsoleError::Session(SessionError::ProfileFetchFailed(_)) => true,
            ConsoleError::Session(SessionError::NotAuthenticated) => true,
            ConsoleError::Session(SessionError::AuthenticationFailed(_)) => false,
            ConsoleError::Session(SessionError::RouteFetchFailed(_)) => false,
            ConsoleError::Transport(_) => false,
        }
    }
}
