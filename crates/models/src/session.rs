//! Session identity handle.

use crate::UserRef;

/// Handle to a logged-in session.
///
/// The decoding layer only ever reads the session's identity — the actual
/// network transport lives elsewhere. Cloning is cheap, and every reference
/// handle carries a clone so it can later be resolved against the session
/// it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    /// Create a session handle for the given logged-in user id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// The logged-in user's id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// A reference to the session's own user.
    pub fn user(&self) -> UserRef {
        UserRef::new(self.clone(), self.user_id.clone())
    }
}
