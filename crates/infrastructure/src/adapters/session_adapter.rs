//! Session adapter - a process-local signed-in user

use application::error::ApplicationError;
use application::ports::SessionPort;
use async_trait::async_trait;
use domain::value_objects::UserId;
use parking_lot::RwLock;
use tracing::info;

/// Session holding at most one signed-in user for the lifetime of the process
///
/// The CLI signs in from configuration or a command-line flag.
#[derive(Debug, Default)]
pub struct StaticSession {
    user: RwLock<Option<UserId>>,
}

impl StaticSession {
    /// Session with nobody signed in
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Session already signed in as `user`
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// Parse a user id and sign in
    ///
    /// # Errors
    ///
    /// Returns `NotAuthorized` if `raw` is not a valid user id.
    pub fn from_user_id(raw: &str) -> Result<Self, ApplicationError> {
        UserId::parse(raw.trim())
            .map(Self::signed_in)
            .map_err(|e| ApplicationError::NotAuthorized(format!("invalid user id '{raw}': {e}")))
    }

    /// Sign in as `user`, replacing any previous user
    pub fn sign_in(&self, user: UserId) {
        *self.user.write() = Some(user);
        info!(user = %user, "Signed in");
    }

    /// Sign out
    pub fn sign_out(&self) {
        if self.user.write().take().is_some() {
            info!("Signed out");
        }
    }
}

#[async_trait]
impl SessionPort for StaticSession {
    async fn current_user(&self) -> Result<Option<UserId>, ApplicationError> {
        Ok(*self.user.read())
    }
}
