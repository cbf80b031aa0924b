//! Session port

use async_trait::async_trait;
use domain::value_objects::UserId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Source of the signed-in user
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// The signed-in user, if any
    async fn current_user(&self) -> Result<Option<UserId>, ApplicationError>;
}
