//! # User Client
//!
//! High‑level API for the user store. It wraps a `ResourceClient<User>` and speaks in
//! the store's own operations: list active, list all, get, create, replace, patch,
//! soft delete and reset.
use crate::model::{User, UserCreate, UserId, UserPatch};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::from(e)
    }
}

impl UserClient {
    /// Users that are not soft-deleted, in insertion order.
    pub async fn list_active(&self) -> Result<Vec<User>, UserError> {
        ActorClient::list(self).await
    }

    /// Every user, soft-deleted ones included.
    pub async fn list_all_users(&self) -> Result<Vec<User>, UserError> {
        ActorClient::list_all(self).await
    }

    /// The active user with `id`; a deleted or unknown id is `NotFound`.
    pub async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        ActorClient::get(self, id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(UserError::from)
    }

    /// `PUT` semantics. Performs the same shallow merge as [`UserClient::patch_user`].
    #[instrument(skip(self))]
    pub async fn replace_user(&self, id: UserId, fields: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, fields).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn patch_user(&self, id: UserId, fields: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, fields).await.map_err(UserError::from)
    }

    /// Soft delete: the record stays in [`UserClient::list_all_users`].
    pub async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        ActorClient::delete(self, id).await
    }

    /// Restores the four seed users.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), UserError> {
        debug!("Sending request");
        self.inner.reset().await.map_err(UserError::from)
    }
}
