//! [`ActorEntity`] implementation for the [`User`] record.

use crate::model::{seed_users, User, UserCreate, UserId, UserPatch};
use crate::user_actor::UserError;
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserPatch;
    type Context = ();
    type Error = UserError;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Copies `name`, `age` and `city` verbatim; no validation.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        Ok(User::new(id, params))
    }

    fn seed() -> Vec<Self> {
        seed_users()
    }

    /// Full and partial updates share this shallow merge.
    async fn on_update(&mut self, update: UserPatch, _ctx: &()) -> Result<(), Self::Error> {
        self.apply(update);
        Ok(())
    }
}
