//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource type implements to be managed by the
//! generic [`ResourceActor`](crate::ResourceActor). It names the id, the create and update
//! DTOs, the injected context and the error type, exposes the soft-delete flag, supplies
//! the seed collection, and provides async lifecycle hooks (`on_create`, `on_update`,
//! `on_delete`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::seed`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The defaults do nothing (`Ok(())`, or an empty seed).

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Soft delete
/// Entities are never removed from the actor's collection by a delete request. The actor
/// calls [`ActorEntity::mark_deleted`] instead, and from then on the entity is only
/// visible through a full listing. Lookups, updates and deletes treat it as missing.
///
/// # Async & Context
/// Hooks are `#[async_trait]` and receive the `Context` passed to `run()`, so dependencies
/// can be bound late (after the actor is constructed, before its loop starts).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: PartialEq + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data merged onto an existing instance by an update.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Current id of the entity.
    fn id(&self) -> &Self::Id;

    /// Whether the entity has been soft-deleted.
    fn is_deleted(&self) -> bool;

    /// Flip the entity into the deleted state.
    fn mark_deleted(&mut self);

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The collection the actor starts with, and returns to on reset.
    fn seed() -> Vec<Self> {
        Vec::new()
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request reaches an active entity.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is marked deleted.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
