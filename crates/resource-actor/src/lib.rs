//! # Resource Actor
//!
//! Building blocks for serving an ordered, soft-deletable collection of entities from a
//! single Tokio task. A **Resource-Oriented** request set (list, create, get, update,
//! delete, reset) is layered on top of the **Actor Model**: one task owns the collection
//! and applies requests one at a time, callers talk to it through a cheap, cloneable
//! client.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the domain type, its DTOs and hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop and the collection itself
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async calls
//!
//! ## Collection semantics
//!
//! - Entities keep insertion order. Listings return them in that order.
//! - Delete is soft: the entity stays in place with its deleted flag set. Only a listing
//!   that asks for deleted entities still shows it.
//! - Get, update and delete match on the id **and** require the entity to be active.
//! - Reset replaces everything with [`ActorEntity::seed`].
//! - New ids come from the configured [`IdPolicy`].
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - Clients can be cloned into any number of tasks
//!
//! ## Testing
//!
//! The [`mock`] module scripts a fake actor behind a real [`ResourceClient`], so wrappers
//! and HTTP handlers can be tested against error cases a live actor does not produce.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod policy;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use policy::{IdPolicy, ParseIdPolicyError};
