//! # Users API Library
//!
//! An in-memory user store served over HTTP. The modules are exposed for the binary in
//! `main.rs` and for integration testing.
//!
//! - **[model]**: the [`User`](model::User) record, its create/patch payloads and the seed data.
//! - **[user_actor]**: the single [`ResourceActor`](resource_actor::ResourceActor) that owns
//!   the collection and serialises every request.
//! - **[clients]**: [`UserClient`](clients::UserClient), the typed handle the HTTP layer uses.
//! - **[lifecycle]**: starting and stopping the actor.
//! - **[api]**: the axum router, handlers and error rendering.
//! - **[config]**: layered service configuration.

pub mod api;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod user_actor;
