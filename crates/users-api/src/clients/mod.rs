//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).

pub mod user_client;

pub use user_client::*;
