//! # User Actor
//!
//! The single store of the service: one [`ResourceActor`] owning the ordered collection
//! of [`User`] records.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use users_api::user_actor;
//! use users_api::model::UserCreate;
//! use resource_actor::IdPolicy;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(32, IdPolicy::default());
//!     tokio::spawn(actor.run(()));
//!
//!     let params = UserCreate {
//!         name: Some(json!("Ewa")),
//!         age: Some(json!(41)),
//!         city: Some(json!("Łódź")),
//!     };
//!     let user = client.create_user(params).await?;
//!     assert_eq!(user.id, 5);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use resource_actor::{IdPolicy, ResourceActor};

/// Creates a new User actor, already holding the seed records, and its client.
pub fn new(buffer_size: usize, id_policy: IdPolicy) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::with_id_policy(buffer_size, id_policy);
    let client = UserClient::new(generic_client);

    (actor, client)
}
