//! # Generic Messages
//!
//! This module defines the message types exchanged between a `ResourceClient` and its
//! `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map onto the lifecycle of a soft-deletable resource:
///
/// - **List**: the ordered collection, optionally including deleted entities.
/// - **Create**: builds a new entity from [`ActorEntity::Create`] and appends it.
/// - **Get**: fetches an active entity by id.
/// - **Update**: merges [`ActorEntity::Update`] onto an active entity.
/// - **Delete**: soft-deletes an active entity.
/// - **Reset**: throws the collection away and reinstalls [`ActorEntity::seed`].
///
/// Every message carries its own oneshot `respond_to` channel.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    List {
        include_deleted: bool,
        respond_to: Response<Vec<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Reset {
        respond_to: Response<()>,
    },
}
