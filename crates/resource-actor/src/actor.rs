//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns an ordered collection
//! of entities. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and so giving every request exclusive access to the collection.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::policy::IdPolicy;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages an ordered collection of entities.
///
/// # Concurrency Model
/// The actor runs in its own Tokio task and handles one message at a time. A request is
/// applied completely before the next one is received, which serialises all access to
/// `store` without a `Mutex`, however many clients and runtime threads exist.
///
/// # Usage Pattern
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String, deleted: bool }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate { text: Option<String> }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Context = ();
///     type Error = NoteError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn is_deleted(&self) -> bool { self.deleted }
///     fn mark_deleted(&mut self) { self.deleted = true; }
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.text, deleted: false })
///     }
///     async fn on_update(&mut self, u: NoteUpdate, _: &()) -> Result<(), NoteError> {
///         if let Some(text) = u.text { self.text = text; }
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let note = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
///     assert_eq!(note.id, 1);
///     client.delete(note.id).await.unwrap();
///     assert!(client.get(note.id).await.unwrap().is_none());
///     assert_eq!(client.list_all().await.unwrap().len(), 1);
/// }
/// ```
///
/// # Operations
///
/// * **List** – clones the collection in order, filtering out deleted entities unless
///   `include_deleted` is set.
/// * **Create** – picks an id per [`IdPolicy`], builds the entity, runs `on_create`,
///   appends it and returns a copy.
/// * **Get / Update / Delete** – locate the first entity whose id matches and which is
///   not deleted. A miss answers [`FrameworkError::NotFound`] (`Get` answers `None`).
/// * **Reset** – replaces the collection with [`ActorEntity::seed`].
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    id_policy: IdPolicy,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` using the default [`IdPolicy`], and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_id_policy(buffer_size, IdPolicy::default())
    }

    /// Creates a new `ResourceActor` with an explicit id policy.
    ///
    /// The collection is seeded immediately, so the first request already sees
    /// [`ActorEntity::seed`].
    pub fn with_id_policy(buffer_size: usize, id_policy: IdPolicy) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = T::seed();
        let next_id = store.len() as u32 + 1;
        let actor = Self {
            receiver,
            store,
            id_policy,
            next_id,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn allocate_id(&mut self) -> T::Id {
        match self.id_policy {
            IdPolicy::CollectionLength => T::Id::from(self.store.len() as u32 + 1),
            IdPolicy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                T::Id::from(id)
            }
        }
    }

    fn position_active(&self, id: &T::Id) -> Option<usize> {
        self.store
            .iter()
            .position(|item| item.id() == id && !item.is_deleted())
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "User" instead of "users_api::model::user::User"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), policy = %self.id_policy, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List {
                    include_deleted,
                    respond_to,
                } => {
                    let items: Vec<T> = self
                        .store
                        .iter()
                        .filter(|item| include_deleted || !item.is_deleted())
                        .cloned()
                        .collect();
                    debug!(entity_type, include_deleted, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.allocate_id();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.push(item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.position_active(&id).map(|i| self.store[i].clone());
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(index) = self.position_active(&id) {
                        let item = &mut self.store[index];
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(index) = self.position_active(&id) {
                        let item = &mut self.store[index];
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        item.mark_deleted();
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Reset { respond_to } => {
                    let discarded = self.store.len();
                    self.store = T::seed();
                    info!(entity_type, discarded, size = self.store.len(), "Reset");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
