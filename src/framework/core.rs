//! # Core Store Framework
//!
//! This module defines the generic building blocks of the client-side store.
//!
//! ## Key Types
//!
//! - [`StoreEntity`]: The trait every cached resource type implements.
//! - [`ResourceBackend`]: The seam to the REST services, injected at `run()`.
//! - [`ResourceState`]: `items` / `loading` / `error` plus the pure transitions.
//! - [`ResourceActor`]: The task that owns one collection's state.
//! - [`ResourceClient`]: The typed command/result channel into that task.
//! - [`FrameworkError`]: Channel failures, or the tagged API error of a settled call.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entities and Backends)
// =============================================================================

/// Trait that any resource must implement to be cached by a [`ResourceActor`].
///
/// The associated types tie each request to its resource: a lead store only
/// accepts lead queries and lead commands, checked at compile time.
pub trait StoreEntity: Clone + Send + Sync + Debug + 'static {
    /// Opaque identifier used to patch items in place.
    type Id: PartialEq + Clone + Send + Sync + Display + Debug + 'static;

    /// Filters for a list fetch.
    type Query: Send + Sync + Debug + 'static;

    /// Payload of a create command.
    type Create: Send + Sync + Debug + 'static;

    /// Payload of an update command.
    type Update: Send + Sync + Debug + 'static;

    fn id(&self) -> &Self::Id;
}

/// The network side of a store: one call per lifecycle action.
///
/// Implementations are thin adapters over the resource services and must not
/// catch errors; the store records them.
#[async_trait]
pub trait ResourceBackend<T: StoreEntity>: Send + Sync + 'static {
    async fn list(&self, query: T::Query) -> Result<Vec<T>, ApiError>;

    async fn create(&self, params: T::Create) -> Result<T, ApiError>;

    async fn update(&self, id: T::Id, update: T::Update) -> Result<T, ApiError>;

    async fn delete(&self, id: T::Id) -> Result<(), ApiError>;
}

// =============================================================================
// 2. STATE
// =============================================================================

/// Where a collection is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing has been dispatched yet.
    #[default]
    Idle,
    /// A call is in flight.
    Loading,
    /// The most recently settled call succeeded.
    Succeeded,
    /// The most recently settled call failed; `error` holds its message.
    Failed,
}

/// How list fetches that settle out of order are applied.
///
/// Spelled `last-settled` / `latest-issued` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StalePolicy {
    /// Whatever settles last overwrites `items`, even if it was issued first.
    #[default]
    #[serde(rename = "last-settled")]
    LastSettledWins,
    /// A fetch that settles after a later-issued fetch was already applied is
    /// dropped. Its caller still receives the result.
    #[serde(rename = "latest-issued")]
    LatestIssuedWins,
}

/// Cached state of one resource collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    phase: LoadPhase,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            phase: LoadPhase::Idle,
        }
    }
}

impl<T: StoreEntity> ResourceState<T> {
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// A call was dispatched.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.phase = LoadPhase::Loading;
    }

    /// A list fetch resolved: full replace, order preserved.
    pub fn fulfill_list(&mut self, items: Vec<T>) {
        self.items = items;
        self.succeed();
    }

    pub fn fulfill_create(&mut self, item: T) {
        self.items.push(item);
        self.succeed();
    }

    /// Replaces the element with the same id. Unknown ids leave `items` alone.
    pub fn fulfill_update(&mut self, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            *slot = item;
        }
        self.succeed();
    }

    pub fn fulfill_delete(&mut self, id: &T::Id) {
        self.items.retain(|item| item.id() != id);
        self.succeed();
    }

    /// A call failed. Items stay as they were.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
        self.phase = LoadPhase::Failed;
    }

    fn succeed(&mut self) {
        self.loading = false;
        self.phase = LoadPhase::Succeeded;
    }
}

// =============================================================================
// 3. THE TYPED MESSAGES & ERRORS
// =============================================================================

/// Errors surfaced through a [`ResourceClient`].
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A typed command sent to a [`ResourceActor`].
///
/// Each variant starts one pending → fulfilled/rejected cycle, except
/// `Snapshot`, which only reads.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Fetch {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
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
    Snapshot {
        respond_to: oneshot::Sender<ResourceState<T>>,
    },
}

/// Outcome of a backend call, fed back into the actor that dispatched it.
enum Settlement<T: StoreEntity> {
    Fetched {
        seq: u64,
        result: Result<Vec<T>, ApiError>,
        respond_to: Response<Vec<T>>,
    },
    Created {
        result: Result<T, ApiError>,
        respond_to: Response<T>,
    },
    Updated {
        result: Result<T, ApiError>,
        respond_to: Response<T>,
    },
    Deleted {
        id: T::Id,
        result: Result<(), ApiError>,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 4. THE GENERIC ACTOR
// =============================================================================

/// Owns the [`ResourceState`] of one collection.
///
/// Requests are handled one at a time, but backend calls run in their own
/// tasks, so several can be in flight at once. Their settlements come back
/// through an internal channel and are applied in arrival order.
pub struct ResourceActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    core: StoreCore<T>,
}

struct StoreCore<T: StoreEntity> {
    state: ResourceState<T>,
    policy: StalePolicy,
    entity_type: &'static str,
    next_seq: u64,
    applied_seq: Option<u64>,
    in_flight: usize,
}

impl<T: StoreEntity> ResourceActor<T> {
    pub fn new(buffer_size: usize, policy: StalePolicy) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "LeadDto" rather than "crm_client::model::lead::LeadDto"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            core: StoreCore {
                state: ResourceState::default(),
                policy,
                entity_type,
                next_seq: 0,
                applied_seq: None,
                in_flight: 0,
            },
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor until every client is dropped and every in-flight call has settled.
    ///
    /// The backend is injected here rather than in `new()`, so the actor and
    /// its client can be created before the services exist.
    pub async fn run(self, backend: Arc<dyn ResourceBackend<T>>) {
        let Self { mut receiver, mut core } = self;
        let (settle_tx, mut settle_rx) = mpsc::unbounded_channel();
        let entity_type = core.entity_type;
        info!(entity_type, policy = ?core.policy, "Actor started");

        let mut open = true;
        while open || core.in_flight > 0 {
            tokio::select! {
                msg = receiver.recv(), if open => match msg {
                    Some(msg) => core.dispatch(msg, &backend, &settle_tx),
                    None => {
                        open = false;
                        debug!(entity_type, in_flight = core.in_flight, "Mailbox closed");
                    }
                },
                Some(settlement) = settle_rx.recv() => core.settle(settlement),
            }
        }

        info!(entity_type, size = core.state.items.len(), "Shutdown");
    }
}

/// Runs a backend call on its own task. A panic settles as [`ApiError::Task`]
/// so the call is still counted off and its caller still gets an answer.
async fn guarded<R: Send + 'static>(
    call: impl Future<Output = Result<R, ApiError>> + Send + 'static,
) -> Result<R, ApiError> {
    tokio::spawn(call)
        .await
        .unwrap_or_else(|e| Err(ApiError::Task(e.to_string())))
}

impl<T: StoreEntity> StoreCore<T> {
    fn dispatch(
        &mut self,
        msg: StoreRequest<T>,
        backend: &Arc<dyn ResourceBackend<T>>,
        settle_tx: &mpsc::UnboundedSender<Settlement<T>>,
    ) {
        let entity_type = self.entity_type;
        let backend = Arc::clone(backend);
        let tx = settle_tx.clone();

        match msg {
            StoreRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.state.clone());
                return;
            }
            StoreRequest::Fetch { query, respond_to } => {
                let seq = self.next_seq;
                self.next_seq += 1;
                debug!(entity_type, seq, ?query, "Fetch pending");
                tokio::spawn(async move {
                    let result = guarded(async move { backend.list(query).await }).await;
                    let _ = tx.send(Settlement::Fetched { seq, result, respond_to });
                });
            }
            StoreRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create pending");
                tokio::spawn(async move {
                    let result = guarded(async move { backend.create(params).await }).await;
                    let _ = tx.send(Settlement::Created { result, respond_to });
                });
            }
            StoreRequest::Update { id, update, respond_to } => {
                debug!(entity_type, %id, ?update, "Update pending");
                tokio::spawn(async move {
                    let result = guarded(async move { backend.update(id, update).await }).await;
                    let _ = tx.send(Settlement::Updated { result, respond_to });
                });
            }
            StoreRequest::Delete { id, respond_to } => {
                debug!(entity_type, %id, "Delete pending");
                tokio::spawn(async move {
                    let target = id.clone();
                    let result = guarded(async move { backend.delete(target).await }).await;
                    let _ = tx.send(Settlement::Deleted { id, result, respond_to });
                });
            }
        }

        self.in_flight += 1;
        self.state.begin();
    }

    fn settle(&mut self, settlement: Settlement<T>) {
        let entity_type = self.entity_type;
        self.in_flight -= 1;

        match settlement {
            Settlement::Fetched { seq, result, respond_to } => {
                let superseded = self.applied_seq.is_some_and(|applied| seq < applied);
                if superseded && self.policy == StalePolicy::LatestIssuedWins {
                    debug!(entity_type, seq, "Discarding stale fetch");
                } else {
                    if superseded {
                        debug!(entity_type, seq, "Older fetch settled last, applying");
                    }
                    self.applied_seq = Some(self.applied_seq.map_or(seq, |applied| applied.max(seq)));
                    match &result {
                        Ok(items) => {
                            self.state.fulfill_list(items.clone());
                            info!(entity_type, seq, size = items.len(), "Fetch fulfilled");
                        }
                        Err(e) => {
                            self.state.reject(e.to_string());
                            warn!(entity_type, seq, error = %e, "Fetch rejected");
                        }
                    }
                }
                let _ = respond_to.send(result.map_err(FrameworkError::Api));
            }
            Settlement::Created { result, respond_to } => {
                match &result {
                    Ok(item) => {
                        info!(entity_type, id = %item.id(), "Created");
                        self.state.fulfill_create(item.clone());
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Create rejected");
                        self.state.reject(e.to_string());
                    }
                }
                let _ = respond_to.send(result.map_err(FrameworkError::Api));
            }
            Settlement::Updated { result, respond_to } => {
                match &result {
                    Ok(item) => {
                        info!(entity_type, id = %item.id(), "Updated");
                        self.state.fulfill_update(item.clone());
                    }
                    Err(e) => {
                        warn!(entity_type, error = %e, "Update rejected");
                        self.state.reject(e.to_string());
                    }
                }
                let _ = respond_to.send(result.map_err(FrameworkError::Api));
            }
            Settlement::Deleted { id, result, respond_to } => {
                match &result {
                    Ok(()) => {
                        info!(entity_type, %id, "Deleted");
                        self.state.fulfill_delete(&id);
                    }
                    Err(e) => {
                        warn!(entity_type, %id, error = %e, "Delete rejected");
                        self.state.reject(e.to_string());
                    }
                }
                let _ = respond_to.send(result.map_err(FrameworkError::Api));
            }
        }
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

/// A type-safe handle to a [`ResourceActor`]. Cheap to clone.
#[derive(Clone)]
pub struct ResourceClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn fetch(&self, query: T::Query) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Fetch { query, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Update { id, update, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> Result<ResourceState<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.into(),
            text: text.into(),
        }
    }

    impl StoreEntity for Note {
        type Id = String;
        type Query = ();
        type Create = String;
        type Update = String;

        fn id(&self) -> &String {
            &self.id
        }
    }

    /// In-memory backend assigning sequential ids.
    #[derive(Default)]
    struct MemoryBackend {
        notes: Mutex<Vec<Note>>,
    }

    #[async_trait]
    impl ResourceBackend<Note> for MemoryBackend {
        async fn list(&self, _query: ()) -> Result<Vec<Note>, ApiError> {
            Ok(self.notes.lock().unwrap().clone())
        }

        async fn create(&self, text: String) -> Result<Note, ApiError> {
            let mut notes = self.notes.lock().unwrap();
            let created = note(&(notes.len() + 1).to_string(), &text);
            notes.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: String, text: String) -> Result<Note, ApiError> {
            let mut notes = self.notes.lock().unwrap();
            match notes.iter_mut().find(|n| n.id == id) {
                Some(existing) => {
                    existing.text = text;
                    Ok(existing.clone())
                }
                None => Err(ApiError::Http {
                    status: 404,
                    message: "HTTP 404: Not Found".into(),
                }),
            }
        }

        async fn delete(&self, id: String) -> Result<(), ApiError> {
            self.notes.lock().unwrap().retain(|n| n.id != id);
            Ok(())
        }
    }

    // --- Reducers ---

    #[test]
    fn test_begin_clears_error() {
        let mut state = ResourceState::<Note>::default();
        assert_eq!(state.phase(), LoadPhase::Idle);

        state.reject("boom");
        state.begin();

        assert!(state.loading);
        assert_eq!(state.error, None);
        assert_eq!(state.phase(), LoadPhase::Loading);
    }

    #[test]
    fn test_list_replaces_items_in_order() {
        let mut state = ResourceState::default();
        state.items = vec![note("9", "old")];

        state.begin();
        state.fulfill_list(vec![note("2", "b"), note("1", "a")]);

        assert_eq!(state.items, vec![note("2", "b"), note("1", "a")]);
        assert!(!state.loading);
        assert_eq!(state.phase(), LoadPhase::Succeeded);
    }

    #[test]
    fn test_rejection_keeps_stale_items() {
        let mut state = ResourceState::default();
        state.fulfill_list(vec![note("1", "a")]);

        state.begin();
        state.reject("HTTP 500: Internal Server Error");

        assert_eq!(state.items, vec![note("1", "a")]);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP 500: Internal Server Error"));
        assert_eq!(state.phase(), LoadPhase::Failed);
    }

    #[test]
    fn test_update_replaces_matching_item_only() {
        let mut state = ResourceState::default();
        state.fulfill_list(vec![note("1", "a"), note("2", "b")]);

        state.fulfill_update(note("2", "b2"));
        assert_eq!(state.items, vec![note("1", "a"), note("2", "b2")]);

        state.fulfill_update(note("3", "c"));
        assert_eq!(state.items, vec![note("1", "a"), note("2", "b2")]);
    }

    #[test]
    fn test_create_appends_and_delete_removes() {
        let mut state = ResourceState::default();
        state.fulfill_list(vec![note("1", "a"), note("2", "b")]);

        state.fulfill_delete(&"1".to_string());
        assert_eq!(state.items, vec![note("2", "b")]);

        state.fulfill_create(note("3", "c"));
        assert_eq!(state.items, vec![note("2", "b"), note("3", "c")]);
        assert_eq!(state.get(&"3".to_string()), Some(&note("3", "c")));
    }

    // --- Actor ---

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let (actor, client) = ResourceActor::<Note>::new(8, StalePolicy::default());
        let handle = tokio::spawn(actor.run(Arc::new(MemoryBackend::default())));

        // 1. Create
        let first = client.create("first".into()).await.unwrap();
        let second = client.create("second".into()).await.unwrap();
        assert_eq!(client.snapshot().await.unwrap().items, vec![first.clone(), second.clone()]);

        // 2. Fetch replaces with the backend's view
        let fetched = client.fetch(()).await.unwrap();
        assert_eq!(fetched.len(), 2);

        // 3. Update
        let updated = client.update(first.id.clone(), "edited".into()).await.unwrap();
        assert_eq!(updated.text, "edited");
        let state = client.snapshot().await.unwrap();
        assert_eq!(state.items[0].text, "edited");

        // 4. Failed update records the error, keeps items
        let err = client.update("404".into(), "nope".into()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
        let state = client.snapshot().await.unwrap();
        assert_eq!(state.error.as_deref(), Some("HTTP 404: Not Found"));
        assert_eq!(state.items.len(), 2);

        // 5. Delete
        client.delete(second.id.clone()).await.unwrap();
        let state = client.snapshot().await.unwrap();
        assert_eq!(state.items, vec![updated]);
        assert_eq!(state.error, None);

        drop(client);
        handle.await.unwrap();
    }
}
