use crate::framework::{FrameworkError, ResourceClient, ResourceState, StoreEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// Provides default implementations for the operations whose payload is the
/// same for every resource: fetching, deleting and reading the cached state.
#[async_trait]
pub trait ActorClient<T: StoreEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Replace the cached collection with a fresh list from the backend.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, query: T::Query) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().fetch(query).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID and drop it from the cache.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Current `items` / `loading` / `error`.
    async fn state(&self) -> Result<ResourceState<T>, Self::Error> {
        self.inner().snapshot().await.map_err(Self::map_error)
    }
}
