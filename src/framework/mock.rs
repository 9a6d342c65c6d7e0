//! # Mock Framework
//!
//! Utilities for testing stores without a network.
//!
//! [`MockBackend`] stands in for the REST services behind a [`ResourceActor`].
//! Expectations are queued in call order. A reply is either ready right away or
//! held behind a [`Gate`], which lets a test decide when (and in which order)
//! in-flight calls settle.
//!
//! [`ResourceActor`]: crate::framework::ResourceActor

use crate::error::ApiError;
use crate::framework::{ResourceBackend, StoreEntity};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply<R> {
    Ready(Result<R, ApiError>),
    Gated(oneshot::Receiver<Result<R, ApiError>>),
}

impl<R> Reply<R> {
    async fn resolve(self) -> Result<R, ApiError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped without a reply".into()))),
        }
    }
}

/// An expected backend call, in the order the store will make it.
enum Expectation<T: StoreEntity> {
    List(Reply<Vec<T>>),
    Create(Reply<T>),
    Update { id: T::Id, reply: Reply<T> },
    Delete { id: T::Id, reply: Reply<()> },
}

impl<T: StoreEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::List(_) => "list",
            Expectation::Create(_) => "create",
            Expectation::Update { .. } => "update",
            Expectation::Delete { .. } => "delete",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A scripted [`ResourceBackend`].
///
/// # Example
/// ```ignore
/// let mock = MockBackend::<LeadDto>::new();
/// let slow = mock.expect_list().gated();
/// mock.expect_list().return_ok(vec![lead_b]);
///
/// tokio::spawn(actor.run(mock.backend()));
/// // ... dispatch two fetches, then release the first one last
/// slow.release(Ok(vec![lead_a]));
/// mock.verify();
/// ```
pub struct MockBackend<T: StoreEntity> {
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl<T: StoreEntity> Clone for MockBackend<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: self.expectations.clone(),
            mismatches: self.mismatches.clone(),
            calls: self.calls.clone(),
        }
    }
}

impl<T: StoreEntity> Default for MockBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockBackend<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            mismatches: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A handle to pass to `ResourceActor::run`. Shares expectations with `self`.
    pub fn backend(&self) -> Arc<dyn ResourceBackend<T>> {
        Arc::new(self.clone())
    }

    pub fn expect_list(&self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::List)
    }

    pub fn expect_create(&self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Create)
    }

    pub fn expect_update(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |reply| Expectation::Update { id, reply })
    }

    pub fn expect_delete(&self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |reply| Expectation::Delete { id, reply })
    }

    /// Number of backend calls received so far, matched or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Yields until at least `count` calls have reached the backend.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.calls() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Verifies that all expectations were met, in order.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Unexpected backend calls: {}", mismatches.join("; "));
        }
        let remaining = lock(&self.expectations);
        if !remaining.is_empty() {
            panic!("Not all expectations were met. {} remaining", remaining.len());
        }
    }

    fn next(&self) -> Option<Expectation<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.expectations).pop_front()
    }

    fn mismatch(&self, call: &str, found: Option<Expectation<T>>) -> ApiError {
        let message = match found {
            Some(expectation) => format!("expected {}, got {call}", expectation.kind()),
            None => format!("no expectation left for {call}"),
        };
        lock(&self.mismatches).push(message.clone());
        ApiError::Network(message)
    }
}

#[async_trait]
impl<T: StoreEntity> ResourceBackend<T> for MockBackend<T> {
    async fn list(&self, _query: T::Query) -> Result<Vec<T>, ApiError> {
        let next = self.next();
        match next {
            Some(Expectation::List(reply)) => reply.resolve().await,
            other => Err(self.mismatch("list", other)),
        }
    }

    async fn create(&self, _params: T::Create) -> Result<T, ApiError> {
        let next = self.next();
        match next {
            Some(Expectation::Create(reply)) => reply.resolve().await,
            other => Err(self.mismatch("create", other)),
        }
    }

    async fn update(&self, id: T::Id, _update: T::Update) -> Result<T, ApiError> {
        let next = self.next();
        match next {
            Some(Expectation::Update { id: expected, reply }) if expected == id => reply.resolve().await,
            other => Err(self.mismatch(&format!("update({id})"), other)),
        }
    }

    async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        let next = self.next();
        match next {
            Some(Expectation::Delete { id: expected, reply }) if expected == id => reply.resolve().await,
            other => Err(self.mismatch(&format!("delete({id})"), other)),
        }
    }
}

/// Builder for one queued expectation.
pub struct ExpectationBuilder<T: StoreEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Reply<R>) -> Expectation<T> + Send>,
}

impl<T: StoreEntity, R: Send + 'static> ExpectationBuilder<T, R> {
    fn new(expectations: Queue<T>, wrap: impl FnOnce(Reply<R>) -> Expectation<T> + Send + 'static) -> Self {
        Self {
            expectations,
            wrap: Box::new(wrap),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Reply::Ready(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Holds the reply until the returned [`Gate`] is released.
    pub fn gated(self) -> Gate<R> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Gated(receiver));
        Gate { sender }
    }

    fn push(self, reply: Reply<R>) {
        let expectation = (self.wrap)(reply);
        lock(&self.expectations).push_back(expectation);
    }
}

/// Releases a gated backend call.
pub struct Gate<R> {
    sender: oneshot::Sender<Result<R, ApiError>>,
}

impl<R> Gate<R> {
    pub fn release(self, result: Result<R, ApiError>) {
        let _ = self.sender.send(result);
    }
}
