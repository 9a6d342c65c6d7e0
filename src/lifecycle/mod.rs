//! # System Lifecycle
//!
//! Starts the stores, wires them to the REST services and shuts them down.
//!
//! ## The CrmSystem Pattern
//!
//! ```rust,ignore
//! let config = CrmConfig::from_env()?;
//! let system = CrmSystem::new(&config, tokens);
//!
//! system.lead_client.fetch_leads(GetLeadsQuery::default()).await?;
//! let state = system.lead_client.state().await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Dependency Injection via `run()`
//!
//! Store actors are created without a backend. The backend is handed over when
//! the actor task is spawned, so the same actor type runs against the real
//! services in [`CrmSystem`] and against a
//! [`MockBackend`](crate::framework::mock::MockBackend) in tests.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of each mailbox
//! 2. **Actors drain** - Calls already in flight still settle and reply
//! 3. **Await completion** - Wait for all actor tasks to finish
//!
//! Clones of a client held elsewhere keep their actor alive until they are dropped too.
//!
//! ## Observability
//!
//! See [`setup_tracing`].

pub mod crm_system;
pub mod tracing;

pub use self::crm_system::*;
pub use self::tracing::*;
