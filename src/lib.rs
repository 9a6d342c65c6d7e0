//! # CRM Client
//!
//! > **Authenticated access to the CRM identity and leads backends, with cached stores.**
//!
//! This crate talks to two REST services (identity: users, tenants, roles;
//! leads: leads and lead activities) with a bearer token on every call, and
//! keeps client-side copies of the lead collections in actor-owned stores.
//!
//! ## Layers, leaf-first
//!
//! ### 1. Tokens ([`auth`])
//! [`AccessTokenProvider`](auth::AccessTokenProvider) resolves a token for
//! every request: silent acquisition for the signed-in account, with a single
//! interactive fallback.
//!
//! ### 2. Transport ([`http`])
//! [`ApiClient`](http::ApiClient) joins base URL and path, attaches the
//! headers, and turns non-2xx responses into [`ApiError`](error::ApiError)
//! with the problem-details `title` or `detail` as the message.
//!
//! ### 3. Services ([`services`], [`model`])
//! One typed method per backend operation. Optional filters become query
//! parameters only when set.
//!
//! ### 4. Stores ([`framework`], [`lead_actor`], [`activity_actor`], [`clients`])
//! A generic [`ResourceActor`](framework::ResourceActor) owns `items` /
//! `loading` / `error` for one collection and walks every call through
//! pending → fulfilled / rejected. Commands and results travel over a typed
//! channel wrapped by [`LeadClient`](clients::LeadClient) and
//! [`ActivityClient`](clients::ActivityClient).
//!
//! ### 5. Wiring ([`lifecycle`], [`config`])
//! [`CrmSystem`](lifecycle::CrmSystem) builds all of the above from a
//! [`CrmConfig`](config::CrmConfig) and shuts the stores down.
//!
//! ## Error Handling
//!
//! Failures are tagged, not stringly typed:
//! [`ApiError::is_precondition`](error::ApiError::is_precondition) (nobody
//! signed in) and [`ApiError::is_transport`](error::ApiError::is_transport)
//! (backend unreachable) can be branched on without reading messages. Nothing
//! retries; stores record the message and keep their previous items.
//!
//! ## Running the Demo
//!
//! ```bash
//! CRM_ACCOUNT=me@example.com CRM_ACCESS_TOKEN=... RUST_LOG=info cargo run
//! ```

pub mod activity_actor;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod framework;
pub mod http;
pub mod lead_actor;
pub mod lifecycle;
pub mod model;
pub mod services;
