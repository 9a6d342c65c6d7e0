//! Generic store framework for cached resource collections.
//!
//! This module provides the building blocks for client-side stores: one actor
//! per collection, owning `items` / `loading` / `error`, fed by typed commands.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - Trait that resource types implement to be cached
//! - [`ResourceBackend`] - The network calls behind a store
//! - [`ResourceActor`] - Generic actor that owns a [`ResourceState`]
//! - [`ResourceClient`] - Type-safe handle for sending commands
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for a scripted backend with gated replies.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
