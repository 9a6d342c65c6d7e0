//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod activity_client;
pub mod actor_client;
pub mod lead_client;

pub use activity_client::*;
pub use actor_client::*;
pub use lead_client::*;
