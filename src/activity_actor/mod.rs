//! Lead-activity store.

pub mod entity;
pub mod error;

pub use entity::ActivityBackend;
pub use error::*;

use crate::clients::ActivityClient;
use crate::framework::{ResourceActor, StalePolicy};
use crate::model::LeadActivityDto;

/// Creates a new activity store actor and its client.
pub fn new(buffer_size: usize, policy: StalePolicy) -> (ResourceActor<LeadActivityDto>, ActivityClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, policy);
    (actor, ActivityClient::new(generic_client))
}
