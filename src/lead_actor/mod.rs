//! Lead store: entity wiring, backend adapter and error type.

pub mod entity;
pub mod error;

pub use entity::LeadBackend;
pub use error::*;

use crate::clients::LeadClient;
use crate::framework::{ResourceActor, StalePolicy};
use crate::model::LeadDto;

/// Creates a new lead store actor and its client.
pub fn new(buffer_size: usize, policy: StalePolicy) -> (ResourceActor<LeadDto>, LeadClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, policy);
    let client = LeadClient::new(generic_client);

    (actor, client)
}
