use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::lead_actor::LeadError;
use crate::model::{CreateLeadCommand, GetLeadsQuery, LeadDto, UpdateLeadCommand};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the lead store.
#[derive(Clone)]
pub struct LeadClient {
    inner: ResourceClient<LeadDto>,
}

impl LeadClient {
    pub fn new(inner: ResourceClient<LeadDto>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn fetch_leads(&self, query: GetLeadsQuery) -> Result<Vec<LeadDto>, LeadError> {
        self.fetch(query).await
    }

    #[instrument(skip(self, command), fields(name = %command.name))]
    pub async fn create_lead(&self, command: CreateLeadCommand) -> Result<LeadDto, LeadError> {
        debug!(?command, "create_lead called");
        self.inner.create(command).await.map_err(Self::map_error)
    }

    /// The command's own `id` is what the backend sees; the store patches by the returned lead's id.
    #[instrument(skip(self, command), fields(id = %command.id))]
    pub async fn update_lead(&self, command: UpdateLeadCommand) -> Result<LeadDto, LeadError> {
        debug!(?command, "update_lead called");
        self.inner
            .update(command.id.clone(), command)
            .await
            .map_err(Self::map_error)
    }

    pub async fn delete_lead(&self, id: impl Into<String>) -> Result<(), LeadError> {
        self.delete(id.into()).await
    }
}

#[async_trait]
impl ActorClient<LeadDto> for LeadClient {
    type Error = LeadError;

    fn inner(&self) -> &ResourceClient<LeadDto> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Api(api) => LeadError::Api(api),
            other => LeadError::ActorCommunicationError(other.to_string()),
        }
    }
}
