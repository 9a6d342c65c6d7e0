use crate::activity_actor::ActivityError;
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CreateLeadActivityCommand, GetLeadActivitiesQuery, LeadActivityDto, UpdateLeadActivityCommand};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the lead-activity store.
#[derive(Clone)]
pub struct ActivityClient {
    inner: ResourceClient<LeadActivityDto>,
}

impl ActivityClient {
    pub fn new(inner: ResourceClient<LeadActivityDto>) -> Self {
        Self { inner }
    }

    /// Loads the timeline of one lead.
    #[instrument(skip(self))]
    pub async fn fetch_for_lead(&self, lead_id: &str) -> Result<Vec<LeadActivityDto>, ActivityError> {
        let query = GetLeadActivitiesQuery {
            lead_id: Some(lead_id.to_string()),
            ..Default::default()
        };
        self.fetch(query).await
    }

    #[instrument(skip(self, command), fields(lead_id = %command.activity.lead_id))]
    pub async fn log_activity(&self, command: CreateLeadActivityCommand) -> Result<LeadActivityDto, ActivityError> {
        debug!(?command, "log_activity called");
        self.inner.create(command).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, command), fields(id = %command.activity.id))]
    pub async fn update_activity(&self, command: UpdateLeadActivityCommand) -> Result<LeadActivityDto, ActivityError> {
        debug!(?command, "update_activity called");
        self.inner
            .update(command.activity.id.clone(), command)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<LeadActivityDto> for ActivityClient {
    type Error = ActivityError;

    fn inner(&self) -> &ResourceClient<LeadActivityDto> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::Api(api) => ActivityError::Api(api),
            other => ActivityError::ActorCommunicationError(other.to_string()),
        }
    }
}
