use super::query::{segment, tenant_scoped, with_query};
use crate::error::Result;
use crate::http::ApiClient;
use crate::model::{
    CreateLeadActivityCommand, GetLeadActivitiesQuery, LeadActivityDto, UpdateLeadActivityCommand,
};
use serde::de::IgnoredAny;
use tracing::instrument;

/// `/api/LeadActivities` on the leads backend.
#[derive(Clone)]
pub struct LeadActivitiesService {
    client: ApiClient,
}

impl LeadActivitiesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_lead_activities(&self, query: &GetLeadActivitiesQuery) -> Result<Vec<LeadActivityDto>> {
        let path = with_query("/api/LeadActivities", query)?;
        self.client.get(&path).await
    }

    #[instrument(skip(self))]
    pub async fn get_lead_activity_by_id(&self, id: &str, tenant_id: Option<&str>) -> Result<LeadActivityDto> {
        let path = tenant_scoped(&format!("/api/LeadActivities/{}", segment(id)), tenant_id)?;
        self.client.get(&path).await
    }

    #[instrument(skip(self, command))]
    pub async fn create_lead_activity(
        &self,
        command: &CreateLeadActivityCommand,
        tenant_id: Option<&str>,
    ) -> Result<LeadActivityDto> {
        let path = tenant_scoped("/api/LeadActivities", tenant_id)?;
        self.client.post(&path, command).await
    }

    #[instrument(skip(self, command))]
    pub async fn update_lead_activity(
        &self,
        id: &str,
        command: &UpdateLeadActivityCommand,
        tenant_id: Option<&str>,
    ) -> Result<LeadActivityDto> {
        let path = tenant_scoped(&format!("/api/LeadActivities/{}", segment(id)), tenant_id)?;
        self.client.put(&path, command).await
    }

    #[instrument(skip(self))]
    pub async fn delete_lead_activity(&self, id: &str, tenant_id: Option<&str>) -> Result<()> {
        let path = tenant_scoped(&format!("/api/LeadActivities/{}", segment(id)), tenant_id)?;
        let _: IgnoredAny = self.client.delete(&path).await?;
        Ok(())
    }
}
