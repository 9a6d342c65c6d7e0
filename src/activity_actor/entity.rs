//! Store wiring for [`LeadActivityDto`].

use crate::error::ApiError;
use crate::framework::{ResourceBackend, StoreEntity};
use crate::model::{
    CreateLeadActivityCommand, GetLeadActivitiesQuery, LeadActivityDto, UpdateLeadActivityCommand,
};
use crate::services::LeadActivitiesService;
use async_trait::async_trait;

impl StoreEntity for LeadActivityDto {
    type Id = String;
    type Query = GetLeadActivitiesQuery;
    type Create = CreateLeadActivityCommand;
    type Update = UpdateLeadActivityCommand;

    fn id(&self) -> &String {
        &self.id
    }
}

pub struct ActivityBackend {
    service: LeadActivitiesService,
    tenant_id: Option<String>,
}

impl ActivityBackend {
    pub fn new(service: LeadActivitiesService, tenant_id: Option<String>) -> Self {
        Self { service, tenant_id }
    }
}

#[async_trait]
impl ResourceBackend<LeadActivityDto> for ActivityBackend {
    async fn list(&self, mut query: GetLeadActivitiesQuery) -> Result<Vec<LeadActivityDto>, ApiError> {
        if query.tenant_id.is_none() {
            query.tenant_id = self.tenant_id.clone();
        }
        self.service.get_lead_activities(&query).await
    }

    async fn create(&self, command: CreateLeadActivityCommand) -> Result<LeadActivityDto, ApiError> {
        self.service
            .create_lead_activity(&command, self.tenant_id.as_deref())
            .await
    }

    async fn update(&self, id: String, command: UpdateLeadActivityCommand) -> Result<LeadActivityDto, ApiError> {
        self.service
            .update_lead_activity(&id, &command, self.tenant_id.as_deref())
            .await
    }

    async fn delete(&self, id: String) -> Result<(), ApiError> {
        self.service
            .delete_lead_activity(&id, self.tenant_id.as_deref())
            .await
    }
}
