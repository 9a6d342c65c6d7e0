//! Store wiring for [`LeadDto`].
//!
//! [`LeadBackend`] maps each store lifecycle action onto one [`LeadsService`] call.

use crate::error::ApiError;
use crate::framework::{ResourceBackend, StoreEntity};
use crate::model::{CreateLeadCommand, GetLeadsQuery, LeadDto, UpdateLeadCommand};
use crate::services::LeadsService;
use async_trait::async_trait;

impl StoreEntity for LeadDto {
    type Id = String;
    type Query = GetLeadsQuery;
    type Create = CreateLeadCommand;
    type Update = UpdateLeadCommand;

    fn id(&self) -> &String {
        &self.id
    }
}

pub struct LeadBackend {
    service: LeadsService,
    tenant_id: Option<String>,
}

impl LeadBackend {
    /// `tenant_id` fills in list queries that don't name a tenant, and scopes deletes.
    pub fn new(service: LeadsService, tenant_id: Option<String>) -> Self {
        Self { service, tenant_id }
    }
}

#[async_trait]
impl ResourceBackend<LeadDto> for LeadBackend {
    async fn list(&self, mut query: GetLeadsQuery) -> Result<Vec<LeadDto>, ApiError> {
        if query.tenant_id.is_none() {
            query.tenant_id = self.tenant_id.clone();
        }
        self.service.get_leads(&query).await
    }

    async fn create(&self, command: CreateLeadCommand) -> Result<LeadDto, ApiError> {
        self.service.create_lead(&command).await
    }

    async fn update(&self, id: String, command: UpdateLeadCommand) -> Result<LeadDto, ApiError> {
        self.service.update_lead(&id, &command).await
    }

    async fn delete(&self, id: String) -> Result<(), ApiError> {
        self.service.delete_lead(&id, self.tenant_id.as_deref()).await
    }
}
