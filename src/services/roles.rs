use super::query::segment;
use crate::error::Result;
use crate::http::ApiClient;
use crate::model::{CreateUserRoleRequest, RoleDto};
use serde::de::IgnoredAny;
use tracing::instrument;

/// `/roles` on the identity backend.
#[derive(Clone)]
pub struct RolesService {
    client: ApiClient,
}

impl RolesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, role))]
    pub async fn create_role(&self, role: &RoleDto) -> Result<RoleDto> {
        self.client.post("/roles", role).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_roles(&self) -> Result<Vec<RoleDto>> {
        self.client.get("/roles").await
    }

    #[instrument(skip(self, role))]
    pub async fn update_role(&self, role_id: &str, role: &RoleDto) -> Result<()> {
        let _: IgnoredAny = self.client.put(&format!("/roles/{}", segment(role_id)), role).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_role(&self, role_id: &str) -> Result<()> {
        let _: IgnoredAny = self.client.delete(&format!("/roles/{}", segment(role_id))).await?;
        Ok(())
    }
}

/// `/{userId}/roles` on the identity backend.
#[derive(Clone)]
pub struct UserRolesService {
    client: ApiClient,
}

impl UserRolesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_user_roles(&self, user_id: &str) -> Result<Vec<RoleDto>> {
        self.client.get(&format!("/{}/roles", segment(user_id))).await
    }

    /// Returns one flag per requested role, true where the assignment took effect.
    #[instrument(skip(self, request))]
    pub async fn assign_user_to_role(&self, user_id: &str, request: &CreateUserRoleRequest) -> Result<Vec<bool>> {
        self.client.patch(&format!("/{}/roles", segment(user_id)), request).await
    }
}
