use super::query::{segment, with_query};
use crate::error::Result;
use crate::http::ApiClient;
use crate::model::{CreateUserRequest, UpdateUserRequest, UserDto};
use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::instrument;

#[derive(Serialize)]
struct UsersQuery<'a> {
    #[serde(rename = "TenantId", skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,
}

/// `/users` on the identity backend.
#[derive(Clone)]
pub struct UsersService {
    client: ApiClient,
}

impl UsersService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The user the current token belongs to.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<UserDto> {
        self.client.get("/users/me").await
    }

    #[instrument(skip(self))]
    pub async fn does_user_name_exist(&self, user_name: &str) -> Result<bool> {
        self.client.get(&format!("/users/usernameexists/{}", segment(user_name))).await
    }

    #[instrument(skip(self, user))]
    pub async fn create_user(&self, user: &CreateUserRequest) -> Result<UserDto> {
        self.client.post("/users", user).await
    }

    #[instrument(skip(self))]
    pub async fn get_users_by_tenant_id(&self, tenant_id: Option<&str>) -> Result<Vec<UserDto>> {
        let path = with_query("/users", &UsersQuery { tenant_id })?;
        self.client.get(&path).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, user_id: &str) -> Result<UserDto> {
        self.client.get(&format!("/users/{}", segment(user_id))).await
    }

    #[instrument(skip(self, user))]
    pub async fn update_user(&self, user_id: &str, user: &UpdateUserRequest) -> Result<()> {
        let _: IgnoredAny = self.client.put(&format!("/users/{}", segment(user_id)), user).await?;
        Ok(())
    }

    /// Deactivates the user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let _: IgnoredAny = self.client.delete(&format!("/users/{}", segment(user_id))).await?;
        Ok(())
    }
}
