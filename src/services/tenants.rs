use super::query::segment;
use crate::error::Result;
use crate::http::ApiClient;
use crate::model::{CreateTenantRequest, TenantDto, UpdateTenantRequest};
use reqwest::multipart::Form;
use serde::de::IgnoredAny;
use tracing::instrument;

/// `/tenants` on the identity backend.
#[derive(Clone)]
pub struct TenantsService {
    client: ApiClient,
}

impl TenantsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Registers a tenant and its first contact. The backend only accepts form data here.
    #[instrument(skip_all, fields(tenant = %tenant.tenant_name))]
    pub async fn create_tenant(&self, tenant: &CreateTenantRequest) -> Result<TenantDto> {
        self.client.post_form_data("/tenants", tenant_form(tenant)).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_tenants(&self) -> Result<Vec<TenantDto>> {
        self.client.get("/tenants").await
    }

    #[instrument(skip(self))]
    pub async fn get_tenant_by_id(&self, tenant_id: &str) -> Result<TenantDto> {
        self.client.get(&format!("/tenants/{}", segment(tenant_id))).await
    }

    #[instrument(skip(self, tenant))]
    pub async fn update_tenant(&self, tenant_id: &str, tenant: &UpdateTenantRequest) -> Result<()> {
        let _: IgnoredAny = self.client.put(&format!("/tenants/{}", segment(tenant_id)), tenant).await?;
        Ok(())
    }

    /// Deactivates the tenant.
    #[instrument(skip(self))]
    pub async fn delete_tenant(&self, tenant_id: &str) -> Result<()> {
        let _: IgnoredAny = self.client.delete(&format!("/tenants/{}", segment(tenant_id))).await?;
        Ok(())
    }
}

fn tenant_form(tenant: &CreateTenantRequest) -> Form {
    let mut form = Form::new()
        .text("TenantName", tenant.tenant_name.clone())
        .text("TenantAddress1", tenant.tenant_address1.clone());
    if let Some(address2) = &tenant.tenant_address2 {
        form = form.text("TenantAddress2", address2.clone());
    }
    form = form
        .text("TenantCity", tenant.tenant_city.clone())
        .text("TenantState", tenant.tenant_state.clone())
        .text("TenantZip", tenant.tenant_zip.clone())
        .text("TenantPhoneNumber", tenant.tenant_phone_number.clone());
    if let Some(fax) = &tenant.tenant_fax {
        form = form.text("TenantFax", fax.clone());
    }
    form.text("ContactFirstName", tenant.contact_first_name.clone())
        .text("ContactLastName", tenant.contact_last_name.clone())
        .text("ContactMobilePhone", tenant.contact_mobile_phone.clone())
        .text("ContactEmail", tenant.contact_email.clone())
        .text("Password", tenant.password.clone())
}
