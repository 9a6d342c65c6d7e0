use super::query::{segment, tenant_scoped, with_query};
use crate::error::Result;
use crate::http::ApiClient;
use crate::model::{CreateLeadCommand, GetLeadsQuery, LeadDto, UpdateLeadCommand};
use serde::de::IgnoredAny;
use tracing::instrument;

/// `/api/Leads` on the leads backend.
#[derive(Clone)]
pub struct LeadsService {
    client: ApiClient,
}

impl LeadsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists leads matching the supplied filters.
    #[instrument(skip(self))]
    pub async fn get_leads(&self, query: &GetLeadsQuery) -> Result<Vec<LeadDto>> {
        let path = with_query("/api/Leads", query)?;
        self.client.get(&path).await
    }

    #[instrument(skip(self))]
    pub async fn get_lead_by_id(&self, id: &str, tenant_id: Option<&str>) -> Result<LeadDto> {
        let path = tenant_scoped(&format!("/api/Leads/{}", segment(id)), tenant_id)?;
        self.client.get(&path).await
    }

    #[instrument(skip(self, command))]
    pub async fn create_lead(&self, command: &CreateLeadCommand) -> Result<LeadDto> {
        self.client.post("/api/Leads", command).await
    }

    #[instrument(skip(self, command))]
    pub async fn update_lead(&self, id: &str, command: &UpdateLeadCommand) -> Result<LeadDto> {
        self.client.put(&format!("/api/Leads/{}", segment(id)), command).await
    }

    #[instrument(skip(self))]
    pub async fn delete_lead(&self, id: &str, tenant_id: Option<&str>) -> Result<()> {
        let path = tenant_scoped(&format!("/api/Leads/{}", segment(id)), tenant_id)?;
        let _: IgnoredAny = self.client.delete(&path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessTokenProvider;
    use crate::error::AuthError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    struct Token;

    #[async_trait]
    impl AccessTokenProvider for Token {
        async fn access_token(&self) -> std::result::Result<String, AuthError> {
            Ok("t".into())
        }
    }

    fn service(server: &MockServer) -> LeadsService {
        LeadsService::new(ApiClient::new(server.uri(), Arc::new(Token)))
    }

    #[tokio::test]
    async fn test_get_leads_sends_exact_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Leads"))
            .and(|req: &Request| req.url.query() == Some("TenantId=t1&PageSize=20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "1", "name": "John Doe" },
                { "id": "2", "name": "Jane Smith" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let query = GetLeadsQuery {
            tenant_id: Some("t1".into()),
            page_size: Some(20),
            ..Default::default()
        };
        let leads = service(&server).get_leads(&query).await.unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].id, "1");
        assert_eq!(leads[1].name, "Jane Smith");
    }

    #[tokio::test]
    async fn test_get_leads_without_filters_has_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Leads"))
            .and(|req: &Request| req.url.query().is_none())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let leads = service(&server).get_leads(&GetLeadsQuery::default()).await.unwrap();
        assert!(leads.is_empty());
    }

    #[tokio::test]
    async fn test_crud_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/Leads/42"))
            .and(|req: &Request| req.url.query() == Some("tenantId=t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "42", "name": "Found" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/Leads"))
            .and(body_json(json!({ "name": "New" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "43", "name": "New" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/Leads/43"))
            .and(body_json(json!({ "id": "43", "status": "qualified" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "43", "name": "New", "status": "qualified" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/Leads/43"))
            .and(|req: &Request| req.url.query().is_none())
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(&server);

        let found = service.get_lead_by_id("42", Some("t1")).await.unwrap();
        assert_eq!(found.name, "Found");

        let created = service
            .create_lead(&CreateLeadCommand {
                name: "New".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, "43");

        let updated = service
            .update_lead(
                "43",
                &UpdateLeadCommand {
                    id: "43".into(),
                    status: Some("qualified".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status.as_deref(), Some("qualified"));

        service.delete_lead("43", None).await.unwrap();
    }
}
