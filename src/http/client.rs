use crate::auth::AccessTokenProvider;
use crate::error::{ApiError, Result};
use crate::model::ProblemDetails;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// HTTP client bound to one backend base URL.
///
/// Every call asks the [`AccessTokenProvider`] for a fresh token. There is no
/// caching, retry or timeout at this layer; the transport defaults apply.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url, tokens)
    }

    /// Shares an existing connection pool between several backends.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            tokens,
        }
    }

    /// Sends a JSON request to `base_url + path` and returns the parsed body verbatim.
    ///
    /// A 204 response yields an empty JSON object without touching the body.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let token = self.tokens.access_token().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, has_body = body.is_some(), "Sending request");

        let mut builder = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder
            .send()
            .await?;
        read_response(response).await
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        decode(self.request::<()>(Method::GET, path, None).await?)
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        decode(self.request(Method::POST, path, Some(body)).await?)
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        decode(self.request(Method::PUT, path, Some(body)).await?)
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        decode(self.request(Method::PATCH, path, Some(body)).await?)
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        decode(self.request::<()>(Method::DELETE, path, None).await?)
    }

    /// Posts a multipart form. The content type (with its boundary) is left to reqwest.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn post_form_data<R: DeserializeOwned>(&self, path: &str, form: Form) -> Result<R> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Sending multipart request");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await?;
        decode(read_response(response).await?)
    }
}

async fn read_response(response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        // An unreadable error body falls back to the status line.
        let body = response.text().await.unwrap_or_default();
        let message = problem_message(status, &body);
        warn!(status = status.as_u16(), %message, "Request failed");
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Object(Map::new()));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn problem_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ProblemDetails>(body)
        .ok()
        .and_then(|problem| problem.message().map(String::from))
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
        })
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R> {
    Ok(serde_json::from_value(value)?)
}
