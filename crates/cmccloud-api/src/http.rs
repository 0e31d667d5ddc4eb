//! reqwest transport for the CMC Cloud API
//!
//! Every call goes to `{base}/{action}.json` with the API key both as the
//! `api_key` query parameter and as a bearer token. GET and DELETE carry
//! their parameters in the query string; POST and PUT send a JSON body.

use crate::config::ApiConfig;
use crate::error::Result;
use async_trait::async_trait;
use cmccloud_task::{ApiErrorBody, ApiRequest, Method, RawResponse, Transport};
use reqwest::header::ACCEPT;

/// HTTP transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = self.config.endpoint(&request.action);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        let builder = builder
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.config.api_key)
            .query(&[("api_key", self.config.api_key.as_str())]);

        if request.method.has_body() {
            builder.json(&request.params)
        } else {
            builder.query(&request.params.to_query())
        }
    }
}

/// Error payload for a non-2xx response
///
/// Falls back to the raw body, or the status reason when the body is empty,
/// so a failed status never reads as success.
fn error_payload(status: reqwest::StatusCode, body: &str) -> ApiErrorBody {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .filter(|e| e.error_code != 0 || !e.error_text.is_empty())
        .unwrap_or_else(|| {
            let text = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.to_string()
            };
            ApiErrorBody::new(0, text)
        })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> RawResponse {
        let response = match self.build(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(request = %request, error = %e, "Request failed");
                return RawResponse::transport_failure(e.to_string());
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return RawResponse::transport_failure(e.to_string()),
        };
        tracing::debug!(request = %request, status = status.as_u16(), "Response received");

        if status.is_success() {
            return RawResponse {
                status: status.as_u16(),
                body,
                ..Default::default()
            };
        }

        let error = error_payload(status, &body);
        RawResponse::failed(status.as_u16(), error, body)
    }
}
