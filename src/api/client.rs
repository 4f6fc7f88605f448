use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use crate::api::{ApiError, Backend, ListEnvelope, Params};
use crate::config::ApiConfig;
use crate::entity::Status;

/// HTTP implementation of [`Backend`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            base_url: with_trailing_slash(config.base_url.clone()),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, resource: &str, action: &str, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::Transport(format!("invalid base URL {}", self.base_url)))?;
            segments.pop_if_empty().push(resource).push(action);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        debug!(%status, "backend returned an error");
        Err(ApiError::from_response(status, &body))
    }
}

#[async_trait]
impl Backend for ApiClient {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self, resource: &str, params: &Params) -> Result<ListEnvelope, ApiError> {
        let url = self.endpoint(resource, "getall", None)?;
        let response = self.send(self.request(Method::GET, url).query(params)).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        ListEnvelope::from_value(body)
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, resource: &str, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(resource, "delete", Some(id))?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn set_status(&self, resource: &str, id: &str, status: Status) -> Result<(), ApiError> {
        let url = self.endpoint(resource, "status", Some(id))?;
        let body = json!({ "status": status.as_wire() });
        self.send(self.request(Method::PUT, url).json(&body)).await?;
        Ok(())
    }

    #[instrument(skip(self, body), level = "debug")]
    async fn create(&self, resource: &str, body: &Value) -> Result<(), ApiError> {
        let url = self.endpoint(resource, "add", None)?;
        self.send(self.request(Method::POST, url).json(body)).await?;
        Ok(())
    }

    #[instrument(skip(self, body), level = "debug")]
    async fn update(&self, resource: &str, id: &str, body: &Value) -> Result<(), ApiError> {
        let url = self.endpoint(resource, "edit", Some(id))?;
        self.send(self.request(Method::PUT, url).json(body)).await?;
        Ok(())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
