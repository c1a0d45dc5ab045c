//! JSON request helper.

use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::response::error_message_or_default;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use reqwest::Method;

/// Client for the console REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client resolving relative paths against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Creates a client for the configured `API_BASE_URL`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.as_str())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a JSON request and parses the JSON response.
    ///
    /// # Errors
    /// - `AppError::Api` when the status is not 2xx; the message is the
    ///   body's `error` field, or "API Request Failed".
    /// - `AppError::ExternalService` when the request could not be sent.
    /// - `AppError::InvalidResponse` when a successful body is not the
    ///   expected JSON.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
    ) -> AppResult<T> {
        let url = self.url(path);
        let result = self.send(&url, method.clone(), body).await;
        if let Err(e) = &result {
            tracing::error!(method = %method, url = %url, error = %e, "API Error");
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        method: Method,
        body: Option<Value>,
    ) -> AppResult<T> {
        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("request to {} failed: {}", url, e)))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalService(format!("reading response from {} failed: {}", url, e)))?;

        let parsed: Result<Value, _> = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice(&bytes)
        };

        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: error_message_or_default(parsed.as_ref().ok()),
            });
        }

        let value = parsed.map_err(|e| AppError::InvalidResponse(format!("body is not JSON: {}", e)))?;
        serde_json::from_value(value).map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(path, Method::GET, None).await
    }

    pub async fn post<T, B>(&self, path: &str, data: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, Method::POST, Some(serde_json::to_value(data)?)).await
    }

    pub async fn put<T, B>(&self, path: &str, data: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(path, Method::PUT, Some(serde_json::to_value(data)?)).await
    }

    /// Sends a DELETE, with an optional body.
    pub async fn delete<T, B>(&self, path: &str, data: Option<&B>) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = data.map(serde_json::to_value).transpose()?;
        self.request(path, Method::DELETE, body).await
    }
}
