//! Single chokepoint for all backend traffic.
//!
//! Every request goes through [`Gateway`], which:
//! - prefixes the configured base URL and appends non-empty query parameters
//! - sends JSON headers plus `Authorization: Bearer <token>` when a token is set
//! - bounds each call with the configured timeout
//! - classifies failures into [`ApiError`] and raises a [`Notice`] for each one
//!   (except on the login endpoint)
//!
//! There are no retries here. Callers see every error.
//!
//! [`Notice`]: crate::error::Notice

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::endpoints;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::traits::{Headers, HttpClient, Method, Notifier};

/// Body fields never written to the log.
const REDACTED_FIELDS: &[&str] = &["password", "currentPassword", "token"];

/// Authenticated JSON gateway to the backend.
///
/// # Example
///
/// ```ignore
/// use recipebox::api::Gateway;
///
/// let gateway = Gateway::new(&config, http, notifier);
/// gateway.set_auth_token(Some("abc".to_string()));
/// let ids: Vec<String> = gateway.get("/users/favorites", &[]).await?;
/// ```
pub struct Gateway {
    base_url: String,
    timeout: Duration,
    http: Arc<dyn HttpClient>,
    notifier: Arc<dyn Notifier>,
    auth_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("authenticated", &self.auth_token().is_some())
            .finish()
    }
}

impl Gateway {
    pub fn new(
        config: &ClientConfig,
        http: Arc<dyn HttpClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            http,
            notifier,
            auth_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set or clear the bearer token sent with every subsequent request.
    pub fn set_auth_token(&self, token: Option<String>) {
        *self
            .auth_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.call(Method::Get, endpoint, params, None).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.encode_body(endpoint, body)?;
        self.call(Method::Post, endpoint, &[], Some(body)).await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.encode_body(endpoint, body)?;
        self.call(Method::Put, endpoint, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.call(Method::Delete, endpoint, params, None).await
    }

    /// Build the absolute URL, skipping empty parameter values.
    pub fn url_for(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.base_url, endpoint);
        let query: Vec<String> = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();

        if !query.is_empty() {
            url.push(if endpoint.contains('?') { '&' } else { '?' });
            url.push_str(&query.join("&"));
        }
        url
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(token) = self.auth_token() {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    fn encode_body<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|e| {
            let err = ApiError::Setup {
                message: format!("could not encode request body: {}", e),
            };
            self.report(endpoint, &err);
            err
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let url = self.url_for(endpoint, params);
        let headers = self.headers();

        match body.as_deref() {
            Some(body) => tracing::info!("Requesting: {} {} {}", method, url, redact(body)),
            None => tracing::info!("Requesting: {} {}", method, url),
        }

        let body = body.unwrap_or_default();
        let request = match method {
            Method::Get => self.http.get(&url, &headers),
            Method::Post => self.http.post(&url, &body, &headers),
            Method::Put => self.http.put(&url, &body, &headers),
            Method::Delete => self.http.delete(&url, &headers),
        };

        let result = match tokio::time::timeout(self.timeout, request).await {
            Err(_) => Err(ApiError::timeout(self.timeout)),
            Ok(Err(e)) => Err(ApiError::from_transport(&e)),
            Ok(Ok(response)) => {
                tracing::debug!(
                    "Response: {} {} -> {} {}",
                    method,
                    endpoint,
                    response.status,
                    redact(&response.text_lossy())
                );
                if response.is_success() {
                    response.json::<T>().map_err(|e| ApiError::InvalidPayload {
                        endpoint: endpoint.to_string(),
                        message: e.to_string(),
                    })
                } else {
                    Err(ApiError::from_status(response.status, &response.body))
                }
            }
        };

        if let Err(ref err) = result {
            self.report(endpoint, err);
        }
        result
    }

    /// Log a failure and alert the user unless the endpoint is silent.
    fn report(&self, endpoint: &str, err: &ApiError) {
        tracing::error!("[{}] {} failed: {}", err.error_code(), endpoint, err);
        if !endpoints::is_silent(endpoint) {
            self.notifier.notify(&err.notice());
        }
    }
}

/// Render a JSON body for the log with credential fields masked.
fn redact(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(mut map)) => {
            for field in REDACTED_FIELDS {
                if let Some(value) = map.get_mut(*field) {
                    *value = serde_json::Value::String("***".to_string());
                }
            }
            serde_json::Value::Object(map).to_string()
        }
        _ => body.to_string(),
    }
}
