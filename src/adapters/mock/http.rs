//! Mock HTTP client for testing.
//!
//! Responses are configured per method and URL. A response may be delayed to
//! simulate an in-flight call, and several responses for the same route can be
//! queued to play out overlapping requests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Method, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Headers,
    /// Request body (POST and PUT only)
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Fail at the transport level
    Error(HttpError),
}

impl MockResponse {
    /// Shorthand for a JSON response with the given status.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }
}

#[derive(Debug, Clone)]
struct Rule {
    response: MockResponse,
    delay: Option<Duration>,
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use recipebox::adapters::mock::{MockHttpClient, MockResponse};
/// use recipebox::traits::Method;
/// use serde_json::json;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     Method::Get,
///     "http://api.test/users/favorites",
///     MockResponse::json(200, json!(["r1"])),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Standing responses keyed by "METHOD url"
    responses: Arc<Mutex<HashMap<String, Rule>>>,
    /// One-shot responses consumed before the standing ones
    queued: Arc<Mutex<HashMap<String, VecDeque<Rule>>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn route_key(method: Method, url: &str) -> String {
    format!("{} {}", method, url)
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a standing response for a method and URL.
    ///
    /// URLs match exactly first, then by prefix.
    pub fn set_response(&self, method: Method, url: &str, response: MockResponse) {
        lock(&self.responses).insert(
            route_key(method, url),
            Rule {
                response,
                delay: None,
            },
        );
    }

    /// Set a standing response that is only delivered after `delay`.
    pub fn set_delayed_response(
        &self,
        method: Method,
        url: &str,
        response: MockResponse,
        delay: Duration,
    ) {
        lock(&self.responses).insert(
            route_key(method, url),
            Rule {
                response,
                delay: Some(delay),
            },
        );
    }

    /// Queue a one-shot response; queued responses are served in FIFO order.
    pub fn queue_response(
        &self,
        method: Method,
        url: &str,
        response: MockResponse,
        delay: Option<Duration>,
    ) {
        lock(&self.queued)
            .entry(route_key(method, url))
            .or_default()
            .push_back(Rule { response, delay });
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Recorded requests for one method whose URL ends with `suffix`.
    pub fn requests_to(&self, method: Method, suffix: &str) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method == method && r.url.ends_with(suffix))
            .cloned()
            .collect()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn record_request(&self, method: Method, url: &str, headers: &Headers, body: Option<&str>) {
        lock(&self.requests).push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
    }

    fn find_rule(&self, method: Method, url: &str) -> Option<Rule> {
        let key = route_key(method, url);

        if let Some(rule) = lock(&self.queued).get_mut(&key).and_then(VecDeque::pop_front) {
            return Some(rule);
        }

        let responses = lock(&self.responses);
        if let Some(rule) = responses.get(&key) {
            return Some(rule.clone());
        }

        // Longest prefix wins so "/recipes/r1/related" beats "/recipes"
        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| key.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, rule)| rule.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }
        drop(responses);

        lock(&self.default_response).clone().map(|response| Rule {
            response,
            delay: None,
        })
    }

    async fn respond(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        self.record_request(method, url, headers, body);

        let rule = self.find_rule(method, url).ok_or_else(|| {
            HttpError::Other(format!("No mock response for {} {}", method, url))
        })?;

        if let Some(delay) = rule.delay {
            tokio::time::sleep(delay).await;
        }

        match rule.response {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond(Method::Get, url, headers, None).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond(Method::Post, url, headers, Some(body)).await
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond(Method::Put, url, headers, Some(body)).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond(Method::Delete, url, headers, None).await
    }
}
