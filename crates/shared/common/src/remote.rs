//! HTTP client for calls to peer services.
//!
//! Transient failures (connection errors, timeouts, configured server-error
//! statuses) are retried with exponential backoff. Every other response is
//! classified once and returned immediately.

use std::sync::Arc;
use std::time::Duration;

use backon::{BackoffBuilder, ExponentialBuilder, Retryable};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::RetryConfig;

/// Remote client construction and addressing errors.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid service URL '{0}'")]
    InvalidUrl(String),

    /// `.` and `..` would be collapsed away and address a different resource
    #[error("'{0}' cannot be used as a path segment")]
    DotSegment(String),
}

/// Successful response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBody(String);

impl RemoteBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the payload as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.0)
    }
}

/// Classified result of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// 2xx response
    Success(RemoteBody),
    /// 404 response
    NotFound,
    /// Any other non-transient status
    Rejected(u16),
    /// Retries exhausted or the request could not be built
    Unavailable(String),
}

impl RemoteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RemoteOutcome::Success(_))
    }
}

/// Why a single attempt produced no outcome.
#[derive(Error, Debug)]
enum AttemptError {
    #[error("{0}")]
    Transient(String),

    #[error("{0}")]
    Unsendable(String),
}

impl AttemptError {
    fn is_transient(&self) -> bool {
        matches!(self, AttemptError::Transient(_))
    }
}

impl RetryConfig {
    /// Backoff between attempts: `base * 2^(n-1)` capped at `max_delay`,
    /// with `max_attempts - 1` retries.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }

    /// Longest a single call can take: every attempt timing out plus every delay.
    pub fn worst_case(&self) -> Duration {
        let attempts = self
            .timeout
            .checked_mul(self.max_attempts.max(1))
            .unwrap_or(Duration::MAX);
        self.backoff()
            .build()
            .fold(attempts, |total, delay| total.saturating_add(delay))
    }

    /// Shrink the policy until [`worst_case`](Self::worst_case) fits in `budget`.
    ///
    /// Attempts are dropped first; a single attempt that still does not fit
    /// gets its timeout cut to the budget.
    pub fn fit_within(mut self, budget: Duration) -> Self {
        while self.max_attempts > 1 && self.worst_case() > budget {
            self.max_attempts -= 1;
        }
        if self.worst_case() > budget {
            self.max_attempts = 1;
            self.timeout = budget;
        }
        self
    }
}

/// Shared, cloneable client. Holds configuration only.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    config: Arc<RetryConfig>,
}

impl RemoteClient {
    pub fn new(config: RetryConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Join percent-encoded path segments onto a base URL.
    pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, RemoteError> {
        if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(RemoteError::DotSegment(dot.to_string()));
        }
        let mut url = Url::parse(base).map_err(|_| RemoteError::InvalidUrl(base.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(&self, url: Url) -> RemoteOutcome {
        self.call(Method::GET, url, None).await
    }

    /// Issue a call, retrying transient failures per the retry policy.
    pub async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> RemoteOutcome {
        let mut retries = 0u32;

        let result = (|| self.attempt(method.clone(), url.clone(), body))
            .retry(self.config.backoff())
            .when(AttemptError::is_transient)
            .notify(|err: &AttemptError, delay: Duration| {
                retries += 1;
                warn!(
                    %method,
                    %url,
                    attempt = retries,
                    reason = %err,
                    delay_ms = delay.as_millis() as u64,
                    "Transient remote failure, retrying"
                );
            })
            .await;

        let attempts = retries + 1;
        match result {
            Ok(outcome) => {
                debug!(%method, %url, attempts, "Remote call finished");
                outcome
            }
            Err(AttemptError::Unsendable(reason)) => RemoteOutcome::Unavailable(reason),
            Err(AttemptError::Transient(reason)) => {
                error!(%method, %url, attempts, %reason, "Remote call retries exhausted");
                RemoteOutcome::Unavailable(format!("{} after {} attempt(s)", reason, attempts))
            }
        }
    }

    async fn attempt(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<RemoteOutcome, AttemptError> {
        let mut request = self
            .http
            .request(method, url)
            .timeout(self.config.timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => return Err(AttemptError::Unsendable(e.to_string())),
            Err(e) if e.is_timeout() => return Err(AttemptError::Transient("timed out".into())),
            Err(e) => return Err(AttemptError::Transient(format!("request failed: {}", e))),
        };

        let status = response.status().as_u16();

        if response.status().is_success() {
            return response
                .text()
                .await
                .map(|text| RemoteOutcome::Success(RemoteBody(text)))
                .map_err(|e| AttemptError::Transient(format!("failed to read body: {}", e)));
        }

        if self.config.is_retryable_status(status) {
            return Err(AttemptError::Transient(format!("status {}", status)));
        }

        if status == 404 {
            Ok(RemoteOutcome::NotFound)
        } else {
            Ok(RemoteOutcome::Rejected(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use axum::{extract::State, http::StatusCode, routing::get, Router};
    use httpmock::prelude::*;

    use super::*;

    fn fast_policy(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            timeout: Duration::from_secs(2),
            ..RetryConfig::default()
        }
    }

    fn client(max_attempts: u32) -> RemoteClient {
        RemoteClient::new(fast_policy(max_attempts)).unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/courses/c1");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({"course_id": "c1", "title": "Rust"}));
            })
            .await;

        let url = RemoteClient::endpoint(&server.base_url(), &["courses", "c1"]).unwrap();
        let outcome = client(3).get(url).await;

        mock.assert_async().await;
        match outcome {
            RemoteOutcome::Success(body) => {
                let value: serde_json::Value = body.json().unwrap();
                assert_eq!(value["title"], "Rust");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_retried_until_unavailable() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/alice");
                then.status(503);
            })
            .await;

        let url = RemoteClient::endpoint(&server.base_url(), &["users", "alice"]).unwrap();
        let outcome = client(3).get(url).await;

        mock.assert_hits_async(3).await;
        assert!(matches!(outcome, RemoteOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/ghost");
                then.status(404);
            })
            .await;

        let url = RemoteClient::endpoint(&server.base_url(), &["users", "ghost"]).unwrap();
        let outcome = client(4).get(url).await;

        mock.assert_hits_async(1).await;
        assert_eq!(outcome, RemoteOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_other_client_errors_are_rejected() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/bob");
                then.status(401);
            })
            .await;

        let url = RemoteClient::endpoint(&server.base_url(), &["users", "bob"]).unwrap();
        let outcome = client(4).get(url).await;

        mock.assert_hits_async(1).await;
        assert_eq!(outcome, RemoteOutcome::Rejected(401));
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        async fn flaky(State(calls): State<Arc<AtomicU32>>) -> (StatusCode, &'static str) {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                (StatusCode::BAD_GATEWAY, "")
            } else {
                (StatusCode::OK, r#"{"username":"alice"}"#)
            }
        }

        let calls = Arc::new(AtomicU32::new(0));
        let app = Router::new()
            .route("/users/alice", get(flaky))
            .with_state(calls.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let url =
            RemoteClient::endpoint(&format!("http://{}", addr), &["users", "alice"]).unwrap();
        let outcome = client(3).get(url).await;

        assert!(outcome.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let url = RemoteClient::endpoint("http://127.0.0.1:1", &["users", "alice"]).unwrap();
        let outcome = client(2).get(url).await;
        assert!(matches!(outcome, RemoteOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/feedback")
                    .json_body(serde_json::json!({"rating": 5}));
                then.status(201);
            })
            .await;

        let url = RemoteClient::endpoint(&server.base_url(), &["feedback"]).unwrap();
        let body = serde_json::json!({"rating": 5});
        let outcome = client(1).call(Method::POST, url, Some(&body)).await;

        mock.assert_async().await;
        assert!(outcome.is_success());
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = RemoteClient::endpoint("http://users:5001/", &["users", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://users:5001/users/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_refuses_dot_segments() {
        for dot in [".", ".."] {
            assert!(matches!(
                RemoteClient::endpoint("http://course-service:5002", &["courses", dot]),
                Err(RemoteError::DotSegment(_))
            ));
        }
        let url = RemoteClient::endpoint("http://course-service:5002", &["courses", "..."]).unwrap();
        assert_eq!(url.path(), "/courses/...");
    }

    #[test]
    fn test_backoff_grows_exponentially() {
        let config = RetryConfig {
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            ..RetryConfig::default()
        };
        let delays: Vec<_> = config.backoff().build().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4)
            ]
        );
    }

    #[test]
    fn test_backoff_capped_and_non_decreasing() {
        let config = RetryConfig {
            max_attempts: 40,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            ..RetryConfig::default()
        };
        let delays: Vec<_> = config.backoff().build().collect();
        assert_eq!(delays.len(), 39);
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*delays.last().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_single_attempt_has_no_backoff() {
        assert_eq!(fast_policy(1).backoff().build().count(), 0);
    }

    #[test]
    fn test_default_policy_fits_request_deadline() {
        assert!(RetryConfig::default().worst_case() < Duration::from_secs(30));
    }

    #[test]
    fn test_fit_within_drops_attempts_then_timeout() {
        let slow = RetryConfig {
            max_attempts: 4,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(10),
            ..RetryConfig::default()
        };
        assert_eq!(slow.worst_case(), Duration::from_secs(47));

        let fitted = slow.clone().fit_within(Duration::from_secs(22));
        assert_eq!(fitted.max_attempts, 2);
        assert!(fitted.worst_case() <= Duration::from_secs(22));

        let tight = slow.fit_within(Duration::from_secs(3));
        assert_eq!(tight.max_attempts, 1);
        assert_eq!(tight.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        assert!(matches!(
            RemoteClient::endpoint("not a url", &["users"]),
            Err(RemoteError::InvalidUrl(_))
        ));
    }
}
