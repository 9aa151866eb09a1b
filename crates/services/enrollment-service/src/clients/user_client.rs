//! User Authority client.

use async_trait::async_trait;
use tracing::warn;

use common::{RemoteClient, RemoteError, RemoteOutcome};

#[cfg(test)]
use mockall::automock;

/// Answer to "does this user exist?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Exists,
    /// The authority answered, and the answer was no
    Missing,
    /// No definitive answer after retries
    Unavailable(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn lookup_user(&self, username: &str) -> UserLookup;
}

/// `GET {base}/users/{username}` over the shared remote client.
pub struct HttpUserDirectory {
    client: RemoteClient,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(client: RemoteClient, base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let base_url = base_url.into();
        RemoteClient::endpoint(&base_url, &[])?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn lookup_user(&self, username: &str) -> UserLookup {
        let url = match RemoteClient::endpoint(&self.base_url, &["users", username]) {
            Ok(url) => url,
            Err(RemoteError::DotSegment(_)) => return UserLookup::Missing,
            Err(e) => return UserLookup::Unavailable(e.to_string()),
        };

        match self.client.get(url).await {
            RemoteOutcome::Success(_) => UserLookup::Exists,
            RemoteOutcome::NotFound => UserLookup::Missing,
            RemoteOutcome::Rejected(status) => {
                warn!(username, status, "User lookup rejected");
                UserLookup::Missing
            }
            RemoteOutcome::Unavailable(reason) => UserLookup::Unavailable(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;

    use super::*;
    use common::RetryConfig;

    fn directory(base_url: &str) -> HttpUserDirectory {
        let client = RemoteClient::new(RetryConfig {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            timeout: Duration::from_secs(2),
            ..RetryConfig::default()
        })
        .unwrap();
        HttpUserDirectory::new(client, base_url).unwrap()
    }

    #[tokio::test]
    async fn test_dot_usernames_are_missing_without_a_call() {
        let server = MockServer::start_async().await;
        let listing = server
            .mock_async(|when, then| {
                when.method(GET).path("/users");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let users = directory(&server.base_url());
        assert_eq!(users.lookup_user("..").await, UserLookup::Missing);
        assert_eq!(users.lookup_user(".").await, UserLookup::Missing);
        listing.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_rejected_status_is_missing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/bob");
                then.status(401);
            })
            .await;

        assert_eq!(
            directory(&server.base_url()).lookup_user("bob").await,
            UserLookup::Missing
        );
    }
}
