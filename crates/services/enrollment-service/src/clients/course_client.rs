//! Course Authority client.

use async_trait::async_trait;
use tracing::warn;

use common::{RemoteClient, RemoteError, RemoteOutcome};
use domain::{CourseSummary, TitleLookup};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Resolve a course title. Never fails; failures become markers.
    async fn course_title(&self, course_id: &str) -> TitleLookup;
}

/// `GET {base}/courses/{course_id}` over the shared remote client.
pub struct HttpCourseCatalog {
    client: RemoteClient,
    base_url: String,
}

impl HttpCourseCatalog {
    pub fn new(client: RemoteClient, base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let base_url = base_url.into();
        RemoteClient::endpoint(&base_url, &[])?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl CourseCatalog for HttpCourseCatalog {
    async fn course_title(&self, course_id: &str) -> TitleLookup {
        let url = match RemoteClient::endpoint(&self.base_url, &["courses", course_id]) {
            Ok(url) => url,
            Err(RemoteError::DotSegment(_)) => return TitleLookup::Missing,
            Err(e) => {
                warn!(course_id, error = %e, "Cannot address Course Authority");
                return TitleLookup::Failed;
            }
        };

        match self.client.get(url).await {
            RemoteOutcome::Success(body) => match body.json::<CourseSummary>() {
                Ok(summary) => TitleLookup::Found(summary.display_title()),
                Err(e) => {
                    warn!(course_id, error = %e, "Undecodable course payload");
                    TitleLookup::Failed
                }
            },
            RemoteOutcome::NotFound | RemoteOutcome::Rejected(_) => TitleLookup::Missing,
            RemoteOutcome::Unavailable(reason) => {
                warn!(course_id, %reason, "Course title lookup failed");
                TitleLookup::Failed
            }
        }
    }
}
