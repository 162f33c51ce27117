//! State source trait definition

use async_trait::async_trait;

use crate::error::Result;

/// Anything that can produce a raw state document
///
/// [`StateFetcher`](crate::StateFetcher) is the HTTP implementation; tests
/// substitute canned sources.
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Fetch the document served at `endpoint`
    ///
    /// # Errors
    /// Returns [`ClientError::Configuration`](crate::ClientError::Configuration)
    /// if `endpoint` is `None`, otherwise whatever the source fails with.
    async fn fetch(&self, endpoint: Option<&str>) -> Result<Vec<u8>>;

    /// Get source type name (for logging)
    fn source_type(&self) -> &'static str;
}
