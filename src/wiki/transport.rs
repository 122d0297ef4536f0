use async_trait::async_trait;

use crate::errors::TableResult;
use crate::wiki::types::Credentials;

/// HTTP collaborator used by the updater. Implementations send
/// `Accept: application/json`, authenticate with basic auth and report any
/// non-success status as `TableError::Remote`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the decoded JSON body.
    async fn get_json(&self, url: &str, credentials: &Credentials) -> TableResult<serde_json::Value>;

    /// PUT `body` as JSON to `url`.
    async fn put_json(
        &self,
        url: &str,
        credentials: &Credentials,
        body: &serde_json::Value,
    ) -> TableResult<()>;
}
