use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::errors::{TableError, TableResult};
use crate::wiki::transport::Transport;
use crate::wiki::types::Credentials;

const APPLICATION_JSON: &str = "application/json";

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str, credentials: &Credentials) -> TableResult<serde_json::Value> {
        tracing::debug!(url = %url, user = %credentials.username, "sending GET");

        let response = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        let response = check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| TableError::Validation(format!("malformed page content response: {e}")))
    }

    async fn put_json(
        &self,
        url: &str,
        credentials: &Credentials,
        body: &serde_json::Value,
    ) -> TableResult<()> {
        tracing::debug!(url = %url, user = %credentials.username, "sending PUT");

        let response = self
            .client
            .put(url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header(ACCEPT, APPLICATION_JSON)
            .json(body)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> TableResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, "remote returned non-success status");
    Err(TableError::Remote { status, detail })
}
