use std::fmt;

use serde::{Deserialize, Serialize};

/// Basic-auth credential pair sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the page lives and who is asking. Immutable for one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub base_url: String,
    pub credentials: Credentials,
    pub page_id: String,
}

impl Connection {
    pub fn new(base_url: impl Into<String>, credentials: Credentials, page_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            page_id: page_id.into(),
        }
    }

    /// `{base}/rest/api/content/{pageId}`
    pub fn content_url(&self) -> String {
        format!(
            "{}/rest/api/content/{}",
            self.base_url.strip_suffix('/').unwrap_or(&self.base_url),
            self.page_id
        )
    }

    pub fn fetch_url(&self) -> String {
        format!("{}?expand=body.storage", self.content_url())
    }
}

/// Remote page state as observed by the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub title: String,
    pub version: u64,
    pub body: String,
}

// Wire types for GET /rest/api/content/{id}?expand=body.storage

#[derive(Debug, Clone, Deserialize)]
pub struct ContentResponse {
    pub title: String,
    pub version: VersionInfo,
    pub body: ContentBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBody {
    pub storage: StorageValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageValue {
    pub value: String,
}

impl From<ContentResponse> for PageSnapshot {
    fn from(resp: ContentResponse) -> Self {
        Self {
            title: resp.title,
            version: resp.version.number,
            body: resp.body.storage.value,
        }
    }
}

// Wire types for PUT /rest/api/content/{id}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePayload {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub body: UpdateBody,
    pub version: VersionUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateBody {
    pub storage: StorageUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageUpdate {
    pub value: String,
    pub representation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionUpdate {
    pub number: u64,
    #[serde(rename = "minorEdit")]
    pub minor_edit: bool,
}

/// What a successful update committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub version: u64,
    pub row_count: usize,
}
