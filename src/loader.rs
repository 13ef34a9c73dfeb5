//! Profile document sources.
//!
//! `HttpSource` performs the single GET the page needs; `StaticSource`
//! serves an already-available document for offline rendering.

use crate::model::ProfileDocument;
use crate::{Error, PageConfig, Result};
use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA, USER_AGENT};
use std::time::Duration;
use url::Url;

/// Something that can produce the profile document for one page load
pub trait DocumentSource {
    fn load(&self) -> Result<ProfileDocument>;
}

/// Fetches the profile document over HTTP with caching disabled.
pub struct HttpSource {
    client: Client,
    url: Url,
    config: PageConfig,
}

impl HttpSource {
    pub fn new(config: PageConfig) -> Result<Self> {
        let url = config.document_url()?;
        let client = Client::builder()
            .timeout(config.timeout_ms.map(Duration::from_millis))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url,
            config,
        })
    }
}

impl DocumentSource for HttpSource {
    fn load(&self) -> Result<ProfileDocument> {
        log::debug!("fetching profile document from {}", self.url);
        let mut req = self
            .client
            .get(self.url.clone())
            .header(USER_AGENT, self.config.user_agent.clone())
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache");
        for (k, v) in &self.config.headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let resp = req
            .send()
            .map_err(|e| Error::NetworkError(format!("Failed to fetch {}: {}", self.url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::LoadError {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| Error::NetworkError(format!("Failed to read response body: {}", e)))?;
        log::debug!("received {} bytes", body.len());
        ProfileDocument::from_json(&body)
    }
}

/// A document that is already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    doc: ProfileDocument,
}

impl StaticSource {
    pub fn new(doc: ProfileDocument) -> Self {
        Self { doc }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(ProfileDocument::from_json(json)?))
    }
}

impl DocumentSource for StaticSource {
    fn load(&self) -> Result<ProfileDocument> {
        Ok(self.doc.clone())
    }
}
