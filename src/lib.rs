//! Folio
//!
//! A headless portfolio page renderer. It fetches a static profile document
//! (JSON), populates the placeholders of a host page from it and produces the
//! finished HTML.
//!
//! # Example
//!
//! ```no_run
//! use folio::{dom::DEFAULT_TEMPLATE, PageConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PageConfig {
//!     base_url: "https://example.com/".to_string(),
//!     ..Default::default()
//! };
//!
//! let renderer = folio::new_renderer(config)?;
//! let (state, html) = renderer.render_html(DEFAULT_TEMPLATE)?;
//! println!("{:?}\n{}", state, html);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod dom;
pub mod loader;
pub mod model;
pub mod page;
pub mod rules;
pub mod sections;

// Async-friendly facade over the blocking renderer
pub mod async_api;

pub use loader::{DocumentSource, HttpSource, StaticSource};
pub use model::{Link, ProfileDocument, Project, ProjectLinks};
pub use page::{PageRenderer, PageState};

/// Configuration for loading and rendering a page
///
/// The defaults mirror a static site: the profile document lives next to the
/// page at `./data.json`, no timeout is applied beyond the HTTP client's own
/// behaviour and the footer year comes from the local clock.
///
/// # Examples
///
/// ```
/// let cfg = folio::PageConfig::default();
/// assert_eq!(cfg.data_path, "./data.json");
/// ```
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// URL the data path is resolved against (the page's own location)
    pub base_url: String,
    /// Relative path of the profile document
    pub data_path: String,
    /// User agent string to send with the request
    pub user_agent: String,
    /// Request timeout in milliseconds; `None` disables it
    pub timeout_ms: Option<u64>,
    /// Custom HTTP headers
    pub headers: HashMap<String, String>,
    /// Fixed footer year; `None` uses the current calendar year
    pub year: Option<i32>,
    /// The owner's own domain, shown with the website icon in links
    pub personal_domain: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            data_path: "./data.json".to_string(),
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
            timeout_ms: None,
            headers: HashMap::new(),
            year: None,
            personal_domain: None,
        }
    }
}

impl PageConfig {
    /// Resolve `data_path` against `base_url`
    pub fn document_url(&self) -> Result<url::Url> {
        let base = url::Url::parse(&self.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(Error::ConfigError(format!(
                "base URL must be http(s), got {}",
                self.base_url
            )));
        }
        Ok(base.join(&self.data_path)?)
    }
}

/// Create a renderer backed by the HTTP loader
pub fn new_renderer(config: PageConfig) -> Result<PageRenderer<HttpSource>> {
    let source = HttpSource::new(config.clone())?;
    Ok(PageRenderer::new(source, &config))
}
