//! The profile document served as JSON and read once per page load.
//!
//! Every field has a default so that a partial document still deserializes;
//! a missing field renders as an empty section rather than failing the load.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The single payload describing the portfolio content.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileDocument {
    pub name: Option<String>,
    pub tagline: Option<String>,
    /// What the person is currently doing; rendered as "Currently: ..."
    pub current: Option<String>,
    pub location: Option<String>,
    /// Free text, paragraphs separated by blank lines
    pub about: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Link>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

/// A labelled outbound link rendered as a button
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// A project card
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    /// Optional landing page; when set the card title links to it
    pub url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub live: Option<String>,
    pub github: Option<String>,
}

impl ProfileDocument {
    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
