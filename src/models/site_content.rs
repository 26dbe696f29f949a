use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::nullable::null_as_default;

/// A named content block (`hero`, `about`, ...) from `site_content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub id: Uuid,
    pub section: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    pub image_url: Option<String>,
    #[serde(default = "empty_data", deserialize_with = "data_or_empty")]
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// The only columns the dashboard is allowed to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContentUpdate {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub data: serde_json::Value,
}

impl From<&SiteContent> for SiteContentUpdate {
    fn from(c: &SiteContent) -> Self {
        Self {
            title: c.title.clone(),
            content: c.content.clone(),
            image_url: c.image_url.clone(),
            data: c.data.clone(),
        }
    }
}

/// Promotional copy shown above the project list for one status tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTabContent {
    pub tab: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

pub(crate) fn empty_data() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn data_or_empty<'de, D>(deserializer: D) -> Result<serde_json::Value, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => empty_data(),
        data => data,
    })
}
