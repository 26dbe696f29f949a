use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProjectStatus;
use super::nullable::null_as_default;

/// One solar installation, as stored in the `projects` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capacity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    pub status: ProjectStatus,
    pub completion_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable columns of a project. Used as the body of both inserts and
/// full-record updates; `id` and the timestamps stay server-owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectWrite {
    pub title: String,
    pub description: String,
    pub location: String,
    pub capacity: String,
    pub image_url: String,
    pub status: ProjectStatus,
    pub completion_date: Option<NaiveDate>,
    pub featured: bool,
    pub order_index: i32,
}

impl From<&Project> for ProjectWrite {
    fn from(p: &Project) -> Self {
        Self {
            title: p.title.clone(),
            description: p.description.clone(),
            location: p.location.clone(),
            capacity: p.capacity.clone(),
            image_url: p.image_url.clone(),
            status: p.status.clone(),
            completion_date: p.completion_date,
            featured: p.featured,
            order_index: p.order_index,
        }
    }
}
