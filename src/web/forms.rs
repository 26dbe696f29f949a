use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::ProjectStatus;
use crate::views::{ContentDraft, DashboardRequest, Panel, ProjectDraft};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters understood by the page dispatcher.
#[derive(Deserialize, Default, Debug)]
pub struct PageQuery {
    pub status: Option<String>,
    pub tab: Option<String>,
    pub new: Option<String>,
    pub edit: Option<String>,
    pub delete: Option<String>,
    pub content: Option<String>,
    pub error: Option<String>,
}

fn parse_id(raw: Option<&str>) -> Option<Uuid> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok())
}

impl PageQuery {
    pub fn dashboard_request(&self) -> DashboardRequest {
        DashboardRequest {
            panel: Panel::parse(self.tab.as_deref()),
            new_project: self.new.as_deref().is_some_and(|v| v == "1" || v == "true"),
            edit_project: parse_id(self.edit.as_deref()),
            delete_project: parse_id(self.delete.as_deref()),
            edit_content: parse_id(self.content.as_deref()),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ProjectForm {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub capacity: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub status: String,
    pub completion_date: Option<String>,
    pub featured: Option<String>,
    pub order_index: Option<String>,
}

impl ProjectForm {
    /// Build the edit buffer from the submitted fields.
    ///
    /// The buffer is always returned so it can be shown again; the second
    /// value carries the first field that failed to parse.
    pub fn parse(self) -> (ProjectDraft, Option<String>) {
        let mut error = None;

        let id = match self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    error.get_or_insert_with(|| "Unknown project id".to_string());
                    None
                }
            },
        };

        let completion_date = match self
            .completion_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            None => None,
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    error.get_or_insert_with(|| "Completion date must be a date (YYYY-MM-DD)".to_string());
                    None
                }
            },
        };

        let order_index = match self.order_index.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => 0,
            Some(raw) => raw.parse::<i32>().unwrap_or_else(|_| {
                error.get_or_insert_with(|| "Display order must be a whole number".to_string());
                0
            }),
        };

        let status = match self.status.trim() {
            "" => ProjectStatus::default(),
            s => ProjectStatus::from(s.to_string()),
        };

        if self.title.trim().is_empty() {
            error.get_or_insert_with(|| "Title is required".to_string());
        }

        let draft = ProjectDraft {
            id,
            title: self.title,
            description: self.description,
            location: self.location,
            capacity: self.capacity,
            image_url: self.image_url,
            status,
            completion_date,
            featured: self.featured.is_some(),
            order_index,
        };

        (draft, error)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

impl DeleteForm {
    pub fn confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("yes")
    }
}

#[derive(Deserialize, Debug)]
pub struct ContentForm {
    #[serde(default)]
    pub section: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub data: String,
}

impl ContentForm {
    pub fn into_draft(self, id: Uuid) -> ContentDraft {
        ContentDraft {
            id,
            section: self.section,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            data: self.data,
        }
    }
}
