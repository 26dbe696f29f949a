use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::Loaded;
use crate::common::{BackendError, SaveError};
use crate::db::{self, Backend};
use crate::models::{Project, ProjectStatus, ProjectWrite, SiteContent, SiteContentUpdate};

/// Dashboard panels. Only one is shown (and fetched) at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Projects,
    Content,
}

impl Panel {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("content") => Self::Content,
            _ => Self::Projects,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Insert,
    Update(Uuid),
}

/// Edit buffer for the projects panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub id: Option<Uuid>,
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

impl ProjectDraft {
    /// Template for "Add Project": appended after the current list.
    pub fn blank(list_len: usize) -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            location: String::new(),
            capacity: String::new(),
            image_url: String::new(),
            status: ProjectStatus::default(),
            completion_date: None,
            featured: false,
            order_index: i32::try_from(list_len).unwrap_or(i32::MAX),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn save_action(&self) -> SaveAction {
        match self.id {
            Some(id) => SaveAction::Update(id),
            None => SaveAction::Insert,
        }
    }

    pub fn to_write(&self) -> ProjectWrite {
        ProjectWrite {
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            capacity: self.capacity.clone(),
            image_url: self.image_url.clone(),
            status: self.status.clone(),
            completion_date: self.completion_date,
            featured: self.featured,
            order_index: self.order_index,
        }
    }

    pub fn completion_date_value(&self) -> String {
        self.completion_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

impl From<&Project> for ProjectDraft {
    fn from(p: &Project) -> Self {
        let write = ProjectWrite::from(p);
        Self {
            id: Some(p.id),
            title: write.title,
            description: write.description,
            location: write.location,
            capacity: write.capacity,
            image_url: write.image_url,
            status: write.status,
            completion_date: write.completion_date,
            featured: write.featured,
            order_index: write.order_index,
        }
    }
}

/// Edit buffer for the content panel. `data` is held as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDraft {
    pub id: Uuid,
    pub section: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub data: String,
}

impl ContentDraft {
    pub fn to_update(&self) -> Result<SiteContentUpdate, SaveError> {
        let data = if self.data.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str::<serde_json::Value>(&self.data)
                .map_err(|e| SaveError::Invalid(format!("Structured data is not valid JSON: {e}")))?
        };

        if !data.is_object() {
            return Err(SaveError::Invalid(
                "Structured data must be a JSON object".to_string(),
            ));
        }

        let image_url = Some(self.image_url.trim().to_string()).filter(|s| !s.is_empty());

        Ok(SiteContentUpdate {
            title: self.title.clone(),
            content: self.content.clone(),
            image_url,
            data,
        })
    }
}

impl From<&SiteContent> for ContentDraft {
    fn from(c: &SiteContent) -> Self {
        Self {
            id: c.id,
            section: c.section.clone(),
            title: c.title.clone(),
            content: c.content.clone(),
            image_url: c.image_url.clone().unwrap_or_default(),
            data: serde_json::to_string_pretty(&c.data).unwrap_or_else(|_| "{}".to_string()),
        }
    }
}

/// Insert when the buffer has no id, otherwise update that id. Exactly one
/// write is issued either way.
pub async fn save_project(backend: &Backend, token: &str, draft: &ProjectDraft) -> Result<SaveAction, SaveError> {
    let action = draft.save_action();
    let data = draft.to_write();

    match action {
        SaveAction::Insert => {
            db::insert_project(backend, &data, Some(token)).await?;
        }
        SaveAction::Update(id) => {
            db::update_project(backend, id, &data, Some(token))
                .await?
                .ok_or(BackendError::NotFound("project"))?;
        }
    }

    Ok(action)
}

/// Returns `Ok(false)` without touching the backend unless `confirmed`.
pub async fn delete_project(
    backend: &Backend,
    token: &str,
    id: Uuid,
    confirmed: bool,
) -> Result<bool, BackendError> {
    if !confirmed {
        return Ok(false);
    }

    db::delete_project(backend, id, Some(token)).await?;
    Ok(true)
}

pub async fn save_content(backend: &Backend, token: &str, draft: &ContentDraft) -> Result<(), SaveError> {
    let update = draft.to_update()?;

    db::update_site_content(backend, draft.id, &update, Some(token))
        .await?
        .ok_or(BackendError::NotFound("content block"))?;

    Ok(())
}

/// What the dashboard URL asked for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    pub panel: Panel,
    pub new_project: bool,
    pub edit_project: Option<Uuid>,
    pub delete_project: Option<Uuid>,
    pub edit_content: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub panel: Panel,
    pub projects: Vec<Project>,
    pub projects_error: Option<String>,
    pub content: Vec<SiteContent>,
    pub content_error: Option<String>,
    pub project_buffer: Option<ProjectDraft>,
    pub content_buffer: Option<ContentDraft>,
    pub pending_delete: Option<Project>,
    pub error: Option<String>,
}

impl DashboardState {
    fn empty(panel: Panel) -> Self {
        Self {
            panel,
            projects: Vec::new(),
            projects_error: None,
            content: Vec::new(),
            content_error: None,
            project_buffer: None,
            content_buffer: None,
            pending_delete: None,
            error: None,
        }
    }
}

pub async fn load_dashboard(backend: &Backend, token: &str, request: &DashboardRequest) -> DashboardState {
    let mut state = DashboardState::empty(request.panel);

    match request.panel {
        Panel::Projects => {
            let projects = Loaded::from_result(db::list_projects(backend, Some(token)).await, "projects");
            state.projects_error = projects.error().map(str::to_string);
            state.projects = projects.into_value();

            state.project_buffer = if request.new_project {
                Some(ProjectDraft::blank(state.projects.len()))
            } else {
                request
                    .edit_project
                    .and_then(|id| state.projects.iter().find(|p| p.id == id))
                    .map(ProjectDraft::from)
            };

            state.pending_delete = request
                .delete_project
                .and_then(|id| state.projects.iter().find(|p| p.id == id))
                .cloned();
        }
        Panel::Content => {
            let content = Loaded::from_result(
                db::list_site_content_by_section(backend, Some(token)).await,
                "site content",
            );
            state.content_error = content.error().map(str::to_string);
            state.content = content.into_value();

            state.content_buffer = request
                .edit_content
                .and_then(|id| state.content.iter().find(|c| c.id == id))
                .map(ContentDraft::from);
        }
    }

    state
}
