use futures_util::future::join;

use super::Loaded;
use crate::db::{self, Backend};
use crate::models::{Project, ProjectStatus, ProjectTabContent};

pub const ALL_KEY: &str = "all";

/// Status tab selected on the projects page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Status(String),
}

impl StatusFilter {
    /// `None`, empty and `all` select every project; any other value is
    /// matched verbatim against the stored status.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_KEY) => Self::All,
            Some(status) => Self::Status(status.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_KEY,
            Self::Status(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All Projects",
            Self::Status(s) => s,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Status(s) => project.status.as_str() == s,
        }
    }

    /// Tabs offered on the page: `all` followed by every known status.
    pub fn tabs() -> Vec<StatusFilter> {
        std::iter::once(Self::All)
            .chain(
                ProjectStatus::KNOWN
                    .iter()
                    .map(|s| Self::Status(s.as_str().to_string())),
            )
            .collect()
    }
}

/// Projects whose status passes `filter`, in their original order.
pub fn filter_projects<'a>(projects: &'a [Project], filter: &StatusFilter) -> Vec<&'a Project> {
    projects.iter().filter(|p| filter.matches(p)).collect()
}

/// Banner copy for the selected tab. The `all` tab never has one.
pub fn find_tab_content<'a>(
    tabs: &'a [ProjectTabContent],
    filter: &StatusFilter,
) -> Option<&'a ProjectTabContent> {
    match filter {
        StatusFilter::All => None,
        StatusFilter::Status(key) => tabs.iter().find(|t| &t.tab == key),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectsListing {
    pub filter: StatusFilter,
    pub projects: Vec<Project>,
    pub projects_error: Option<String>,
    pub banner: Option<ProjectTabContent>,
}

impl ProjectsListing {
    pub fn build(
        filter: StatusFilter,
        projects: Loaded<Vec<Project>>,
        tabs: Loaded<Vec<ProjectTabContent>>,
    ) -> Self {
        let projects_error = projects.error().map(str::to_string);
        let all = projects.into_value();
        let tabs = tabs.into_value();

        Self {
            projects: filter_projects(&all, &filter).into_iter().cloned().collect(),
            projects_error,
            banner: find_tab_content(&tabs, &filter).cloned(),
            filter,
        }
    }
}

/// Fetch the full list once and filter it locally; the status filter is
/// never pushed into the backend query.
pub async fn load_projects(backend: &Backend, filter: StatusFilter) -> ProjectsListing {
    let (projects, tabs) = join(db::list_projects(backend, None), db::list_tab_content(backend)).await;

    ProjectsListing::build(
        filter,
        Loaded::from_result(projects, "projects"),
        Loaded::from_result(tabs, "project highlights"),
    )
}
