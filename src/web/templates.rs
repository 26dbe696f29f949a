use askama::Template;

use crate::config::Branding;
use crate::models::ProjectStatus;
use crate::views::{DashboardState, HomeContent, ProjectsListing, StatusFilter};

/// One `<option>` of a select box, resolved ahead of rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Known statuses, plus `current` when it is outside the known set.
pub fn status_options(current: &ProjectStatus) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = ProjectStatus::KNOWN
        .iter()
        .map(|s| SelectOption {
            value: s.as_str().to_string(),
            selected: s == current,
        })
        .collect();

    if !current.is_known() {
        options.push(SelectOption {
            value: current.as_str().to_string(),
            selected: true,
        });
    }

    options
}

/// A status tab on the projects page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

pub fn filter_href(filter: &StatusFilter) -> String {
    format!("/projects?status={}", urlencoding::encode(filter.key()))
}

pub fn tab_links(selected: &StatusFilter) -> Vec<TabLink> {
    StatusFilter::tabs()
        .into_iter()
        .map(|tab| TabLink {
            label: tab.label().to_string(),
            href: filter_href(&tab),
            active: &tab == selected,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "public/home.html")]
pub struct HomeTemplate<'a> {
    pub branding: &'a Branding,
    pub year: i32,
    pub home: HomeContent,
}

#[derive(Template)]
#[template(path = "public/projects.html")]
pub struct ProjectsTemplate<'a> {
    pub branding: &'a Branding,
    pub year: i32,
    pub listing: ProjectsListing,
    pub tabs: Vec<TabLink>,
    pub retry_href: String,
}

#[derive(Template)]
#[template(path = "public/loading.html")]
pub struct LoadingTemplate<'a> {
    pub branding: &'a Branding,
    pub year: i32,
    pub retry_href: String,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate<'a> {
    pub branding: &'a Branding,
    pub year: i32,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate<'a> {
    pub branding: &'a Branding,
    pub year: i32,
    pub email: String,
    pub dashboard: DashboardState,
    pub status_options: Vec<SelectOption>,
}
