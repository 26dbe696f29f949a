use uuid::Uuid;

use super::{Backend, Order, Query};
use crate::common::BackendError;
use crate::models::{ProjectTabContent, SiteContent, SiteContentUpdate};

pub const SITE_CONTENT: &str = "site_content";
pub const PROJECT_TAB_CONTENT: &str = "project_tab_content";

/// All content blocks in backend order. The home page uses this.
pub async fn list_site_content(backend: &Backend) -> Result<Vec<SiteContent>, BackendError> {
    let query = Query::table(SITE_CONTENT).select("*");
    backend.select(&query, None).await
}

/// All content blocks sorted by section, for the dashboard.
pub async fn list_site_content_by_section(
    backend: &Backend,
    token: Option<&str>,
) -> Result<Vec<SiteContent>, BackendError> {
    let query = Query::table(SITE_CONTENT)
        .select("*")
        .order("section", Order::Ascending);

    backend.select(&query, token).await
}

pub async fn update_site_content(
    backend: &Backend,
    id: Uuid,
    data: &SiteContentUpdate,
    token: Option<&str>,
) -> Result<Option<SiteContent>, BackendError> {
    let filter = Query::table(SITE_CONTENT).eq("id", id);
    let rows: Vec<SiteContent> = backend.update(&filter, data, token).await?;

    Ok(rows.into_iter().next())
}

pub async fn list_tab_content(backend: &Backend) -> Result<Vec<ProjectTabContent>, BackendError> {
    let query = Query::table(PROJECT_TAB_CONTENT).select("tab,image_url,title,description");
    backend.select(&query, None).await
}
