use uuid::Uuid;

use super::{Backend, Order, Query};
use crate::common::BackendError;
use crate::models::{Project, ProjectWrite};

pub const PROJECTS: &str = "projects";
pub const FEATURED_LIMIT: usize = 5;

pub async fn list_projects(backend: &Backend, token: Option<&str>) -> Result<Vec<Project>, BackendError> {
    let query = Query::table(PROJECTS)
        .select("*")
        .order("order_index", Order::Ascending);

    backend.select(&query, token).await
}

pub async fn list_featured_projects(
    backend: &Backend,
    limit: usize,
) -> Result<Vec<Project>, BackendError> {
    let query = Query::table(PROJECTS)
        .select("*")
        .eq("featured", true)
        .order("order_index", Order::Ascending)
        .limit(limit);

    backend.select(&query, None).await
}

pub async fn insert_project(
    backend: &Backend,
    data: &ProjectWrite,
    token: Option<&str>,
) -> Result<Project, BackendError> {
    let rows: Vec<Project> = backend
        .insert(PROJECTS, std::slice::from_ref(data), token)
        .await?;

    rows.into_iter()
        .next()
        .ok_or_else(|| BackendError::Decode("insert returned no rows".to_string()))
}

/// Full-record replace of the writable columns. `Ok(None)` when no row has `id`.
pub async fn update_project(
    backend: &Backend,
    id: Uuid,
    data: &ProjectWrite,
    token: Option<&str>,
) -> Result<Option<Project>, BackendError> {
    let filter = Query::table(PROJECTS).eq("id", id);
    let rows: Vec<Project> = backend.update(&filter, data, token).await?;

    Ok(rows.into_iter().next())
}

pub async fn delete_project(backend: &Backend, id: Uuid, token: Option<&str>) -> Result<(), BackendError> {
    let filter = Query::table(PROJECTS).eq("id", id);
    backend.delete(&filter, token).await
}
