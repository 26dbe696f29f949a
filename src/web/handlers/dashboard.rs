use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use uuid::Uuid;

use crate::common::SaveError;
use crate::log_err;
use crate::services::Session;
use crate::views::{self, ContentDraft, DashboardRequest, DashboardState, Panel, ProjectDraft, SaveAction};
use crate::web::forms::{ContentForm, DeleteForm, PageQuery, ProjectForm};
use crate::web::handlers::pages::current_year;
use crate::web::helpers::{navigate, render_with_status, require_session};
use crate::web::state::AppState;
use crate::web::templates::{AdminDashboardTemplate, status_options};

const PROJECTS_TAB: &str = "/admin?tab=projects";
const CONTENT_TAB: &str = "/admin?tab=content";

fn render_dashboard(state: &AppState, session: &Session, dashboard: DashboardState, status: StatusCode) -> HttpResponse {
    let current = dashboard
        .project_buffer
        .as_ref()
        .map(|d| d.status.clone())
        .unwrap_or_default();

    render_with_status(
        status,
        AdminDashboardTemplate {
            branding: &state.branding,
            year: current_year(),
            email: session.email.clone(),
            status_options: status_options(&current),
            dashboard,
        },
    )
}

fn save_error_message(e: &SaveError) -> String {
    match e {
        SaveError::Invalid(msg) => msg.clone(),
        SaveError::Backend(e) => format!("Couldn't save changes: {e}"),
    }
}

fn save_error_status(e: &SaveError) -> StatusCode {
    match e {
        SaveError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SaveError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

/// The signed-in view at `/admin`.
pub async fn dashboard_page(state: &AppState, session: &Session, query: &PageQuery) -> HttpResponse {
    let request = query.dashboard_request();
    let dashboard = views::load_dashboard(&state.backend, &session.access_token, &request).await;

    render_dashboard(state, session, dashboard, StatusCode::OK)
}

/// Re-show the projects panel with `draft` still open and `error` on top.
async fn reopen_project(state: &AppState, session: &Session, draft: ProjectDraft, error: SaveError) -> HttpResponse {
    let request = DashboardRequest::default();
    let mut dashboard = views::load_dashboard(&state.backend, &session.access_token, &request).await;
    dashboard.project_buffer = Some(draft);
    dashboard.error = Some(save_error_message(&error));

    render_dashboard(state, session, dashboard, save_error_status(&error))
}

async fn reopen_content(state: &AppState, session: &Session, draft: ContentDraft, error: SaveError) -> HttpResponse {
    let request = DashboardRequest {
        panel: Panel::Content,
        ..DashboardRequest::default()
    };
    let mut dashboard = views::load_dashboard(&state.backend, &session.access_token, &request).await;
    dashboard.content_buffer = Some(draft);
    dashboard.error = Some(save_error_message(&error));

    render_dashboard(state, session, dashboard, save_error_status(&error))
}

#[post("/admin/projects")]
pub async fn save_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ProjectForm>,
) -> impl Responder {
    let session = match require_session(&req, &state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let (draft, invalid) = form.into_inner().parse();
    if let Some(msg) = invalid {
        return reopen_project(&state, &session, draft, SaveError::Invalid(msg)).await;
    }

    match views::save_project(&state.backend, &session.access_token, &draft).await {
        Ok(SaveAction::Insert) => {
            log::info!("{} added project '{}'", session.email, draft.title);
            navigate(&req, PROJECTS_TAB)
        }
        Ok(SaveAction::Update(id)) => {
            log::info!("{} updated project {}", session.email, id);
            navigate(&req, PROJECTS_TAB)
        }
        Err(e) => {
            log_err!(format!("saving project failed: {e}"), &draft);
            reopen_project(&state, &session, draft, e).await
        }
    }
}

#[post("/admin/projects/{id}/delete")]
pub async fn delete_project(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<DeleteForm>,
) -> impl Responder {
    let session = match require_session(&req, &state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = path.into_inner();

    match views::delete_project(&state.backend, &session.access_token, id, form.confirmed()).await {
        Ok(true) => {
            log::info!("{} deleted project {}", session.email, id);
            navigate(&req, PROJECTS_TAB)
        }
        Ok(false) => navigate(&req, PROJECTS_TAB),
        Err(e) => {
            log_err!(format!("deleting project failed: {e}"), &serde_json::json!({ "id": id }));
            let request = DashboardRequest::default();
            let mut dashboard = views::load_dashboard(&state.backend, &session.access_token, &request).await;
            dashboard.error = Some(format!("Couldn't delete project: {e}"));
            render_dashboard(&state, &session, dashboard, StatusCode::BAD_GATEWAY)
        }
    }
}

#[post("/admin/content/{id}")]
pub async fn save_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ContentForm>,
) -> impl Responder {
    let session = match require_session(&req, &state).await {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let draft = form.into_inner().into_draft(path.into_inner());

    match views::save_content(&state.backend, &session.access_token, &draft).await {
        Ok(()) => {
            log::info!("{} updated content block '{}'", session.email, draft.section);
            navigate(&req, CONTENT_TAB)
        }
        Err(e) => {
            log_err!(format!("saving content failed: {e}"), &draft);
            reopen_content(&state, &session, draft, e).await
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(save_project)
        .service(delete_project)
        .service(save_content);
}
