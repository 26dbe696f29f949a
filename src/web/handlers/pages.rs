use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{Datelike, Utc};

use crate::services::SessionState;
use crate::views::{self, StatusFilter, View};
use crate::web::forms::PageQuery;
use crate::web::handlers::{auth, dashboard};
use crate::web::helpers::{removal_cookie, render, session_id};
use crate::web::state::AppState;
use crate::web::templates::{HomeTemplate, LoadingTemplate, ProjectsTemplate, filter_href, tab_links};

pub(crate) fn current_year() -> i32 {
    Utc::now().year()
}

/// Every page GET lands here: resolve the session, pick the view, render it.
pub async fn dispatch(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: Option<web::Query<PageQuery>>,
) -> HttpResponse {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return HttpResponse::MethodNotAllowed().finish();
    }

    // A query string that does not fit (e.g. a repeated key) is ignored.
    let query = query.map(web::Query::into_inner).unwrap_or_default();

    let sid = session_id(&req);
    let session = state.sessions.resolve(sid).await;
    let view = views::select_view(req.path(), &session);
    log::debug!("{} -> {:?}", req.path(), view);

    let mut response = match (view, &session) {
        (View::Loading, _) => render(LoadingTemplate {
            branding: &state.branding,
            year: current_year(),
            retry_href: req.uri().to_string(),
        }),
        (View::PublicHome, _) => home_page(&state).await,
        (View::PublicProjects, _) => projects_page(&state, &query).await,
        (View::AdminLogin, _) => auth::login_page(&state, query.error.as_deref()),
        (View::AdminDashboard, SessionState::SignedIn(s)) => {
            dashboard::dashboard_page(&state, s, &query).await
        }
        (View::AdminDashboard, _) => auth::login_page(&state, None),
    };

    // A stale cookie whose session is gone gets cleared.
    if sid.is_some() && matches!(session, SessionState::SignedOut) {
        if let Err(e) = response.add_cookie(&removal_cookie(state.cookie_secure)) {
            log::warn!("could not clear session cookie: {e}");
        }
    }

    response
}

async fn home_page(state: &AppState) -> HttpResponse {
    let home = views::load_home(&state.backend).await;

    render(HomeTemplate {
        branding: &state.branding,
        year: current_year(),
        home,
    })
}

async fn projects_page(state: &AppState, query: &PageQuery) -> HttpResponse {
    let filter = StatusFilter::parse(query.status.as_deref());
    let tabs = tab_links(&filter);
    let retry_href = filter_href(&filter);
    let listing = views::load_projects(&state.backend, filter).await;

    render(ProjectsTemplate {
        branding: &state.branding,
        year: current_year(),
        listing,
        tabs,
        retry_href,
    })
}
