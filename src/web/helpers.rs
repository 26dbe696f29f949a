use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use askama::Template;

use crate::services::{SESSION_TTL_DAYS, Session, SessionId};
use crate::views::ADMIN_PATH;
use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "sp_sid";

pub fn is_htmx(req: &HttpRequest) -> bool {
    req.headers()
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

pub fn session_id(req: &HttpRequest) -> Option<SessionId> {
    req.cookie(SESSION_COOKIE)
        .and_then(|c| SessionId::parse(c.value().trim()))
}

pub fn session_cookie(id: SessionId, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::days(SESSION_TTL_DAYS))
        .finish()
}

pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::ZERO)
        .finish()
}

/// Start a response that sends the browser to `location`.
///
/// htmx requests get an `HX-Redirect`, everything else a `303 See Other`, so
/// either way the next page load goes back through the dispatcher.
pub fn navigation(req: &HttpRequest, location: &str) -> HttpResponseBuilder {
    let mut builder = if is_htmx(req) {
        let mut b = HttpResponse::Ok();
        b.insert_header(("HX-Redirect", location.to_string()));
        b
    } else {
        let mut b = HttpResponse::SeeOther();
        b.insert_header(("Location", location.to_string()));
        b
    };
    builder.insert_header(("Cache-Control", "no-store"));
    builder
}

pub fn navigate(req: &HttpRequest, location: &str) -> HttpResponse {
    navigation(req, location).finish()
}

/// The signed-in session for this request, or a navigation to the login view.
pub async fn require_session(req: &HttpRequest, state: &AppState) -> Result<Session, HttpResponse> {
    let resolved = state.sessions.resolve(session_id(req)).await;

    match resolved.session() {
        Some(session) => Ok(session.clone()),
        None => {
            log::warn!("unauthenticated request to {}", req.path());
            Err(navigate(req, ADMIN_PATH))
        }
    }
}

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_with_status(StatusCode::OK, t)
}

pub fn render_with_status<T: Template>(status: StatusCode, t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("template error: {e}");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Template error")
        }
    }
}

pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}
