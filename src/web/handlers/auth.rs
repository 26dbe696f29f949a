use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderValue, LOCATION};
use actix_web::{HttpRequest, HttpResponse, Responder, post, web};

use crate::common::AuthError;
use crate::log_err;
use crate::views::ADMIN_PATH;
use crate::web::forms::LoginForm;
use crate::web::handlers::pages::current_year;
use crate::web::helpers::{
    client_ip, navigate, navigation, removal_cookie, render, render_with_status, session_cookie,
    session_id,
};
use crate::web::state::AppState;
use crate::web::templates::AdminLoginTemplate;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const SIGN_IN_UNAVAILABLE: &str = "Sign-in is unavailable right now. Please try again.";
pub const TOO_MANY_ATTEMPTS: &str = "Too many sign-in attempts. Please try again later.";

fn error_message(code: &str) -> String {
    match code {
        "missing" => "Email and password are required".to_string(),
        "invalid" => INVALID_CREDENTIALS.to_string(),
        "unavailable" => SIGN_IN_UNAVAILABLE.to_string(),
        "rate_limit" => TOO_MANY_ATTEMPTS.to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// The login view shown at `/admin` when nobody is signed in.
pub fn login_page(state: &AppState, error: Option<&str>) -> HttpResponse {
    render(AdminLoginTemplate {
        branding: &state.branding,
        year: current_year(),
        error: error.map(error_message),
    })
}

#[post("/admin/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> impl Responder {
    let ip = client_ip(&req);
    if !state.login_throttle.check(&format!("login:{}", ip)) {
        log::warn!("sign-in throttled for {}", ip);
        let mut response = render_with_status(
            StatusCode::TOO_MANY_REQUESTS,
            AdminLoginTemplate {
                branding: &state.branding,
                year: current_year(),
                error: Some(TOO_MANY_ATTEMPTS.to_string()),
            },
        );
        response.headers_mut().insert(
            LOCATION,
            HeaderValue::from_static("/admin?error=rate_limit"),
        );
        return response;
    }

    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return navigate(&req, "/admin?error=missing");
    }

    match state.sessions.sign_in(email, &form.password).await {
        Ok((id, session)) => {
            log::info!("admin signed in: {}", session.email);
            navigation(&req, ADMIN_PATH)
                .cookie(session_cookie(id, state.cookie_secure))
                .finish()
        }
        Err(AuthError::InvalidCredentials) => {
            log::info!("rejected sign-in for {}", email);
            navigate(&req, "/admin?error=invalid")
        }
        Err(e) => {
            log_err!(format!("sign-in failed: {e}"), &serde_json::json!({ "email": email }));
            navigate(&req, "/admin?error=unavailable")
        }
    }
}

#[post("/admin/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Some(id) = session_id(&req) {
        state.sessions.sign_out(id).await;
    }

    navigation(&req, ADMIN_PATH)
        .cookie(removal_cookie(state.cookie_secure))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_submit).service(logout);
}
