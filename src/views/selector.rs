use crate::services::SessionState;

pub const HOME_PATH: &str = "/";
pub const PROJECTS_PATH: &str = "/projects";
pub const ADMIN_PATH: &str = "/admin";

/// The top-level page rendered for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Session resolution is still pending; not a real page.
    Loading,
    PublicHome,
    PublicProjects,
    AdminLogin,
    AdminDashboard,
}

/// Pick the view for `path` given the current session state.
///
/// Paths are compared verbatim; anything that is not exactly `/admin` or
/// `/projects` falls through to the home page.
pub fn select_view(path: &str, session: &SessionState) -> View {
    if session.is_loading() {
        return View::Loading;
    }

    match path {
        ADMIN_PATH if session.session().is_some() => View::AdminDashboard,
        ADMIN_PATH => View::AdminLogin,
        PROJECTS_PATH => View::PublicProjects,
        _ => View::PublicHome,
    }
}
