pub mod auth;
pub mod dashboard;
pub mod pages;

use actix_web::web;

/// Register the POST routes. Page GETs are served by [`pages::dispatch`],
/// which the app installs as its default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    auth::configure(cfg);
    dashboard::configure(cfg);
}
