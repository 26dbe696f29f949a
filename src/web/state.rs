use std::sync::Arc;

use crate::config::{Branding, Config};
use crate::db::Backend;
use crate::services::SessionManager;
use crate::web::security::LoginThrottle;

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub sessions: Arc<SessionManager>,
    pub branding: Arc<Branding>,
    pub login_throttle: Arc<LoginThrottle>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(backend: Backend, config: &Config) -> Self {
        Self::with_branding(backend, config.branding.clone(), config.cookie_secure)
    }

    pub fn with_branding(backend: Backend, branding: Branding, cookie_secure: bool) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(backend.clone())),
            backend,
            branding: Arc::new(branding),
            login_throttle: Arc::new(LoginThrottle::default()),
            cookie_secure,
        }
    }
}
