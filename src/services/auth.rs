use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::common::{AuthError, BackendError};
use crate::db::{self, Backend};

/// Tokens are treated as expired this long before the backend's deadline.
const EXPIRY_MARGIN_SECS: i64 = 30;
const EVENT_CAPACITY: usize = 64;

/// Lifetime of the session cookie. A session whose tokens were last issued
/// longer ago than this can no longer be presented by any browser.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Opaque key of a server-side session, carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A signed-in admin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    #[serde(skip)]
    pub access_token: String,
    #[serde(skip)]
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + chrono::Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Resolution has not finished yet; callers must not assume absence.
    Loading,
    SignedOut,
    SignedIn(Session),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { id: SessionId, email: String },
    Refreshed { id: SessionId },
    SignedOut { id: SessionId },
    Expired { id: SessionId },
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

/// Store of signed-in sessions with subscribe/notify.
///
/// Every mutation happens before the caller builds its HTTP response, so the
/// next request always sees the new state.
pub struct SessionManager {
    backend: Backend,
    sessions: RwLock<HashMap<SessionId, Session>>,
    events: broadcast::Sender<SessionEvent>,
    refresh_timeout: Duration,
}

impl SessionManager {
    pub fn new(backend: Backend) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            backend,
            sessions: RwLock::new(HashMap::new()),
            events,
            refresh_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(SessionId, Session), AuthError> {
        let grant = PasswordGrant { email, password };

        let session = match self.request_token("password", &grant).await {
            Ok(session) => session,
            Err(BackendError::Api { status: 400 | 401 | 422, .. }) => {
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let id = self.establish(session.clone()).await;
        Ok((id, session))
    }

    /// Store an already-issued session and announce it.
    pub async fn establish(&self, session: Session) -> SessionId {
        let id = SessionId::generate();
        let email = session.email.clone();

        let pruned = {
            let mut sessions = self.sessions.write().await;
            let pruned = prune_stale(&mut sessions, Utc::now());
            sessions.insert(id, session);
            pruned
        };
        if pruned > 0 {
            log::debug!("dropped {pruned} abandoned sessions");
        }
        self.notify(SessionEvent::SignedIn { id, email });

        id
    }

    /// Drop sessions that outlived their cookie. Returns how many went.
    pub async fn prune_at(&self, now: DateTime<Utc>) -> usize {
        prune_stale(&mut *self.sessions.write().await, now)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn sign_out(&self, id: SessionId) {
        let removed = self.sessions.write().await.remove(&id);

        let Some(session) = removed else {
            return;
        };

        if let Err(e) = self.revoke(&session).await {
            log::warn!("Remote sign-out failed for {}: {}", session.email, e);
        }

        self.notify(SessionEvent::SignedOut { id });
    }

    /// Current state for `id`, refreshing the access token when it has expired.
    pub async fn resolve(&self, id: Option<SessionId>) -> SessionState {
        let Some(id) = id else {
            return SessionState::SignedOut;
        };

        let current = self.sessions.read().await.get(&id).cloned();
        let Some(session) = current else {
            return SessionState::SignedOut;
        };

        if !session.is_expired(Utc::now()) {
            return SessionState::SignedIn(session);
        }

        let grant = RefreshGrant {
            refresh_token: &session.refresh_token,
        };

        match tokio::time::timeout(self.refresh_timeout, self.request_token("refresh_token", &grant)).await {
            Err(_) => {
                log::warn!("Session refresh for {} timed out", session.email);
                SessionState::Loading
            }
            Ok(Ok(fresh)) => {
                self.sessions.write().await.insert(id, fresh.clone());
                self.notify(SessionEvent::Refreshed { id });
                SessionState::SignedIn(fresh)
            }
            Ok(Err(e)) => {
                log::info!("Session for {} expired: {}", session.email, e);
                self.sessions.write().await.remove(&id);
                self.notify(SessionEvent::Expired { id });
                SessionState::SignedOut
            }
        }
    }

    pub async fn session(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    async fn request_token<B: Serialize + Sync>(&self, grant_type: &str, body: &B) -> Result<Session, BackendError> {
        let url = self.backend.auth_endpoint("token")?;
        log::debug!("POST {url} grant_type={grant_type}");

        let resp = self
            .backend
            .request(Method::POST, url, None)
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await?;

        let token: TokenResponse = db::handle_response(resp).await?;

        Ok(Session {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_default(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now() + chrono::Duration::seconds(token.expires_in),
        })
    }

    async fn revoke(&self, session: &Session) -> Result<(), BackendError> {
        let url = self.backend.auth_endpoint("logout")?;
        log::debug!("POST {url}");

        let resp = self
            .backend
            .request(Method::POST, url, Some(&session.access_token))
            .send()
            .await?;

        db::handle_empty(resp).await
    }
}

fn prune_stale(sessions: &mut HashMap<SessionId, Session>, now: DateTime<Utc>) -> usize {
    let cutoff = now - chrono::Duration::days(SESSION_TTL_DAYS);
    let before = sessions.len();
    sessions.retain(|_, s| s.expires_at > cutoff);
    before - sessions.len()
}
