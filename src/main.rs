use std::sync::Arc;
use std::time::Duration;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solarpress::config::Config;
use solarpress::db::Backend;
use solarpress::services::{SessionEvent, SessionManager};
use solarpress::web::AppState;
use solarpress::web::handlers::{self, pages};
use solarpress::web::middleware::SecurityHeaders;

async fn log_session_events(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::SignedIn { id, email }) => log::info!("session {id} signed in as {email}"),
            Ok(SessionEvent::Refreshed { id }) => log::debug!("session {id} refreshed"),
            Ok(SessionEvent::SignedOut { id }) => log::info!("session {id} signed out"),
            Ok(SessionEvent::Expired { id }) => log::info!("session {id} expired"),
            Err(RecvError::Lagged(n)) => log::warn!("session event log skipped {n} events"),
            Err(RecvError::Closed) => break,
        }
    }
}

async fn prune_sessions(sessions: Arc<SessionManager>) {
    let mut ticker = tokio::time::interval(Duration::from_secs(3600));
    loop {
        ticker.tick().await;
        let pruned = sessions.prune_at(chrono::Utc::now()).await;
        if pruned > 0 {
            log::info!("pruned {pruned} abandoned sessions");
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solarpress=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let backend = match Backend::new(&config.backend) {
        Ok(backend) => backend,
        Err(e) => {
            log::error!("Could not build backend client: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(backend, &config);
    actix_web::rt::spawn(log_session_events(state.sessions.subscribe()));
    actix_web::rt::spawn(prune_sessions(state.sessions.clone()));

    let state = Data::new(state);
    let static_dir = config.static_dir.clone();

    log::info!("Listening on {}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(SecurityHeaders)
            .configure(handlers::configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
            .default_service(web::to(pages::dispatch))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
