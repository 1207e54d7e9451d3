//! API Server Entry Point
//!
//! Configuration, logging, database and session-store bring-up, router
//! composition and serving. `anyhow` is used for startup errors only;
//! request-level errors render through `kernel::error::AppError`.

mod config;
mod database;

use std::net::SocketAddr;

use anyhow::Context;
use auth::{
    AuthAppState, InMemorySessionStore, PgUserRepository, RedisSessionStore, SessionBackend,
    auth_router,
};
use axum::{
    Router,
    body::Body,
    extract::MatchedPath,
    http::{HeaderValue, Method, Request, header},
    middleware,
};
use blog::{BlogAppState, PgBlogRepository, blog_router};
use kernel::request_id::{REQUEST_ID_HEADER, echo_request_id};
use platform::password::CredentialHasher;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,blog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let pool = database::connect_with_retry(&config)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations completed");

    let sessions = match config.redis_url.as_deref() {
        Some(url) => {
            let store = RedisSessionStore::connect(
                url,
                config.auth.session_key_prefix.clone(),
                config.auth.session_ttl,
            )
            .await
            .context("Failed to connect to Redis")?;
            SessionBackend::from(store)
        }
        None => {
            tracing::warn!("REDIS_URL not set; sessions are kept in memory and lost on restart");
            SessionBackend::from(InMemorySessionStore::new())
        }
    };
    tracing::info!(backend = sessions.name(), "Session store ready");

    let hasher = Arc::new(CredentialHasher::new(config.auth.password_pepper.clone()));

    let auth_state = AuthAppState::new(
        PgUserRepository::new(pool.clone()),
        sessions,
        hasher,
        config.auth.clone(),
    );
    let gate = auth_state.session_gate();
    let blog_state = BlogAppState::new(PgBlogRepository::new(pool));

    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Outermost first
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(cors)
        .layer(middleware::from_fn(echo_request_id));

    let app = Router::new()
        .merge(auth_router(auth_state))
        .merge(blog_router(blog_state, gate))
        .layer(layers);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        method = %request.method(),
        route,
        request_id
    )
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
