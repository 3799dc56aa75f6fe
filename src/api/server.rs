//! HTTP server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::auth::{route_guard, CredentialStore, Guard};
use crate::config::Config;
use crate::error::Result;
use crate::ui;

use super::routes;

/// Application state shared across handlers. Read-only once built.
pub struct AppState {
    pub config: Config,
    pub credentials: CredentialStore,
    pub guard: Guard,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let credentials = config.credential_store()?;
        let guard = Guard::from_config(&config.auth);
        Ok(Self {
            config,
            credentials,
            guard,
        })
    }
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, state).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    tracing::info!(
        "{} protected prefixes, {} accounts",
        state.guard.routes().prefixes().len(),
        state.credentials.len()
    );

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // API routes
        .route("/api/health", get(routes::health))
        .route("/api/auth/login", post(routes::login))
        // UI routes
        .route("/", get(ui::root))
        .route("/login", get(ui::login_page).post(ui::login_form))
        .route("/logout", post(ui::logout))
        .route("/admin/users", get(ui::manage_users))
        .route("/{section}", get(ui::section_page))
        // Unknown paths still pass through the guard
        .fallback(ui::not_found)
        // Middleware
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
