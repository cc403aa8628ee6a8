//! Axum HTTP server for the alumni portal.
//!
//! Handles all API routes: profile search, alumni management, bulk upload,
//! chat, health, and the static pages.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{Method, header},
    response::IntoResponse,
    routing::{get, post},
};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::alumni::{AlumniStore, ProfileGenerator};
use crate::chat::ChatResponder;
use crate::error::ServerError;
use crate::web::handlers::alumni::{
    alumni_bulk_delete_handler, alumni_delete_handler, alumni_get_handler, alumni_list_handler,
    alumni_update_handler, recent_handler, search_handler,
};
use crate::web::handlers::chat::chat_handler;
use crate::web::handlers::upload::bulk_upload_handler;
use crate::web::types::HealthResponse;

/// Shared state for all portal handlers.
pub struct PortalState {
    /// Alumni records; also backs the recent-searches view.
    pub store: Arc<AlumniStore>,
    /// Profile generator writing into `store`.
    pub generator: ProfileGenerator,
    /// Chat responder with its availability already decided.
    pub chat: ChatResponder,
    /// Shutdown signal sender.
    pub shutdown_tx: tokio::sync::RwLock<Option<oneshot::Sender<()>>>,
    /// The spawned serve loop, awaited on shutdown so in-flight requests drain.
    server_task: tokio::sync::Mutex<Option<JoinHandle<()>>>,
    /// Server startup time for uptime calculation.
    pub startup_time: std::time::Instant,
}

impl PortalState {
    pub fn new(store: Arc<AlumniStore>, chat: ChatResponder) -> Self {
        Self {
            generator: ProfileGenerator::new(Arc::clone(&store)),
            store,
            chat,
            shutdown_tx: tokio::sync::RwLock::new(None),
            server_task: tokio::sync::Mutex::new(None),
            startup_time: std::time::Instant::now(),
        }
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.write().await.take() {
            let _ = tx.send(());
        }
        let task = self.server_task.lock().await.take();
        if let Some(task) = task
            && let Err(e) = task.await
        {
            tracing::error!("Alumni portal server task failed: {}", e);
        }
    }
}

/// Build the router with all routes and layers.
pub fn build_router(state: Arc<PortalState>, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/api/recent", get(recent_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/alumni", get(alumni_list_handler))
        .route("/api/alumni/bulk-delete", post(alumni_bulk_delete_handler))
        .route(
            "/api/alumni/{email}",
            get(alumni_get_handler)
                .put(alumni_update_handler)
                .delete(alumni_delete_handler),
        )
        .route("/api/bulk-upload", post(bulk_upload_handler));

    // Static pages (served from embedded strings)
    let statics = Router::new()
        .route("/", get(index_handler))
        .route("/database", get(database_handler))
        .route("/gemini", get(gemini_handler))
        .route("/frontoffice", get(frontoffice_handler));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(api)
        .merge(statics)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_bytes))
                .layer(cors)
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::X_CONTENT_TYPE_OPTIONS,
                    header::HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

/// Start the portal HTTP server.
///
/// Returns the actual bound `SocketAddr` (useful when binding to port 0).
/// The server runs on a spawned task until [`PortalState::shutdown`] is called,
/// which also waits for that task to drain.
pub async fn start_server(
    addr: SocketAddr,
    state: Arc<PortalState>,
    max_body_bytes: usize,
) -> Result<SocketAddr, ServerError> {
    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::StartupFailed {
                reason: format!("Failed to bind to {}: {}", addr, e),
            })?;
    let bound_addr = listener
        .local_addr()
        .map_err(|e| ServerError::StartupFailed {
            reason: format!("Failed to get local addr: {}", e),
        })?;

    let app = build_router(Arc::clone(&state), max_body_bytes);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    *state.shutdown_tx.write().await = Some(shutdown_tx);

    let task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("Alumni portal shutting down");
            })
            .await
        {
            tracing::error!("Alumni portal server error: {}", e);
        }
    });
    *state.server_task.lock().await = Some(task);

    Ok(bound_addr)
}

// --- Static file handlers ---

fn html(body: &'static str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
}

async fn index_handler() -> impl IntoResponse {
    html(include_str!("static/index.html"))
}

async fn database_handler() -> impl IntoResponse {
    html(include_str!("static/database.html"))
}

async fn gemini_handler() -> impl IntoResponse {
    html(include_str!("static/gemini.html"))
}

async fn frontoffice_handler() -> impl IntoResponse {
    html(include_str!("static/frontoffice.html"))
}

// --- Health ---

async fn health_handler(State(state): State<Arc<PortalState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        chat: state.chat.availability().as_str(),
        alumni: state.store.len(),
        uptime_secs: state.startup_time.elapsed().as_secs(),
    })
}
