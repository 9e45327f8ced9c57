//! HTTP server for the contact book.
//!
//! Routes the JSON API onto the contact service, serves the static front end
//! at `/`, and allows cross-origin requests from any origin.

pub mod error;
pub mod handlers;

pub use error::{ApiError, StatusBody};
pub use handlers::AppState;

use anyhow::Result;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the API router without static file serving.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(handlers::list_contacts))
        .route("/contacts/{id}", get(handlers::get_contact))
        .route("/add", post(handlers::add_contact))
        .route("/update/{id}", put(handlers::update_contact))
        .route("/favorite/{id}", post(handlers::toggle_favorite))
        .route("/delete/{id}", delete(handlers::delete_contact))
        .route("/search", get(handlers::search_contacts))
        .route("/export", get(handlers::export_contacts))
        .route("/birthdays/today", get(handlers::birthdays_today))
        .route("/stats", get(handlers::contact_stats))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Build the full router: the API plus the static front end as fallback.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    api_router(state).fallback_service(ServeDir::new(static_dir))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve `router` on `address` until Ctrl-C.
pub async fn run_server(router: Router, address: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!(address = %address, "Contact book listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
