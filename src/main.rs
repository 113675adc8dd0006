//! Media Gallery Backend
//!
//! Serves an in-memory gallery of images and PDFs over a small JSON CRUD API.

mod api;
mod config;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Repository>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Repository, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(repo)),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Media Gallery Backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Page size: {}", config.page_size);

    let repo = store::init_store(&config)?;
    let state = AppState::new(repo, config.clone());

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Gallery
        .route("/gallery", get(api::get_gallery))
        .route("/gallery/revision", get(api::get_revision))
        // Images
        .route("/images", get(api::list_images).post(api::create_image))
        .route(
            "/images/{id}",
            get(api::get_image)
                .put(api::update_image)
                .delete(api::delete_image),
        )
        .route("/images/{id}/download", get(api::download_image))
        // Categories
        .route(
            "/categories",
            get(api::list_categories).post(api::create_category),
        )
        .route("/categories/counts", get(api::category_counts))
        .route(
            "/categories/{id}",
            put(api::update_category).delete(api::delete_category),
        )
        // Tags
        .route("/tags", get(api::list_tags).post(api::create_tag))
        .route("/tags/{id}", put(api::update_tag).delete(api::delete_tag))
        // Filters
        .route("/filters", get(api::get_filters))
        .route("/filters/search", put(api::set_search_query))
        .route("/filters/category", put(api::set_selected_category))
        .route("/filters/tags", delete(api::clear_selected_tags))
        .route("/filters/tags/{id}/toggle", post(api::toggle_tag));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
