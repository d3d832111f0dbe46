//! Atheneum Server - Library Inventory and Lending Tracker
//!
//! A Rust REST API server for a small library's catalog, readers and
//! rentals.

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atheneum_server::{api, config::AppConfig, repository::Repository, schema, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("atheneum_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atheneum Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let connect_options = SqliteConnectOptions::from_str(&config.database.url)
        .expect("Invalid database URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await
        .expect("Failed to open database");

    tracing::info!("Connected to database");

    // Idempotent schema init + first-run staff account
    schema::create_tables(&pool).await?;
    schema::bootstrap_account(&pool, &config.auth).await?;

    tracing::info!("Schema initialized");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.loans.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/logout", get(api::auth::logout))
        // Book catalog
        .route("/", get(api::books::list_books))
        .route("/add", post(api::books::create_book))
        .route("/book/:id", get(api::books::get_book))
        .route(
            "/edit_book/:id",
            get(api::books::get_book_for_edit).post(api::books::update_book),
        )
        .route(
            "/search_books",
            get(api::books::search_books).post(api::books::search_books_post),
        )
        // Reader roster
        .route("/readers", get(api::readers::list_readers))
        .route("/add_reader", post(api::readers::create_reader))
        .route(
            "/edit_reader/:id",
            get(api::readers::get_reader_for_edit).post(api::readers::update_reader),
        )
        .route("/reader/:id", get(api::readers::get_reader_details))
        .route("/delete_reader/:id", post(api::readers::delete_reader))
        // Rental lifecycle
        .route(
            "/borrow/:id",
            get(api::rentals::borrow_form).post(api::rentals::borrow_book),
        )
        .route(
            "/return/:id",
            get(api::rentals::return_form).post(api::rentals::return_book),
        )
        .route("/borrowed_books", get(api::rentals::borrowed_books))
        .route("/overdue_books", get(api::rentals::overdue_books))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    routes
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
