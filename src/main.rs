//! Biblioteca Server - Library Management System
//!
//! A Rust REST API server for managing a small library's customers,
//! book catalog and reservations.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblioteca_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("biblioteca_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblioteca Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services =
        Services::new(repository, &config.search).expect("Failed to create services");

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

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Clientes
        .route("/clientes", post(api::clientes::create_cliente))
        .route("/clientes", get(api::clientes::list_clientes))
        .route("/clientes/:id", get(api::clientes::get_cliente))
        .route("/clientes/:id", patch(api::clientes::update_cliente))
        .route("/clientes/:id", delete(api::clientes::delete_cliente))
        // Livros
        .route("/livros", post(api::livros::create_livro))
        .route("/livros", get(api::livros::list_livros))
        .route("/livros/:id", get(api::livros::get_livro))
        .route("/livros/:id", patch(api::livros::update_livro))
        .route("/livros/:id", delete(api::livros::delete_livro))
        // Reservas (em-atraso and cliente routes before the :id lookup)
        .route("/reservas", post(api::reservas::create_reserva))
        .route("/reservas", get(api::reservas::list_reservas))
        .route("/reservas/em-atraso", get(api::reservas::list_em_atraso))
        .route("/reservas/cliente/:clienteId", get(api::reservas::list_by_cliente))
        .route("/reservas/:id", get(api::reservas::get_reserva))
        .route("/reservas/:id/devolver", patch(api::reservas::devolver_reserva))
        // Locações sync feed
        .route("/locacoes/sync", get(api::locacoes::sync))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
