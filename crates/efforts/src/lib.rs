pub mod config;
pub mod correlation;
pub mod database;
pub mod duration_format;
pub mod effort_finder;
pub mod effort_service;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod streams;

use axum::{
    Extension, Router, middleware,
    http::Method,
    routing::get,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

use crate::{
    config::AppConfig,
    correlation::correlation_middleware,
    database::Database,
    effort_service::{EffortProcessor, ReportStore, StreamSource},
    handlers::{get_activity_efforts, health_check, process_activity_efforts},
};

pub fn create_router(db: Database, config: &AppConfig) -> Router {
    let processor = EffortProcessor::new(
        db.clone(),
        db,
        config.targets.clone(),
        config.stream_policy,
    );

    effort_router(processor)
}

/// Routes over any stream source and report store.
pub fn effort_router<S, R>(processor: EffortProcessor<S, R>) -> Router
where
    S: StreamSource + Clone + 'static,
    R: ReportStore + Clone + 'static,
{
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/activities/{id}/efforts",
            get(get_activity_efforts::<S, R>).post(process_activity_efforts::<S, R>),
        )
        .layer(Extension(processor))
        .layer(middleware::from_fn(correlation_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    tracing::info!("Connecting to database at {}", config.database_url);

    let pool: PgPool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let db = Database::new(pool);
    db.migrate().await?;
    Ok(db)
}

pub async fn run_server(db: Database, config: &AppConfig) -> anyhow::Result<()> {
    let app = create_router(db, config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
