use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use cafekiosk_api::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cafekiosk_observability::init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to the database")?;

    cafekiosk_store::repository::postgres::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;

    let services = Arc::new(app::services::build_services(pool));
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .context("failed to bind 0.0.0.0:8080")?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
