use std::sync::Arc;

use anyhow::Context;
use customer_groups_api::{
    AppState,
    app::router::build_router,
    config::AppConfig,
    customer_groups::{CustomerGroupService, store::PgCustomerGroupStore},
};
use jsonwebtoken::DecodingKey;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!()
        .run(&db)
        .await
        .context("failed to run migrations")?;

    let store = Arc::new(PgCustomerGroupStore::new(db));
    let state = AppState {
        customer_groups: CustomerGroupService::new(store, config.retry),
        jwt_dec: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        max_batch_size: config.max_batch_size,
    };

    let app = build_router(state);
    tracing::info!("listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
