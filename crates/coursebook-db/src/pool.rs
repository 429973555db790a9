use anyhow::Context;
use coursebook_config::DatabaseConfig;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects to PostgreSQL and, when configured, applies pending migrations.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(config.database_url()?)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("database migrations applied");
    Ok(())
}
