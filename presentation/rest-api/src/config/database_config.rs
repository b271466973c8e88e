use anyhow::Context;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use std::env;

const DEFAULT_MIGRATIONS_PATH: &str = "infrastructure/persistence/migrations";

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: Pool size (default: 5)
/// - MIGRATIONS_PATH: Directory of the SQL migrations
///   (default: "infrastructure/persistence/migrations")
///
/// Migrations run before the pool is handed out.
pub async fn init_database() -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let config = DatabaseConfig::new(db_url)
        .with_max_connections(parse_max_connections(env::var("DATABASE_MAX_CONNECTIONS").ok()));
    let pool = create_postgres_pool(&config).await?;

    let migrations_path =
        env::var("MIGRATIONS_PATH").unwrap_or_else(|_| DEFAULT_MIGRATIONS_PATH.to_string());
    run_migrations(&pool, &migrations_path)
        .await
        .with_context(|| format!("running migrations from {}", migrations_path))?;

    Ok(pool)
}

fn parse_max_connections(raw: Option<String>) -> u32 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(5)
}
