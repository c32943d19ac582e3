//! Database access for ivf-api
//!
//! SQLite store holding resolved influencer records.

pub mod influencers;

use ivf_common::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection pool and create tables if needed
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets dashboard reads proceed while a resolution writes
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the influencers table and its indexes (idempotent)
///
/// `normalized_name` is UNIQUE so concurrent resolutions of the same name
/// converge on one row through the upsert in [`influencers::upsert_influencer`].
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS influencers (
            id TEXT PRIMARY KEY,
            normalized_name TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            bio TEXT NOT NULL,
            category TEXT NOT NULL,
            trust_score INTEGER NOT NULL CHECK (trust_score BETWEEN 0 AND 100),
            followers INTEGER NOT NULL CHECK (followers >= 0),
            yearly_revenue TEXT NOT NULL,
            claims TEXT NOT NULL DEFAULT '[]',
            last_updated TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_influencers_trust_score ON influencers (trust_score DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_influencers_category ON influencers (category)")
        .execute(pool)
        .await?;

    info!("Database tables initialized (influencers)");

    Ok(())
}
