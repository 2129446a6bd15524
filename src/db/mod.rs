use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::env;
use std::time::Duration;

pub mod models;

pub type DbPool = Pool<SqliteConnectionManager>;

const SCHEMA: &str = include_str!("../../migrations/init.sql");

/// Builds the pool from the `DATABASE_URL` env var (a SQLite file path)
/// and applies the schema idempotently.
pub async fn init_pool() -> anyhow::Result<DbPool> {
    let path = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    pool_for_path(&path)
}

pub fn pool_for_path(path: &str) -> anyhow::Result<DbPool> {
    let manager = SqliteConnectionManager::file(path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
    });
    let pool = Pool::builder()
        .max_size(10)
        .connection_timeout(Duration::from_secs(30))
        .build(manager)
        .map_err(|e| anyhow::anyhow!("Failed to create DB pool: {}", e))?;

    pool.get()?.execute_batch(SCHEMA)?;

    Ok(pool)
}
