use crate::error::Result;
use crate::schema;
use chrono::{Duration, Utc};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Retention for durable slots, roughly one year.
const SLOT_TTL_DAYS: i64 = 365;

/// Initializes the database connection pool and runs migrations.
pub fn init_database(db_path: &Path) -> Result<DbPool> {
    log::info!("Database path: {}", db_path.display());

    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let manager = SqliteConnectionManager::file(db_path);
    let pool = r2d2::Pool::new(manager)?;

    run_migrations(&pool.get()?)?;

    Ok(pool)
}

/// In-memory pool for tests and throwaway sessions. A single
/// connection so every handle sees the same database.
pub fn init_memory_database() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory();
    let pool = r2d2::Pool::builder().max_size(1).build(manager)?;
    run_migrations(&pool.get()?)?;
    Ok(pool)
}

/// Applies all pending database migrations.
fn run_migrations(connection: &DbConnection) -> Result<()> {
    // `DbConnection` dereferences to the underlying rusqlite `Connection`,
    // allowing us to call the rusqlite APIs directly.
    let connection: &Connection = &*connection;

    log::info!("Running database migrations...");

    // Migration 0001: Initial Schema
    connection.execute_batch(schema::MIGRATION_0001)?;

    log::info!("Migrations applied successfully.");
    Ok(())
}

/// Reads one named slot; expired or missing entries come back as
/// `None`.
pub fn read_slot(conn: &DbConnection, key: &str) -> Result<Option<String>> {
    let now = Utc::now().timestamp();
    let value = conn
        .query_row(
            "SELECT value FROM state_slots WHERE key = ?1 AND expires_at > ?2",
            params![key, now],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

/// Upserts one named slot, refreshing its expiry.
pub fn write_slot(conn: &DbConnection, key: &str, value: &str) -> Result<()> {
    let expires_at = (Utc::now() + Duration::days(SLOT_TTL_DAYS)).timestamp();
    conn.execute(
        "INSERT INTO state_slots (key, value, expires_at, updated_at)
         VALUES (?1, ?2, ?3, strftime('%s', 'now'))
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             expires_at = excluded.expires_at,
             updated_at = excluded.updated_at",
        params![key, value, expires_at],
    )?;
    Ok(())
}

pub fn delete_slot(conn: &DbConnection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM state_slots WHERE key = ?1", params![key])?;
    Ok(())
}
