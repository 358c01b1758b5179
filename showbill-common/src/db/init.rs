//! Database initialization
//!
//! Creates the database on first run and brings the schema up idempotently.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize the database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Foreign keys must be enabled on every pooled connection: cascade
    // deletes from venues/artists to shows depend on it.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Schema creation is idempotent - safe to call on every startup
    create_venues_table(&pool).await?;
    create_artists_table(&pool).await?;
    create_shows_table(&pool).await?;

    Ok(pool)
}

/// Create the venues table
///
/// `genres` holds comma-joined canonical genre tokens.
pub async fn create_venues_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            address TEXT NOT NULL,
            phone TEXT NOT NULL,
            image_link TEXT NOT NULL DEFAULT '',
            genres TEXT NOT NULL DEFAULT '',
            facebook_link TEXT NOT NULL DEFAULT '',
            website_link TEXT NOT NULL DEFAULT '',
            seeking_talent INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // The grouped listing reads venues ordered by locality
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_locality ON venues(city, state, id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the artists table
pub async fn create_artists_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT NOT NULL,
            image_link TEXT NOT NULL DEFAULT '',
            genres TEXT NOT NULL DEFAULT '',
            facebook_link TEXT NOT NULL DEFAULT '',
            website_link TEXT NOT NULL DEFAULT '',
            seeking_venue INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the shows table
///
/// Shows belong to exactly one artist and one venue; deleting either parent
/// deletes the show rows with it.
pub async fn create_shows_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            start_time TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time)")
        .execute(pool)
        .await?;

    Ok(())
}
