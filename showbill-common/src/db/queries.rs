//! Typed queries over the venues/artists/shows tables
//!
//! Reads borrow a pooled connection per statement. Every mutation opens one
//! transaction and commits on success; on any early return the transaction
//! is dropped and rolls back in full, so no partial write ever persists and
//! the connection goes back to the pool on every exit path.

use crate::db::models::{
    Artist, EntityRef, EntityShowRow, SearchRow, ShowListing, Venue, VenueShowRow,
};
use crate::error::Error;
use crate::forms::{ArtistForm, ShowForm, VenueForm};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

// ============================================================================
// Venue reads
// ============================================================================

/// All venues joined with their shows, ordered by (city, state, id)
///
/// Venues with no shows still appear, with a NULL start_time. The grouped
/// city listing folds these rows in a single ordered pass.
pub async fn venues_with_shows(pool: &SqlitePool) -> Result<Vec<VenueShowRow>> {
    let rows = sqlx::query_as::<_, VenueShowRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state, s.start_time
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        ORDER BY v.city, v.state, v.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch one venue by id, independent of its shows
pub async fn get_venue(pool: &SqlitePool, venue_id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>(
        r#"
        SELECT id, name, city, state, address, phone, image_link, genres,
               facebook_link, website_link, seeking_talent, seeking_description,
               created_at
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(venue_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("venue {venue_id}")))
}

/// Shows at one venue with the performing artist attached, ordered by start time
pub async fn venue_shows(pool: &SqlitePool, venue_id: i64) -> Result<Vec<EntityShowRow>> {
    let rows = sqlx::query_as::<_, EntityShowRow>(
        r#"
        SELECT s.artist_id AS party_id,
               a.name AS party_name,
               a.image_link AS party_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Case-insensitive substring search over venue names
///
/// LEFT JOIN against shows so a name match alone guarantees inclusion;
/// `instr` is plain containment, immune to LIKE wildcard characters in the
/// search term. Ordered by id so the search fold can group consecutive rows.
pub async fn search_venues(pool: &SqlitePool, term: &str) -> Result<Vec<SearchRow>> {
    let rows = sqlx::query_as::<_, SearchRow>(
        r#"
        SELECT v.id, v.name, s.start_time
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        WHERE instr(lower(v.name), lower(?)) > 0
        ORDER BY v.id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All venue ids and names, for show-form metadata
pub async fn list_venue_refs(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows = sqlx::query_as::<_, EntityRef>("SELECT id, name FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

// ============================================================================
// Artist reads
// ============================================================================

/// All artist ids and names, ordered by id
pub async fn list_artist_refs(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let rows = sqlx::query_as::<_, EntityRef>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Fetch one artist by id, independent of its shows
pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>(
        r#"
        SELECT id, name, city, state, phone, image_link, genres,
               facebook_link, website_link, seeking_venue, seeking_description,
               created_at
        FROM artists
        WHERE id = ?
        "#,
    )
    .bind(artist_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound(format!("artist {artist_id}")))
}

/// Shows played by one artist with the hosting venue attached
pub async fn artist_shows(pool: &SqlitePool, artist_id: i64) -> Result<Vec<EntityShowRow>> {
    let rows = sqlx::query_as::<_, EntityShowRow>(
        r#"
        SELECT s.venue_id AS party_id,
               v.name AS party_name,
               v.image_link AS party_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Case-insensitive substring search over artist names
pub async fn search_artists(pool: &SqlitePool, term: &str) -> Result<Vec<SearchRow>> {
    let rows = sqlx::query_as::<_, SearchRow>(
        r#"
        SELECT a.id, a.name, s.start_time
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id
        WHERE instr(lower(a.name), lower(?)) > 0
        ORDER BY a.id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ============================================================================
// Show reads
// ============================================================================

/// All shows with denormalized venue and artist fields
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.venue_id,
               v.name AS venue_name,
               s.artist_id,
               a.name AS artist_name,
               a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        JOIN venues v ON v.id = s.venue_id
        ORDER BY s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

// ============================================================================
// Mutations
// ============================================================================

/// Insert a new venue, returning its assigned id
pub async fn create_venue(pool: &SqlitePool, form: &VenueForm) -> Result<i64> {
    let genres = form.genres_joined()?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venues (name, city, state, address, phone, image_link,
                            genres, facebook_link, website_link,
                            seeking_talent, seeking_description, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&genres)
    .bind(&form.facebook_link)
    .bind(&form.website_link)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    let venue_id = result.last_insert_rowid();
    tx.commit().await?;

    info!("Created venue {} ({})", venue_id, form.name);
    Ok(venue_id)
}

/// Overwrite an existing venue's attributes
pub async fn update_venue(pool: &SqlitePool, venue_id: i64, form: &VenueForm) -> Result<()> {
    let genres = form.genres_joined()?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?,
            image_link = ?, genres = ?, facebook_link = ?, website_link = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&genres)
    .bind(&form.facebook_link)
    .bind(&form.website_link)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .bind(venue_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {venue_id}")));
    }

    tx.commit().await?;

    info!("Updated venue {} ({})", venue_id, form.name);
    Ok(())
}

/// Delete a venue and, through the cascade, all of its shows
pub async fn delete_venue(pool: &SqlitePool, venue_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {venue_id}")));
    }

    tx.commit().await?;

    info!("Deleted venue {}", venue_id);
    Ok(())
}

/// Insert a new artist, returning its assigned id
pub async fn create_artist(pool: &SqlitePool, form: &ArtistForm) -> Result<i64> {
    let genres = form.genres_joined()?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (name, city, state, phone, image_link, genres,
                             facebook_link, website_link, seeking_venue,
                             seeking_description, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&genres)
    .bind(&form.facebook_link)
    .bind(&form.website_link)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;

    let artist_id = result.last_insert_rowid();
    tx.commit().await?;

    info!("Created artist {} ({})", artist_id, form.name);
    Ok(artist_id)
}

/// Overwrite an existing artist's attributes
pub async fn update_artist(pool: &SqlitePool, artist_id: i64, form: &ArtistForm) -> Result<()> {
    let genres = form.genres_joined()?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, image_link = ?,
            genres = ?, facebook_link = ?, website_link = ?,
            seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&genres)
    .bind(&form.facebook_link)
    .bind(&form.website_link)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .bind(artist_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {artist_id}")));
    }

    tx.commit().await?;

    info!("Updated artist {} ({})", artist_id, form.name);
    Ok(())
}

/// Delete an artist and, through the cascade, all of its shows
pub async fn delete_artist(pool: &SqlitePool, artist_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(artist_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {artist_id}")));
    }

    tx.commit().await?;

    info!("Deleted artist {}", artist_id);
    Ok(())
}

/// Insert a new show, returning its assigned id
///
/// Both parents are verified inside the same transaction so a dangling
/// reference surfaces as NotFound rather than a raw constraint violation.
pub async fn create_show(pool: &SqlitePool, form: &ShowForm) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let artist_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(form.artist_id)
        .fetch_one(&mut *tx)
        .await?;
    if !artist_exists {
        return Err(Error::NotFound(format!("artist {}", form.artist_id)));
    }

    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(form.venue_id)
        .fetch_one(&mut *tx)
        .await?;
    if !venue_exists {
        return Err(Error::NotFound(format!("venue {}", form.venue_id)));
    }

    let result = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(form.artist_id)
        .bind(form.venue_id)
        .bind(form.start_time)
        .execute(&mut *tx)
        .await?;

    let show_id = result.last_insert_rowid();
    tx.commit().await?;

    info!(
        "Created show {} (artist {} at venue {})",
        show_id, form.artist_id, form.venue_id
    );
    Ok(show_id)
}
