//! Database models
//!
//! Row structs for the three tables plus the named-field result records the
//! join queries produce. Every query decodes into one of these; joined rows
//! are never addressed by position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A place that hosts shows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    /// Comma-joined canonical genre tokens
    pub genres: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A performer who plays shows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    /// Comma-joined canonical genre tokens
    pub genres: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One performance linking an artist to a venue at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Venue LEFT JOIN shows row for the grouped city listing
///
/// `start_time` is None for venues with no shows at all.
#[derive(Debug, Clone, FromRow)]
pub struct VenueShowRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// One show joined with the counterpart party of a detail page
///
/// For a venue page the party is the artist; for an artist page the venue.
#[derive(Debug, Clone, FromRow)]
pub struct EntityShowRow {
    pub party_id: i64,
    pub party_name: String,
    pub party_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Name-search LEFT JOIN row; one row per (entity, show) pair
#[derive(Debug, Clone, FromRow)]
pub struct SearchRow {
    pub id: i64,
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// Fully denormalized show row for the shows listing page
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Bare id + name reference, used by the artist index and form metadata
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntityRef {
    pub id: i64,
    pub name: String,
}
