//! Listing aggregation
//!
//! Pure folds over ordered query rows into the display structures the
//! handlers serialize. The evaluation instant is captured once per request
//! and threaded through every classification, so one request always sees a
//! consistent past/upcoming partition point.

use crate::db::models::{Artist, EntityShowRow, SearchRow, Venue, VenueShowRow};
use crate::genre::{split_genres, Genre};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Display structures
// ============================================================================

/// One venue inside a city group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues in one (city, state) locality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// A show as rendered on a venue page: the performing artist's cross-fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueShowView {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

impl VenueShowView {
    fn from_row(row: EntityShowRow) -> Self {
        Self {
            artist_id: row.party_id,
            artist_name: row.party_name,
            artist_image_link: row.party_image_link,
            start_time: row.start_time,
        }
    }
}

/// A show as rendered on an artist page: the hosting venue's cross-fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistShowView {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

impl ArtistShowView {
    fn from_row(row: EntityShowRow) -> Self {
        Self {
            venue_id: row.party_id,
            venue_name: row.party_name,
            venue_image_link: row.party_image_link,
            start_time: row.start_time,
        }
    }
}

/// Venue detail page: own attributes plus the partitioned show lists
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<Genre>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
    pub past_shows: Vec<VenueShowView>,
    pub upcoming_shows: Vec<VenueShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    /// Attach a venue's partitioned shows to its own attributes
    ///
    /// The venue row is fetched independently of the join, so a venue with
    /// zero shows still renders with empty lists.
    pub fn build(venue: Venue, rows: Vec<EntityShowRow>, now: DateTime<Utc>) -> Self {
        let (past_shows, upcoming_shows) = partition_shows(rows, now, VenueShowView::from_row);
        Self {
            id: venue.id,
            name: venue.name,
            genres: split_genres(&venue.genres),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Artist detail page: own attributes plus the partitioned show lists
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<Genre>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
    pub past_shows: Vec<ArtistShowView>,
    pub upcoming_shows: Vec<ArtistShowView>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    /// Attach an artist's partitioned shows to its own attributes
    pub fn build(artist: Artist, rows: Vec<EntityShowRow>, now: DateTime<Utc>) -> Self {
        let (past_shows, upcoming_shows) = partition_shows(rows, now, ArtistShowView::from_row);
        Self {
            id: artist.id,
            name: artist.name,
            genres: split_genres(&artist.genres),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

/// Venue attributes as prefilled into the edit form, genres split out
#[derive(Debug, Clone, Serialize)]
pub struct VenueRecord {
    pub id: i64,
    pub name: String,
    pub genres: Vec<Genre>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
}

impl From<Venue> for VenueRecord {
    fn from(venue: Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: split_genres(&venue.genres),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website_link: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
        }
    }
}

/// Artist attributes as prefilled into the edit form, genres split out
#[derive(Debug, Clone, Serialize)]
pub struct ArtistRecord {
    pub id: i64,
    pub name: String,
    pub genres: Vec<Genre>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: String,
}

impl From<Artist> for ArtistRecord {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: split_genres(&artist.genres),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website_link: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
        }
    }
}

/// One name-search match with its upcoming-show count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Search response: distinct matches ordered by id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

// ============================================================================
// Folds
// ============================================================================

/// Group venue join rows into (city, state) localities
///
/// Rows arrive ordered by (city, state, id), one row per (venue, show) pair
/// and one NULL-show row for venues without any. Consecutive rows with the
/// same venue id fold into one summary; a new group starts whenever the
/// locality pair changes. The grouping key is the full (city, state) pair,
/// so two states sharing a city name stay separate groups.
pub fn group_venues_by_city(rows: &[VenueShowRow], now: DateTime<Utc>) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();

    for row in rows {
        let upcoming = row.start_time.map_or(0, |t| usize::from(t > now));

        let same_locality = groups
            .last()
            .is_some_and(|g| g.city == row.city && g.state == row.state);
        if !same_locality {
            groups.push(CityGroup {
                city: row.city.clone(),
                state: row.state.clone(),
                venues: Vec::new(),
            });
        }

        if let Some(group) = groups.last_mut() {
            match group.venues.last_mut() {
                Some(venue) if venue.id == row.id => venue.num_upcoming_shows += upcoming,
                _ => group.venues.push(VenueSummary {
                    id: row.id,
                    name: row.name.clone(),
                    num_upcoming_shows: upcoming,
                }),
            }
        }
    }

    groups
}

/// Split show rows into (past, upcoming) around the evaluation instant
///
/// A show starting exactly at the instant counts as past; only strictly
/// later shows are upcoming. Each row lands in exactly one list.
pub fn partition_shows<T>(
    rows: Vec<EntityShowRow>,
    now: DateTime<Utc>,
    make: impl Fn(EntityShowRow) -> T,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();

    for row in rows {
        if row.start_time <= now {
            past.push(make(row));
        } else {
            upcoming.push(make(row));
        }
    }

    (past, upcoming)
}

/// Collapse search join rows into distinct matches with upcoming counts
///
/// Rows arrive ordered by entity id; consecutive rows with the same id
/// increment that match's count instead of producing duplicates. A match
/// whose only row carries no show (NULL start_time) stays in the results
/// with a count of zero.
pub fn fold_search_rows(rows: &[SearchRow], now: DateTime<Utc>) -> SearchResults {
    let mut data: Vec<SearchMatch> = Vec::new();

    for row in rows {
        let upcoming = row.start_time.map_or(0, |t| usize::from(t > now));

        match data.last_mut() {
            Some(last) if last.id == row.id => last.num_upcoming_shows += upcoming,
            _ => data.push(SearchMatch {
                id: row.id,
                name: row.name.clone(),
                num_upcoming_shows: upcoming,
            }),
        }
    }

    SearchResults {
        count: data.len(),
        data,
    }
}
