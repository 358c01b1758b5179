//! Integration tests for the directory queries and listing folds
//!
//! Each test runs against its own temp-file SQLite database created through
//! the normal init path, so foreign keys and cascades behave as in
//! production.

use chrono::{DateTime, Duration, Utc};
use showbill_common::db::{init_database, queries};
use showbill_common::forms::{ArtistForm, ShowForm, VenueForm};
use showbill_common::listings::{
    fold_search_rows, group_venues_by_city, ArtistDetail, VenueDetail,
};
use showbill_common::Error;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("showbill.db")).await.unwrap();
    (pool, dir)
}

fn venue_form(name: &str, city: &str, state: &str) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom St".to_string(),
        phone: "123-123-1234".to_string(),
        genres: vec!["Jazz".to_string(), "Reggae".to_string()],
        seeking_talent: true,
        ..VenueForm::default()
    }
}

fn artist_form(name: &str) -> ArtistForm {
    ArtistForm {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: "326-123-5000".to_string(),
        genres: vec!["Rock n Roll".to_string()],
        ..ArtistForm::default()
    }
}

async fn add_show(pool: &SqlitePool, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) {
    queries::create_show(
        pool,
        &ShowForm {
            artist_id,
            venue_id,
            start_time,
        },
    )
    .await
    .unwrap();
}

async fn show_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn venue_round_trips_through_create_and_read() {
    let (pool, _dir) = setup().await;

    let id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let venue = queries::get_venue(&pool, id).await.unwrap();
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.genres, "Jazz,Reggae");
    assert!(venue.seeking_talent);

    // Zero-show venue still renders a detail page with empty lists
    let rows = queries::venue_shows(&pool, id).await.unwrap();
    let detail = VenueDetail::build(venue, rows, Utc::now());
    assert_eq!(detail.past_shows_count, 0);
    assert_eq!(detail.upcoming_shows_count, 0);
    assert_eq!(detail.genres.len(), 2);
}

#[tokio::test]
async fn missing_ids_surface_as_not_found() {
    let (pool, _dir) = setup().await;

    assert!(matches!(
        queries::get_venue(&pool, 999).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        queries::get_artist(&pool, 999).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        queries::update_venue(&pool, 999, &venue_form("X", "Y", "CA")).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn grouped_listing_preserves_venue_count() {
    let (pool, _dir) = setup().await;

    queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    queries::create_venue(&pool, &venue_form("Park Square Live Music & Coffee", "San Francisco", "CA"))
        .await
        .unwrap();
    queries::create_venue(&pool, &venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();

    let rows = queries::venues_with_shows(&pool).await.unwrap();
    let groups = group_venues_by_city(&rows, Utc::now());

    let total: usize = groups.iter().map(|g| g.venues.len()).sum();
    assert_eq!(total, 3);
    assert_eq!(groups.len(), 2);
    // Ordered by city: New York before San Francisco
    assert_eq!(groups[0].city, "New York");
    assert_eq!(groups[1].venues.len(), 2);
}

#[tokio::test]
async fn grouped_listing_counts_upcoming_shows() {
    let (pool, _dir) = setup().await;
    let now = Utc::now();

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();

    add_show(&pool, artist_id, venue_id, now - Duration::days(7)).await;
    add_show(&pool, artist_id, venue_id, now + Duration::days(7)).await;
    add_show(&pool, artist_id, venue_id, now + Duration::days(14)).await;

    let rows = queries::venues_with_shows(&pool).await.unwrap();
    let groups = group_venues_by_city(&rows, now);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].venues.len(), 1);
    assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn search_matches_substring_in_any_case() {
    let (pool, _dir) = setup().await;
    let now = Utc::now();

    queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    queries::create_venue(&pool, &venue_form("The Dueling Pianos Bar", "New York", "NY"))
        .await
        .unwrap();

    for term in ["Hop", "HOP", "hop"] {
        let rows = queries::search_venues(&pool, term).await.unwrap();
        let results = fold_search_rows(&rows, now);
        assert_eq!(results.count, 1, "term {:?}", term);
        assert_eq!(results.data[0].name, "The Musical Hop");
    }

    let rows = queries::search_venues(&pool, "zebra").await.unwrap();
    assert_eq!(fold_search_rows(&rows, now).count, 0);
}

#[tokio::test]
async fn search_keeps_zero_show_matches() {
    let (pool, _dir) = setup().await;

    queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let rows = queries::search_venues(&pool, "Musical").await.unwrap();
    let results = fold_search_rows(&rows, Utc::now());

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].num_upcoming_shows, 0);
}

#[tokio::test]
async fn search_collapses_join_rows_per_entity() {
    let (pool, _dir) = setup().await;
    let now = Utc::now();

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();

    add_show(&pool, artist_id, venue_id, now + Duration::days(1)).await;
    add_show(&pool, artist_id, venue_id, now + Duration::days(2)).await;

    let rows = queries::search_venues(&pool, "hop").await.unwrap();
    let results = fold_search_rows(&rows, now);

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn artist_search_matches_name_only() {
    let (pool, _dir) = setup().await;

    queries::create_artist(&pool, &artist_form("The Wild Sax Band"))
        .await
        .unwrap();
    queries::create_artist(&pool, &artist_form("Matt Quevedo"))
        .await
        .unwrap();

    let rows = queries::search_artists(&pool, "band").await.unwrap();
    let results = fold_search_rows(&rows, Utc::now());

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Wild Sax Band");

    // Genre and city text never match
    let rows = queries::search_artists(&pool, "Rock n Roll").await.unwrap();
    assert_eq!(fold_search_rows(&rows, Utc::now()).count, 0);
}

#[tokio::test]
async fn detail_pages_partition_and_denormalize_shows() {
    let (pool, _dir) = setup().await;
    let now = Utc::now();

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();

    add_show(&pool, artist_id, venue_id, now - Duration::days(30)).await;
    add_show(&pool, artist_id, venue_id, now + Duration::days(30)).await;

    let venue = queries::get_venue(&pool, venue_id).await.unwrap();
    let rows = queries::venue_shows(&pool, venue_id).await.unwrap();
    let detail = VenueDetail::build(venue, rows, now);

    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 1);
    assert_eq!(detail.upcoming_shows[0].artist_id, artist_id);
    assert_eq!(detail.upcoming_shows[0].artist_name, "Guns N Petals");

    let artist = queries::get_artist(&pool, artist_id).await.unwrap();
    let rows = queries::artist_shows(&pool, artist_id).await.unwrap();
    let detail = ArtistDetail::build(artist, rows, now);

    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 1);
    assert_eq!(detail.past_shows[0].venue_name, "The Musical Hop");
}

#[tokio::test]
async fn shows_listing_denormalizes_both_parents() {
    let (pool, _dir) = setup().await;
    let start = Utc::now() + Duration::days(3);

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();
    add_show(&pool, artist_id, venue_id, start).await;

    let listings = queries::list_shows(&pool).await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].venue_name, "The Musical Hop");
    assert_eq!(listings[0].artist_name, "Guns N Petals");
    assert_eq!(listings[0].start_time.timestamp(), start.timestamp());
}

#[tokio::test]
async fn deleting_a_venue_cascades_to_its_shows() {
    let (pool, _dir) = setup().await;
    let now = Utc::now();

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();
    add_show(&pool, artist_id, venue_id, now + Duration::days(1)).await;
    add_show(&pool, artist_id, venue_id, now + Duration::days(2)).await;

    assert_eq!(show_count(&pool).await, 2);

    queries::delete_venue(&pool, venue_id).await.unwrap();

    assert_eq!(show_count(&pool).await, 0);
    // The artist survives its venue
    assert!(queries::get_artist(&pool, artist_id).await.is_ok());
}

#[tokio::test]
async fn deleting_an_artist_cascades_to_its_shows() {
    let (pool, _dir) = setup().await;

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();
    add_show(&pool, artist_id, venue_id, Utc::now() + Duration::days(1)).await;

    queries::delete_artist(&pool, artist_id).await.unwrap();

    assert_eq!(show_count(&pool).await, 0);
    assert!(queries::get_venue(&pool, venue_id).await.is_ok());
}

#[tokio::test]
async fn failed_delete_leaves_everything_unchanged() {
    let (pool, _dir) = setup().await;

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist_id = queries::create_artist(&pool, &artist_form("Guns N Petals"))
        .await
        .unwrap();
    add_show(&pool, artist_id, venue_id, Utc::now() + Duration::days(1)).await;

    assert!(matches!(
        queries::delete_venue(&pool, 999).await,
        Err(Error::NotFound(_))
    ));

    assert_eq!(show_count(&pool).await, 1);
    assert!(queries::get_venue(&pool, venue_id).await.is_ok());
}

#[tokio::test]
async fn update_venue_overwrites_attributes() {
    let (pool, _dir) = setup().await;

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let mut form = venue_form("The Musical Hop", "Oakland", "CA");
    form.genres = vec!["Blues".to_string()];
    queries::update_venue(&pool, venue_id, &form).await.unwrap();

    let venue = queries::get_venue(&pool, venue_id).await.unwrap();
    assert_eq!(venue.city, "Oakland");
    assert_eq!(venue.genres, "Blues");
}

#[tokio::test]
async fn create_show_rejects_unknown_parents_without_writing() {
    let (pool, _dir) = setup().await;

    let venue_id = queries::create_venue(&pool, &venue_form("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();

    let result = queries::create_show(
        &pool,
        &ShowForm {
            artist_id: 999,
            venue_id,
            start_time: Utc::now() + Duration::days(1),
        },
    )
    .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(show_count(&pool).await, 0);
}
