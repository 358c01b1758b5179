//! HTTP request handlers
//!
//! One handler per route. Each read handler captures the evaluation instant
//! once and threads it through every past/upcoming classification, so a
//! single request always partitions against one point in time. Mutation
//! handlers run validate -> write-in-transaction -> flash response.

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use showbill_common::db::models::{EntityRef, ShowListing};
use showbill_common::db::queries;
use showbill_common::forms::{ArtistForm, ShowForm, VenueForm};
use showbill_common::listings::{
    fold_search_rows, group_venues_by_city, ArtistDetail, ArtistRecord, CityGroup, SearchResults,
    VenueDetail, VenueRecord,
};
use showbill_common::{Genre, UsState};

use crate::api::error::{flash_failure, ApiError, ApiResult};
use crate::api::server::AppContext;

const HOME_HTML: &str = include_str!("pages/home.html");

// ============================================================================
// Request/Response Types
// ============================================================================

/// Flash-style outcome message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a create endpoint: the new row id plus the flash message
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct VenueAreasResponse {
    pub areas: Vec<CityGroup>,
}

#[derive(Debug, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<EntityRef>,
}

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub shows: Vec<ShowListing>,
}

/// Choice lists the venue/artist form widgets render
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub states: Vec<&'static str>,
    pub genres: Vec<&'static str>,
}

impl FormOptions {
    fn new() -> Self {
        Self {
            states: UsState::all().iter().map(|s| s.code()).collect(),
            genres: Genre::all().iter().map(|g| g.as_str()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditVenueResponse {
    pub venue: VenueRecord,
    pub options: FormOptions,
}

#[derive(Debug, Serialize)]
pub struct EditArtistResponse {
    pub artist: ArtistRecord,
    pub options: FormOptions,
}

/// Parents available to the show form
#[derive(Debug, Serialize)]
pub struct ShowFormOptions {
    pub artists: Vec<EntityRef>,
    pub venues: Vec<EntityRef>,
}

// ============================================================================
// Landing and fallback
// ============================================================================

/// GET / - landing page
pub async fn index() -> Html<&'static str> {
    Html(HOME_HTML)
}

/// Fallback for unknown routes - dedicated 404 page
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

// ============================================================================
// Venue Endpoints
// ============================================================================

/// GET /venues - venues grouped by (city, state) locality
pub async fn list_venues(State(ctx): State<AppContext>) -> ApiResult<Json<VenueAreasResponse>> {
    let now = Utc::now();
    let rows = queries::venues_with_shows(&ctx.db_pool).await?;

    Ok(Json(VenueAreasResponse {
        areas: group_venues_by_city(&rows, now),
    }))
}

/// POST /venues/search - case-insensitive name search
pub async fn search_venues(
    State(ctx): State<AppContext>,
    Form(req): Form<SearchRequest>,
) -> ApiResult<Json<SearchResults>> {
    let now = Utc::now();
    let rows = queries::search_venues(&ctx.db_pool, &req.search_term).await?;

    Ok(Json(fold_search_rows(&rows, now)))
}

/// GET /venues/:venue_id - detail page with past/upcoming shows
pub async fn show_venue(
    State(ctx): State<AppContext>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<VenueDetail>> {
    let now = Utc::now();
    let venue = queries::get_venue(&ctx.db_pool, venue_id).await?;
    let rows = queries::venue_shows(&ctx.db_pool, venue_id).await?;

    Ok(Json(VenueDetail::build(venue, rows, now)))
}

/// GET /venues/create - choice lists for the new-venue form
pub async fn create_venue_form() -> Json<FormOptions> {
    Json(FormOptions::new())
}

/// POST /venues/create - validate and insert a new venue
pub async fn create_venue(
    State(ctx): State<AppContext>,
    Json(form): Json<VenueForm>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    form.validate()?;

    let name = form.name.clone();
    let venue_id = queries::create_venue(&ctx.db_pool, &form).await.map_err(|e| {
        flash_failure(
            e,
            format!("An error occurred. Venue {name} could not be listed."),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: venue_id,
            message: format!("Venue {name} was successfully listed!"),
        }),
    ))
}

/// GET /venues/:venue_id/edit - current record plus choice lists
pub async fn edit_venue_form(
    State(ctx): State<AppContext>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<EditVenueResponse>> {
    let venue = queries::get_venue(&ctx.db_pool, venue_id).await?;

    Ok(Json(EditVenueResponse {
        venue: VenueRecord::from(venue),
        options: FormOptions::new(),
    }))
}

/// POST /venues/:venue_id/edit - validate and overwrite an existing venue
pub async fn edit_venue(
    State(ctx): State<AppContext>,
    Path(venue_id): Path<i64>,
    Json(form): Json<VenueForm>,
) -> ApiResult<Json<MessageResponse>> {
    form.validate()?;

    let name = form.name.clone();
    queries::update_venue(&ctx.db_pool, venue_id, &form)
        .await
        .map_err(|e| flash_failure(e, format!("An error occurred. {name} could not be updated.")))?;

    Ok(Json(MessageResponse::success(format!(
        "{name} was successfully updated!"
    ))))
}

/// POST /venues/:venue_id/delete - cascade delete a venue and its shows
pub async fn delete_venue(
    State(ctx): State<AppContext>,
    Path(venue_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    queries::delete_venue(&ctx.db_pool, venue_id)
        .await
        .map_err(|e| {
            flash_failure(
                e,
                "An error occurred. Venue could not be deleted.".to_string(),
            )
        })?;

    Ok(Json(MessageResponse::success(
        "Venue was successfully deleted!",
    )))
}

// ============================================================================
// Artist Endpoints
// ============================================================================

/// GET /artists - artist index ordered by id
pub async fn list_artists(State(ctx): State<AppContext>) -> ApiResult<Json<ArtistsResponse>> {
    let artists = queries::list_artist_refs(&ctx.db_pool).await?;

    Ok(Json(ArtistsResponse { artists }))
}

/// POST /artists/search - case-insensitive name search
pub async fn search_artists(
    State(ctx): State<AppContext>,
    Form(req): Form<SearchRequest>,
) -> ApiResult<Json<SearchResults>> {
    let now = Utc::now();
    let rows = queries::search_artists(&ctx.db_pool, &req.search_term).await?;

    Ok(Json(fold_search_rows(&rows, now)))
}

/// GET /artists/:artist_id - detail page with past/upcoming shows
pub async fn show_artist(
    State(ctx): State<AppContext>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<ArtistDetail>> {
    let now = Utc::now();
    let artist = queries::get_artist(&ctx.db_pool, artist_id).await?;
    let rows = queries::artist_shows(&ctx.db_pool, artist_id).await?;

    Ok(Json(ArtistDetail::build(artist, rows, now)))
}

/// GET /artists/create - choice lists for the new-artist form
pub async fn create_artist_form() -> Json<FormOptions> {
    Json(FormOptions::new())
}

/// POST /artists/create - validate and insert a new artist
pub async fn create_artist(
    State(ctx): State<AppContext>,
    Json(form): Json<ArtistForm>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    form.validate()?;

    let name = form.name.clone();
    let artist_id = queries::create_artist(&ctx.db_pool, &form).await.map_err(|e| {
        flash_failure(
            e,
            format!("An error occurred. Artist {name} could not be listed."),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: artist_id,
            message: format!("Artist {name} was successfully listed!"),
        }),
    ))
}

/// GET /artists/:artist_id/edit - current record plus choice lists
pub async fn edit_artist_form(
    State(ctx): State<AppContext>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<EditArtistResponse>> {
    let artist = queries::get_artist(&ctx.db_pool, artist_id).await?;

    Ok(Json(EditArtistResponse {
        artist: ArtistRecord::from(artist),
        options: FormOptions::new(),
    }))
}

/// POST /artists/:artist_id/edit - validate and overwrite an existing artist
pub async fn edit_artist(
    State(ctx): State<AppContext>,
    Path(artist_id): Path<i64>,
    Json(form): Json<ArtistForm>,
) -> ApiResult<Json<MessageResponse>> {
    form.validate()?;

    let name = form.name.clone();
    queries::update_artist(&ctx.db_pool, artist_id, &form)
        .await
        .map_err(|e| flash_failure(e, format!("An error occurred. {name} could not be updated.")))?;

    Ok(Json(MessageResponse::success(format!(
        "{name} was successfully updated!"
    ))))
}

/// POST /artists/:artist_id/delete - cascade delete an artist and its shows
pub async fn delete_artist(
    State(ctx): State<AppContext>,
    Path(artist_id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    queries::delete_artist(&ctx.db_pool, artist_id)
        .await
        .map_err(|e| {
            flash_failure(
                e,
                "An error occurred. Artist could not be deleted.".to_string(),
            )
        })?;

    Ok(Json(MessageResponse::success(
        "Artist was successfully deleted!",
    )))
}

// ============================================================================
// Show Endpoints
// ============================================================================

/// GET /shows - all shows with denormalized venue and artist fields
pub async fn list_shows(State(ctx): State<AppContext>) -> ApiResult<Json<ShowsResponse>> {
    let shows = queries::list_shows(&ctx.db_pool).await?;

    Ok(Json(ShowsResponse { shows }))
}

/// GET /shows/create - parents available to the new-show form
pub async fn create_show_form(State(ctx): State<AppContext>) -> ApiResult<Json<ShowFormOptions>> {
    let artists = queries::list_artist_refs(&ctx.db_pool).await?;
    let venues = queries::list_venue_refs(&ctx.db_pool).await?;

    Ok(Json(ShowFormOptions { artists, venues }))
}

/// POST /shows/create - validate and insert a new show
pub async fn create_show(
    State(ctx): State<AppContext>,
    Json(form): Json<ShowForm>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    form.validate()?;

    let show_id = queries::create_show(&ctx.db_pool, &form).await.map_err(|e| {
        flash_failure(e, "An error occurred. Show could not be listed.".to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: show_id,
            message: "Show was successfully listed!".to_string(),
        }),
    ))
}
