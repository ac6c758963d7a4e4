//! Song HTTP routes.
//!
//! The boundary layer over the catalog service:
//! - GET    /        - list songs, optionally filtered by ?search=
//! - POST   /        - create a song (multipart; cover image required)
//! - PUT    /{id}    - update a song (multipart; every field optional)
//! - DELETE /{id}    - delete a song and its assets

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::state::{GuardedCatalogService, ServerState};
use super::upload::{
    read_song_form, require_text, validate_audio_file, validate_cover_image, ErrorResponse,
    UploadError, ARTIST_FIELD, COVER_IMAGE_FIELD, NAME_FIELD,
};
use super::ServerConfig;
use crate::catalog::{CatalogError, NewSong, SongPatch, UploadedAsset};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

fn internal_error(err: CatalogError) -> Response {
    error!("Catalog operation failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Catalog operation failed".to_owned(),
        }),
    )
        .into_response()
}

async fn list_songs(
    State(catalog): State<GuardedCatalogService>,
    Query(query): Query<ListQuery>,
) -> Response {
    match catalog.list(query.search.as_deref()).await {
        Ok(songs) => Json(songs).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn create_song(
    State(config): State<ServerConfig>,
    State(catalog): State<GuardedCatalogService>,
    multipart: Multipart,
) -> Response {
    let form = match read_song_form(multipart).await {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };

    let parsed = (|| {
        let name = require_text(form.name, NAME_FIELD)?;
        let artist = require_text(form.artist, ARTIST_FIELD)?;
        let cover = form
            .cover_image
            .ok_or(UploadError::MissingField(COVER_IMAGE_FIELD))
            .and_then(|part| validate_cover_image(part, config.max_image_bytes))?;
        let audio = form
            .audio_file
            .map(|part| validate_audio_file(part, config.max_audio_bytes))
            .transpose()?;
        Ok::<_, UploadError>((NewSong { name, artist }, cover, audio))
    })();

    let (new_song, cover, audio) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return err.into_response(),
    };

    debug!(
        "Create request: {} - {} (cover {} bytes, audio: {})",
        new_song.artist,
        new_song.name,
        cover.content.len(),
        audio.is_some()
    );

    match catalog.create(new_song, cover, audio).await {
        Ok(song) => (StatusCode::CREATED, Json(song)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn update_song(
    State(config): State<ServerConfig>,
    State(catalog): State<GuardedCatalogService>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let form = match read_song_form(multipart).await {
        Ok(form) => form,
        Err(err) => return err.into_response(),
    };

    let parsed = (|| {
        // Empty text fields mean "not supplied", same as omitting them.
        let patch = SongPatch {
            name: form.name.filter(|s| !s.trim().is_empty()),
            artist: form.artist.filter(|s| !s.trim().is_empty()),
        };
        let cover: Option<UploadedAsset> = form
            .cover_image
            .map(|part| validate_cover_image(part, config.max_image_bytes))
            .transpose()?;
        let audio: Option<UploadedAsset> = form
            .audio_file
            .map(|part| validate_audio_file(part, config.max_audio_bytes))
            .transpose()?;
        Ok::<_, UploadError>((patch, cover, audio))
    })();

    let (patch, cover, audio) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return err.into_response(),
    };

    match catalog.update(&id, patch, cover, audio).await {
        Ok(song) => Json(song).into_response(),
        Err(CatalogError::SongNotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => internal_error(err),
    }
}

async fn delete_song(
    State(catalog): State<GuardedCatalogService>,
    Path(id): Path<String>,
) -> Response {
    match catalog.delete(&id).await {
        Ok(success) => Json(DeleteResponse { success }).into_response(),
        Err(err) => internal_error(err),
    }
}

/// Build the song routes. The body limit leaves room for the audio size
/// cap plus the cover image and multipart framing; exact per-file caps are
/// enforced during validation.
pub fn song_routes(config: &ServerConfig) -> Router<ServerState> {
    let body_limit = (config.max_audio_bytes + config.max_image_bytes) as usize + 1024 * 1024;
    Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/{id}", put(update_song).delete(delete_song))
        .layer(DefaultBodyLimit::max(body_limit))
}
