//! Multipart upload extraction and validation.
//!
//! Everything here runs before the catalog service is invoked: a request
//! that fails validation never touches the stores.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::catalog::UploadedAsset;

pub const NAME_FIELD: &str = "name";
pub const ARTIST_FIELD: &str = "artist";
pub const COVER_IMAGE_FIELD: &str = "coverImage";
pub const AUDIO_FILE_FIELD: &str = "audioFile";

const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];
const ALLOWED_AUDIO_MIME_TYPES: &[&str] = &["audio/mpeg", "audio/wav", "audio/ogg"];

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Unsupported media type for {field}: {detected}")]
    UnsupportedMediaType {
        field: &'static str,
        detected: String,
    },

    #[error("File for {field} too large: {size} bytes (max: {max})")]
    FileTooLarge {
        field: &'static str,
        size: u64,
        max: u64,
    },

    #[error("Malformed multipart request: {0}")]
    Multipart(String),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        warn!("Rejected upload: {}", self);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// A file part as received from the client, before validation.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// The fields of a create/update song request. All optional at this stage;
/// per-operation requirements are enforced by the handlers.
#[derive(Debug, Default)]
pub struct SongForm {
    pub name: Option<String>,
    pub artist: Option<String>,
    pub cover_image: Option<FilePart>,
    pub audio_file: Option<FilePart>,
}

/// Drain a multipart request into a [`SongForm`]. Unknown fields are
/// ignored, matching the lenient handling of browser form posts.
pub async fn read_song_form(mut multipart: Multipart) -> Result<SongForm, UploadError> {
    let mut form = SongForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| UploadError::Multipart(err.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            NAME_FIELD => {
                form.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|err| UploadError::Multipart(err.to_string()))?,
                );
            }
            ARTIST_FIELD => {
                form.artist = Some(
                    field
                        .text()
                        .await
                        .map_err(|err| UploadError::Multipart(err.to_string()))?,
                );
            }
            COVER_IMAGE_FIELD => {
                form.cover_image = Some(read_file_part(field).await?);
            }
            AUDIO_FILE_FIELD => {
                form.audio_file = Some(read_file_part(field).await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_file_part(
    field: axum::extract::multipart::Field<'_>,
) -> Result<FilePart, UploadError> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content = field
        .bytes()
        .await
        .map_err(|err| UploadError::Multipart(err.to_string()))?
        .to_vec();
    Ok(FilePart { file_name, content })
}

/// Require a non-empty text field. Whitespace-only counts as empty.
pub fn require_text(value: Option<String>, field: &'static str) -> Result<String, UploadError> {
    match value {
        None => Err(UploadError::MissingField(field)),
        Some(text) if text.trim().is_empty() => Err(UploadError::EmptyField(field)),
        Some(text) => Ok(text),
    }
}

/// Validate a cover image part: jpeg or png, within the size cap.
pub fn validate_cover_image(
    part: FilePart,
    max_bytes: u64,
) -> Result<UploadedAsset, UploadError> {
    validate_file(part, COVER_IMAGE_FIELD, ALLOWED_IMAGE_MIME_TYPES, max_bytes)
}

/// Validate an audio part: mp3, wav or ogg, within the size cap.
pub fn validate_audio_file(
    part: FilePart,
    max_bytes: u64,
) -> Result<UploadedAsset, UploadError> {
    validate_file(part, AUDIO_FILE_FIELD, ALLOWED_AUDIO_MIME_TYPES, max_bytes)
}

fn validate_file(
    part: FilePart,
    field: &'static str,
    allowed: &[&str],
    max_bytes: u64,
) -> Result<UploadedAsset, UploadError> {
    if part.content.is_empty() {
        return Err(UploadError::EmptyField(field));
    }

    let size = part.content.len() as u64;
    if size > max_bytes {
        return Err(UploadError::FileTooLarge {
            field,
            size,
            max: max_bytes,
        });
    }

    // The client-declared content type is ignored on purpose: every
    // accepted format has a recognizable signature, so the bytes speak
    // for themselves.
    let mime = infer::get(&part.content).map(|kind| canonical_mime(kind.mime_type()));
    match mime {
        Some(mime) if allowed.contains(&mime) => Ok(UploadedAsset {
            file_name: part.file_name,
            content: part.content,
        }),
        Some(mime) => Err(UploadError::UnsupportedMediaType {
            field,
            detected: mime.to_owned(),
        }),
        None => Err(UploadError::UnsupportedMediaType {
            field,
            detected: "unknown".to_owned(),
        }),
    }
}

fn canonical_mime(mime: &str) -> &str {
    // `infer` reports the pre-standard name for wav.
    match mime {
        "audio/x-wav" => "audio/wav",
        other => other,
    }
}
