use serde::{Deserialize, Serialize};

/// One song in the catalog.
///
/// `image_url` and `audio_url` are storage-relative asset references;
/// clients resolve them against the static `/storage` root. The serialized
/// form (both the persisted document and API responses) uses camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}
