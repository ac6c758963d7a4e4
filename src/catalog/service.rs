use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::asset_store::{AssetCategory, AssetStore, AssetStoreError};
use crate::catalog_store::{filter_songs, Song, SongStore, SongStoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("song not found: {0}")]
    SongNotFound(String),

    #[error(transparent)]
    Store(#[from] SongStoreError),

    #[error(transparent)]
    Assets(#[from] AssetStoreError),
}

/// A binary payload that already passed boundary validation.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Metadata for a new song. Both fields are required and non-empty; the
/// boundary layer rejects anything else before it gets here.
#[derive(Debug, Clone)]
pub struct NewSong {
    pub name: String,
    pub artist: String,
}

/// Partial metadata update; `None` means "leave the field untouched".
#[derive(Debug, Clone, Default)]
pub struct SongPatch {
    pub name: Option<String>,
    pub artist: Option<String>,
}

/// Orchestrates the song store and the asset store so that create, update
/// and delete keep catalog references and stored files consistent.
///
/// Every mutation is a load-modify-save over the whole catalog document.
/// `write_lock` serializes those cycles; without it two concurrent creates
/// could each load the collection, append in memory, and have the second
/// save silently drop the first song. Readers never take the lock: saves
/// replace the document atomically, so a plain load always sees the last
/// fully-written state.
pub struct CatalogService {
    songs: Arc<dyn SongStore>,
    assets: Arc<dyn AssetStore>,
    write_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new(songs: Arc<dyn SongStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            songs,
            assets,
            write_lock: Mutex::new(()),
        }
    }

    /// All songs in insertion order, optionally filtered by a search term.
    /// Always reflects the on-disk document at call time.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Song>, CatalogError> {
        let songs = self.songs.load_all().await?;
        Ok(match search {
            Some(term) => filter_songs(songs, term),
            None => songs,
        })
    }

    /// Create a song from its metadata, a required cover image and an
    /// optional audio file.
    ///
    /// Assets are written before the catalog document: a crash in between
    /// leaves an orphaned file on disk, never a catalog entry pointing at
    /// a missing one.
    pub async fn create(
        &self,
        new: NewSong,
        cover: UploadedAsset,
        audio: Option<UploadedAsset>,
    ) -> Result<Song, CatalogError> {
        let image_url = self
            .assets
            .save(&cover.content, &cover.file_name, AssetCategory::Image)
            .await?;

        let audio_url = match &audio {
            Some(file) => Some(
                self.assets
                    .save(&file.content, &file.file_name, AssetCategory::Audio)
                    .await?,
            ),
            None => None,
        };

        let song = Song {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            artist: new.artist,
            image_url,
            audio_url,
        };

        let _guard = self.write_lock.lock().await;
        let mut songs = self.songs.load_all().await?;
        songs.push(song.clone());
        self.songs.save_all(&songs).await?;

        info!("Created song {} ({} - {})", song.id, song.artist, song.name);
        Ok(song)
    }

    /// Partial update of metadata and/or assets. Omitted fields keep their
    /// current value; a replaced asset is written before its predecessor is
    /// deleted, so the entry never points at a missing file.
    pub async fn update(
        &self,
        id: &str,
        patch: SongPatch,
        cover: Option<UploadedAsset>,
        audio: Option<UploadedAsset>,
    ) -> Result<Song, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut songs = self.songs.load_all().await?;
        let index = songs
            .iter()
            .position(|song| song.id == id)
            .ok_or_else(|| CatalogError::SongNotFound(id.to_owned()))?;

        if let Some(name) = patch.name {
            songs[index].name = name;
        }
        if let Some(artist) = patch.artist {
            songs[index].artist = artist;
        }

        if let Some(file) = cover {
            let new_ref = self
                .assets
                .save(&file.content, &file.file_name, AssetCategory::Image)
                .await?;
            let old_ref = std::mem::replace(&mut songs[index].image_url, new_ref);
            self.assets.delete(&old_ref).await?;
        }

        if let Some(file) = audio {
            let new_ref = self
                .assets
                .save(&file.content, &file.file_name, AssetCategory::Audio)
                .await?;
            if let Some(old_ref) = songs[index].audio_url.replace(new_ref) {
                self.assets.delete(&old_ref).await?;
            }
        }

        self.songs.save_all(&songs).await?;

        let song = songs[index].clone();
        info!("Updated song {}", song.id);
        Ok(song)
    }

    /// Delete a song and its assets. Returns `false` when the id is
    /// unknown; that is a normal outcome, not an error.
    ///
    /// Catalog removal is authoritative: asset deletion is best-effort
    /// cleanup, and a failing delete never keeps the row alive.
    pub async fn delete(&self, id: &str) -> Result<bool, CatalogError> {
        let _guard = self.write_lock.lock().await;
        let mut songs = self.songs.load_all().await?;
        let Some(index) = songs.iter().position(|song| song.id == id) else {
            return Ok(false);
        };
        let song = songs.remove(index);

        if let Err(err) = self.assets.delete(&song.image_url).await {
            warn!("Could not delete cover of song {}: {}", song.id, err);
        }
        if let Some(audio_url) = &song.audio_url {
            if let Err(err) = self.assets.delete(audio_url).await {
                warn!("Could not delete audio of song {}: {}", song.id, err);
            }
        }

        self.songs.save_all(&songs).await?;

        info!("Deleted song {}", song.id);
        Ok(true)
    }
}
