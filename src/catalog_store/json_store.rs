//! JSON file implementation of the song store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use super::{Song, SongStore, SongStoreError};

/// Persists the song collection as a single pretty-printed JSON array.
///
/// Saves go through a temp file in the same directory followed by a rename,
/// so readers always see either the previous document or the new one, never
/// a torn write.
pub struct JsonSongStore {
    path: PathBuf,
}

impl JsonSongStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the data directory and bootstrap an empty document if none
    /// exists yet. Fatal at startup when it fails.
    pub async fn init(&self) -> Result<(), SongStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        info!("No catalog document at {:?}, starting empty", self.path);
        self.write_document(&[]).await
    }

    async fn write_document(&self, songs: &[Song]) -> Result<(), SongStoreError> {
        let serialized = serde_json::to_string_pretty(songs)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized.as_bytes()).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SongStore for JsonSongStore {
    async fn load_all(&self) -> Result<Vec<Song>, SongStoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                // First run without init(), e.g. the document was removed
                // out from under us. Re-bootstrap instead of failing.
                info!("No catalog document at {:?}, starting empty", self.path);
                self.write_document(&[]).await?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save_all(&self, songs: &[Song]) -> Result<(), SongStoreError> {
        self.write_document(songs).await
    }
}
