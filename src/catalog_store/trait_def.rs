//! SongStore trait definition.

use async_trait::async_trait;
use thiserror::Error;

use super::Song;

/// Errors from loading or saving the catalog document.
#[derive(Debug, Error)]
pub enum SongStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Whole-document storage for the song collection.
///
/// There is deliberately no per-song operation here: callers read the full
/// collection, mutate it in memory, and write the whole thing back. The
/// serialization of that read-modify-write cycle is the catalog service's
/// job, not the store's.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Load the full collection in stored order. A missing document is the
    /// first-run case and yields an empty collection, not an error.
    async fn load_all(&self) -> Result<Vec<Song>, SongStoreError>;

    /// Serialize and replace the entire document.
    async fn save_all(&self, songs: &[Song]) -> Result<(), SongStoreError>;
}
