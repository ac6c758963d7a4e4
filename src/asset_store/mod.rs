//! Binary asset storage for cover images and audio files.
//!
//! Assets are addressed by a storage-relative reference returned from
//! [`AssetStore::save`]. References are the only handle the rest of the
//! system keeps; the store knows nothing about the catalog.

mod fs_store;

pub use fs_store::FsAssetStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while saving or deleting assets.
#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Invalid asset reference: {0}")]
    InvalidReference(String),

    #[error("Refusing to store empty file: {0}")]
    EmptyContent(String),
}

/// The two kinds of binary content the store handles. The category picks
/// the subdirectory an asset lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Image,
    Audio,
}

impl AssetCategory {
    pub fn subdir(&self) -> &'static str {
        match self {
            AssetCategory::Image => "images",
            AssetCategory::Audio => "audio",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::Image => write!(f, "image"),
            AssetCategory::Audio => write!(f, "audio"),
        }
    }
}

/// Storage backend for binary assets.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist `content` under a fresh unique name derived from
    /// `original_name`, and return the storage-relative reference used to
    /// retrieve or delete it later. The write either fully succeeds or no
    /// reference is handed out.
    async fn save(
        &self,
        content: &[u8],
        original_name: &str,
        category: AssetCategory,
    ) -> Result<String, AssetStoreError>;

    /// Remove the file behind a reference previously returned by `save`.
    /// Deleting a reference whose file is already gone is not an error:
    /// the caller has already committed to dropping the reference and must
    /// not be blocked by a file that no longer exists.
    async fn delete(&self, reference: &str) -> Result<(), AssetStoreError>;
}
