//! Filesystem-backed asset store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

use super::{AssetCategory, AssetStore, AssetStoreError};

/// Stores assets as flat files under `{root}/images` and `{root}/audio`.
///
/// File names are `{original-base}-{uuid}.{original-ext}`; the random
/// suffix makes references unique even when two uploads share a name, so
/// files are write-once and never overwritten in place.
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the category subdirectories. Must succeed before any request
    /// is served; a storage root that cannot be set up is fatal at startup.
    pub async fn init(&self) -> Result<(), AssetStoreError> {
        for category in [AssetCategory::Image, AssetCategory::Audio] {
            fs::create_dir_all(self.root.join(category.subdir())).await?;
        }
        info!("Asset storage ready at {:?}", self.root);
        Ok(())
    }

    /// Resolve a storage-relative reference to an absolute path, rejecting
    /// anything that could escape the storage root.
    fn resolve(&self, reference: &str) -> Result<PathBuf, AssetStoreError> {
        let relative = Path::new(reference);
        let escapes_root = relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if escapes_root {
            return Err(AssetStoreError::InvalidReference(reference.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn save(
        &self,
        content: &[u8],
        original_name: &str,
        category: AssetCategory,
    ) -> Result<String, AssetStoreError> {
        if content.is_empty() {
            return Err(AssetStoreError::EmptyContent(original_name.to_owned()));
        }

        let safe_name = sanitize_filename(original_name)?;
        let file_name = unique_file_name(&safe_name);
        let target = self.root.join(category.subdir()).join(&file_name);

        let mut file = fs::File::create(&target).await?;
        file.write_all(content).await?;
        file.flush().await?;

        debug!(
            "Saved {} asset {:?} ({} bytes)",
            category,
            target,
            content.len()
        );

        // The reference is what gets persisted in the catalog; keep it
        // storage-relative with forward slashes.
        Ok(format!("{}/{}", category.subdir(), file_name))
    }

    async fn delete(&self, reference: &str) -> Result<(), AssetStoreError> {
        let path = self.resolve(reference)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted asset {}", reference);
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Asset {} already absent, nothing to delete", reference);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Build `{base}-{uuid}.{ext}` from an already-sanitized file name.
fn unique_file_name(safe_name: &str) -> String {
    let path = Path::new(safe_name);
    let base = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(safe_name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", base, Uuid::new_v4(), ext),
        None => format!("{}-{}", base, Uuid::new_v4()),
    }
}

/// Sanitize an uploaded file name to prevent path traversal.
fn sanitize_filename(filename: &str) -> Result<String, AssetStoreError> {
    // Keep only the filename part, no path components.
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AssetStoreError::InvalidFilename(filename.to_owned()))?;

    // Null bytes are never allowed; hidden files and "." / ".." are not
    // valid upload names.
    if name.contains('\0') || name.starts_with('.') {
        return Err(AssetStoreError::InvalidFilename(filename.to_owned()));
    }

    // Replace problematic characters (keep Unicode letters/symbols).
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    if sanitized.is_empty() {
        return Err(AssetStoreError::InvalidFilename(filename.to_owned()));
    }

    Ok(sanitized)
}
