//! Vinly Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod asset_store;
pub mod catalog;
pub mod catalog_store;
pub mod config;
pub mod server;

// Re-export commonly used types for convenience
pub use asset_store::{AssetCategory, AssetStore, FsAssetStore};
pub use catalog::{CatalogService, NewSong, SongPatch, UploadedAsset};
pub use catalog_store::{JsonSongStore, Song, SongStore};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
