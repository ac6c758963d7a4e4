//! The catalog service: the one component that understands the join
//! between song records and their binary assets.

mod service;

pub use service::{CatalogError, CatalogService, NewSong, SongPatch, UploadedAsset};
