//! Catalog persistence: the song collection as one JSON document.
//!
//! The store only knows how to load and save the whole collection; it has
//! no partial-write capability and no knowledge of the binary assets the
//! songs reference.

mod json_store;
mod models;
mod search;
mod trait_def;

pub use json_store::JsonSongStore;
pub use models::Song;
pub use search::filter_songs;
pub use trait_def::{SongStore, SongStoreError};
