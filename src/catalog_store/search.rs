//! In-memory search filtering over the song collection.

use super::Song;

/// Case-insensitive substring filter on song name OR artist. An empty term
/// returns the input unchanged. Pure filtering, no persistence involved.
pub fn filter_songs(songs: Vec<Song>, term: &str) -> Vec<Song> {
    if term.is_empty() {
        return songs;
    }
    let needle = term.to_lowercase();
    songs
        .into_iter()
        .filter(|song| {
            song.name.to_lowercase().contains(&needle)
                || song.artist.to_lowercase().contains(&needle)
        })
        .collect()
}
