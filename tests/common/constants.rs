//! Shared constants for end-to-end tests
//!
//! When test data changes (song metadata, timeouts, etc.), update only
//! this file.

// ============================================================================
// Test Song Metadata
// ============================================================================

pub const SONG_1_NAME: &str = "Song1";
pub const SONG_1_ARTIST: &str = "ArtistA";

pub const SONG_2_NAME: &str = "Song2";
pub const SONG_2_ARTIST: &str = "ArtistB";

pub const SONG_3_NAME: &str = "Beat It";
pub const SONG_3_ARTIST: &str = "M.J.";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

// ============================================================================
// Upload caps for the size-limit tests
// ============================================================================

/// Tight image cap used by `TestServer::spawn_with_limits` (bytes)
pub const SMALL_IMAGE_LIMIT_BYTES: u64 = 64;

/// Tight audio cap used by `TestServer::spawn_with_limits` (bytes)
pub const SMALL_AUDIO_LIMIT_BYTES: u64 = 64;
