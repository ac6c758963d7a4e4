use std::path::PathBuf;

use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub requests_logging_level: RequestsLoggingLevel,
    /// Cache-Control max-age for the static storage routes, in seconds.
    pub content_cache_age_sec: usize,
    /// Frontend directory served at the root when configured.
    pub frontend_dir_path: Option<String>,
    /// Root of the asset storage, served under `/storage`.
    pub storage_dir: PathBuf,
    pub max_image_bytes: u64,
    pub max_audio_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3001,
            requests_logging_level: RequestsLoggingLevel::Path,
            content_cache_age_sec: 3600,
            frontend_dir_path: None,
            storage_dir: PathBuf::from("storage"),
            max_image_bytes: 10 * 1024 * 1024,
            max_audio_bytes: 100 * 1024 * 1024,
        }
    }
}
