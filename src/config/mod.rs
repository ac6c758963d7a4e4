mod file_config;

pub use file_config::{FileConfig, UploadsConfig};

use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::Result;
use clap::ValueEnum;
use std::path::PathBuf;

const DEFAULT_MAX_IMAGE_MB: u64 = 10;
const DEFAULT_MAX_AUDIO_MB: u64 = 100;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub storage_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the catalog document.
    pub data_dir: PathBuf,
    /// Root of the binary asset storage.
    pub storage_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub max_image_bytes: u64,
    pub max_audio_bytes: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from("data"));

        let storage_dir = file
            .storage_dir
            .map(PathBuf::from)
            .or_else(|| cli.storage_dir.clone())
            .unwrap_or_else(|| PathBuf::from("storage"));

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let uploads = file.uploads.unwrap_or_default();
        let max_image_bytes = uploads.max_image_mb.unwrap_or(DEFAULT_MAX_IMAGE_MB) * 1024 * 1024;
        let max_audio_bytes = uploads.max_audio_mb.unwrap_or(DEFAULT_MAX_AUDIO_MB) * 1024 * 1024;

        Ok(Self {
            data_dir,
            storage_dir,
            port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            max_image_bytes,
            max_audio_bytes,
        })
    }

    pub fn catalog_document_path(&self) -> PathBuf {
        self.data_dir.join("songs.json")
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            port: self.port,
            requests_logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            storage_dir: self.storage_dir.clone(),
            max_image_bytes: self.max_image_bytes,
            max_audio_bytes: self.max_audio_bytes,
        }
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
