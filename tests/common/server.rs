//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog document and
//! storage directory.

use super::constants::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use vinly_server::asset_store::FsAssetStore;
use vinly_server::catalog::CatalogService;
use vinly_server::catalog_store::JsonSongStore;
use vinly_server::server::{server::make_app, RequestsLoggingLevel, ServerConfig};

/// Test server instance with isolated catalog document and storage
///
/// When dropped, the server gracefully shuts down and temp resources are
/// cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Root of the asset storage, for direct filesystem assertions
    pub storage_root: PathBuf,

    /// Path of the persisted catalog document
    pub document_path: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port with default upload caps.
    pub async fn spawn() -> Self {
        Self::spawn_inner(None).await
    }

    /// Spawns a test server with tight upload size caps, for exercising
    /// the size-limit rejections without multi-megabyte payloads.
    pub async fn spawn_with_small_limits() -> Self {
        Self::spawn_inner(Some((SMALL_IMAGE_LIMIT_BYTES, SMALL_AUDIO_LIMIT_BYTES))).await
    }

    async fn spawn_inner(upload_limits: Option<(u64, u64)>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage_root = temp_dir.path().join("storage");
        let document_path = temp_dir.path().join("data/songs.json");

        let assets = Arc::new(FsAssetStore::new(&storage_root));
        assets.init().await.expect("Failed to init asset storage");

        let songs = Arc::new(JsonSongStore::new(&document_path));
        songs.init().await.expect("Failed to init catalog document");

        let catalog = Arc::new(CatalogService::new(songs, assets));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let mut config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            storage_dir: storage_root.clone(),
            ..Default::default()
        };
        if let Some((max_image_bytes, max_audio_bytes)) = upload_limits {
            config.max_image_bytes = max_image_bytes;
            config.max_audio_bytes = max_audio_bytes;
        }

        let app = make_app(config, catalog).expect("Failed to build app");

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            storage_root,
            document_path,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// True when a storage-relative asset reference resolves to a file.
    pub fn asset_exists(&self, reference: &str) -> bool {
        self.storage_root.join(reference).exists()
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
        // TempDir will be cleaned up automatically
    }
}
