//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{fixtures, TestClient, TestServer, SONG_1_NAME, SONG_1_ARTIST};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_create_song() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client
//!         .create_song(SONG_1_NAME, SONG_1_ARTIST, fixtures::png_cover(), None)
//!         .await;
//!     assert_eq!(response.status(), StatusCode::CREATED);
//! }
//! ```

mod client;
mod constants;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::{TestClient, TestFile};
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use server::TestServer;
