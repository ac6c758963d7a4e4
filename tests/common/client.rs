//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest and
//! provides methods for all song endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::time::Duration;

/// A file payload for multipart uploads.
#[derive(Debug, Clone)]
pub struct TestFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl TestFile {
    pub fn new(file_name: &str, mime: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_owned(),
            mime: mime.to_owned(),
            bytes,
        }
    }

    fn into_part(self) -> Part {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .expect("Invalid test mime type")
    }
}

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Song Endpoints
    // ========================================================================

    /// GET /songs, optionally with ?search=
    pub async fn list_songs(&self, search: Option<&str>) -> Response {
        let mut request = self.client.get(format!("{}/songs", self.base_url));
        if let Some(term) = search {
            request = request.query(&[("search", term)]);
        }
        request.send().await.expect("List songs request failed")
    }

    /// POST /songs with the standard field layout
    pub async fn create_song(
        &self,
        name: &str,
        artist: &str,
        cover: TestFile,
        audio: Option<TestFile>,
    ) -> Response {
        let mut form = Form::new()
            .text("name", name.to_owned())
            .text("artist", artist.to_owned())
            .part("coverImage", cover.into_part());
        if let Some(audio) = audio {
            form = form.part("audioFile", audio.into_part());
        }
        self.create_song_form(form).await
    }

    /// POST /songs with an arbitrary multipart form, for invalid-request
    /// tests that leave out or mangle fields.
    pub async fn create_song_form(&self, form: Form) -> Response {
        self.client
            .post(format!("{}/songs", self.base_url))
            .multipart(form)
            .send()
            .await
            .expect("Create song request failed")
    }

    /// PUT /songs/{id}; every argument is optional
    pub async fn update_song(
        &self,
        id: &str,
        name: Option<&str>,
        artist: Option<&str>,
        cover: Option<TestFile>,
        audio: Option<TestFile>,
    ) -> Response {
        let mut form = Form::new();
        if let Some(name) = name {
            form = form.text("name", name.to_owned());
        }
        if let Some(artist) = artist {
            form = form.text("artist", artist.to_owned());
        }
        if let Some(cover) = cover {
            form = form.part("coverImage", cover.into_part());
        }
        if let Some(audio) = audio {
            form = form.part("audioFile", audio.into_part());
        }
        self.client
            .put(format!("{}/songs/{}", self.base_url, id))
            .multipart(form)
            .send()
            .await
            .expect("Update song request failed")
    }

    /// DELETE /songs/{id}
    pub async fn delete_song(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete song request failed")
    }

    // ========================================================================
    // Static Content
    // ========================================================================

    /// GET /storage/{reference}
    pub async fn get_storage(&self, reference: &str) -> Response {
        self.client
            .get(format!("{}/storage/{}", self.base_url, reference))
            .send()
            .await
            .expect("Storage request failed")
    }

    /// GET /
    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }
}
