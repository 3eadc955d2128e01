/*
 * Music ID Plugin - Rust Edition
 * Copyright (c) 2024 Music ID Plugin Contributors
 *
 * This work is licensed under the Creative Commons Attribution-NonCommercial 4.0 International License.
 * To view a copy of this license, visit http://creativecommons.org/licenses/by-nc/4.0/
 *
 * You are free to share and adapt this work for non-commercial purposes with attribution.
 * Commercial use is prohibited without explicit written permission.
 *
 * For commercial licensing inquiries, please contact the project maintainers.
 */

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{Recognition, RecognizedTrack};

/// Production endpoint of the AudD recognition API.
pub const AUDD_ENDPOINT: &str = "https://api.audd.io/";

/// Metadata providers requested alongside the core match.
const RETURN_FIELDS: &str = "apple_music,spotify";

/// Failures of one recognition round trip.
///
/// Every variant except `NoApiKey` collapses to the same generic user-facing
/// message at the reply boundary; the distinction exists for logs and tests.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no API token configured")]
    NoApiKey,
    #[error("recognition request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("recognition endpoint returned HTTP {0}")]
    Endpoint(StatusCode),
    #[error("recognition service reported status {0:?}")]
    Service(String),
}

/// Thin client for the AudD recognition API.
///
/// One best-effort POST per invocation: no retries, no backoff, no rate-limit
/// awareness.
pub struct RecognizerClient {
    client: Client,
    endpoint: String,
}

impl RecognizerClient {
    pub fn new() -> Self {
        Self::with_endpoint(AUDD_ENDPOINT)
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Send the audio bytes to the recognition service.
    ///
    /// Refuses to build a request when no token is configured.
    pub async fn recognize(
        &self,
        api_token: &str,
        audio: Bytes,
    ) -> Result<Recognition, RecognitionError> {
        if api_token.is_empty() {
            return Err(RecognitionError::NoApiKey);
        }

        // AudD accepts the payload declared as mp3 even for voice-note codecs.
        let file = Part::bytes(audio.to_vec())
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")?;

        let form = Form::new()
            .text("api_token", api_token.to_string())
            .text("return", RETURN_FIELDS)
            .text("method", "recognize")
            .part("file", file);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecognitionError::Endpoint(response.status()));
        }

        let body: AuddResponse = response.json().await?;

        if body.status != "success" {
            return Err(RecognitionError::Service(body.status));
        }

        match body.result {
            Some(track) => Ok(Recognition::Match(track.into())),
            None => Ok(Recognition::NoMatch),
        }
    }
}

impl Default for RecognizerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct AuddResponse {
    #[serde(default)]
    status: String,
    result: Option<AuddTrack>,
}

#[derive(Debug, Deserialize)]
struct AuddTrack {
    artist: Option<String>,
    title: Option<String>,
    album: Option<String>,
    apple_music: Option<AuddAppleMusic>,
    spotify: Option<AuddSpotify>,
}

#[derive(Debug, Deserialize)]
struct AuddAppleMusic {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuddSpotify {
    external_urls: Option<AuddExternalUrls>,
}

#[derive(Debug, Deserialize)]
struct AuddExternalUrls {
    spotify: Option<String>,
}

impl From<AuddTrack> for RecognizedTrack {
    fn from(track: AuddTrack) -> Self {
        RecognizedTrack {
            artist: track.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            title: track.title.unwrap_or_else(|| "Unknown Title".to_string()),
            // An empty album string means "no album" upstream.
            album: track.album.filter(|album| !album.is_empty()),
            apple_music_url: track.apple_music.and_then(|apple| apple.url),
            spotify_url: track
                .spotify
                .and_then(|spotify| spotify.external_urls)
                .and_then(|urls| urls.spotify),
        }
    }
}
