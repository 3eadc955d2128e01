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

use std::fmt;

/// Media payloads the plugin reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Voice,
    Audio,
    VideoNote,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Voice => write!(f, "voice"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::VideoNote => write!(f, "video_note"),
        }
    }
}

/// A track identified by the recognition service.
///
/// Produced fresh per request; never cached or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedTrack {
    pub artist: String,
    pub title: String,
    pub album: Option<String>,
    pub apple_music_url: Option<String>,
    pub spotify_url: Option<String>,
}

impl RecognizedTrack {
    /// Render the user-facing reply for this track.
    ///
    /// The album and platform lines appear only when the service returned
    /// those fields.
    pub fn summary(&self) -> String {
        let mut text = format!("🎵 {} - {}", self.artist, self.title);

        if let Some(album) = &self.album {
            text.push_str(&format!("\n💿 Album: {}", album));
        }
        if let Some(url) = &self.apple_music_url {
            text.push_str(&format!("\n🍎 Apple Music: {}", url));
        }
        if let Some(url) = &self.spotify_url {
            text.push_str(&format!("\n🟢 Spotify: {}", url));
        }

        text
    }
}

/// Outcome of a successful round trip to the recognition service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Match(RecognizedTrack),
    NoMatch,
}
