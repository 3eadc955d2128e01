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

use crate::host::InboundMessage;

/// Fetch the raw audio payload of a message through the host.
///
/// Returns `None` for messages without a voice/audio/video-note payload and
/// for any download failure. Failures are logged here and never propagate to
/// the dispatcher.
pub async fn fetch_audio(message: &dyn InboundMessage) -> Option<Bytes> {
    let kind = message.media_kind()?;

    match message.download_media().await {
        Ok(bytes) if bytes.is_empty() => {
            tracing::warn!("host returned an empty {} payload", kind);
            None
        }
        Ok(bytes) => {
            tracing::debug!("downloaded {} bytes of {} media", bytes.len(), kind);
            Some(bytes)
        }
        Err(err) => {
            tracing::warn!("failed to download {} media: {:#}", kind, err);
            None
        }
    }
}
