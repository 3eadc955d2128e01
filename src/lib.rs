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

//! Music recognition plugin for chat-bot host runtimes.
//!
//! The host delivers inbound messages and reply primitives through the traits
//! in [`host`]; the plugin forwards the raw audio bytes of voice messages to
//! the AudD recognition API and posts the formatted result back into the chat.

pub mod audio;
pub mod config;
pub mod host;
pub mod plugin;
pub mod recognizer;
pub mod types;

pub use config::{ConfigValue, PluginConfig};
pub use plugin::MusicIdPlugin;
pub use recognizer::{RecognitionError, RecognizerClient};
pub use types::{MediaKind, Recognition, RecognizedTrack};
