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

//! Contract between the plugin and the host runtime.
//!
//! The host owns the chat protocol, message lifecycle, media downloads, and
//! configuration persistence. The plugin sees all of that only through the
//! traits below, which the host calls directly - there is no reflection-based
//! discovery.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::config::ConfigValueSpec;
use crate::types::MediaKind;

/// Opaque handle to a message the plugin has sent, usable for later edits
/// and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub u64);

/// An inbound chat message as exposed by the host runtime.
///
/// The plugin never constructs or destroys these; it only inspects the
/// payload predicates and asks the host to download the media.
#[async_trait]
pub trait InboundMessage: Send + Sync {
    /// The media payload carried by this message, if it is one the plugin
    /// cares about.
    fn media_kind(&self) -> Option<MediaKind>;

    /// Whether the message was authored by the current account.
    fn is_own(&self) -> bool;

    /// The message this one replies to, if any.
    fn reply_target(&self) -> Option<&dyn InboundMessage>;

    /// Download the raw media payload through the host.
    async fn download_media(&self) -> Result<Bytes>;
}

/// Reply primitives the host supplies for the chat a message arrived in.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn send(&self, text: &str) -> Result<MessageHandle>;

    async fn edit(&self, message: MessageHandle, text: &str) -> Result<()>;

    async fn delete(&self, message: MessageHandle) -> Result<()>;
}

/// Everything a command handler needs for one invocation.
pub struct CommandContext<'a> {
    pub message: &'a dyn InboundMessage,
    /// Free-text argument string following the command name; empty when the
    /// command was issued bare.
    pub args: &'a str,
    pub responder: &'a dyn Responder,
}

/// Command metadata the host uses for registration and help rendering.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
}

/// Contract a plugin implements for the host runtime.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn description(&self) -> &str;
    fn author(&self) -> &str;

    /// Commands this plugin registers with the host.
    fn commands(&self) -> Vec<CommandInfo>;

    /// Configuration schema the host renders and persists.
    fn config_schema(&self) -> Vec<ConfigValueSpec>;

    /// Dispatch a named command invocation.
    ///
    /// Returns `Ok(false)` when the name is not one of this plugin's
    /// commands, so the host can route it elsewhere.
    async fn handle_command(&self, name: &str, ctx: CommandContext<'_>) -> Result<bool>;

    /// Passive watcher the host invokes for every inbound message.
    async fn watch(&self, message: &dyn InboundMessage, responder: &dyn Responder) -> Result<()>;
}
