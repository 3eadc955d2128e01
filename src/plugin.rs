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

//! Command and event dispatch.
//!
//! Commands live in an explicit registration table mapping name to handler
//! function; the passive watcher is a single entry point the host invokes for
//! every inbound message.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::future::BoxFuture;

use crate::audio::fetch_audio;
use crate::config::{ConfigValueSpec, PluginConfig};
use crate::host::{CommandContext, CommandInfo, InboundMessage, Plugin, Responder};
use crate::recognizer::{RecognitionError, RecognizerClient};
use crate::types::Recognition;

/// User-facing reply strings.
pub mod strings {
    pub const PROCESSING: &str = "🎵 Analyzing audio...";
    pub const DOWNLOADING: &str = "📥 Downloading audio...";
    pub const NOT_FOUND: &str = "❌ Could not recognize this track";
    pub const NO_AUDIO: &str = "❌ No voice message found";
    pub const ERROR: &str = "❌ Recognition failed";
    pub const NO_API_KEY: &str = "❌ No API key configured";
    pub const REPLY_USAGE: &str = "❌ Reply to a voice message";
    pub const KEY_SAVED: &str = "✅ API key saved";
    pub const KEY_USAGE: &str =
        "❌ Provide an API key\n🔑 Get one: https://audd.io\n💡 Free tier: 100 requests/month";
    pub const HELP: &str = "🎵 Music ID commands:\n\n\
        musicid - recognize the track in a replied voice message\n\
        musicidkey <key> - set the AudD API key\n\
        musicidauto - toggle automatic recognition\n\
        musicidself - toggle replies to your own voice messages\n\
        musicidhelp - this summary\n\n\
        🔑 Free API key: https://audd.io (100 requests/month)\n\
        💡 Automatic recognition covers every incoming voice message!";
}

type CommandHandler =
    for<'a> fn(&'a MusicIdPlugin, CommandContext<'a>) -> BoxFuture<'a, Result<()>>;

/// One row of the command registration table.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    handler: CommandHandler,
}

static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "musicid",
        usage: "recognize the track in a replied voice message",
        handler: recognize_handler,
    },
    CommandSpec {
        name: "musicidkey",
        usage: "set the AudD API key",
        handler: set_key_handler,
    },
    CommandSpec {
        name: "musicidauto",
        usage: "toggle automatic recognition",
        handler: toggle_auto_handler,
    },
    CommandSpec {
        name: "musicidself",
        usage: "toggle replies to your own voice messages",
        handler: toggle_self_handler,
    },
    CommandSpec {
        name: "musicidhelp",
        usage: "show the command summary",
        handler: help_handler,
    },
];

fn recognize_handler<'a>(
    plugin: &'a MusicIdPlugin,
    ctx: CommandContext<'a>,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(plugin.cmd_recognize(ctx))
}

fn set_key_handler<'a>(
    plugin: &'a MusicIdPlugin,
    ctx: CommandContext<'a>,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(plugin.cmd_set_key(ctx))
}

fn toggle_auto_handler<'a>(
    plugin: &'a MusicIdPlugin,
    ctx: CommandContext<'a>,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(plugin.cmd_toggle_auto(ctx))
}

fn toggle_self_handler<'a>(
    plugin: &'a MusicIdPlugin,
    ctx: CommandContext<'a>,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(plugin.cmd_toggle_self(ctx))
}

fn help_handler<'a>(
    plugin: &'a MusicIdPlugin,
    ctx: CommandContext<'a>,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(plugin.cmd_help(ctx))
}

/// The music recognition plugin: configuration store, recognition client,
/// command table, and passive watcher.
pub struct MusicIdPlugin {
    config: PluginConfig,
    recognizer: RecognizerClient,
}

impl MusicIdPlugin {
    pub fn new() -> Self {
        Self {
            config: PluginConfig::new(),
            recognizer: RecognizerClient::new(),
        }
    }

    /// Build the plugin against a non-default recognition endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            config: PluginConfig::new(),
            recognizer: RecognizerClient::with_endpoint(endpoint),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Run recognition on downloaded audio and map the outcome to reply text.
    ///
    /// The typed error stays internal; only the rendered string crosses the
    /// reply boundary.
    async fn recognize_to_text(&self, audio: Bytes) -> String {
        let api_token = self.config.api_key().await;

        match self.recognizer.recognize(&api_token, audio).await {
            Ok(Recognition::Match(track)) => track.summary(),
            Ok(Recognition::NoMatch) => strings::NOT_FOUND.to_string(),
            Err(RecognitionError::NoApiKey) => strings::NO_API_KEY.to_string(),
            Err(err) => {
                tracing::warn!("recognition failed: {}", err);
                strings::ERROR.to_string()
            }
        }
    }

    /// Recognize the track in the message the command replies to.
    async fn cmd_recognize(&self, ctx: CommandContext<'_>) -> Result<()> {
        let reply = match ctx.message.reply_target() {
            Some(reply) => reply,
            None => {
                ctx.responder.send(strings::REPLY_USAGE).await?;
                return Ok(());
            }
        };

        ctx.responder.send(strings::DOWNLOADING).await?;

        let audio = match fetch_audio(reply).await {
            Some(audio) => audio,
            None => {
                ctx.responder.send(strings::NO_AUDIO).await?;
                return Ok(());
            }
        };

        ctx.responder.send(strings::PROCESSING).await?;

        let text = self.recognize_to_text(audio).await;
        ctx.responder.send(&text).await?;

        Ok(())
    }

    async fn cmd_set_key(&self, ctx: CommandContext<'_>) -> Result<()> {
        let key = ctx.args.trim();
        if key.is_empty() {
            ctx.responder.send(strings::KEY_USAGE).await?;
            return Ok(());
        }

        self.config.set_api_key(key.to_string()).await;
        ctx.responder.send(strings::KEY_SAVED).await?;

        Ok(())
    }

    async fn cmd_toggle_auto(&self, ctx: CommandContext<'_>) -> Result<()> {
        let enabled = self.config.toggle_auto_recognition().await;
        let text = format!("Auto recognition: {}", toggle_status(enabled));
        ctx.responder.send(&text).await?;

        Ok(())
    }

    async fn cmd_toggle_self(&self, ctx: CommandContext<'_>) -> Result<()> {
        let enabled = self.config.toggle_respond_to_self().await;
        let text = format!("Replies to own messages: {}", toggle_status(enabled));
        ctx.responder.send(&text).await?;

        Ok(())
    }

    async fn cmd_help(&self, ctx: CommandContext<'_>) -> Result<()> {
        ctx.responder.send(strings::HELP).await?;
        Ok(())
    }
}

impl Default for MusicIdPlugin {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle_status(enabled: bool) -> &'static str {
    if enabled {
        "✅ enabled"
    } else {
        "❌ disabled"
    }
}

#[async_trait]
impl Plugin for MusicIdPlugin {
    fn name(&self) -> &str {
        "music_id"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn description(&self) -> &str {
        "Recognizes music in voice messages through the AudD API"
    }

    fn author(&self) -> &str {
        "Music ID Plugin Contributors"
    }

    fn commands(&self) -> Vec<CommandInfo> {
        COMMANDS
            .iter()
            .map(|spec| CommandInfo {
                name: spec.name,
                usage: spec.usage,
            })
            .collect()
    }

    fn config_schema(&self) -> Vec<ConfigValueSpec> {
        PluginConfig::schema()
    }

    async fn handle_command(&self, name: &str, ctx: CommandContext<'_>) -> Result<bool> {
        let spec = match COMMANDS.iter().find(|spec| spec.name == name) {
            Some(spec) => spec,
            None => return Ok(false),
        };

        tracing::debug!("dispatching command {}", name);
        (spec.handler)(self, ctx).await?;

        Ok(true)
    }

    async fn watch(&self, message: &dyn InboundMessage, responder: &dyn Responder) -> Result<()> {
        if !self.config.auto_recognition().await {
            return Ok(());
        }

        if message.media_kind().is_none() {
            return Ok(());
        }

        if message.is_own() && !self.config.respond_to_self().await {
            return Ok(());
        }

        let placeholder = responder.send(strings::PROCESSING).await?;

        let audio = match fetch_audio(message).await {
            Some(audio) => audio,
            None => {
                responder.delete(placeholder).await?;
                return Ok(());
            }
        };

        let text = self.recognize_to_text(audio).await;
        responder.edit(placeholder, &text).await?;

        Ok(())
    }
}
