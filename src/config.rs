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

use thiserror::Error;
use tokio::sync::RwLock;

/// Configuration value names, as declared to the host.
pub const API_KEY: &str = "api_key";
pub const AUTO_RECOGNITION: &str = "auto_recognition";
pub const RESPOND_TO_SELF: &str = "respond_to_self";

/// A typed configuration value as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Flag(bool),
}

/// Validator kind the host applies before handing a value to the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    Text,
    Flag,
}

/// One entry of the configuration schema declared at construction time.
///
/// The host renders these settings to the user and persists their values
/// between restarts.
#[derive(Debug, Clone)]
pub struct ConfigValueSpec {
    pub name: &'static str,
    pub default: ConfigValue,
    pub description: &'static str,
    pub validator: ValidatorKind,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown configuration value: {0}")]
    UnknownName(String),
    #[error("configuration value '{name}' expects a {expected:?} value")]
    WrongKind {
        name: &'static str,
        expected: ValidatorKind,
    },
}

#[derive(Debug, Clone)]
struct ConfigData {
    api_key: String,
    auto_recognition: bool,
    respond_to_self: bool,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auto_recognition: false,
            respond_to_self: true,
        }
    }
}

/// The plugin's three persistent settings.
///
/// Constructed once at startup and shared by reference with every handler.
/// Writes are plain scalar assignments; last write wins.
#[derive(Debug, Default)]
pub struct PluginConfig {
    data: RwLock<ConfigData>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema the host renders and persists.
    pub fn schema() -> Vec<ConfigValueSpec> {
        vec![
            ConfigValueSpec {
                name: API_KEY,
                default: ConfigValue::Text(String::new()),
                description: "AudD API token (free tier available at https://audd.io)",
                validator: ValidatorKind::Text,
            },
            ConfigValueSpec {
                name: AUTO_RECOGNITION,
                default: ConfigValue::Flag(false),
                description: "Automatically recognize incoming voice messages",
                validator: ValidatorKind::Flag,
            },
            ConfigValueSpec {
                name: RESPOND_TO_SELF,
                default: ConfigValue::Flag(true),
                description: "Reply to your own voice messages",
                validator: ValidatorKind::Flag,
            },
        ]
    }

    /// Empty means "unset" and blocks any API call.
    pub async fn api_key(&self) -> String {
        self.data.read().await.api_key.clone()
    }

    pub async fn set_api_key(&self, key: String) {
        self.data.write().await.api_key = key;
    }

    pub async fn auto_recognition(&self) -> bool {
        self.data.read().await.auto_recognition
    }

    /// Flip the auto-recognition flag, returning the new value.
    pub async fn toggle_auto_recognition(&self) -> bool {
        let mut data = self.data.write().await;
        data.auto_recognition = !data.auto_recognition;
        data.auto_recognition
    }

    pub async fn respond_to_self(&self) -> bool {
        self.data.read().await.respond_to_self
    }

    /// Flip the respond-to-self flag, returning the new value.
    pub async fn toggle_respond_to_self(&self) -> bool {
        let mut data = self.data.write().await;
        data.respond_to_self = !data.respond_to_self;
        data.respond_to_self
    }

    /// Name-based read access for the host's persistence layer.
    pub async fn get(&self, name: &str) -> Option<ConfigValue> {
        let data = self.data.read().await;
        match name {
            API_KEY => Some(ConfigValue::Text(data.api_key.clone())),
            AUTO_RECOGNITION => Some(ConfigValue::Flag(data.auto_recognition)),
            RESPOND_TO_SELF => Some(ConfigValue::Flag(data.respond_to_self)),
            _ => None,
        }
    }

    /// Name-based write access for the host's persistence layer.
    pub async fn set(&self, name: &str, value: ConfigValue) -> Result<(), ConfigError> {
        match name {
            API_KEY => {
                let key = validate_text(API_KEY, value)?;
                self.data.write().await.api_key = key;
            }
            AUTO_RECOGNITION => {
                let flag = validate_flag(AUTO_RECOGNITION, value)?;
                self.data.write().await.auto_recognition = flag;
            }
            RESPOND_TO_SELF => {
                let flag = validate_flag(RESPOND_TO_SELF, value)?;
                self.data.write().await.respond_to_self = flag;
            }
            other => return Err(ConfigError::UnknownName(other.to_string())),
        }
        Ok(())
    }
}

fn validate_text(name: &'static str, value: ConfigValue) -> Result<String, ConfigError> {
    match value {
        ConfigValue::Text(text) => Ok(text),
        ConfigValue::Flag(_) => Err(ConfigError::WrongKind {
            name,
            expected: ValidatorKind::Text,
        }),
    }
}

fn validate_flag(name: &'static str, value: ConfigValue) -> Result<bool, ConfigError> {
    match value {
        ConfigValue::Flag(flag) => Ok(flag),
        ConfigValue::Text(_) => Err(ConfigError::WrongKind {
            name,
            expected: ValidatorKind::Flag,
        }),
    }
}
