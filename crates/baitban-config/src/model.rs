// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Baitban.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level Baitban configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BaitbanConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Discord credentials and bait channel settings.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Message retention cache settings.
    #[serde(default)]
    pub retention: RetentionConfig,

    /// Uptime push monitor settings.
    #[serde(default)]
    pub uptime: UptimeConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used in logs.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "baitban".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Discord integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Discord bot token. Required by `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Snowflake of the bait channel. Required by `serve`.
    ///
    /// Accepts a string or a bare integer, since env overrides of an
    /// all-digit value arrive as numbers.
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub bait_channel_id: Option<String>,

    /// Audit log reason attached to every ban.
    #[serde(default = "default_ban_reason")]
    pub ban_reason: String,

    /// Days of message history Discord deletes alongside the ban (0-7).
    #[serde(default)]
    pub purge_days: u8,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            bait_channel_id: None,
            ban_reason: default_ban_reason(),
            purge_days: 0,
        }
    }
}

fn default_ban_reason() -> String {
    "Ads bot".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// Retention cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    /// Seconds a message stays eligible for retroactive deletion.
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}

fn default_window_secs() -> u32 {
    60
}

/// Uptime push monitor configuration (Uptime Kuma style push URL).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UptimeConfig {
    /// Push URL. `None` disables the uptime push.
    #[serde(default)]
    pub push_url: Option<String>,

    /// Seconds between pushes.
    #[serde(default = "default_push_interval_secs")]
    pub interval_secs: u64,
}

impl Default for UptimeConfig {
    fn default() -> Self {
        Self {
            push_url: None,
            interval_secs: default_push_interval_secs(),
        }
    }
}

fn default_push_interval_secs() -> u64 {
    60
}
