// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./baitban.toml` > `~/.config/baitban/baitban.toml` > `/etc/baitban/baitban.toml`
//! with environment variable overrides via `BAITBAN_` prefix. The bare
//! `BOT_TOKEN`, `BAIT_CHANNEL` and `KUMA_PUSH_URL` variables are honoured
//! below the prefixed ones so older deployments keep working.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BaitbanConfig;

/// Top-level config sections, used to split env var names.
const SECTIONS: &[&str] = &["bot", "discord", "retention", "uptime"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/baitban/baitban.toml` (system-wide)
/// 3. `~/.config/baitban/baitban.toml` (user XDG config)
/// 4. `./baitban.toml` (local directory)
/// 5. `BOT_TOKEN`, `BAIT_CHANNEL`, `KUMA_PUSH_URL`
/// 6. `BAITBAN_*` environment variables
pub fn load_config() -> Result<BaitbanConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BaitbanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BaitbanConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BaitbanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BaitbanConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BaitbanConfig::default()))
        .merge(Toml::file("/etc/baitban/baitban.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("baitban/baitban.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("baitban.toml"))
        .merge(legacy_env_provider())
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `BAITBAN_DISCORD_BOT_TOKEN` must map to `discord.bot_token`,
/// not `discord.bot.token`. Only the leading section name is split off.
fn env_provider() -> Env {
    Env::prefixed("BAITBAN_").map(|key| {
        // Figment keeps the variable's case: BAITBAN_DISCORD_BOT_TOKEN -> "DISCORD_BOT_TOKEN"
        let key_str = key.as_str().to_ascii_lowercase();
        for section in SECTIONS {
            if let Some(field) = key_str
                .strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                return format!("{section}.{field}").into();
            }
        }
        key_str.into()
    })
}

/// Unprefixed variables read by earlier releases of the bot.
fn legacy_env_provider() -> Env {
    Env::raw()
        .only(&["BOT_TOKEN", "BAIT_CHANNEL", "KUMA_PUSH_URL"])
        .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
            "bot_token" => "discord.bot_token".into(),
            "bait_channel" => "discord.bait_channel_id".into(),
            "kuma_push_url" => "uptime.push_url".into(),
            other => other.to_string().into(),
        })
}
