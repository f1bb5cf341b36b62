// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: snowflake shape,
//! Discord's purge-day limit, non-zero intervals, push URL scheme.

use crate::diagnostic::ConfigError;
use crate::model::BaitbanConfig;

/// Discord rejects bans that purge more than a week of history.
pub const MAX_PURGE_DAYS: u8 = 7;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &BaitbanConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.bot.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "bot.log_level `{}` must be one of {}",
            config.bot.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if let Some(token) = &config.discord.bot_token {
        if token.trim().is_empty() {
            errors.push(ConfigError::validation(
                "discord.bot_token must not be empty when set",
            ));
        }
    }

    if let Some(channel) = &config.discord.bait_channel_id {
        if !is_snowflake(channel) {
            errors.push(ConfigError::validation(format!(
                "discord.bait_channel_id `{channel}` is not a Discord snowflake"
            )));
        }
    }

    if config.discord.purge_days > MAX_PURGE_DAYS {
        errors.push(ConfigError::validation(format!(
            "discord.purge_days must be at most {MAX_PURGE_DAYS}, got {}",
            config.discord.purge_days
        )));
    }

    if config.retention.window_secs == 0 {
        errors.push(ConfigError::validation(
            "retention.window_secs must be greater than 0",
        ));
    }

    if config.uptime.interval_secs == 0 {
        errors.push(ConfigError::validation(
            "uptime.interval_secs must be greater than 0",
        ));
    }

    if let Some(url) = &config.uptime.push_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "uptime.push_url `{url}` must start with http:// or https://"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A non-zero unsigned 64-bit integer.
pub fn is_snowflake(value: &str) -> bool {
    matches!(value.trim().parse::<u64>(), Ok(id) if id != 0)
}
