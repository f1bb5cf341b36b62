// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `baitban check`: print the effective configuration without connecting.

use std::fmt::Write as _;

use baitban_config::BaitbanConfig;
use baitban_core::BaitbanError;

/// Prints the configuration summary.
///
/// Fails when a setting `serve` cannot start without is missing.
pub fn run_check(config: &BaitbanConfig) -> Result<(), BaitbanError> {
    print!("{}", summary(config));

    let mut missing = Vec::new();
    if config.discord.bot_token.as_deref().is_none_or(|t| t.trim().is_empty()) {
        missing.push("discord.bot_token");
    }
    if config
        .discord
        .bait_channel_id
        .as_deref()
        .is_none_or(|c| c.trim().is_empty())
    {
        missing.push("discord.bait_channel_id");
    }

    if missing.is_empty() {
        println!("config ok");
        Ok(())
    } else {
        Err(BaitbanError::Config(format!(
            "required settings missing: {}",
            missing.join(", ")
        )))
    }
}

fn summary(config: &BaitbanConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "bot.name            = {}", config.bot.name);
    let _ = writeln!(out, "bot.log_level       = {}", config.bot.log_level);
    let _ = writeln!(
        out,
        "discord.bot_token   = {}",
        redact(config.discord.bot_token.as_deref())
    );
    let _ = writeln!(
        out,
        "discord.bait_channel_id = {}",
        config.discord.bait_channel_id.as_deref().unwrap_or("<unset>")
    );
    let _ = writeln!(out, "discord.ban_reason  = {}", config.discord.ban_reason);
    let _ = writeln!(out, "discord.purge_days  = {}", config.discord.purge_days);
    let _ = writeln!(out, "retention.window_secs = {}", config.retention.window_secs);
    let _ = writeln!(
        out,
        "uptime.push_url     = {}",
        config.uptime.push_url.as_deref().unwrap_or("<disabled>")
    );
    let _ = writeln!(out, "uptime.interval_secs = {}", config.uptime.interval_secs);
    out
}

fn redact(token: Option<&str>) -> &'static str {
    match token {
        Some(t) if !t.trim().is_empty() => "<redacted>",
        _ => "<unset>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_never_prints_token() {
        let mut config = BaitbanConfig::default();
        config.discord.bot_token = Some("MTIz.secret.token".into());
        config.discord.bait_channel_id = Some("1187654321098765432".into());

        let text = summary(&config);
        assert!(!text.contains("secret"));
        assert!(text.contains("<redacted>"));
        assert!(text.contains("1187654321098765432"));
        assert!(text.contains("uptime.push_url     = <disabled>"));
    }

    #[test]
    fn check_requires_token_and_channel() {
        let err = run_check(&BaitbanConfig::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("discord.bot_token"));
        assert!(message.contains("discord.bait_channel_id"));

        let mut config = BaitbanConfig::default();
        config.discord.bot_token = Some("abc".into());
        config.discord.bait_channel_id = Some("1187654321098765432".into());
        assert!(run_check(&config).is_ok());
    }
}
