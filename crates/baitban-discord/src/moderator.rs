// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ModerationAdapter`] over the Discord REST API.
//!
//! Core identifiers are opaque strings; here they are parsed back into
//! Discord snowflakes. A malformed identifier is a moderation error, not a
//! panic.

use std::num::NonZeroU64;
use std::sync::Arc;

use async_trait::async_trait;
use baitban_core::{
    BaitbanError, ChannelId, GuildId, HealthStatus, MessageId, ModerationAdapter, PluginAdapter,
    UserId,
};
use serenity::http::Http;
use serenity::model::id as discord;
use tracing::debug;

/// Bans and deletes through a shared serenity [`Http`] client.
///
/// Serenity applies Discord's per-route rate limits inside `Http`, so calls
/// may wait before they are sent.
pub struct DiscordModerator {
    http: Arc<Http>,
}

impl DiscordModerator {
    pub fn new(token: &str) -> Self {
        Self::with_http(Arc::new(Http::new(token)))
    }

    pub fn with_http(http: Arc<Http>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }
}

#[async_trait]
impl PluginAdapter for DiscordModerator {
    fn name(&self) -> &str {
        "discord"
    }

    async fn health_check(&self) -> Result<HealthStatus, BaitbanError> {
        match self.http.get_current_user().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Discord API unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), BaitbanError> {
        debug!("Discord moderator shutting down");
        Ok(())
    }
}

#[async_trait]
impl ModerationAdapter for DiscordModerator {
    async fn ban(
        &self,
        guild: &GuildId,
        user: &UserId,
        reason: &str,
        purge_days: u8,
    ) -> Result<(), BaitbanError> {
        let guild = discord::GuildId::new(snowflake("guild", guild.as_str())?.get());
        let user = discord::UserId::new(snowflake("user", user.as_str())?.get());

        guild
            .ban_with_reason(&self.http, user, purge_days, reason)
            .await
            .map_err(|e| request_failed("ban", e))
    }

    async fn delete_message(
        &self,
        channel: &ChannelId,
        message: &MessageId,
    ) -> Result<(), BaitbanError> {
        let channel = discord::ChannelId::new(snowflake("channel", channel.as_str())?.get());
        let message = discord::MessageId::new(snowflake("message", message.as_str())?.get());

        channel
            .delete_message(&self.http, message)
            .await
            .map_err(|e| request_failed("delete message", e))
    }
}

/// Parses a Discord snowflake. Zero is not a valid Discord identifier.
pub fn snowflake(kind: &str, raw: &str) -> Result<NonZeroU64, BaitbanError> {
    raw.trim()
        .parse::<NonZeroU64>()
        .map_err(|e| BaitbanError::Moderation {
            message: format!("invalid {kind} id '{raw}': {e}"),
            source: Some(Box::new(e)),
        })
}

fn request_failed(action: &str, e: serenity::Error) -> BaitbanError {
    BaitbanError::Moderation {
        message: format!("{action} request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_parses_discord_ids() {
        let id = snowflake("channel", "1187654321098765432").expect("valid id");
        assert_eq!(id.get(), 1_187_654_321_098_765_432);

        let padded = snowflake("user", " 42 ").expect("surrounding whitespace is ignored");
        assert_eq!(padded.get(), 42);
    }

    #[test]
    fn snowflake_rejects_zero_and_garbage() {
        for raw in ["0", "", "abc", "-5", "18446744073709551616"] {
            let err = snowflake("message", raw).unwrap_err();
            assert!(
                matches!(err, BaitbanError::Moderation { .. }),
                "expected moderation error for {raw:?}"
            );
            assert!(err.to_string().contains("invalid message id"));
        }
    }

    #[tokio::test]
    async fn malformed_ids_fail_before_any_request() {
        let moderator = DiscordModerator::new("unused-token");

        let err = moderator
            .delete_message(&"not-a-channel".into(), &"1".into())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid channel id"));

        let err = moderator
            .ban(&"1".into(), &"0".into(), "Ads bot", 0)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid user id"));
    }

    #[test]
    fn adapter_identity() {
        let moderator = DiscordModerator::new("unused-token");
        assert_eq!(moderator.name(), "discord");
    }
}
