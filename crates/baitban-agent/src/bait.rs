// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bait channel handler: record every message, ban and sweep on bait.
//!
//! Every arrival is written into the [`RetentionCache`] before the bait
//! check, so the triggering message is itself swept. A failed ban never
//! stops the sweep, and a failed deletion keeps its cache entry for the
//! next trigger by the same author.

use std::sync::Arc;

use baitban_config::model::DiscordConfig;
use baitban_core::{BaitbanError, ChannelId, MessageEvent, ModerationAdapter};
use tracing::{error, info, warn};

use crate::retention::{RetentionCache, SweepReport};

/// Settings the handler needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct BaitSettings {
    pub bait_channel: ChannelId,
    /// Audit log reason attached to every ban.
    pub ban_reason: String,
    /// Days of history the platform purges alongside the ban.
    pub purge_days: u8,
}

impl BaitSettings {
    pub fn new(bait_channel: impl Into<ChannelId>) -> Self {
        Self {
            bait_channel: bait_channel.into(),
            ban_reason: "Ads bot".to_string(),
            purge_days: 0,
        }
    }

    /// Builds settings from the `[discord]` config section.
    pub fn from_config(config: &DiscordConfig) -> Result<Self, BaitbanError> {
        let channel = config
            .bait_channel_id
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| BaitbanError::Config("discord.bait_channel_id is required".into()))?;

        Ok(Self {
            bait_channel: channel.into(),
            ban_reason: config.ban_reason.clone(),
            purge_days: config.purge_days,
        })
    }
}

/// Result of the ban call within one trigger.
#[derive(Debug)]
pub enum BanResult {
    Banned,
    Failed(BaitbanError),
    /// The event carried no guild (e.g. a direct message), so nobody was banned.
    SkippedNoGuild,
}

/// What [`BaitHandler::on_message`] did with an event.
#[derive(Debug)]
pub enum BaitOutcome {
    /// Not a bait channel message; it was only recorded.
    Ignored,
    Triggered { ban: BanResult, sweep: SweepReport },
}

impl BaitOutcome {
    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }
}

/// Reacts to message arrivals on behalf of the platform adapter.
///
/// Stateless between calls: everything it remembers lives in the cache.
pub struct BaitHandler {
    settings: BaitSettings,
    cache: Arc<RetentionCache>,
    moderator: Arc<dyn ModerationAdapter>,
}

impl BaitHandler {
    pub fn new(
        settings: BaitSettings,
        cache: Arc<RetentionCache>,
        moderator: Arc<dyn ModerationAdapter>,
    ) -> Self {
        Self {
            settings,
            cache,
            moderator,
        }
    }

    pub fn settings(&self) -> &BaitSettings {
        &self.settings
    }

    pub fn cache(&self) -> &Arc<RetentionCache> {
        &self.cache
    }

    /// Records the message and, if it was posted in the bait channel, bans
    /// its author and deletes everything they posted within the window.
    pub async fn on_message(&self, event: &MessageEvent) -> BaitOutcome {
        info!(
            uid = %event.author_id,
            channel = %event.channel_id,
            "new message"
        );
        self.cache.insert(event.descriptor());

        if event.channel_id != self.settings.bait_channel {
            return BaitOutcome::Ignored;
        }

        warn!(uid = %event.author_id, content = %event.content, "bait triggered");

        let ban = self.ban_author(event).await;
        let sweep = self.sweep_author(event).await;

        info!(
            uid = %event.author_id,
            deleted = sweep.deleted.len(),
            failed = sweep.failed.len(),
            "bait sweep finished"
        );

        BaitOutcome::Triggered { ban, sweep }
    }

    async fn ban_author(&self, event: &MessageEvent) -> BanResult {
        let Some(guild) = &event.guild_id else {
            warn!(uid = %event.author_id, "bait message has no guild, skipping ban");
            return BanResult::SkippedNoGuild;
        };

        match self
            .moderator
            .ban(
                guild,
                &event.author_id,
                &self.settings.ban_reason,
                self.settings.purge_days,
            )
            .await
        {
            Ok(()) => {
                info!(uid = %event.author_id, guild = %guild, "author banned");
                BanResult::Banned
            }
            Err(e) => {
                error!(uid = %event.author_id, guild = %guild, error = %e, "ban failed");
                BanResult::Failed(e)
            }
        }
    }

    async fn sweep_author(&self, event: &MessageEvent) -> SweepReport {
        let moderator = &self.moderator;
        let report = self
            .cache
            .sweep_and_remove(&event.author_id, |descriptor| async move {
                info!(
                    channel = %descriptor.channel_id,
                    message = %descriptor.message_id,
                    "deleting message"
                );
                moderator
                    .delete_message(&descriptor.channel_id, &descriptor.message_id)
                    .await
            })
            .await;

        for (descriptor, e) in &report.failed {
            error!(
                channel = %descriptor.channel_id,
                message = %descriptor.message_id,
                error = %e,
                "message deletion failed, keeping it cached"
            );
        }

        report
    }
}
