// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Moderation adapter trait: the two imperative calls the bait handler needs.

use async_trait::async_trait;

use crate::error::BaitbanError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelId, GuildId, MessageId, UserId};

/// Adapter for the platform's moderation API.
///
/// Implementations own their own timeouts and rate limiting. Errors are
/// reported to the caller and never panic.
#[async_trait]
pub trait ModerationAdapter: PluginAdapter {
    /// Bans `user` from `guild`, deleting `purge_days` days of their history.
    async fn ban(
        &self,
        guild: &GuildId,
        user: &UserId,
        reason: &str,
        purge_days: u8,
    ) -> Result<(), BaitbanError>;

    /// Deletes a single message.
    async fn delete_message(
        &self,
        channel: &ChannelId,
        message: &MessageId,
    ) -> Result<(), BaitbanError>;
}
