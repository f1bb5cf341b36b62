// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock moderation adapter for deterministic testing.
//!
//! `MockModerator` implements `ModerationAdapter`, records every ban and
//! deletion attempt, and fails on demand.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use baitban_core::{
    BaitbanError, ChannelId, GuildId, HealthStatus, MessageDescriptor, MessageId,
    ModerationAdapter, PluginAdapter, UserId,
};

/// One recorded `ban` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanCall {
    pub guild: GuildId,
    pub user: UserId,
    pub reason: String,
    pub purge_days: u8,
}

#[derive(Debug, Default)]
struct State {
    bans: Vec<BanCall>,
    deletions: Vec<MessageDescriptor>,
    fail_bans: bool,
    failing_messages: HashSet<MessageId>,
}

/// A recording moderation adapter.
///
/// Deletion attempts are recorded whether they succeed or not. Note the
/// recorded descriptor's `author_id` is empty: the platform call only
/// carries channel and message.
#[derive(Debug, Default)]
pub struct MockModerator {
    state: Mutex<State>,
    delay: Option<Duration>,
}

impl MockModerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call sleep first, to widen race windows in stress tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes `ban` fail until reset.
    pub fn fail_bans(&self, fail: bool) {
        self.state().fail_bans = fail;
    }

    /// Makes `delete_message` fail for this message id until cleared.
    pub fn fail_deletion_of(&self, message: &str) {
        self.state().failing_messages.insert(MessageId::from(message));
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.fail_bans = false;
        state.failing_messages.clear();
    }

    pub fn bans(&self) -> Vec<BanCall> {
        self.state().bans.clone()
    }

    /// Every deletion attempt, in call order.
    pub fn deletions(&self) -> Vec<MessageDescriptor> {
        self.state().deletions.clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl PluginAdapter for MockModerator {
    fn name(&self) -> &str {
        "mock-moderator"
    }

    async fn health_check(&self) -> Result<HealthStatus, BaitbanError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), BaitbanError> {
        Ok(())
    }
}

#[async_trait]
impl ModerationAdapter for MockModerator {
    async fn ban(
        &self,
        guild: &GuildId,
        user: &UserId,
        reason: &str,
        purge_days: u8,
    ) -> Result<(), BaitbanError> {
        self.pause().await;
        let mut state = self.state();
        state.bans.push(BanCall {
            guild: guild.clone(),
            user: user.clone(),
            reason: reason.to_string(),
            purge_days,
        });
        if state.fail_bans {
            return Err(BaitbanError::moderation("mock ban rejected"));
        }
        Ok(())
    }

    async fn delete_message(
        &self,
        channel: &ChannelId,
        message: &MessageId,
    ) -> Result<(), BaitbanError> {
        self.pause().await;
        let mut state = self.state();
        state.deletions.push(MessageDescriptor {
            channel_id: channel.clone(),
            message_id: message.clone(),
            author_id: UserId(String::new()),
        });
        if state.failing_messages.contains(message) {
            return Err(BaitbanError::moderation(format!(
                "mock deletion of {message} rejected"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_bans_and_deletions() {
        let moderator = MockModerator::new();
        moderator
            .ban(&"g1".into(), &"u1".into(), "Ads bot", 0)
            .await
            .unwrap();
        moderator
            .delete_message(&"c1".into(), &"m1".into())
            .await
            .unwrap();

        assert_eq!(
            moderator.bans(),
            vec![BanCall {
                guild: "g1".into(),
                user: "u1".into(),
                reason: "Ads bot".into(),
                purge_days: 0,
            }]
        );
        assert_eq!(moderator.deletions().len(), 1);
    }

    #[tokio::test]
    async fn injected_failures_are_returned_and_cleared() {
        let moderator = MockModerator::new();
        moderator.fail_bans(true);
        moderator.fail_deletion_of("m1");

        assert!(moderator.ban(&"g1".into(), &"u1".into(), "r", 0).await.is_err());
        assert!(moderator.delete_message(&"c1".into(), &"m1".into()).await.is_err());
        assert!(moderator.delete_message(&"c1".into(), &"m2".into()).await.is_ok());

        moderator.clear_failures();
        assert!(moderator.ban(&"g1".into(), &"u1".into(), "r", 0).await.is_ok());
        assert!(moderator.delete_message(&"c1".into(), &"m1".into()).await.is_ok());
        assert_eq!(moderator.deletions().len(), 3);
    }
}
