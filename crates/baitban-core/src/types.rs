// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the retention cache, the bait handler, and the
//! platform adapters.
//!
//! Identifiers are opaque strings. Only the platform adapter interprets them.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a text channel.
    ChannelId
);
opaque_id!(
    /// Identifier of a single message.
    MessageId
);
opaque_id!(
    /// Identifier of a user (message author).
    UserId
);
opaque_id!(
    /// Identifier of a guild (server).
    GuildId
);

/// One observed message: where it lives and who wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author_id: UserId,
}

impl MessageDescriptor {
    pub fn new(
        channel_id: impl Into<ChannelId>,
        message_id: impl Into<MessageId>,
        author_id: impl Into<UserId>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
            author_id: author_id.into(),
        }
    }
}

/// A message arrival delivered by the platform adapter.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub author_id: UserId,
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub content: String,
}

impl MessageEvent {
    /// The cache descriptor for this arrival.
    pub fn descriptor(&self) -> MessageDescriptor {
        MessageDescriptor {
            channel_id: self.channel_id.clone(),
            message_id: self.message_id.clone(),
            author_id: self.author_id.clone(),
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}
