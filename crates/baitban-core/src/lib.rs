// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Baitban.
//!
//! This crate provides the error type, the opaque identifier types, and the
//! adapter traits shared by the retention cache, the bait handler, and the
//! platform adapters.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BaitbanError;
pub use traits::{ModerationAdapter, PluginAdapter};
pub use types::{
    ChannelId, GuildId, HealthStatus, MessageDescriptor, MessageEvent, MessageId, UserId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baitban_error_variants_render() {
        let config = BaitbanError::Config("missing token".into());
        assert_eq!(config.to_string(), "configuration error: missing token");

        let moderation = BaitbanError::moderation("unknown message");
        assert_eq!(moderation.to_string(), "moderation error: unknown message");

        let _channel = BaitbanError::Channel {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _uptime = BaitbanError::Uptime {
            message: "test".into(),
            source: None,
        };
        let _internal = BaitbanError::Internal("test".into());
    }

    #[test]
    fn identifiers_display_their_raw_value() {
        let channel = ChannelId::from("123");
        let user = UserId::from(String::from("456"));
        assert_eq!(channel.to_string(), "123");
        assert_eq!(user.as_str(), "456");
    }

    #[test]
    fn message_id_serde_round_trip() {
        let mid = MessageId("m-1".into());
        let json = serde_json::to_string(&mid).expect("should serialize");
        let parsed: MessageId = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(mid, parsed);
    }

    #[test]
    fn event_descriptor_copies_ids() {
        let event = MessageEvent {
            channel_id: "c1".into(),
            message_id: "m1".into(),
            author_id: "u1".into(),
            guild_id: Some("g1".into()),
            content: "buy now".into(),
        };
        assert_eq!(event.descriptor(), MessageDescriptor::new("c1", "m1", "u1"));
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_moderation_adapter<T: ModerationAdapter>() {}
    }
}
