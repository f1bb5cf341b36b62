// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord adapter for Baitban.
//!
//! [`DiscordModerator`] implements [`ModerationAdapter`] over the REST API;
//! [`DiscordGateway`] connects to the gateway via serenity and feeds every
//! message into the [`BaitHandler`].
//!
//! [`ModerationAdapter`]: baitban_core::ModerationAdapter

pub mod handler;
pub mod moderator;

use std::sync::Arc;

use baitban_agent::BaitHandler;
use baitban_core::BaitbanError;
use serenity::Client;
use serenity::model::gateway::GatewayIntents;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use handler::GatewayHandler;
pub use moderator::DiscordModerator;

/// Gateway intents the bot needs: guild metadata plus message content.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Discord gateway connection driving a [`BaitHandler`].
pub struct DiscordGateway {
    token: String,
    handler: Arc<BaitHandler>,
}

impl DiscordGateway {
    /// Creates a gateway. Requires a non-empty bot token.
    pub fn new(token: &str, handler: Arc<BaitHandler>) -> Result<Self, BaitbanError> {
        if token.trim().is_empty() {
            return Err(BaitbanError::Config(
                "discord.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            token: token.to_string(),
            handler,
        })
    }

    /// Connects and dispatches events until `cancel` fires or the client
    /// stops on its own.
    ///
    /// A failure to connect is returned; on cancellation all shards are shut
    /// down and `Ok(())` is returned.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), BaitbanError> {
        let mut client = Client::builder(&self.token, intents())
            .event_handler(GatewayHandler::new(self.handler))
            .await
            .map_err(|e| gateway_error("failed to build Discord client", e))?;

        let shard_manager = client.shard_manager.clone();
        info!("connecting to Discord gateway");

        tokio::select! {
            result = client.start() => {
                result.map_err(|e| gateway_error("Discord client stopped", e))
            }
            _ = cancel.cancelled() => {
                info!("shutting down Discord shards");
                shard_manager.shutdown_all().await;
                Ok(())
            }
        }
    }
}

fn gateway_error(context: &str, e: serenity::Error) -> BaitbanError {
    BaitbanError::Channel {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use baitban_agent::{BaitSettings, RetentionCache};

    fn bait_handler() -> Arc<BaitHandler> {
        Arc::new(BaitHandler::new(
            BaitSettings::new("1187654321098765432"),
            Arc::new(RetentionCache::default()),
            Arc::new(DiscordModerator::new("unused-token")),
        ))
    }

    #[test]
    fn intents_include_message_content() {
        let intents = intents();
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(GatewayIntents::GUILDS));
        assert!(!intents.contains(GatewayIntents::DIRECT_MESSAGES));
    }

    #[test]
    fn gateway_rejects_empty_token() {
        let err = DiscordGateway::new("  ", bait_handler())
            .err()
            .expect("empty token must be rejected");
        assert!(matches!(err, BaitbanError::Config(_)));
    }

    #[test]
    fn gateway_accepts_token() {
        assert!(DiscordGateway::new("abc.def.ghi", bait_handler()).is_ok());
    }
}
