// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway event handler: converts serenity messages into
//! platform-agnostic [`MessageEvent`]s and hands them to the bait handler.

use std::sync::Arc;

use baitban_agent::BaitHandler;
use baitban_core::MessageEvent;
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};
use tracing::info;

/// Serenity [`EventHandler`] wired to a [`BaitHandler`].
///
/// Serenity dispatches every event on its own task, so arrivals are
/// handled concurrently with each other and with the eviction timer.
pub struct GatewayHandler {
    bait: Arc<BaitHandler>,
}

impl GatewayHandler {
    pub fn new(bait: Arc<BaitHandler>) -> Self {
        Self { bait }
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn message(&self, _ctx: Context, msg: Message) {
        self.bait.on_message(&to_event(&msg)).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            id = %ready.user.id,
            guilds = ready.guilds.len(),
            "bot online"
        );
    }
}

/// Converts a gateway message into a [`MessageEvent`].
pub fn to_event(msg: &Message) -> MessageEvent {
    MessageEvent {
        channel_id: msg.channel_id.to_string().into(),
        message_id: msg.id.to_string().into(),
        author_id: msg.author.id.to_string().into(),
        guild_id: msg.guild_id.map(|g| g.to_string().into()),
        content: msg.content.clone(),
    }
}
