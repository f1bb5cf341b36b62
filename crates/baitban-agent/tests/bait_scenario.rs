// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: arrivals flow through the bait handler into the cache
//! and out to the moderation adapter.

use std::sync::Arc;
use std::time::Duration;

use baitban_agent::{BaitHandler, BaitOutcome, BaitSettings, BanResult, EvictionTimer, RetentionCache};
use baitban_core::{MessageDescriptor, MessageEvent};
use baitban_test_utils::{BanCall, MockModerator};
use tokio_util::sync::CancellationToken;

const BAIT: &str = "900";

fn arrival(channel: &str, message: &str, author: &str) -> MessageEvent {
    MessageEvent {
        channel_id: channel.into(),
        message_id: message.into(),
        author_id: author.into(),
        guild_id: Some("g1".into()),
        content: "check out my server".into(),
    }
}

fn setup() -> (Arc<RetentionCache>, Arc<MockModerator>, BaitHandler) {
    let cache = Arc::new(RetentionCache::default());
    let moderator = Arc::new(MockModerator::new());
    let handler = BaitHandler::new(BaitSettings::new(BAIT), cache.clone(), moderator.clone());
    (cache, moderator, handler)
}

fn message_ids(descriptors: &[MessageDescriptor]) -> Vec<&str> {
    descriptors.iter().map(|d| d.message_id.as_str()).collect()
}

#[tokio::test]
async fn bait_trigger_bans_author_and_cleans_their_trail() {
    let (cache, moderator, handler) = setup();

    cache.insert(MessageDescriptor::new("c1", "m1", "u1"));
    cache.insert(MessageDescriptor::new("c2", "m2", "u1"));
    cache.insert(MessageDescriptor::new("c3", "m3", "u2"));

    let outcome = handler.on_message(&arrival(BAIT, "m4", "u1")).await;

    assert_eq!(
        moderator.bans(),
        vec![BanCall {
            guild: "g1".into(),
            user: "u1".into(),
            reason: "Ads bot".into(),
            purge_days: 0,
        }]
    );

    let deleted = moderator.deletions();
    assert_eq!(message_ids(&deleted), vec!["m1", "m2", "m4"]);

    let left: Vec<_> = cache.snapshot().into_iter().map(|e| e.descriptor).collect();
    assert_eq!(left, vec![MessageDescriptor::new("c3", "m3", "u2")]);

    match outcome {
        BaitOutcome::Triggered { ban, sweep } => {
            assert!(matches!(ban, BanResult::Banned));
            assert_eq!(sweep.deleted.len(), 3);
            assert!(sweep.failed.is_empty());
        }
        BaitOutcome::Ignored => panic!("bait message must trigger"),
    }
}

#[tokio::test]
async fn other_channels_only_feed_the_cache() {
    let (cache, moderator, handler) = setup();

    for i in 0..10 {
        let outcome = handler
            .on_message(&arrival("general", &format!("m{i}"), "u1"))
            .await;
        assert!(!outcome.is_triggered());
    }

    assert_eq!(cache.len(), 10);
    assert!(moderator.bans().is_empty());
    assert!(moderator.deletions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn messages_older_than_the_window_are_not_swept() {
    let (cache, moderator, handler) = setup();
    let cancel = CancellationToken::new();
    let timer = EvictionTimer::spawn(cache.clone(), cancel.clone());

    handler.on_message(&arrival("general", "old", "u1")).await;
    tokio::time::sleep(Duration::from_secs(61)).await;
    handler.on_message(&arrival("general", "recent", "u1")).await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    handler.on_message(&arrival(BAIT, "bait", "u1")).await;

    assert_eq!(message_ids(&moderator.deletions()), vec!["recent", "bait"]);
    assert!(cache.is_empty());

    timer.stop().await;
}

#[tokio::test]
async fn concurrent_triggers_by_same_author_each_ban() {
    let cache = Arc::new(RetentionCache::default());
    let moderator = Arc::new(MockModerator::new().with_delay(Duration::from_millis(5)));
    let handler = Arc::new(BaitHandler::new(
        BaitSettings::new(BAIT),
        cache.clone(),
        moderator.clone(),
    ));

    cache.insert(MessageDescriptor::new("c1", "m1", "u1"));

    let first = {
        let handler = handler.clone();
        tokio::spawn(async move { handler.on_message(&arrival(BAIT, "b1", "u1")).await })
    };
    let second = {
        let handler = handler.clone();
        tokio::spawn(async move { handler.on_message(&arrival(BAIT, "b2", "u1")).await })
    };
    first.await.unwrap();
    second.await.unwrap();

    assert_eq!(moderator.bans().len(), 2);
    assert!(cache.is_empty());
}
