// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short-horizon retention cache of recently observed messages.
//!
//! Every observed message is recorded with a countdown (the retention
//! window, 60 seconds by default). The [`EvictionTimer`](crate::EvictionTimer)
//! calls [`RetentionCache::tick`] once per second; the bait handler calls
//! [`RetentionCache::sweep_and_remove`] to delete everything an author posted
//! inside the window.
//!
//! All access goes through one mutex. A sweep never holds it across a
//! platform call: matching entries are copied out, deletions run unlocked,
//! and successful ones are then removed by sequence number.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use baitban_core::{BaitbanError, MessageDescriptor, UserId};

/// Default retention window in seconds.
pub const DEFAULT_WINDOW_SECS: u32 = 60;

/// A descriptor with its remaining lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub descriptor: MessageDescriptor,
    /// Seconds left before expiry. Always > 0 while the entry is cached.
    pub remaining_secs: u32,
    seq: u64,
}

/// Outcome of one [`RetentionCache::sweep_and_remove`] call.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Messages deleted and removed from the cache.
    pub deleted: Vec<MessageDescriptor>,
    /// Messages whose deletion failed; they stay cached for a later sweep.
    pub failed: Vec<(MessageDescriptor, BaitbanError)>,
    /// Entries actually taken out of the cache. Lower than `deleted.len()`
    /// when an entry expired, or another sweep removed it, mid-sweep.
    pub removed: usize,
}

impl SweepReport {
    /// Number of deletions attempted.
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }
}

#[derive(Debug, Default)]
struct Inner {
    entries: Vec<CacheEntry>,
    next_seq: u64,
}

/// Time-bounded cache of message descriptors keyed by author.
#[derive(Debug)]
pub struct RetentionCache {
    window_secs: u32,
    inner: Mutex<Inner>,
}

impl Default for RetentionCache {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}

impl RetentionCache {
    /// Creates an empty cache whose entries live for `window_secs` ticks.
    ///
    /// A window of 0 is raised to 1 so inserted entries are always live.
    pub fn new(window_secs: u32) -> Self {
        Self {
            window_secs: window_secs.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// The lifetime given to newly inserted entries.
    pub fn window_secs(&self) -> u32 {
        self.window_secs
    }

    // A panic while holding the lock cannot leave `entries` half-written
    // (every mutation is a push or a retain), so a poisoned lock is reused.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a message with a full retention window.
    pub fn insert(&self, descriptor: MessageDescriptor) {
        let mut inner = self.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.push(CacheEntry {
            descriptor,
            remaining_secs: self.window_secs,
            seq,
        });
    }

    /// Ages every entry by one second and drops the expired ones.
    ///
    /// Returns how many entries expired.
    pub fn tick(&self) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain_mut(|entry| {
            entry.remaining_secs = entry.remaining_secs.saturating_sub(1);
            entry.remaining_secs > 0
        });
        before - inner.entries.len()
    }

    /// Deletes every cached message by `author` through `delete`.
    ///
    /// Successful deletions are removed from the cache; failed ones are kept
    /// so a later sweep retries them. `delete` is never called for other
    /// authors' entries, and the cache lock is not held while it runs.
    pub async fn sweep_and_remove<F, Fut>(&self, author: &UserId, mut delete: F) -> SweepReport
    where
        F: FnMut(MessageDescriptor) -> Fut,
        Fut: Future<Output = Result<(), BaitbanError>>,
    {
        let targets: Vec<(u64, MessageDescriptor)> = self
            .lock()
            .entries
            .iter()
            .filter(|entry| entry.descriptor.author_id == *author)
            .map(|entry| (entry.seq, entry.descriptor.clone()))
            .collect();

        let mut report = SweepReport::default();
        let mut removed = HashSet::with_capacity(targets.len());

        for (seq, descriptor) in targets {
            match delete(descriptor.clone()).await {
                Ok(()) => {
                    removed.insert(seq);
                    report.deleted.push(descriptor);
                }
                Err(e) => report.failed.push((descriptor, e)),
            }
        }

        if !removed.is_empty() {
            let mut inner = self.lock();
            let before = inner.entries.len();
            inner.entries.retain(|entry| !removed.contains(&entry.seq));
            report.removed = before - inner.entries.len();
        }

        report
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Cached descriptors written by `author`, oldest first.
    pub fn entries_for(&self, author: &UserId) -> Vec<MessageDescriptor> {
        self.lock()
            .entries
            .iter()
            .filter(|entry| entry.descriptor.author_id == *author)
            .map(|entry| entry.descriptor.clone())
            .collect()
    }

    /// Copy of the whole cache, oldest first.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        self.lock().entries.clone()
    }
}
