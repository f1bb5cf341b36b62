// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The moderation core of Baitban.
//!
//! - [`RetentionCache`] remembers every observed message for a short window.
//! - [`EvictionTimer`] ages the cache once per second.
//! - [`BaitHandler`] records arrivals and, on a bait channel message, bans
//!   the author and sweeps their cached messages.
//! - [`UptimePush`] keeps an external push monitor informed.

pub mod bait;
pub mod eviction;
pub mod retention;
pub mod shutdown;
pub mod uptime;

pub use bait::{BaitHandler, BaitOutcome, BaitSettings, BanResult};
pub use eviction::{EvictionTimer, TICK_PERIOD};
pub use retention::{CacheEntry, RetentionCache, SweepReport, DEFAULT_WINDOW_SECS};
pub use uptime::UptimePush;
