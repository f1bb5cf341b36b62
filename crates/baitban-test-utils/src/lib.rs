// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Baitban integration tests.
//!
//! Provides a recording [`MockModerator`] so the bait handler and the
//! retention cache can be exercised without a Discord connection.

pub mod mock_moderator;

pub use mock_moderator::{BanCall, MockModerator};
