// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Baitban.

use thiserror::Error;

/// The primary error type used across all Baitban adapters and core operations.
#[derive(Debug, Error)]
pub enum BaitbanError {
    /// Configuration errors (missing token, malformed identifiers, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Gateway/channel errors (connection failure, dispatcher exit).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A moderation call (ban or message deletion) was rejected or failed.
    #[error("moderation error: {message}")]
    Moderation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Uptime push to the monitoring endpoint failed.
    #[error("uptime push error: {message}")]
    Uptime {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BaitbanError {
    /// Shorthand for a moderation error without an underlying source.
    pub fn moderation(message: impl Into<String>) -> Self {
        Self::Moderation {
            message: message.into(),
            source: None,
        }
    }
}
