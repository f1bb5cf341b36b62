// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle trait shared by platform adapters.

use async_trait::async_trait;

use crate::error::BaitbanError;
use crate::types::HealthStatus;

/// Lifecycle hooks `serve` drives on every platform adapter.
///
/// `health_check` runs once before the gateway connects; `shutdown` runs
/// after the gateway has stopped.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Short platform name used in log fields, e.g. `"discord"`.
    fn name(&self) -> &str;

    /// Probes the platform API. An unreachable API is reported as
    /// [`HealthStatus::Unhealthy`], not as an error.
    async fn health_check(&self) -> Result<HealthStatus, BaitbanError>;

    async fn shutdown(&self) -> Result<(), BaitbanError>;
}
