// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `baitban serve`: wires the cache, eviction timer, bait handler, uptime
//! push, and Discord gateway together and runs until a shutdown signal.

use std::sync::Arc;

use baitban_agent::shutdown;
use baitban_agent::{BaitHandler, BaitSettings, EvictionTimer, RetentionCache, UptimePush};
use baitban_config::BaitbanConfig;
use baitban_core::{BaitbanError, HealthStatus, PluginAdapter};
use baitban_discord::{DiscordGateway, DiscordModerator};
use tracing::{debug, error, info, warn};

/// Runs the `baitban serve` command.
///
/// Returns an error only when the bot cannot start: missing credentials, an
/// invalid bait channel, or a gateway failure. Everything after that is
/// logged and survived.
pub async fn run_serve(config: BaitbanConfig) -> Result<(), BaitbanError> {
    init_tracing(&config.bot.log_level, std::env::var_os("DEBUG").is_some());

    info!(name = %config.bot.name, "starting baitban serve");

    let token = config
        .discord
        .bot_token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            BaitbanError::Config("discord.bot_token (or BOT_TOKEN) is required".into())
        })?;
    let settings = BaitSettings::from_config(&config.discord)?;

    let cache = Arc::new(RetentionCache::new(config.retention.window_secs));
    let moderator = Arc::new(DiscordModerator::new(token));

    let adapter = moderator.name();
    match moderator.health_check().await {
        Ok(HealthStatus::Healthy) => debug!(adapter, "platform API reachable"),
        Ok(status) => warn!(adapter, ?status, "platform health check did not pass"),
        Err(e) => warn!(adapter, error = %e, "platform health check failed"),
    }

    info!(
        bait_channel = %settings.bait_channel,
        window_secs = cache.window_secs(),
        purge_days = settings.purge_days,
        "bait handler configured"
    );
    let handler = Arc::new(BaitHandler::new(settings, cache.clone(), moderator.clone()));

    // Install signal handler.
    let cancel = shutdown::install_signal_handler();

    let timer = EvictionTimer::spawn(cache, cancel.clone());

    let uptime = match UptimePush::from_config(&config.uptime)? {
        Some(pusher) => Some(pusher.spawn(cancel.clone())),
        None => {
            info!("uptime push disabled");
            None
        }
    };

    let gateway = DiscordGateway::new(token, handler)?;
    let result = gateway.run(cancel.clone()).await;
    if let Err(e) = &result {
        error!(error = %e, "gateway stopped");
    }

    // The gateway may also stop without a signal.
    cancel.cancel();
    timer.stop().await;
    if let Some(handle) = uptime {
        if let Err(e) = handle.await {
            error!(error = %e, "uptime push task failed");
        }
    }
    if let Err(e) = moderator.shutdown().await {
        warn!(adapter, error = %e, "moderator shutdown failed");
    }

    log_heap_usage();
    info!("bot offline");
    result
}

/// Filter used when `RUST_LOG` is unset: the configured level for baitban
/// crates, `warn` for dependencies. `debug` forces debug level.
fn default_directives(log_level: &str, debug: bool) -> String {
    let level = if debug { "debug" } else { log_level };
    format!("baitban={level},warn")
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str, debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level, debug)));

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(not(target_env = "msvc"))]
fn log_heap_usage() {
    let _ = tikv_jemalloc_ctl::epoch::advance();
    let allocated = tikv_jemalloc_ctl::stats::allocated::read().unwrap_or(0);
    let resident = tikv_jemalloc_ctl::stats::resident::read().unwrap_or(0);
    debug!(
        allocated_kb = allocated / 1024,
        resident_kb = resident / 1024,
        "heap usage at shutdown"
    );
}

#[cfg(target_env = "msvc")]
fn log_heap_usage() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_use_configured_level() {
        assert_eq!(default_directives("info", false), "baitban=info,warn");
        assert_eq!(default_directives("trace", false), "baitban=trace,warn");
        assert_eq!(default_directives("info", true), "baitban=debug,warn");
    }

    #[tokio::test]
    async fn serve_without_token_fails_fast() {
        let config = BaitbanConfig::default();
        let err = run_serve(config).await.unwrap_err();
        assert!(matches!(err, BaitbanError::Config(_)));
        assert!(err.to_string().contains("bot_token"));
    }
}
