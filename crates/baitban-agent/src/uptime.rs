// SPDX-FileCopyrightText: 2026 Baitban Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uptime push monitor.
//!
//! Periodically GETs an Uptime Kuma style push URL so an external monitor
//! knows the bot is alive. Failures are logged and never stop the loop.

use std::time::Duration;

use baitban_config::model::UptimeConfig;
use baitban_core::BaitbanError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);
const UP_QUERY: &str = "status=up&msg=OK&ping=";

/// Pushes "up" heartbeats to a monitoring endpoint.
#[derive(Debug, Clone)]
pub struct UptimePush {
    client: reqwest::Client,
    url: String,
    interval: Duration,
}

impl UptimePush {
    /// Creates a pusher for `push_url`.
    ///
    /// URLs copied from the monitor UI often already carry the status query;
    /// it is only appended when missing. A zero `interval` is rejected.
    pub fn new(push_url: &str, interval: Duration) -> Result<Self, BaitbanError> {
        if interval.is_zero() {
            return Err(BaitbanError::Config(
                "uptime push interval must be greater than zero".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(PUSH_TIMEOUT)
            .build()
            .map_err(|e| BaitbanError::Uptime {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            url: with_up_query(push_url),
            interval,
        })
    }

    /// Builds a pusher from config; `None` when no push URL is configured.
    pub fn from_config(config: &UptimeConfig) -> Result<Option<Self>, BaitbanError> {
        config
            .push_url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_secs(config.interval_secs)))
            .transpose()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends a single push.
    pub async fn push_once(&self) -> Result<(), BaitbanError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| BaitbanError::Uptime {
                message: format!("push request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BaitbanError::Uptime {
                message: format!("push endpoint returned {status}"),
                source: None,
            });
        }
        Ok(())
    }

    /// Spawns the push loop; it pushes immediately, then once per interval.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(interval_secs = self.interval.as_secs(), "uptime push started");
            let mut interval = tokio::time::interval(self.interval);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match self.push_once().await {
                            Ok(()) => debug!("uptime push sent"),
                            Err(e) => warn!(error = %e, "uptime push failed (non-fatal)"),
                        }
                    }
                    _ = cancel.cancelled() => {
                        info!("uptime push shutting down");
                        break;
                    }
                }
            }
        })
    }
}

fn with_up_query(url: &str) -> String {
    if url.contains("status=") {
        url.to_string()
    } else if url.contains('?') {
        format!("{url}&{UP_QUERY}")
    } else {
        format!("{url}?{UP_QUERY}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn up_query_is_appended_once() {
        assert_eq!(
            with_up_query("https://kuma.example.com/api/push/abc"),
            "https://kuma.example.com/api/push/abc?status=up&msg=OK&ping="
        );
        assert_eq!(
            with_up_query("https://kuma.example.com/api/push/abc?status=up&msg=OK&ping="),
            "https://kuma.example.com/api/push/abc?status=up&msg=OK&ping="
        );
        assert_eq!(
            with_up_query("https://kuma.example.com/push?token=1"),
            "https://kuma.example.com/push?token=1&status=up&msg=OK&ping="
        );
    }

    #[test]
    fn from_config_without_url_is_disabled() {
        let pusher = UptimePush::from_config(&UptimeConfig::default()).expect("no error");
        assert!(pusher.is_none());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = UptimePush::new("https://kuma.example.com/api/push/abc", Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, BaitbanError::Config(_)));

        let config = UptimeConfig {
            push_url: Some("https://kuma.example.com/api/push/abc".into()),
            interval_secs: 0,
        };
        assert!(UptimePush::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn push_once_hits_endpoint_with_up_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/push/abc"))
            .and(query_param("status", "up"))
            .and(query_param("msg", "OK"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let pusher = UptimePush::new(
            &format!("{}/api/push/abc", server.uri()),
            Duration::from_secs(60),
        )
        .unwrap();
        pusher.push_once().await.unwrap();
    }

    #[tokio::test]
    async fn push_once_reports_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let pusher = UptimePush::new(&server.uri(), Duration::from_secs(60)).unwrap();
        let err = pusher.push_once().await.unwrap_err();
        assert!(matches!(err, BaitbanError::Uptime { .. }));
    }

    #[tokio::test]
    async fn loop_keeps_pushing_until_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let pusher = UptimePush::new(&server.uri(), Duration::from_millis(20)).unwrap();
        let handle = pusher.spawn(cancel.clone());

        tokio::time::sleep(Duration::from_millis(150)).await;
        cancel.cancel();
        handle.await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert!(
            received.len() >= 2,
            "failed pushes must not stop the loop, got {} requests",
            received.len()
        );
    }
}
