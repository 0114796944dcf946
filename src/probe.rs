//! HTTP checks against the backend API and the linked web UIs.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::model::{HealthBody, HealthReport, HealthStatus};

/// Network checks the scheduler depends on.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe `GET {api_base}/health`. Never fails; failures are reported
    /// as [`HealthStatus::Unreachable`].
    async fn health(&self) -> HealthReport;

    /// The `count` field of `GET {api_base}/prices?limit=1`.
    async fn record_count(&self) -> DashboardResult<u64>;

    /// Whether anything answers HTTP at `url`.
    async fn reachable(&self, url: &str) -> bool;
}

#[derive(Deserialize)]
struct CountBody {
    #[serde(default)]
    count: Option<u64>,
}

pub struct HttpProbe {
    client: Client,
    health_url: String,
    prices_url: String,
}

impl HttpProbe {
    /// No request timeout is set; a hung backend stalls only its own check.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            client: Client::new(),
            health_url: config.health_url(),
            prices_url: config.prices_url(1),
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn health(&self) -> HealthReport {
        let started = Instant::now();
        let resp = match self.client.get(&self.health_url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(event = "probe.health_failed", url = %self.health_url, error = %e);
                return HealthReport::unreachable(e.to_string());
            }
        };
        let latency = started.elapsed();

        if !resp.status().is_success() {
            warn!(
                event = "probe.health_bad_status",
                url = %self.health_url,
                status = resp.status().as_u16()
            );
            return HealthReport {
                latency: Some(latency),
                ..HealthReport::unreachable(format!("HTTP {}", resp.status()))
            };
        }

        let report = match resp.json::<HealthBody>().await {
            Ok(body) if body.reports_healthy() => HealthReport {
                status: HealthStatus::Reachable,
                version: body.version,
                service: body.service,
                latency: Some(latency),
                detail: None,
            },
            Ok(body) => HealthReport {
                status: HealthStatus::Degraded,
                detail: body.status.clone().map(|s| format!("backend reports '{}'", s)),
                version: body.version,
                service: body.service,
                latency: Some(latency),
            },
            Err(e) => HealthReport {
                status: HealthStatus::Degraded,
                version: None,
                service: None,
                latency: Some(latency),
                detail: Some(format!("invalid health body: {}", e)),
            },
        };
        debug!(
            event = "probe.health_completed",
            status = report.status.label(),
            latency_ms = latency.as_millis() as u64
        );
        report
    }

    async fn record_count(&self) -> DashboardResult<u64> {
        let resp = self
            .client
            .get(&self.prices_url)
            .send()
            .await
            .map_err(|e| DashboardError::network(&self.prices_url, e))?;
        if !resp.status().is_success() {
            return Err(DashboardError::network(
                &self.prices_url,
                format!("HTTP {}", resp.status()),
            ));
        }
        let body: CountBody = resp
            .json()
            .await
            .map_err(|e| DashboardError::network(&self.prices_url, e))?;
        Ok(body.count.unwrap_or(0))
    }

    async fn reachable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(_) => true,
            Err(e) => {
                debug!(event = "probe.unreachable", url = %url, error = %e);
                false
            }
        }
    }
}
