//! Runtime configuration handed to the router and the scheduler.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::model::Settings;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_CONTAINER_MANAGER_URL: &str = "http://localhost:9000";
pub const DEFAULT_METRICS_URL: &str = "http://localhost:9090";
pub const DEFAULT_DASHBOARDS_URL: &str = "http://localhost:3000";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// The manual refresh trigger stays disabled at least this long.
pub const MIN_MANUAL_COOLDOWN: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub api_base: String,
    pub container_manager_url: String,
    pub metrics_url: String,
    pub dashboards_url: String,
    pub refresh_interval: Duration,
    pub manual_cooldown: Duration,
    pub settings_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            container_manager_url: DEFAULT_CONTAINER_MANAGER_URL.to_string(),
            metrics_url: DEFAULT_METRICS_URL.to_string(),
            dashboards_url: DEFAULT_DASHBOARDS_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            manual_cooldown: MIN_MANUAL_COOLDOWN,
            settings_path: None,
        }
    }
}

/// A service listed on the services panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceTarget {
    pub name: &'static str,
    pub display_name: &'static str,
    /// Checked for reachability on each services refresh. `None` means the
    /// service has no address of its own.
    pub url: Option<String>,
    pub port: Option<u16>,
}

impl DashboardConfig {
    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_base.trim_end_matches('/'))
    }

    pub fn prices_url(&self, limit: u32) -> String {
        format!("{}/prices?limit={}", self.api_base.trim_end_matches('/'), limit)
    }

    pub fn docs_url(&self) -> String {
        format!("{}/docs", self.api_base.trim_end_matches('/'))
    }

    /// Cooldown actually applied, never below [`MIN_MANUAL_COOLDOWN`].
    pub fn effective_cooldown(&self) -> Duration {
        self.manual_cooldown.max(MIN_MANUAL_COOLDOWN)
    }

    /// Apply the persisted refresh interval unless one was given explicitly.
    pub fn with_settings(mut self, settings: &Settings, interval_overridden: bool) -> Self {
        if !interval_overridden && let Some(interval) = settings.refresh_interval() {
            self.refresh_interval = interval;
        }
        self
    }

    pub fn service_targets(&self) -> Vec<ServiceTarget> {
        vec![
            ServiceTarget {
                name: "api",
                display_name: "API service",
                url: None,
                port: url_port(&self.api_base),
            },
            ServiceTarget {
                name: "scheduler",
                display_name: "Scheduler",
                url: None,
                port: None,
            },
            ServiceTarget {
                name: "container-manager",
                display_name: "Container manager",
                url: Some(self.container_manager_url.clone()),
                port: url_port(&self.container_manager_url),
            },
            ServiceTarget {
                name: "metrics",
                display_name: "Metrics UI",
                url: Some(self.metrics_url.clone()),
                port: url_port(&self.metrics_url),
            },
            ServiceTarget {
                name: "dashboards",
                display_name: "Dashboards UI",
                url: Some(self.dashboards_url.clone()),
                port: url_port(&self.dashboards_url),
            },
        ]
    }
}

fn url_port(url: &str) -> Option<u16> {
    Url::parse(url).ok()?.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_cleanly() {
        let config = DashboardConfig {
            api_base: "http://api.local:8000/api/".into(),
            ..Default::default()
        };
        assert_eq!(config.health_url(), "http://api.local:8000/api/health");
        assert_eq!(config.prices_url(1), "http://api.local:8000/api/prices?limit=1");
        assert_eq!(config.docs_url(), "http://api.local:8000/api/docs");
    }

    #[test]
    fn cooldown_never_below_minimum() {
        let config = DashboardConfig {
            manual_cooldown: Duration::from_millis(10),
            ..Default::default()
        };
        assert_eq!(config.effective_cooldown(), MIN_MANUAL_COOLDOWN);

        let config = DashboardConfig {
            manual_cooldown: Duration::from_secs(3),
            ..Default::default()
        };
        assert_eq!(config.effective_cooldown(), Duration::from_secs(3));
    }

    #[test]
    fn settings_interval_applies_unless_overridden() {
        let settings = Settings {
            refresh_interval: 10,
            ..Default::default()
        };
        let applied = DashboardConfig::default().with_settings(&settings, false);
        assert_eq!(applied.refresh_interval, Duration::from_secs(10));

        let kept = DashboardConfig::default().with_settings(&settings, true);
        assert_eq!(kept.refresh_interval, DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn service_targets_carry_ports() {
        let targets = DashboardConfig::default().service_targets();
        assert_eq!(targets.len(), 5);
        assert_eq!(targets[0].port, Some(8000));
        assert_eq!(targets[1].port, None);
        assert_eq!(targets[2].url.as_deref(), Some(DEFAULT_CONTAINER_MANAGER_URL));
        assert_eq!(targets[2].port, Some(9000));
    }
}
