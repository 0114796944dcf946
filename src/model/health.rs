use std::time::Duration;

use serde::Deserialize;

/// Outcome of the most recent health probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HealthStatus {
    Reachable,
    Degraded,
    #[default]
    Unreachable,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Reachable => "running",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unreachable => "offline",
        }
    }
}

/// Body of `GET /health`. Every field is optional; the backend only
/// promises JSON.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct HealthBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthBody {
    pub fn reports_healthy(&self) -> bool {
        match self.status.as_deref() {
            None => true,
            Some(s) => matches!(s.to_ascii_lowercase().as_str(), "healthy" | "ok"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: Option<String>,
    pub service: Option<String>,
    pub latency: Option<Duration>,
    pub detail: Option<String>,
}

impl HealthReport {
    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unreachable,
            version: None,
            service: None,
            latency: None,
            detail: Some(detail.into()),
        }
    }
}

/// The overview's stored-records counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RecordCount {
    #[default]
    Unknown,
    Value(u64),
    Error,
}

impl RecordCount {
    pub fn label(self) -> String {
        match self {
            RecordCount::Unknown => "...".to_string(),
            RecordCount::Value(n) => n.to_string(),
            RecordCount::Error => "error".to_string(),
        }
    }
}

/// Running totals over every probe the console has made.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProbeMetrics {
    pub total: u64,
    pub failed: u64,
    pub last_latency: Option<Duration>,
}

impl ProbeMetrics {
    pub fn record(&mut self, report: &HealthReport) {
        self.total += 1;
        if report.status == HealthStatus::Unreachable {
            self.failed += 1;
        }
        if report.latency.is_some() {
            self.last_latency = report.latency;
        }
    }

    pub fn failure_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.failed as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_body_status_variants() {
        assert!(HealthBody::default().reports_healthy());
        let ok: HealthBody = serde_json::from_str(r#"{"status":"healthy","version":"1.0.0"}"#).unwrap();
        assert!(ok.reports_healthy());
        assert_eq!(ok.version.as_deref(), Some("1.0.0"));
        let err: HealthBody = serde_json::from_str(r#"{"status":"error","error":"boom"}"#).unwrap();
        assert!(!err.reports_healthy());
    }

    #[test]
    fn record_count_labels() {
        assert_eq!(RecordCount::Value(42).label(), "42");
        assert_eq!(RecordCount::Error.label(), "error");
        assert_eq!(RecordCount::Unknown.label(), "...");
    }

    #[test]
    fn probe_metrics_tracks_failures() {
        let mut m = ProbeMetrics::default();
        assert_eq!(m.failure_rate(), 0.0);

        let ok = HealthReport {
            status: HealthStatus::Reachable,
            version: None,
            service: None,
            latency: Some(Duration::from_millis(12)),
            detail: None,
        };
        m.record(&ok);
        m.record(&HealthReport::unreachable("refused"));

        assert_eq!(m.total, 2);
        assert_eq!(m.failed, 1);
        assert_eq!(m.failure_rate(), 50.0);
        assert_eq!(m.last_latency, Some(Duration::from_millis(12)));
    }

    #[test]
    fn status_labels() {
        assert_eq!(HealthStatus::Reachable.label(), "running");
        assert_eq!(HealthStatus::Unreachable.label(), "offline");
        assert_eq!(HealthStatus::default(), HealthStatus::Unreachable);
    }
}
