//! One probe round without the terminal UI, for scripts and cron.

use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;

use crate::config::DashboardConfig;
use crate::docker::ContainerSource;
use crate::events::{CollectingSink, EventSink};
use crate::model::{DashboardState, HealthStatus, Panel};
use crate::probe::Probe;
use crate::router::SectionRouter;
use crate::scheduler::{Collaborators, RefreshScheduler};

/// What one round of checks found.
pub struct CheckReport {
    pub state: DashboardState,
}

impl CheckReport {
    /// A degraded API still answers, so only `Unreachable` (or no answer
    /// at all) counts as a failure.
    pub fn api_ok(&self) -> bool {
        self.state
            .health
            .as_ref()
            .is_some_and(|h| h.status != HealthStatus::Unreachable)
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let state = &self.state;
        let mut lines = Vec::new();

        let mut api = format!("api: {}", state.api_status_label());
        if let Some(report) = &state.health {
            if let Some(latency) = report.latency {
                api.push_str(&format!(" ({} ms)", latency.as_millis()));
            }
            if let Some(detail) = &report.detail {
                api.push_str(&format!(" - {}", detail));
            }
        }
        lines.push(api);
        lines.push(format!("records: {}", state.record_count_label()));

        let containers = match &state.containers {
            Some(c) => format!(
                "containers: {} ({} running, {} stopped)",
                state.engine.label(),
                c.running,
                c.stopped
            ),
            None => format!("containers: {}", state.engine.label()),
        };
        lines.push(containers);

        for row in &state.services {
            lines.push(format!("service {}: {}", row.name, row.state.label()));
        }
        lines
    }
}

/// Run the startup checks plus the services table once and fold the
/// results. Must be called from inside a tokio runtime.
pub async fn run_check(
    config: &DashboardConfig,
    probe: Arc<dyn Probe>,
    containers: Arc<dyn ContainerSource>,
) -> CheckReport {
    let collected = Arc::new(CollectingSink::new());
    let sink: Arc<dyn EventSink> = collected.clone();
    let router = Arc::new(Mutex::new(SectionRouter::new(config, Arc::clone(&sink))));
    let scheduler = RefreshScheduler::new(
        config.clone(),
        router,
        Collaborators { probe, containers, sink },
        Handle::current(),
    );

    scheduler.run_initial_checks().await;
    scheduler.dispatch(Panel::Services).await;

    let mut state = DashboardState::default();
    for event in collected.take() {
        state.apply(event);
    }
    CheckReport { state }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::events::DashboardEvent;
    use crate::model::{HealthReport, RecordCount};

    #[test]
    fn api_ok_needs_an_answer() {
        let report = CheckReport { state: DashboardState::default() };
        assert!(!report.api_ok());

        let mut state = DashboardState::default();
        state.apply(DashboardEvent::Health(HealthReport {
            status: HealthStatus::Degraded,
            version: None,
            service: None,
            latency: Some(Duration::from_millis(3)),
            detail: Some("status 'starting'".into()),
        }));
        state.apply(DashboardEvent::RecordCount(RecordCount::Value(7)));
        let report = CheckReport { state };
        assert!(report.api_ok());

        let lines = report.summary_lines();
        assert_eq!(lines[0], "api: degraded (3 ms) - status 'starting'");
        assert_eq!(lines[1], "records: 7");
        assert_eq!(lines[2], "containers: checking");
    }
}
