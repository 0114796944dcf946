use crate::events::DashboardEvent;

use super::{
    ContainerCounts, EngineStatus, HealthReport, LogEntry, Panel, ProbeMetrics, RecordCount,
    ResourceGauges, ServiceRow, SystemInfo,
};

/// Everything the renderer needs, rebuilt purely from events.
#[derive(Clone, Debug)]
pub struct DashboardState {
    pub panel: Panel,
    pub frame_url: Option<String>,
    pub health: Option<HealthReport>,
    pub record_count: RecordCount,
    pub system_info: Option<SystemInfo>,
    pub probe_metrics: ProbeMetrics,
    pub services: Vec<ServiceRow>,
    pub engine: EngineStatus,
    pub containers: Option<ContainerCounts>,
    pub resources: Option<ResourceGauges>,
    pub logs: Vec<LogEntry>,
    pub refresh_enabled: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            panel: Panel::Overview,
            frame_url: None,
            health: None,
            record_count: RecordCount::Unknown,
            system_info: None,
            probe_metrics: ProbeMetrics::default(),
            services: Vec::new(),
            engine: EngineStatus::Unknown,
            containers: None,
            resources: None,
            logs: Vec::new(),
            refresh_enabled: true,
        }
    }
}

impl DashboardState {
    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::PanelActivated(panel) => self.panel = panel,
            DashboardEvent::FrameBound(url) => self.frame_url = Some(url),
            DashboardEvent::Health(report) => self.health = Some(report),
            DashboardEvent::RecordCount(count) => self.record_count = count,
            DashboardEvent::SystemInfo(info) => self.system_info = Some(info),
            DashboardEvent::ProbeMetrics(metrics) => self.probe_metrics = metrics,
            DashboardEvent::Services(rows) => self.services = rows,
            DashboardEvent::ContainerEngine(status) => self.engine = status,
            DashboardEvent::Containers(counts) => self.containers = counts,
            DashboardEvent::Resources(gauges) => self.resources = Some(gauges),
            DashboardEvent::Logs(entries) => self.logs = entries,
            DashboardEvent::RefreshTrigger { enabled } => self.refresh_enabled = enabled,
        }
    }

    pub fn api_status_label(&self) -> &'static str {
        match &self.health {
            Some(report) => report.status.label(),
            None => "checking",
        }
    }

    pub fn record_count_label(&self) -> String {
        self.record_count.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HealthStatus;

    #[test]
    fn record_count_then_error_never_shows_stale_value() {
        let mut state = DashboardState::default();
        state.apply(DashboardEvent::RecordCount(RecordCount::Value(42)));
        assert_eq!(state.record_count_label(), "42");

        state.apply(DashboardEvent::Health(HealthReport::unreachable("refused")));
        state.apply(DashboardEvent::RecordCount(RecordCount::Error));
        assert_eq!(state.api_status_label(), "offline");
        assert_eq!(state.record_count_label(), "error");
    }

    #[test]
    fn health_is_overwritten_not_accumulated() {
        let mut state = DashboardState::default();
        assert_eq!(state.api_status_label(), "checking");
        state.apply(DashboardEvent::Health(HealthReport::unreachable("x")));
        state.apply(DashboardEvent::Health(HealthReport {
            status: HealthStatus::Reachable,
            version: Some("1.0.0".into()),
            service: None,
            latency: None,
            detail: None,
        }));
        assert_eq!(state.api_status_label(), "running");
    }

    #[test]
    fn trigger_and_panel_follow_events() {
        let mut state = DashboardState::default();
        assert!(state.refresh_enabled);
        state.apply(DashboardEvent::RefreshTrigger { enabled: false });
        assert!(!state.refresh_enabled);
        state.apply(DashboardEvent::PanelActivated(Panel::Monitoring));
        assert_eq!(state.panel, Panel::Monitoring);
    }
}
