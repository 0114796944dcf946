use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::events::DashboardEvent;
use crate::model::{
    EngineStatus, HealthReport, HealthStatus, LOG_WINDOW, LogLevel, Panel, RecordCount,
    ServiceRow, ServiceState,
};
use crate::sampler::ResourceSampler;

use super::{Inner, lock};

impl Inner {
    pub(super) async fn dispatch(&self, panel: Panel) {
        match panel {
            Panel::Overview => {
                self.check_api().await;
                self.update_system_info();
            }
            Panel::Services => {
                let report = self.probe_health().await;
                self.refresh_services(report.status).await;
            }
            Panel::Containers => {
                self.check_containers().await;
            }
            Panel::Monitoring => {
                self.sample_resources();
            }
            Panel::Logs => {
                if self.log_auto_refresh.load(std::sync::atomic::Ordering::SeqCst) {
                    self.regenerate_logs();
                } else {
                    debug!(event = "scheduler.logs_skipped", reason = "auto refresh off");
                }
            }
            Panel::Settings => {}
        }
    }

    /// Overview checks, system info and container status, concurrently.
    pub(super) async fn refresh_all(&self) {
        tokio::join!(
            self.check_api(),
            async { self.update_system_info() },
            self.check_containers(),
        );
    }

    // --- Per-panel routines ---

    async fn check_api(&self) {
        self.probe_health().await;
        self.fetch_record_count().await;
    }

    async fn probe_health(&self) -> HealthReport {
        let report = self.probe.health().await;

        let metrics = {
            let mut metrics = lock(&self.metrics);
            metrics.record(&report);
            *metrics
        };

        match report.status {
            HealthStatus::Reachable => {
                let latency = report.latency.map(|l| l.as_millis()).unwrap_or(0);
                self.record(
                    LogLevel::Info,
                    "api",
                    format!("health check ok ({} ms)", latency),
                );
            }
            HealthStatus::Degraded => self.record(
                LogLevel::Warn,
                "api",
                format!(
                    "health check degraded: {}",
                    report.detail.as_deref().unwrap_or("unexpected response")
                ),
            ),
            HealthStatus::Unreachable => self.record(
                LogLevel::Error,
                "api",
                format!(
                    "health check failed: {}",
                    report.detail.as_deref().unwrap_or("no response")
                ),
            ),
        }

        self.sink.emit(DashboardEvent::Health(report.clone()));
        self.sink.emit(DashboardEvent::ProbeMetrics(metrics));
        report
    }

    async fn fetch_record_count(&self) {
        let count = match self.probe.record_count().await {
            Ok(n) => RecordCount::Value(n),
            Err(e) => {
                warn!(event = "scheduler.record_count_failed", error_code = e.error_code(), error = %e);
                self.record(LogLevel::Error, "api", format!("record count failed: {}", e));
                RecordCount::Error
            }
        };
        self.sink.emit(DashboardEvent::RecordCount(count));
    }

    fn update_system_info(&self) {
        let info = self.with_sampler(|s| s.system_info());
        self.sink.emit(DashboardEvent::SystemInfo(info));
    }

    async fn refresh_services(&self, api: HealthStatus) {
        let targets = self.config.service_targets();
        let checks = targets.iter().map(|t| async move {
            match &t.url {
                Some(url) => Some(self.probe.reachable(url).await),
                None => None,
            }
        });
        let results = join_all(checks).await;

        let rows: Vec<ServiceRow> = targets
            .iter()
            .zip(results)
            .map(|(t, reachable)| {
                let state = match (t.name, reachable) {
                    ("api", _) => match api {
                        HealthStatus::Unreachable => ServiceState::Down,
                        _ => ServiceState::Up,
                    },
                    (_, Some(true)) => ServiceState::Up,
                    (_, Some(false)) => ServiceState::Down,
                    (_, None) => ServiceState::Unknown,
                };
                ServiceRow {
                    name: t.name.to_string(),
                    display_name: t.display_name.to_string(),
                    port: t.port,
                    state,
                }
            })
            .collect();

        for row in rows.iter().filter(|r| r.state == ServiceState::Down) {
            self.record(
                LogLevel::Warn,
                &row.name,
                format!("{} is not reachable", row.display_name),
            );
        }
        self.sink.emit(DashboardEvent::Services(rows));
    }

    async fn check_containers(&self) {
        let engine = self.containers.engine_status().await;
        self.sink.emit(DashboardEvent::ContainerEngine(engine));

        let counts = if engine == EngineStatus::Online {
            self.containers.counts().await
        } else {
            None
        };
        match counts {
            Some(c) => self.record(
                LogLevel::Debug,
                "containers",
                format!("{} running, {} stopped", c.running, c.stopped),
            ),
            None => self.record(LogLevel::Warn, "containers", "container engine unavailable"),
        }
        self.sink.emit(DashboardEvent::Containers(counts));
    }

    fn sample_resources(&self) {
        let gauges = self.with_sampler(|s| s.sample());
        let metrics = *lock(&self.metrics);
        self.sink.emit(DashboardEvent::Resources(gauges));
        self.sink.emit(DashboardEvent::ProbeMetrics(metrics));
    }

    fn regenerate_logs(&self) {
        let entries = lock(&self.activity).recent(LOG_WINDOW);
        self.sink.emit(DashboardEvent::Logs(entries));
    }

    fn with_sampler<R>(&self, f: impl FnOnce(&mut ResourceSampler) -> R) -> R {
        let mut guard = lock(&self.sampler);
        let sampler = guard.get_or_insert_with(ResourceSampler::new);
        f(sampler)
    }
}
