//! The refresh loop.
//!
//! One repeating timer; on every tick it asks the router which panel is on
//! screen and runs that panel's refresh routine as a separate task, so a
//! slow probe never holds the timer back. Ticks are not serialized: if a
//! probe takes longer than the interval, two dispatches for the same panel
//! can be in flight at once.

mod routines;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_REFRESH_INTERVAL, DashboardConfig};
use crate::docker::ContainerSource;
use crate::events::{DashboardEvent, EventSink};
use crate::model::{ActivityLog, LogEntry, LogLevel, Panel, ProbeMetrics, MAX_REFRESH_SECS};
use crate::probe::Probe;
use crate::router::SectionRouter;
use crate::sampler::ResourceSampler;

/// Longest period the timer accepts; larger requests are capped.
const MAX_TIMER_INTERVAL: Duration = Duration::from_secs(MAX_REFRESH_SECS);

/// Everything the scheduler talks to.
pub struct Collaborators {
    pub probe: Arc<dyn Probe>,
    pub containers: Arc<dyn ContainerSource>,
    pub sink: Arc<dyn EventSink>,
}

struct Inner {
    config: DashboardConfig,
    router: Arc<Mutex<SectionRouter>>,
    probe: Arc<dyn Probe>,
    containers: Arc<dyn ContainerSource>,
    sink: Arc<dyn EventSink>,
    /// Built on first use; the initial full refresh is not free.
    sampler: Mutex<Option<ResourceSampler>>,
    activity: Mutex<ActivityLog>,
    metrics: Mutex<ProbeMetrics>,
    log_auto_refresh: AtomicBool,
    trigger_enabled: AtomicBool,
    ticks: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
    handle: Handle,
}

/// Cheap to clone; clones share one timer.
#[derive(Clone)]
pub struct RefreshScheduler {
    inner: Arc<Inner>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl RefreshScheduler {
    pub fn new(
        config: DashboardConfig,
        router: Arc<Mutex<SectionRouter>>,
        collaborators: Collaborators,
        handle: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                router,
                probe: collaborators.probe,
                containers: collaborators.containers,
                sink: collaborators.sink,
                sampler: Mutex::new(None),
                activity: Mutex::new(ActivityLog::default()),
                metrics: Mutex::new(ProbeMetrics::default()),
                log_auto_refresh: AtomicBool::new(true),
                trigger_enabled: AtomicBool::new(true),
                ticks: AtomicU64::new(0),
                timer: Mutex::new(None),
                handle,
            }),
        }
    }

    /// Start the repeating timer, replacing any timer already running.
    /// The first tick fires one full interval from now.
    pub fn start(&self, interval: Duration) {
        let interval = if interval.is_zero() {
            warn!(event = "scheduler.zero_interval", "falling back to default interval");
            DEFAULT_REFRESH_INTERVAL
        } else if interval > MAX_TIMER_INTERVAL {
            warn!(event = "scheduler.interval_capped", requested_s = interval.as_secs());
            MAX_TIMER_INTERVAL
        } else {
            interval
        };

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = self.inner.handle.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else { break };
                inner.on_tick();
            }
        });

        let previous = lock(&self.inner.timer).replace(task);
        if let Some(prev) = previous {
            prev.abort();
            info!(event = "scheduler.restarted", interval_ms = interval.as_millis() as u64);
        } else {
            info!(event = "scheduler.started", interval_ms = interval.as_millis() as u64);
        }
    }

    pub fn stop(&self) {
        if let Some(task) = lock(&self.inner.timer).take() {
            task.abort();
            info!(event = "scheduler.stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner.timer)
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Number of timer ticks so far.
    pub fn tick_count(&self) -> u64 {
        self.inner.ticks.load(Ordering::Relaxed)
    }

    /// Run `panel`'s refresh routine. Never fails: probe failures end up
    /// as state in the emitted events.
    pub async fn dispatch(&self, panel: Panel) {
        self.inner.dispatch(panel).await;
    }

    /// Refresh the overview checks now, with the trigger disabled for the
    /// duration plus the cooldown. Returns `false` without doing anything
    /// if a manual refresh is already in progress.
    pub async fn refresh_now(&self) -> bool {
        let inner = &self.inner;
        if inner
            .trigger_enabled
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(event = "scheduler.refresh_ignored", reason = "already refreshing");
            return false;
        }
        inner.sink.emit(DashboardEvent::RefreshTrigger { enabled: false });
        inner.record(LogLevel::Info, "scheduler", "manual refresh started");

        inner.refresh_all().await;
        tokio::time::sleep(inner.config.effective_cooldown()).await;

        inner.trigger_enabled.store(true, Ordering::SeqCst);
        inner.sink.emit(DashboardEvent::RefreshTrigger { enabled: true });
        info!(event = "scheduler.manual_refresh_completed");
        true
    }

    /// The startup round of checks. Leaves the trigger alone.
    pub async fn run_initial_checks(&self) {
        self.inner.refresh_all().await;
    }

    pub fn trigger_enabled(&self) -> bool {
        self.inner.trigger_enabled.load(Ordering::SeqCst)
    }

    pub fn set_log_auto_refresh(&self, enabled: bool) {
        self.inner.log_auto_refresh.store(enabled, Ordering::SeqCst);
        info!(event = "scheduler.log_auto_refresh", enabled);
    }

    pub fn log_auto_refresh(&self) -> bool {
        self.inner.log_auto_refresh.load(Ordering::SeqCst)
    }

    /// Add an entry to the activity log shown on the logs panel.
    pub fn record(&self, level: LogLevel, source: &str, message: impl Into<String>) {
        self.inner.record(level, source, message);
    }

    pub fn clear_logs(&self) {
        lock(&self.inner.activity).clear();
        self.inner.sink.emit(DashboardEvent::Logs(Vec::new()));
    }

    pub fn recent_logs(&self, limit: usize) -> Vec<LogEntry> {
        lock(&self.inner.activity).recent(limit)
    }

    /// Spawn `refresh_now` on the runtime without waiting for it.
    pub fn spawn_refresh_now(&self) {
        let this = self.clone();
        self.inner.handle.spawn(async move {
            this.refresh_now().await;
        });
    }

    /// Spawn a one-off dispatch, used right after a panel switch.
    pub fn spawn_dispatch(&self, panel: Panel) {
        let inner = Arc::clone(&self.inner);
        self.inner.handle.spawn(async move {
            inner.dispatch(panel).await;
        });
    }
}

impl Inner {
    fn current_panel(&self) -> Panel {
        lock(&self.router).current_panel()
    }

    fn on_tick(self: Arc<Self>) {
        let n = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        let panel = self.current_panel();
        debug!(event = "scheduler.tick", tick = n, panel = panel.id());

        let handle = self.handle.clone();
        handle.spawn(async move {
            self.dispatch(panel).await;
        });
    }

    fn record(&self, level: LogLevel, source: &str, message: impl Into<String>) {
        lock(&self.activity).push(LogEntry::new(level, source, message));
    }
}
