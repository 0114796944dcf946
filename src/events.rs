//! Typed state changes emitted by the router and the scheduler.
//!
//! Neither component draws anything. They report what changed through an
//! [`EventSink`] and the terminal layer folds the events into
//! [`DashboardState`](crate::model::DashboardState).

use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::model::{
    ContainerCounts, EngineStatus, HealthReport, LogEntry, Panel, ProbeMetrics, RecordCount,
    ResourceGauges, ServiceRow, SystemInfo,
};

#[derive(Clone, Debug, PartialEq)]
pub enum DashboardEvent {
    PanelActivated(Panel),
    /// The container manager address was bound into the containers panel.
    FrameBound(String),
    Health(HealthReport),
    RecordCount(RecordCount),
    SystemInfo(SystemInfo),
    ProbeMetrics(ProbeMetrics),
    Services(Vec<ServiceRow>),
    ContainerEngine(EngineStatus),
    /// `None` when the engine could not be queried.
    Containers(Option<ContainerCounts>),
    Resources(ResourceGauges),
    Logs(Vec<LogEntry>),
    RefreshTrigger { enabled: bool },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: DashboardEvent);
}

impl EventSink for mpsc::UnboundedSender<DashboardEvent> {
    fn emit(&self, event: DashboardEvent) {
        // The receiver only goes away on shutdown.
        let _ = self.send(event);
    }
}

/// Keeps every event in memory. Used by `--check` and by tests.
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<DashboardEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<DashboardEvent> {
        let mut guard = self.events.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }

    pub fn snapshot(&self) -> Vec<DashboardEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: DashboardEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
