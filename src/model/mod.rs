// Re-export all model types from submodules.

pub use docker::{ContainerCounts, EngineStatus};
pub use health::{HealthBody, HealthReport, HealthStatus, ProbeMetrics, RecordCount};
pub use logs::{ActivityLog, LogEntry, LogLevel, ACTIVITY_CAPACITY, LOG_WINDOW};
pub use panel::Panel;
pub use services::{ServiceRow, ServiceState};
pub use settings::{clamp_refresh_secs, Settings, MAX_REFRESH_SECS, MIN_REFRESH_SECS};
pub use state::DashboardState;
pub use system::{format_uptime, LoadLevel, ResourceGauges, SystemInfo};

mod docker;
mod health;
mod logs;
mod panel;
mod services;
mod settings;
mod state;
mod system;
