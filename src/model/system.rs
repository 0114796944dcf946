use chrono::{DateTime, Local};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadLevel {
    #[default]
    Normal,
    Elevated,
    High,
}

impl LoadLevel {
    /// Classify the 1-minute load average against the core count.
    pub fn classify(load_1m: f64, cores: usize) -> Self {
        let cores = cores.max(1) as f64;
        let ratio = load_1m / cores;
        if ratio >= 1.0 {
            LoadLevel::High
        } else if ratio >= 0.7 {
            LoadLevel::Elevated
        } else {
            LoadLevel::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadLevel::Normal => "normal",
            LoadLevel::Elevated => "elevated",
            LoadLevel::High => "high",
        }
    }
}

/// Host facts shown on the overview.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemInfo {
    pub uptime_secs: u64,
    pub load_1m: f64,
    pub load: LoadLevel,
    pub last_update: DateTime<Local>,
}

/// Gauges shown on the monitoring panel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResourceGauges {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_used_percent: f64,
    pub net_in_rate: u64,
    pub net_out_rate: u64,
}

impl ResourceGauges {
    pub fn disk_free_percent(&self) -> f64 {
        (100.0 - self.disk_used_percent).max(0.0)
    }
}

/// Format seconds as "2d 3h 45m"; anything under a minute is "<1m".
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if parts.is_empty() {
        "<1m".to_string()
    } else {
        parts.join(" ")
    }
}
