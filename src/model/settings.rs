use std::time::Duration;

use serde::{Deserialize, Serialize};

/// User-adjustable console settings. Stored as one flat JSON document;
/// any field missing from the stored copy takes its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub system_name: String,
    /// Seconds between automatic refreshes.
    pub refresh_interval: u64,
    pub timezone: String,
    pub enable_notifications: bool,
    /// Days.
    pub data_retention: u32,
    pub backup_frequency: String,
    pub auto_backup: bool,
    pub cpu_threshold: u8,
    pub memory_threshold: u8,
    pub disk_threshold: u8,
    pub enable_alerts: bool,
    /// Minutes.
    pub session_timeout: u32,
    pub log_level: String,
    pub enable_audit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system_name: "opsboard".to_string(),
            refresh_interval: 30,
            timezone: "UTC".to_string(),
            enable_notifications: true,
            data_retention: 30,
            backup_frequency: "daily".to_string(),
            auto_backup: true,
            cpu_threshold: 80,
            memory_threshold: 85,
            disk_threshold: 90,
            enable_alerts: true,
            session_timeout: 30,
            log_level: "INFO".to_string(),
            enable_audit: false,
        }
    }
}

pub const MIN_REFRESH_SECS: u64 = 5;
pub const MAX_REFRESH_SECS: u64 = 3600;

impl Settings {
    /// The stored interval clamped to `MIN_REFRESH_SECS..=MAX_REFRESH_SECS`,
    /// or `None` when it is zero.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval > 0)
            .then(|| Duration::from_secs(clamp_refresh_secs(self.refresh_interval)))
    }

    /// Step the refresh interval by `delta` seconds, clamped to a sane range.
    pub fn adjust_refresh_interval(&mut self, delta: i64) {
        let next = clamp_refresh_secs(self.refresh_interval).saturating_add_signed(delta);
        self.refresh_interval = clamp_refresh_secs(next);
    }

    /// Take an interval given on the command line as the working value, so
    /// later edits step from it.
    pub fn apply_interval_override(&mut self, secs: Option<u64>) {
        if let Some(secs) = secs {
            self.refresh_interval = clamp_refresh_secs(secs);
        }
    }

    /// Whether `percent` crosses `threshold` with alerts enabled.
    pub fn over_threshold(&self, percent: f64, threshold: u8) -> bool {
        self.enable_alerts && percent >= threshold as f64
    }

    /// Label/value pairs in display order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("System name", self.system_name.clone()),
            ("Refresh interval", format!("{}s", self.refresh_interval)),
            ("Timezone", self.timezone.clone()),
            ("Notifications", on_off(self.enable_notifications)),
            ("Data retention", format!("{} days", self.data_retention)),
            ("Backup frequency", self.backup_frequency.clone()),
            ("Auto backup", on_off(self.auto_backup)),
            ("CPU alert threshold", format!("{}%", self.cpu_threshold)),
            ("Memory alert threshold", format!("{}%", self.memory_threshold)),
            ("Disk alert threshold", format!("{}%", self.disk_threshold)),
            ("Alerts", on_off(self.enable_alerts)),
            ("Session timeout", format!("{} min", self.session_timeout)),
            ("Log level", self.log_level.clone()),
            ("Audit", on_off(self.enable_audit)),
        ]
    }
}

pub fn clamp_refresh_secs(secs: u64) -> u64 {
    secs.clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS)
}

fn on_off(v: bool) -> String {
    if v { "on" } else { "off" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"systemName":"prod","cpuThreshold":70}"#).unwrap();
        assert_eq!(s.system_name, "prod");
        assert_eq!(s.cpu_threshold, 70);
        assert_eq!(s.refresh_interval, 30);
        assert_eq!(s.disk_threshold, 90);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["refreshInterval"], 30);
        assert_eq!(json["enableAlerts"], true);
        assert!(json.get("refresh_interval").is_none());
    }

    #[test]
    fn refresh_interval_zero_means_unset() {
        let s = Settings {
            refresh_interval: 0,
            ..Default::default()
        };
        assert_eq!(s.refresh_interval(), None);
        assert_eq!(Settings::default().refresh_interval(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn adjust_refresh_interval_clamps() {
        let mut s = Settings::default();
        s.adjust_refresh_interval(-100);
        assert_eq!(s.refresh_interval, MIN_REFRESH_SECS);
        s.adjust_refresh_interval(10_000);
        assert_eq!(s.refresh_interval, MAX_REFRESH_SECS);
    }

    #[test]
    fn adjust_refresh_interval_saturates_at_extremes() {
        let mut s = Settings { refresh_interval: u64::MAX, ..Settings::default() };
        s.adjust_refresh_interval(i64::MAX);
        assert_eq!(s.refresh_interval, MAX_REFRESH_SECS);

        s.refresh_interval = u64::MAX;
        s.adjust_refresh_interval(i64::MIN);
        assert_eq!(s.refresh_interval, MIN_REFRESH_SECS);

        s.refresh_interval = 0;
        s.adjust_refresh_interval(i64::MIN);
        assert_eq!(s.refresh_interval, MIN_REFRESH_SECS);
    }

    #[test]
    fn stored_interval_out_of_range_is_clamped() {
        let huge: Settings = serde_json::from_str(r#"{"refreshInterval":18446744073709551615}"#).unwrap();
        assert_eq!(huge.refresh_interval(), Some(Duration::from_secs(MAX_REFRESH_SECS)));

        let tiny: Settings = serde_json::from_str(r#"{"refreshInterval":1}"#).unwrap();
        assert_eq!(tiny.refresh_interval(), Some(Duration::from_secs(MIN_REFRESH_SECS)));
    }

    #[test]
    fn interval_override_becomes_working_value() {
        let mut s = Settings::default();
        s.apply_interval_override(None);
        assert_eq!(s.refresh_interval, 30);

        s.apply_interval_override(Some(12));
        assert_eq!(s.refresh_interval, 12);
        s.adjust_refresh_interval(5);
        assert_eq!(s.refresh_interval, 17);

        s.apply_interval_override(Some(1));
        assert_eq!(s.refresh_interval, MIN_REFRESH_SECS);
    }

    #[test]
    fn thresholds_respect_alert_switch() {
        let mut s = Settings::default();
        assert!(s.over_threshold(81.0, s.cpu_threshold));
        assert!(!s.over_threshold(79.0, s.cpu_threshold));
        s.enable_alerts = false;
        assert!(!s.over_threshold(99.0, s.cpu_threshold));
    }
}
