use std::io::{self, Write};
use crossterm::{queue, style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor}};

use crate::model::{EngineStatus, HealthStatus, LogLevel, ServiceState};

/// Truncate a string to at most `max_len` characters (not bytes), appending "..."
/// if truncated. Safe for multi-byte UTF-8.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(keep).collect();
        format!("{}...", truncated)
    }
}

pub fn writeln(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}\r\n", text)
}

pub fn write_heading(out: &mut impl Write, text: &str) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Bold))?;
    write!(out, "{}\r\n", text)?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// `label: value` with the value in `color`.
pub fn write_field(out: &mut impl Write, label: &str, value: &str, color: Option<Color>) -> io::Result<()> {
    write!(out, "  {:<22}", label)?;
    if let Some(c) = color {
        queue!(out, SetForegroundColor(c))?;
    }
    write!(out, "{}\r\n", value)?;
    if color.is_some() {
        queue!(out, ResetColor)?;
    }
    Ok(())
}

pub fn health_color(status: Option<HealthStatus>) -> Color {
    match status {
        Some(HealthStatus::Reachable) => Color::Green,
        Some(HealthStatus::Degraded) => Color::Yellow,
        Some(HealthStatus::Unreachable) => Color::Red,
        None => Color::DarkGrey,
    }
}

pub fn engine_color(status: EngineStatus) -> Color {
    match status {
        EngineStatus::Online => Color::Green,
        EngineStatus::Offline => Color::Red,
        EngineStatus::Unknown => Color::DarkGrey,
    }
}

pub fn service_color(state: ServiceState) -> Color {
    match state {
        ServiceState::Up => Color::Green,
        ServiceState::Down => Color::Red,
        ServiceState::Unknown => Color::DarkGrey,
    }
}

pub fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Cyan,
        LogLevel::Debug => Color::Magenta,
    }
}

pub fn format_bytes_rate(bytes: u64) -> String {
    if bytes > 1_048_576 {
        format!("{:.2} MB/s", bytes as f64 / 1_048_576.0)
    } else if bytes > 1024 {
        format!("{:.2} KB/s", bytes as f64 / 1024.0)
    } else {
        format!("{} B/s", bytes)
    }
}

pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_long_string() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_str_utf8() {
        assert_eq!(truncate_str("café", 4), "café");
        assert_eq!(truncate_str("hello世界", 6), "hel...");
    }

    #[test]
    fn format_bytes_rate_units() {
        assert_eq!(format_bytes_rate(500), "500 B/s");
        assert_eq!(format_bytes_rate(2048), "2.00 KB/s");
        assert_eq!(format_bytes_rate(2_097_152), "2.00 MB/s");
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 10), "[░░░░░░░░░░]");
        assert_eq!(progress_bar(100.0, 5), "[█████]");
        assert_eq!(progress_bar(250.0, 4), "[████]");
    }

    #[test]
    fn write_field_pads_label() {
        let mut buf = Vec::new();
        write_field(&mut buf, "API", "running", None).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), format!("  {:<22}running\r\n", "API"));
    }
}
