use std::io::{self, Write};
use crossterm::style::Color;

use crate::model::{format_uptime, LoadLevel};
use super::shared::{engine_color, health_color, write_field, write_heading, writeln};
use super::RenderContext;

pub fn render_overview(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
    let state = ctx.state;

    writeln(out, "")?;
    write_heading(out, "  API")?;
    let status = state.health.as_ref().map(|h| h.status);
    write_field(out, "Status", state.api_status_label(), Some(health_color(status)))?;
    if let Some(report) = &state.health {
        if let Some(version) = &report.version {
            write_field(out, "Version", version, None)?;
        }
        if let Some(latency) = report.latency {
            write_field(out, "Latency", &format!("{} ms", latency.as_millis()), None)?;
        }
        if let Some(detail) = &report.detail {
            write_field(out, "Detail", detail, Some(Color::DarkGrey))?;
        }
    }
    write_field(out, "Price records", &state.record_count_label(), None)?;
    write_field(out, "Endpoint", &ctx.config.health_url(), Some(Color::DarkGrey))?;

    writeln(out, "")?;
    write_heading(out, "  Host")?;
    match &state.system_info {
        Some(info) => {
            write_field(out, "Uptime", &format_uptime(info.uptime_secs), None)?;
            let load_color = match info.load {
                LoadLevel::Normal => Color::Green,
                LoadLevel::Elevated => Color::Yellow,
                LoadLevel::High => Color::Red,
            };
            write_field(
                out,
                "Load",
                &format!("{} ({:.2})", info.load.label(), info.load_1m),
                Some(load_color),
            )?;
            write_field(out, "Last update", &info.last_update.format("%H:%M:%S").to_string(), None)?;
        }
        None => write_field(out, "Uptime", "...", Some(Color::DarkGrey))?,
    }

    writeln(out, "")?;
    write_heading(out, "  Containers")?;
    write_field(out, "Engine", state.engine.label(), Some(engine_color(state.engine)))?;
    if let Some(counts) = &state.containers {
        write_field(
            out,
            "Running / stopped",
            &format!("{} / {}", counts.running, counts.stopped),
            None,
        )?;
    }

    writeln(out, "")?;
    write_heading(out, "  Refresh")?;
    let schedule = if ctx.scheduler_running {
        format!("every {}s", ctx.config.refresh_interval.as_secs())
    } else {
        "stopped".to_string()
    };
    write_field(out, "Schedule", &schedule, None)?;
    let (trigger, color) = if state.refresh_enabled {
        ("ready (r)", Color::Green)
    } else {
        ("refreshing...", Color::Yellow)
    };
    write_field(out, "Manual refresh", trigger, Some(color))?;

    Ok(())
}
