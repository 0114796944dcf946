use std::io::{self, Write};
use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use super::shared::{format_bytes_rate, progress_bar, write_field, write_heading, writeln};
use super::RenderContext;

const BAR_WIDTH: usize = 30;

fn write_gauge(out: &mut impl Write, label: &str, percent: f64, alert: bool) -> io::Result<()> {
    write!(out, "  {:<22}", label)?;
    let color = if alert { Color::Red } else { Color::Green };
    queue!(out, SetForegroundColor(color))?;
    write!(out, "{}", progress_bar(percent, BAR_WIDTH))?;
    queue!(out, ResetColor)?;
    write!(out, " {:>5.1}%\r\n", percent)?;
    Ok(())
}

pub fn render_monitoring(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
    let state = ctx.state;
    let settings = ctx.settings;

    writeln(out, "")?;
    write_heading(out, "  Resources")?;
    match &state.resources {
        Some(g) => {
            write_gauge(out, "CPU", g.cpu_percent, settings.over_threshold(g.cpu_percent, settings.cpu_threshold))?;
            write_gauge(
                out,
                "Memory",
                g.memory_percent,
                settings.over_threshold(g.memory_percent, settings.memory_threshold),
            )?;
            write_gauge(
                out,
                "Disk used",
                g.disk_used_percent,
                settings.over_threshold(g.disk_used_percent, settings.disk_threshold),
            )?;
            write_field(out, "Disk free", &format!("{:.1}%", g.disk_free_percent()), None)?;
            write_field(out, "Network in", &format_bytes_rate(g.net_in_rate), None)?;
            write_field(out, "Network out", &format_bytes_rate(g.net_out_rate), None)?;
        }
        None => {
            queue!(out, SetForegroundColor(Color::DarkGrey))?;
            writeln(out, "  Sampling...")?;
            queue!(out, ResetColor)?;
        }
    }

    let m = &state.probe_metrics;
    writeln(out, "")?;
    write_heading(out, "  API probes")?;
    write_field(out, "Probes", &m.total.to_string(), None)?;
    let failed_color = if m.failed > 0 { Some(Color::Red) } else { None };
    write_field(out, "Failed", &m.failed.to_string(), failed_color)?;
    write_field(out, "Failure rate", &format!("{:.1}%", m.failure_rate()), None)?;
    let latency = m
        .last_latency
        .map(|l| format!("{} ms", l.as_millis()))
        .unwrap_or_else(|| "-".to_string());
    write_field(out, "Last latency", &latency, None)?;

    Ok(())
}
