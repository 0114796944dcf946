use std::io::{self, Write};
use crossterm::{queue, style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor}};

use super::shared::{service_color, truncate_str, writeln};
use super::RenderContext;

pub fn render_services(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
    let rows = &ctx.state.services;

    writeln(out, "")?;
    if rows.is_empty() {
        queue!(out, SetForegroundColor(Color::DarkGrey))?;
        writeln(out, "  Checking services...")?;
        queue!(out, ResetColor)?;
        return Ok(());
    }

    // Column header
    queue!(out, SetAttribute(Attribute::Bold))?;
    write!(out, "  {:<24} {:<20} {:<8} {}", "SERVICE", "NAME", "PORT", "STATUS")?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    write!(out, "\r\n")?;

    for row in rows {
        write!(
            out,
            "  {:<24} {:<20} {:<8} ",
            truncate_str(&row.display_name, 22),
            truncate_str(&row.name, 18),
            row.port_label(),
        )?;
        queue!(out, SetForegroundColor(service_color(row.state)))?;
        write!(out, "{}", row.state.label())?;
        queue!(out, ResetColor)?;
        write!(out, "\r\n")?;
    }

    let down = rows.iter().filter(|r| r.state == crate::model::ServiceState::Down).count();
    writeln(out, "")?;
    if down > 0 {
        queue!(out, SetForegroundColor(Color::Yellow))?;
        writeln(out, &format!("  {} of {} services not reachable", down, rows.len()))?;
        queue!(out, ResetColor)?;
    }

    Ok(())
}
