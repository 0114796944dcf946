use std::io::{self, Write};
use crossterm::{queue, style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor}};

use super::shared::{level_color, truncate_str, writeln};
use super::RenderContext;

/// Rows taken by the tab bar, panel header and footer.
const CHROME_ROWS: usize = 6;

pub fn render_logs(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
    let width = ctx.size.0 as usize;
    let height = ctx.size.1 as usize;
    let entries = &ctx.state.logs;

    // Header
    let indicator = if ctx.log_auto_refresh { "AUTO-REFRESH" } else { "PAUSED" };
    writeln(out, "")?;
    queue!(out, SetAttribute(Attribute::Bold))?;
    if !ctx.log_auto_refresh {
        queue!(out, SetForegroundColor(Color::Yellow))?;
    }
    write!(out, "  Activity log ({} entries) - {}\r\n", entries.len(), indicator)?;
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;

    if entries.is_empty() {
        queue!(out, SetForegroundColor(Color::DarkGrey))?;
        writeln(out, "  No activity yet.")?;
        queue!(out, ResetColor)?;
        return Ok(());
    }

    // Newest at the bottom; show as many as fit.
    let area = height.saturating_sub(CHROME_ROWS).max(1);
    let start = entries.len().saturating_sub(area);
    for entry in &entries[start..] {
        write!(out, "  [{}] ", entry.timestamp.format("%Y-%m-%d %H:%M:%S"))?;
        queue!(out, SetForegroundColor(level_color(entry.level)))?;
        write!(out, "{:<5}", entry.level.to_string())?;
        queue!(out, ResetColor)?;
        let rest = format!(" [{}] {}", entry.source, entry.message);
        let room = width.saturating_sub(30);
        write!(out, "{}\r\n", truncate_str(&rest, room))?;
    }

    Ok(())
}
