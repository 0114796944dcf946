use std::io::{self, Write};
use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use super::shared::{write_field, write_heading, writeln};
use super::RenderContext;

pub fn render_settings(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
    writeln(out, "")?;
    write_heading(out, "  Settings")?;
    for (label, value) in ctx.settings.display_rows() {
        let color = (label == "Refresh interval").then_some(Color::Cyan);
        write_field(out, label, &value, color)?;
    }

    writeln(out, "")?;
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    let stored = match &ctx.config.settings_path {
        Some(path) => path.display().to_string(),
        None => "memory only".to_string(),
    };
    writeln(out, &format!("  Stored in {}", stored))?;
    queue!(out, ResetColor)?;

    Ok(())
}
