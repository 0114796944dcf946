use std::io::{self, Write};
use crossterm::{queue, style::{Color, ResetColor, SetForegroundColor}};

use super::shared::{engine_color, write_field, write_heading, writeln};
use super::RenderContext;

pub fn render_containers(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
    let state = ctx.state;

    writeln(out, "")?;
    write_heading(out, "  Container manager")?;
    match &state.frame_url {
        Some(url) => write_field(out, "Address", &format!("{} (p to open)", url), None)?,
        None => write_field(out, "Address", "not bound", Some(Color::DarkGrey))?,
    }

    writeln(out, "")?;
    write_heading(out, "  Engine")?;
    write_field(out, "Status", state.engine.label(), Some(engine_color(state.engine)))?;

    match &state.containers {
        Some(counts) => {
            write_field(out, "Running", &counts.running.to_string(), Some(Color::Green))?;
            let stopped_color = if counts.stopped > 0 { Some(Color::Yellow) } else { None };
            write_field(out, "Stopped", &counts.stopped.to_string(), stopped_color)?;
            write_field(out, "Total containers", &counts.total().to_string(), None)?;
            write_field(out, "Images", &counts.images.to_string(), None)?;
            write_field(out, "Networks", &counts.networks.to_string(), None)?;
        }
        None => {
            writeln(out, "")?;
            queue!(out, SetForegroundColor(Color::DarkGrey))?;
            writeln(out, "  Container counters unavailable.")?;
            writeln(out, "  Make sure Docker is running and the socket is readable.")?;
            queue!(out, ResetColor)?;
        }
    }

    Ok(())
}
