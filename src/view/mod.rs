mod shared;
mod tab_bar;
mod overview;
mod services;
mod containers;
mod monitoring;
mod logs;
mod settings;

use std::io::{self, Write};
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};

use crate::config::DashboardConfig;
use crate::model::{DashboardState, Panel, Settings};

pub use shared::{format_bytes_rate, progress_bar, truncate_str};

/// Everything one frame is drawn from.
pub struct RenderContext<'a> {
    pub state: &'a DashboardState,
    pub settings: &'a Settings,
    pub config: &'a DashboardConfig,
    pub scheduler_running: bool,
    pub log_auto_refresh: bool,
    pub status_message: Option<&'a str>,
    /// Terminal (columns, rows).
    pub size: (u16, u16),
}

pub struct Presenter;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 10;

impl Presenter {
    /// Check if the terminal is large enough. If not, render a "too small"
    /// message and return `true` (meaning "skip normal rendering").
    pub fn render_size_guard() -> io::Result<bool> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            let mut out = std::io::stdout();
            execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            let y = rows / 2;
            let x = cols.saturating_sub(msg.len() as u16) / 2;
            queue!(out, cursor::MoveTo(x, y), SetForegroundColor(Color::Yellow))?;
            write!(out, "{}", msg)?;
            queue!(out, ResetColor)?;
            out.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Draw a whole frame: tab bar, the active panel, status line and footer.
    pub fn render(out: &mut impl Write, ctx: &RenderContext) -> io::Result<()> {
        queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        let panel = ctx.state.panel;
        tab_bar::render_tab_bar(out, panel, &ctx.settings.system_name, &time, ctx.size.0)?;

        match panel {
            Panel::Overview => overview::render_overview(out, ctx)?,
            Panel::Services => services::render_services(out, ctx)?,
            Panel::Containers => containers::render_containers(out, ctx)?,
            Panel::Monitoring => monitoring::render_monitoring(out, ctx)?,
            Panel::Logs => logs::render_logs(out, ctx)?,
            Panel::Settings => settings::render_settings(out, ctx)?,
        }

        let (width, height) = ctx.size;

        // Status message (action feedback)
        if let Some(msg) = ctx.status_message {
            queue!(
                out,
                cursor::MoveTo(1, height.saturating_sub(2)),
                SetForegroundColor(Color::Yellow),
                Print(truncate_str(msg, width.saturating_sub(2) as usize)),
                ResetColor
            )?;
        }

        // Footer
        let help = footer_help(panel);
        queue!(
            out,
            cursor::MoveTo(1, height.saturating_sub(1)),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{:<width$}", help, width = width.saturating_sub(1) as usize)),
            ResetColor
        )?;

        out.flush()
    }
}

fn footer_help(panel: Panel) -> &'static str {
    match panel {
        Panel::Overview | Panel::Services | Panel::Monitoring => {
            "q: Quit | 1-6/Tab: Switch | r: Refresh | p/m/g/d: Open UI"
        }
        Panel::Containers => "q: Quit | 1-6/Tab: Switch | r: Refresh | p: Open container manager",
        Panel::Logs => "q: Quit | 1-6/Tab: Switch | a: Toggle auto-refresh | c: Clear",
        Panel::Settings => "q: Quit | 1-6/Tab: Switch | +/-: Interval | s: Save | x: Reset",
    }
}
