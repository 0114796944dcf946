use std::io;

use crossterm::terminal;

use crate::view::{Presenter, RenderContext};

use super::App;

pub fn render(app: &App) -> io::Result<()> {
    let size = terminal::size()?;
    let ctx = RenderContext {
        state: &app.state,
        settings: &app.settings,
        config: &app.config,
        scheduler_running: app.scheduler.is_running(),
        log_auto_refresh: app.scheduler.log_auto_refresh(),
        status_message: app.status.as_ref().map(|s| s.text.as_str()),
        size,
    };

    let mut out = io::stdout().lock();
    Presenter::render(&mut out, &ctx)
}
