use std::io::{self, Write};
use crossterm::{
    cursor, queue,
    style::{Color, SetForegroundColor, SetBackgroundColor, ResetColor},
};

use crate::model::Panel;

pub fn render_tab_bar(
    out: &mut impl Write,
    current: Panel,
    system_name: &str,
    time: &str,
    width: u16,
) -> io::Result<()> {
    write!(out, "  ")?;

    for panel in Panel::ALL {
        if panel == current {
            queue!(out, SetBackgroundColor(Color::DarkBlue), SetForegroundColor(Color::White))?;
        } else {
            queue!(out, SetForegroundColor(Color::DarkGrey))?;
        }
        write!(out, " {} {} ", panel.hotkey(), panel)?;
        queue!(out, ResetColor)?;
        write!(out, " ")?;
    }

    // Right-align the time
    let time_str = format!("{} - {} ", system_name, time);
    let col = (width as usize).saturating_sub(time_str.chars().count());
    queue!(out, cursor::MoveTo(col as u16, 0))?;
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}", time_str)?;
    queue!(out, ResetColor)?;

    write!(out, "\r\n")?;
    // Separator
    let sep: String = "─".repeat(width as usize);
    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}\r\n", sep)?;
    queue!(out, ResetColor)?;

    Ok(())
}
