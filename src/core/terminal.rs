//! Terminal capability detection for nicels.
//!
//! Answers two questions about stdout: how wide it is and whether color should be
//! used when the user did not say.

use crossterm::tty::IsTty;

use std::io;

/// Is stdout attached to a terminal?
pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}

/// Width of the output in columns.
///
/// Asks the terminal when stdout is one, otherwise reads `COLUMNS`.
/// `None` lets the caller fall back to its default.
pub fn terminal_width() -> Option<usize> {
    if stdout_is_tty()
        && let Ok((cols, _)) = crossterm::terminal::size()
        && cols > 0
    {
        return Some(cols as usize);
    }
    columns_from_env(std::env::var("COLUMNS").ok().as_deref())
}

fn columns_from_env(value: Option<&str>) -> Option<usize> {
    value?.trim().parse::<usize>().ok().filter(|&w| w > 0)
}

/// Color choice for `--color=auto`: on for terminals unless `NO_COLOR` is set.
pub fn color_auto() -> bool {
    stdout_is_tty() && std::env::var_os("NO_COLOR").is_none()
}
