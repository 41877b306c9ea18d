//! Decorated name cells.
//!
//! A [Cell] is the fully decorated text of one entry together with its display
//! width. The width is measured once, here, and layouts only ever read it.

use crate::config::theme::paint;
use crate::config::{IndicatorStyle, LayoutMode, RenderOptions, Theme};
use crate::core::Entry;
use crate::ui::icons::nerd_font_icon;
use crate::ui::quoting::{quote, sanitize};
use crate::ui::width::visible_width;

use crossterm::style::Color;

/// Width of the git badge, including its trailing blank.
pub const BADGE_WIDTH: usize = 3;
const DEAD_LINK: &str = " [Dead link]";

/// One rendered entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    /// Measure `text` once and keep the result.
    pub fn new(text: String, tab_stop: usize) -> Self {
        let width = visible_width(&text, tab_stop);
        Cell { text, width }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Builds [Cell]s for entries under one set of options and one theme.
pub struct CellBuilder<'a> {
    options: &'a RenderOptions,
    theme: &'a Theme,
    show_target: bool,
}

impl<'a> CellBuilder<'a> {
    pub fn new(options: &'a RenderOptions, theme: &'a Theme) -> Self {
        CellBuilder {
            options,
            theme,
            show_target: options.layout == LayoutMode::Long,
        }
    }

    /// Decorated cell for `entry`: badge, icon, name, indicator, link target.
    pub fn build(&self, entry: &Entry) -> Cell {
        let mut text = String::new();
        if self.options.git_status {
            text.push_str(&self.badge(entry));
        }
        text.push_str(&self.name(entry));
        if self.show_target {
            text.push_str(&self.target(entry));
        }
        Cell::new(text, self.options.tab_size)
    }

    pub fn build_all(&self, entries: &[Entry]) -> Vec<Cell> {
        entries.iter().map(|e| self.build(e)).collect()
    }

    /// Git code, or blanks, padded to [BADGE_WIDTH].
    pub fn badge(&self, entry: &Entry) -> String {
        let code = entry.git_status().unwrap_or("");
        let padded = format!("{:<width$}", code, width = BADGE_WIDTH);
        if !self.options.color {
            return padded;
        }
        padded
            .chars()
            .map(|c| match c {
                ' ' => " ".to_string(),
                c => paint(self.theme.git_color(c), &c.to_string()),
            })
            .collect()
    }

    /// Icon, colored quoted name and indicator, wrapped in a hyperlink when enabled.
    pub fn name(&self, entry: &Entry) -> String {
        let color = self.theme.entry_color(entry);
        let mut label = String::new();

        if self.options.icons {
            label.push_str(&self.paint(color, nerd_font_icon(entry)));
            label.push(' ');
        }

        let presented = self.present(entry.name());
        label.push_str(&self.paint(color, &presented));

        if self.options.indicator == IndicatorStyle::Slash && entry.is_dir() && !presented.ends_with('/') {
            label.push('/');
        }

        if self.options.hyperlink {
            hyperlink(entry, &label)
        } else {
            label
        }
    }

    /// ` -> target` for symlinks, plus ` [Dead link]` when the target is missing.
    pub fn target(&self, entry: &Entry) -> String {
        let Some(target) = entry.symlink_target() else {
            return String::new();
        };
        let broken = entry.is_broken_symlink();
        let mut out = String::from(" -> ");
        out.push_str(&self.paint(self.theme.target_color(broken), &self.present(target)));
        if broken {
            out.push_str(&self.paint(self.theme.target_color(true), DEAD_LINK));
        }
        out
    }

    /// Sanitize when requested, then quote.
    fn present(&self, raw: &str) -> String {
        if self.options.hide_control_chars {
            quote(&sanitize(raw, self.options.tab_size > 0), self.options.quoting)
        } else {
            quote(raw, self.options.quoting)
        }
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.options.color {
            paint(color, text)
        } else {
            text.to_string()
        }
    }
}

/// Wrap `text` in an OSC 8 hyperlink to the entry's absolute path.
pub fn hyperlink(entry: &Entry, text: &str) -> String {
    let abs = std::path::absolute(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
    format!(
        "\x1b]8;;file://{}\x1b\\{}\x1b]8;;\x1b\\",
        abs.display(),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuotingStyle;
    use crate::core::EntryKind;

    #[test]
    fn plain_cell_has_indicator() {
        let opts = RenderOptions::default();
        let theme = Theme::default();
        let builder = CellBuilder::new(&opts, &theme);

        let cell = builder.build(&Entry::new("src", EntryKind::Directory));
        assert_eq!(cell.text(), "src/");
        assert_eq!(cell.width(), 4);
    }

    #[test]
    fn color_does_not_change_width() {
        let opts = RenderOptions {
            color: true,
            icons: true,
            ..RenderOptions::default()
        };
        let theme = Theme::default();
        let cell = CellBuilder::new(&opts, &theme).build(&Entry::new("main.rs", EntryKind::Regular));
        assert!(cell.text().contains('\x1b'));
        assert_eq!(cell.width(), 2 + "main.rs".len());
    }

    #[test]
    fn badge_is_padded_before_name() {
        let opts = RenderOptions {
            git_status: true,
            ..RenderOptions::default()
        };
        let theme = Theme::default();
        let builder = CellBuilder::new(&opts, &theme);

        let dirty = builder.build(&Entry::new("a", EntryKind::Regular).with_git_status("??"));
        assert_eq!(dirty.text(), "?? a");
        let clean = builder.build(&Entry::new("b", EntryKind::Regular));
        assert_eq!(clean.text(), "   b");
        assert_eq!(clean.width(), 4);
    }

    #[test]
    fn long_layout_shows_link_target() {
        let opts = RenderOptions {
            layout: LayoutMode::Long,
            quoting: QuotingStyle::Shell,
            ..RenderOptions::default()
        };
        let theme = Theme::default();
        let builder = CellBuilder::new(&opts, &theme);

        let link = Entry::new("cur", EntryKind::Symlink)
            .with_flags(Entry::IS_BROKEN_SYM)
            .with_symlink_target("old file");
        assert_eq!(builder.build(&link).text(), "cur -> 'old file' [Dead link]");
    }

    #[test]
    fn hyperlink_is_zero_width() {
        let opts = RenderOptions {
            hyperlink: true,
            ..RenderOptions::default()
        };
        let theme = Theme::default();
        let entry = Entry::new("a.txt", EntryKind::Regular).with_path("/tmp/a.txt".into());
        let cell = CellBuilder::new(&opts, &theme).build(&entry);
        assert!(cell.text().starts_with("\x1b]8;;file:///tmp/a.txt\x1b\\"));
        assert_eq!(cell.width(), 5);
    }
}
