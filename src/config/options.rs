//! Resolved render options for one invocation of nicels.
//!
//! [RenderOptions] is built once from the config file, environment and command line
//! (see [crate::utils::cli]) and then handed read-only to every stage of the pipeline.

use clap::ValueEnum;
use serde::Deserialize;

/// Fallback terminal width when neither a configured width nor a probed one is available.
pub const DEFAULT_WIDTH: usize = 80;
/// Default tab stop, as used by `ls -T`.
pub const DEFAULT_TAB_SIZE: usize = 8;

/// How entries are laid out on screen.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    Long,
    #[value(alias = "single", alias = "1")]
    SingleColumn,
    #[default]
    #[value(name = "vertical", alias = "columns", alias = "column")]
    #[serde(alias = "vertical", alias = "columns")]
    ColumnsVertical,
    #[value(name = "across", alias = "horizontal")]
    #[serde(alias = "across", alias = "horizontal")]
    ColumnsHorizontal,
    #[value(name = "comma", alias = "commas")]
    #[serde(alias = "comma")]
    CommaSeparated,
    Tree,
}

/// Primary ordering key.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    #[value(alias = "mtime")]
    Time,
    Size,
    #[value(alias = "ext")]
    Extension,
    None,
}

/// Name quoting discipline.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuotingStyle {
    #[default]
    Literal,
    Locale,
    Shell,
    ShellAlways,
    ShellEscape,
    ShellEscapeAlways,
    C,
    Escape,
}

impl QuotingStyle {
    /// Parse the word accepted by `--quoting-style` and the `QUOTING_STYLE` variable.
    pub fn from_word(word: &str) -> Option<Self> {
        QuotingStyle::from_str(word, true).ok()
    }
}

/// Suffix appended to names to mark their type.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorStyle {
    #[value(alias = "off")]
    None,
    #[default]
    #[value(alias = "slashes")]
    Slash,
}

/// Summary printed after the listing.
#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    #[default]
    None,
    Short,
    Long,
}

/// Scaling unit given by `--block-size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSize {
    pub unit: u64,
    /// Printed after scaled values when the argument carried no number (e.g. `--block-size=M`).
    pub suffix: Option<String>,
}

/// How the size column is printed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SizeMode {
    #[default]
    Human,
    Bytes,
    Scaled(BlockSize),
}

/// Timestamp presentation for the long format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeStyle {
    #[default]
    Locale,
    LongIso,
    FullIso,
    Iso,
    Custom(String),
}

impl TimeStyle {
    /// Parse a `--time-style` word. Unknown words are used as a strftime pattern.
    pub fn parse(word: &str) -> Self {
        if let Some(fmt) = word.strip_prefix('+') {
            return TimeStyle::Custom(fmt.to_string());
        }
        let word = word.strip_prefix("posix-").unwrap_or(word);
        match word.to_ascii_lowercase().as_str() {
            "" | "locale" | "default" => TimeStyle::Locale,
            "long-iso" => TimeStyle::LongIso,
            "full-iso" => TimeStyle::FullIso,
            "iso" | "iso8601" => TimeStyle::Iso,
            _ => TimeStyle::Custom(word.to_string()),
        }
    }

    /// The chrono format string for this style.
    pub fn pattern(&self) -> &str {
        match self {
            TimeStyle::Locale => "%a %b %d %H:%M:%S %Y",
            TimeStyle::LongIso => "%Y-%m-%d %H:%M",
            TimeStyle::FullIso => "%Y-%m-%d %H:%M:%S %z",
            TimeStyle::Iso => "%Y-%m-%d",
            TimeStyle::Custom(fmt) => fmt,
        }
    }
}

/// Everything the render pipeline needs to know about one invocation.
///
/// Constructed by the CLI layer and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub layout: LayoutMode,
    pub sort: SortKey,
    pub reverse: bool,
    pub dirs_first: bool,
    pub files_first: bool,
    pub dots_first: bool,

    pub all: bool,
    pub almost_all: bool,
    pub ignore_backups: bool,
    pub dirs_only: bool,
    pub files_only: bool,
    pub hide_patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,

    pub quoting: QuotingStyle,
    pub hide_control_chars: bool,
    pub indicator: IndicatorStyle,
    pub color: bool,
    pub icons: bool,
    pub hyperlink: bool,

    pub tab_size: usize,
    /// Width given with `-w`; `Some(0)` means unlimited.
    pub width: Option<usize>,
    /// Width probed from the terminal, if any.
    pub terminal_width: Option<usize>,

    pub show_inode: bool,
    pub show_blocks: bool,
    pub show_owner: bool,
    pub show_group: bool,
    pub numeric_ids: bool,
    pub size_mode: SizeMode,
    pub time_style: TimeStyle,
    pub header: bool,

    pub git_status: bool,
    pub zero_terminate: bool,
    pub report: ReportMode,
    pub tree_depth: Option<usize>,
    pub dereference: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            layout: LayoutMode::default(),
            sort: SortKey::default(),
            reverse: false,
            dirs_first: false,
            files_first: false,
            dots_first: false,
            all: false,
            almost_all: false,
            ignore_backups: false,
            dirs_only: false,
            files_only: false,
            hide_patterns: Vec::new(),
            ignore_patterns: Vec::new(),
            quoting: QuotingStyle::default(),
            hide_control_chars: false,
            indicator: IndicatorStyle::default(),
            color: false,
            icons: false,
            hyperlink: false,
            tab_size: DEFAULT_TAB_SIZE,
            width: None,
            terminal_width: None,
            show_inode: false,
            show_blocks: false,
            show_owner: true,
            show_group: true,
            numeric_ids: false,
            size_mode: SizeMode::default(),
            time_style: TimeStyle::default(),
            header: false,
            git_status: false,
            zero_terminate: false,
            report: ReportMode::default(),
            tree_depth: None,
            dereference: false,
        }
    }
}

impl RenderOptions {
    /// Width available to packed layouts.
    ///
    /// An explicit width wins (0 meaning unlimited), then the probed terminal, then [DEFAULT_WIDTH].
    pub fn effective_width(&self) -> usize {
        match self.width {
            Some(0) => usize::MAX,
            Some(w) => w,
            None => self.terminal_width.unwrap_or(DEFAULT_WIDTH),
        }
    }

    /// Whether line wrapping applies at all.
    #[inline]
    pub fn is_width_bounded(&self) -> bool {
        self.effective_width() != usize::MAX
    }

    #[inline]
    pub fn line_terminator(&self) -> &'static str {
        if self.zero_terminate { "\0" } else { "\n" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_resolution_order() {
        let mut opts = RenderOptions::default();
        assert_eq!(opts.effective_width(), DEFAULT_WIDTH);

        opts.terminal_width = Some(132);
        assert_eq!(opts.effective_width(), 132);

        opts.width = Some(40);
        assert_eq!(opts.effective_width(), 40);

        opts.width = Some(0);
        assert_eq!(opts.effective_width(), usize::MAX);
        assert!(!opts.is_width_bounded());
    }

    #[test]
    fn time_style_words() {
        assert_eq!(TimeStyle::parse("long-iso"), TimeStyle::LongIso);
        assert_eq!(TimeStyle::parse("posix-iso"), TimeStyle::Iso);
        assert_eq!(
            TimeStyle::parse("+%H:%M"),
            TimeStyle::Custom("%H:%M".to_string())
        );
        assert_eq!(TimeStyle::parse("default").pattern(), "%a %b %d %H:%M:%S %Y");
    }

    #[test]
    fn quoting_words_are_case_insensitive() {
        assert_eq!(
            QuotingStyle::from_word("Shell-Escape-Always"),
            Some(QuotingStyle::ShellEscapeAlways)
        );
        assert_eq!(QuotingStyle::from_word("c"), Some(QuotingStyle::C));
        assert_eq!(QuotingStyle::from_word("bogus"), None);
    }

    #[test]
    fn zero_terminate_switches_line_end() {
        let mut opts = RenderOptions::default();
        assert_eq!(opts.line_terminator(), "\n");
        opts.zero_terminate = true;
        assert_eq!(opts.line_terminator(), "\0");
    }
}
