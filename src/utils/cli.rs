//! Command-line argument parsing for nicels.
//!
//! [Cli] is the clap definition of every `nls` flag. [Cli::render_options] folds the
//! config file, the environment and the flags into one [RenderOptions], in that order
//! of precedence. Flags that pick the same setting override each other, so the last
//! one given on the command line wins.

use crate::config::load::load_theme_file;
use crate::config::{
    BlockSize, Config, General, IndicatorStyle, LayoutMode, QuotingStyle, RenderOptions,
    ReportMode, SizeMode, SortKey, Theme, TimeStyle,
};
use crate::core::terminal;
use crate::utils::parse_block_size;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// When to emit ANSI colors.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    #[value(alias = "yes", alias = "force")]
    Always,
    #[value(alias = "tty", alias = "if-tty")]
    Auto,
    #[value(alias = "no", alias = "none")]
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "nls", version)]
#[command(about = "List information about the FILEs (the current directory by default).")]
#[command(after_help = AFTER_HELP)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Paths to list
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    // Layout
    /// Use a long listing format
    #[arg(short = 'l', long = "long", overrides_with_all = LAYOUT_FLAGS)]
    pub long: bool,

    /// List one file per line
    #[arg(short = '1', long = "one-per-line", overrides_with_all = LAYOUT_FLAGS)]
    pub one_per_line: bool,

    /// List entries by lines instead of by columns
    #[arg(short = 'x', overrides_with_all = LAYOUT_FLAGS)]
    pub across: bool,

    /// List entries by columns
    #[arg(short = 'C', overrides_with_all = LAYOUT_FLAGS)]
    pub columns: bool,

    /// Fill width with a comma separated list of entries
    #[arg(short = 'm', overrides_with_all = LAYOUT_FLAGS)]
    pub commas: bool,

    /// Layout: long, single-column, vertical, across, comma or tree
    #[arg(long, value_enum, value_name = "WORD", overrides_with_all = LAYOUT_FLAGS)]
    pub format: Option<LayoutMode>,

    /// Show a tree, optionally limited to DEPTH levels
    #[arg(
        long,
        value_name = "DEPTH",
        num_args = 0..=1,
        require_equals = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tree: Option<Option<u64>>,

    /// Print a header row in the long format
    #[arg(long)]
    pub header: bool,

    /// Assume tab stops at each COLS instead of 8
    #[arg(short = 'T', long = "tabsize", value_name = "COLS")]
    pub tab_size: Option<usize>,

    /// Set output width to COLS; 0 means no limit
    #[arg(short = 'w', long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Print a summary after the listing
    #[arg(
        long,
        value_enum,
        value_name = "WORD",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "short"
    )]
    pub report: Option<ReportMode>,

    /// End each output line with NUL, not newline
    #[arg(long)]
    pub zero: bool,

    // Filtering
    /// Do not ignore entries starting with .
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Do not list implied . and ..
    #[arg(short = 'A', long = "almost-all")]
    pub almost_all: bool,

    /// Show only directories
    #[arg(short = 'd', long = "dirs", overrides_with = "files")]
    pub dirs: bool,

    /// Show only files
    #[arg(short = 'f', long = "files", overrides_with = "dirs")]
    pub files: bool,

    /// Do not list implied entries ending with ~
    #[arg(short = 'B', long = "ignore-backups")]
    pub ignore_backups: bool,

    /// Do not list entries matching PATTERN
    #[arg(long, value_name = "PATTERN")]
    pub hide: Vec<String>,

    /// Do not list entries matching PATTERN (same as --hide)
    #[arg(short = 'I', long, value_name = "PATTERN")]
    pub ignore: Vec<String>,

    // Sorting
    /// Sort by modification time, newest first
    #[arg(short = 't', overrides_with_all = SORT_FLAGS)]
    pub sort_time: bool,

    /// Sort by file size, largest first
    #[arg(short = 'S', overrides_with_all = SORT_FLAGS)]
    pub sort_size: bool,

    /// Sort alphabetically by entry extension
    #[arg(short = 'X', overrides_with_all = SORT_FLAGS)]
    pub sort_extension: bool,

    /// Do not sort; list entries in directory order
    #[arg(short = 'U', overrides_with_all = SORT_FLAGS)]
    pub unsorted: bool,

    /// Reverse order while sorting
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Sort by WORD instead of name: none, size, time, extension
    #[arg(long, value_enum, value_name = "WORD", overrides_with_all = SORT_FLAGS)]
    pub sort: Option<SortKey>,

    /// Group directories before files
    #[arg(
        long = "group-directories-first",
        visible_alias = "sd",
        alias = "sort-dirs",
        overrides_with = "files_first"
    )]
    pub dirs_first: bool,

    /// Group files before directories
    #[arg(long = "sf", alias = "sort-files", overrides_with = "dirs_first")]
    pub files_first: bool,

    /// Sort dot-files and dot-folders first
    #[arg(long = "df", alias = "dots-first")]
    pub dots_first: bool,

    // Appearance
    /// Print C-style escapes for nongraphic characters
    #[arg(short = 'b', long = "escape", overrides_with_all = QUOTING_FLAGS)]
    pub escape: bool,

    /// Print entry names without quoting
    #[arg(short = 'N', long = "literal", overrides_with_all = QUOTING_FLAGS)]
    pub literal: bool,

    /// Enclose entry names in double quotes
    #[arg(short = 'Q', long = "quote-name", overrides_with_all = QUOTING_FLAGS)]
    pub quote_name: bool,

    /// Use quoting style WORD for entry names
    #[arg(long = "quoting-style", value_enum, value_name = "WORD", overrides_with_all = QUOTING_FLAGS)]
    pub quoting_style: Option<QuotingStyle>,

    /// Append / indicator to directories
    #[arg(short = 'p', overrides_with = "indicator_style")]
    pub slash: bool,

    /// Append indicator with style WORD to entry names: none, slash
    #[arg(long = "indicator-style", value_enum, value_name = "WORD", overrides_with = "slash")]
    pub indicator_style: Option<IndicatorStyle>,

    /// Do not print icons
    #[arg(long = "no-icons", alias = "without-icons")]
    pub no_icons: bool,

    /// Do not color the output
    #[arg(long = "no-color", overrides_with = "color")]
    pub no_color: bool,

    /// Color the output WHEN: always, auto, never
    #[arg(
        long,
        value_enum,
        value_name = "WHEN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "always",
        overrides_with = "no_color"
    )]
    pub color: Option<ColorWhen>,

    /// Use the light color scheme
    #[arg(long, overrides_with = "dark")]
    pub light: bool,

    /// Use the dark color scheme
    #[arg(long, overrides_with = "light")]
    pub dark: bool,

    /// Print ? instead of nongraphic characters
    #[arg(short = 'q', long = "hide-control-chars", overrides_with = "show_control_chars")]
    pub hide_control_chars: bool,

    /// Show nongraphic characters as-is
    #[arg(long = "show-control-chars", overrides_with = "hide_control_chars")]
    pub show_control_chars: bool,

    /// Time/date format: full-iso, long-iso, iso, locale, +FORMAT
    #[arg(long = "time-style", value_name = "TIME_STYLE", overrides_with = "full_time")]
    pub time_style: Option<String>,

    /// Like -l --time-style=full-iso
    #[arg(long = "full-time", overrides_with = "time_style")]
    pub full_time: bool,

    /// Hyperlink entry names
    #[arg(long)]
    pub hyperlink: bool,

    // Information
    /// Print the index number of each entry
    #[arg(short = 'i', long)]
    pub inode: bool,

    /// Like -l, but do not list group information
    #[arg(short = 'o')]
    pub long_no_group: bool,

    /// Like -l, but do not list owner
    #[arg(short = 'g')]
    pub long_no_owner: bool,

    /// In a long listing, don't print group names
    #[arg(short = 'G', long = "no-group")]
    pub no_group: bool,

    /// Like -l, but list numeric user and group IDs
    #[arg(short = 'n', long = "numeric-uid-gid")]
    pub numeric_ids: bool,

    /// Print sizes in bytes
    #[arg(long, alias = "non-human-readable", overrides_with = "block_size")]
    pub bytes: bool,

    /// Print the allocated size of each entry, in blocks
    #[arg(short = 's', long = "size")]
    pub show_blocks: bool,

    /// Scale sizes by SIZE when printing them
    #[arg(
        long = "block-size",
        value_name = "SIZE",
        value_parser = block_size_arg,
        overrides_with = "bytes"
    )]
    pub block_size: Option<BlockSize>,

    /// Show information for the target of symbolic links
    #[arg(short = 'L', long)]
    pub dereference: bool,

    /// Show git status for each entry
    #[arg(long = "gs", alias = "git-status")]
    pub git_status: bool,

    // Configuration
    /// Read colors from a theme file instead of the config
    #[arg(long, value_name = "PATH")]
    pub theme: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init: bool,

    /// Print debug diagnostics on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

const LAYOUT_FLAGS: [&str; 6] = ["long", "one_per_line", "across", "columns", "commas", "format"];
const SORT_FLAGS: [&str; 5] = ["sort_time", "sort_size", "sort_extension", "unsorted", "sort"];
const QUOTING_FLAGS: [&str; 4] = ["escape", "literal", "quote_name", "quoting_style"];

const AFTER_HELP: &str = r#"The SIZE argument is an integer and optional unit (example: 10K is 10*1024).
Units are K,M,G,T,P,E,Z,Y,R,Q (powers of 1024) or KB,MB,... (powers of 1000).
Binary prefixes can be used, too: KiB=K, MiB=M, and so on.

The TIME_STYLE argument can be full-iso, long-iso, iso, locale, or +FORMAT.
The TIME_STYLE and QUOTING_STYLE environment variables set the defaults.

Exit status:
 0  if OK,
 1  if minor problems (e.g., cannot access subdirectory),
 2  if serious trouble (e.g., cannot access command-line argument)."#;

fn block_size_arg(arg: &str) -> Result<BlockSize, String> {
    parse_block_size(arg).ok_or_else(|| format!("invalid block size '{arg}'"))
}

/// Values read from the process environment that feed option resolution.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub quoting_style: Option<String>,
    pub time_style: Option<String>,
    pub color_auto: bool,
    pub terminal_width: Option<usize>,
}

impl Environment {
    /// Read the variables and probe the terminal.
    pub fn probe() -> Self {
        Environment {
            quoting_style: std::env::var("QUOTING_STYLE").ok(),
            time_style: std::env::var("TIME_STYLE").ok(),
            color_auto: terminal::color_auto(),
            terminal_width: terminal::terminal_width(),
        }
    }
}

impl Cli {
    /// Paths to list; the current directory when none were given.
    pub fn paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }

    /// Resolve the options for this run: config defaults, then environment, then flags.
    pub fn render_options(&self, general: &General, env: &Environment) -> RenderOptions {
        let mut opts = RenderOptions {
            icons: true,
            ..RenderOptions::default()
        };
        general.apply(&mut opts);

        if let Some(style) = env.quoting_style.as_deref().and_then(QuotingStyle::from_word) {
            opts.quoting = style;
        }
        if let Some(style) = env.time_style.as_deref() {
            opts.time_style = TimeStyle::parse(style);
        }

        self.apply_layout(&mut opts);
        self.apply_filters(&mut opts);
        self.apply_sorting(&mut opts);
        self.apply_appearance(&mut opts);
        self.apply_information(&mut opts);

        opts.color = match self.color_when() {
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Auto) => env.color_auto,
            None => general.color().unwrap_or(env.color_auto),
        };
        opts.terminal_width = env.terminal_width;
        opts
    }

    /// The theme for this run: `--theme PATH` or the config's `[theme]`, with `--light`/`--dark` applied.
    pub fn theme(&self, config: &Config) -> Theme {
        let user = match &self.theme {
            Some(path) => match load_theme_file(path) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!("{}; using the configured theme", e);
                    config.user_theme().clone()
                }
            },
            None => config.user_theme().clone(),
        };

        if self.light {
            user.with_scheme("light")
        } else if self.dark {
            user.with_scheme("dark")
        } else {
            user.with_overrides()
        }
    }

    fn color_when(&self) -> Option<ColorWhen> {
        if self.no_color {
            Some(ColorWhen::Never)
        } else {
            self.color
        }
    }

    fn apply_layout(&self, opts: &mut RenderOptions) {
        // -o, -g, -n and --full-time imply the long format unless a layout was picked.
        let implies_long =
            self.long_no_group || self.long_no_owner || self.numeric_ids || self.full_time;

        let layout = if self.long {
            Some(LayoutMode::Long)
        } else if self.one_per_line {
            Some(LayoutMode::SingleColumn)
        } else if self.across {
            Some(LayoutMode::ColumnsHorizontal)
        } else if self.columns {
            Some(LayoutMode::ColumnsVertical)
        } else if self.commas {
            Some(LayoutMode::CommaSeparated)
        } else if self.format.is_some() {
            self.format
        } else if implies_long {
            Some(LayoutMode::Long)
        } else {
            None
        };
        if let Some(layout) = layout {
            opts.layout = layout;
        }

        if let Some(depth) = self.tree {
            opts.layout = LayoutMode::Tree;
            opts.tree_depth = depth.map(|d| d as usize);
        }

        if self.header {
            opts.header = true;
        }
        if let Some(tab_size) = self.tab_size {
            opts.tab_size = tab_size;
        }
        if self.width.is_some() {
            opts.width = self.width;
        }
        if let Some(report) = self.report {
            opts.report = report;
        }
        if self.zero {
            opts.zero_terminate = true;
        }
    }

    fn apply_filters(&self, opts: &mut RenderOptions) {
        opts.all = self.all;
        opts.almost_all = self.almost_all && !self.all;
        opts.dirs_only = self.dirs;
        opts.files_only = self.files;
        opts.ignore_backups = self.ignore_backups;
        opts.hide_patterns = self.hide.clone();
        opts.ignore_patterns = self.ignore.clone();
    }

    fn apply_sorting(&self, opts: &mut RenderOptions) {
        let sort = if self.sort_time {
            Some(SortKey::Time)
        } else if self.sort_size {
            Some(SortKey::Size)
        } else if self.sort_extension {
            Some(SortKey::Extension)
        } else if self.unsorted {
            Some(SortKey::None)
        } else {
            self.sort
        };
        if let Some(sort) = sort {
            opts.sort = sort;
        }

        if self.reverse {
            opts.reverse = true;
        }
        if self.dirs_first {
            opts.dirs_first = true;
            opts.files_first = false;
        } else if self.files_first {
            opts.files_first = true;
            opts.dirs_first = false;
        }
        if self.dots_first {
            opts.dots_first = true;
        }
    }

    fn apply_appearance(&self, opts: &mut RenderOptions) {
        let quoting = if self.escape {
            Some(QuotingStyle::Escape)
        } else if self.literal {
            Some(QuotingStyle::Literal)
        } else if self.quote_name {
            Some(QuotingStyle::C)
        } else {
            self.quoting_style
        };
        if let Some(quoting) = quoting {
            opts.quoting = quoting;
        }

        if self.slash {
            opts.indicator = IndicatorStyle::Slash;
        } else if let Some(indicator) = self.indicator_style {
            opts.indicator = indicator;
        }

        if self.no_icons {
            opts.icons = false;
        }
        if self.hide_control_chars {
            opts.hide_control_chars = true;
        } else if self.show_control_chars {
            opts.hide_control_chars = false;
        }

        if self.full_time {
            opts.time_style = TimeStyle::FullIso;
        } else if let Some(style) = &self.time_style {
            opts.time_style = TimeStyle::parse(style);
        }
        if self.hyperlink {
            opts.hyperlink = true;
        }
    }

    fn apply_information(&self, opts: &mut RenderOptions) {
        if self.inode {
            opts.show_inode = true;
        }
        if self.long_no_group || self.no_group {
            opts.show_group = false;
        }
        if self.long_no_owner {
            opts.show_owner = false;
        }
        if self.numeric_ids {
            opts.numeric_ids = true;
        }
        if self.show_blocks {
            opts.show_blocks = true;
        }
        if let Some(block_size) = &self.block_size {
            opts.size_mode = SizeMode::Scaled(block_size.clone());
        } else if self.bytes {
            opts.size_mode = SizeMode::Bytes;
        }
        if self.dereference {
            opts.dereference = true;
        }
        if self.git_status {
            opts.git_status = true;
        }
    }
}
