//! Theme configuration options for nicels
//!
//! This module defines the color table read from the `[theme]` section of nicels.toml.
//!
//! Also holds the internal schemes (`dark`, `light`) and the logic to apply user overrides on top of them.
//! The theme is built once at startup and then injected read-only into the renderer.

use crate::core::{Entry, EntryKind};
use crate::utils::parse_color;

use crossterm::style::Color;
use serde::Deserialize;

use std::sync::LazyLock;

/// Escape sequence restoring the default rendition.
pub const RESET: &str = "\x1b[0m";

/// Theme configuration options
/// Holds all color options used when decorating the listing.
/// # Examples
/// ```toml
/// [theme]
/// name = "light"
/// [theme.entry]
/// directory = "#5f87d7"
/// [theme.git]
/// untracked = "magenta"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    name: Option<String>,
    entry: EntryColors,
    git: GitColors,
    perms: PermColors,
    #[serde(deserialize_with = "deserialize_color_field")]
    tree: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    header: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    report: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            name: None,
            entry: EntryColors::default(),
            git: GitColors::default(),
            perms: PermColors::default(),
            tree: Color::DarkCyan,
            header: Color::DarkCyan,
            report: Color::Reset,
        }
    }
}

/// Macro to override a field in the target if it differs from the default.
/// This is used to apply user-defined overrides on top of a scheme.
macro_rules! override_if_changed {
    ($target:ident, $user:ident, $default:ident, $($field:ident),+) => {
        $(
            if $user.$field != $default.$field {
                $target.$field = $user.$field.clone();
            }
        )+
    };
}

/// Theme implementation
/// Provides color lookup per entry kind and the scheme/override logic.
impl Theme {
    /// Get internal default theme reference
    /// Used as the comparison base when applying user overrides.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Color for an entry's name, chosen by its kind and flags.
    pub fn entry_color(&self, entry: &Entry) -> Color {
        let c = &self.entry;
        match entry.kind() {
            EntryKind::Directory if entry.is_hidden() => c.hidden_dir,
            EntryKind::Directory => c.directory,
            EntryKind::Symlink if entry.is_broken_symlink() => c.dead_link,
            EntryKind::Symlink => c.symlink,
            EntryKind::Socket => c.socket,
            EntryKind::Block => c.block_device,
            EntryKind::Character => c.char_device,
            EntryKind::Fifo => c.fifo,
            EntryKind::Regular | EntryKind::Unknown => {
                if entry.is_hidden() {
                    c.hidden
                } else if entry.is_executable() {
                    c.executable
                } else if entry.is_recognized() {
                    c.recognized_file
                } else {
                    c.unrecognized_file
                }
            }
        }
    }

    /// Color for a symlink target shown after the arrow.
    pub fn target_color(&self, broken: bool) -> Color {
        if broken {
            self.entry.dead_link
        } else {
            self.entry.symlink
        }
    }

    /// Color for one git status letter.
    pub fn git_color(&self, code: char) -> Color {
        match code {
            'A' | 'C' => self.git.addition,
            'M' | 'R' | 'T' => self.git.modification,
            'D' => self.git.deletion,
            '?' => self.git.untracked,
            'U' => self.git.conflict,
            _ => Color::Reset,
        }
    }

    /// Color for one character of a permission string.
    pub fn perm_color(&self, index: usize, symbol: char) -> Color {
        let p = &self.perms;
        match (index, symbol) {
            (0, 'd') => p.dir,
            (0, 'l') => p.link,
            (0, _) => Color::Reset,
            (_, 'r') => p.read,
            (_, 'w') => p.write,
            (_, 'x' | 's' | 'S' | 't' | 'T') => p.exec,
            _ => Color::Reset,
        }
    }

    #[inline]
    pub fn tree(&self) -> Color {
        self.tree
    }

    #[inline]
    pub fn header(&self) -> Color {
        self.header
    }

    #[inline]
    pub fn report(&self) -> Color {
        self.report
    }

    /// Apply user overrides on top of a scheme if a known scheme name is provided.
    /// If no name is provided or the name is unknown, returns the theme as is.
    pub fn with_overrides(self) -> Self {
        let scheme = match self.name.as_deref() {
            Some("dark") | Some("default") => Some(Theme::default()),
            Some("light") => Some(light()),
            _ => None,
        };

        if let Some(mut base) = scheme {
            base.apply_user_overrides(self);
            base
        } else {
            self
        }
    }

    /// Switch to a named scheme while keeping user overrides from `self`.
    pub fn with_scheme(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self.with_overrides()
    }

    /// Apply user overrides on top of the current theme.
    /// Compares each field with the default theme and overrides if changed
    /// This allows to only specify the fields they want to change
    fn apply_user_overrides(&mut self, user: Theme) {
        let defaults = Theme::internal_defaults();

        self.entry.apply_user_overrides(&user.entry, &defaults.entry);
        self.git.apply_user_overrides(&user.git, &defaults.git);
        self.perms.apply_user_overrides(&user.perms, &defaults.perms);
        override_if_changed!(self, user, defaults, tree, header, report);

        if user.name.is_some() {
            self.name = user.name.clone();
        }
    }
}

/// Colors of entry names by kind.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EntryColors {
    #[serde(deserialize_with = "deserialize_color_field")]
    directory: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    hidden_dir: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    symlink: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    dead_link: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    executable: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    recognized_file: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    unrecognized_file: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    hidden: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    socket: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    block_device: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    char_device: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    fifo: Color,
}

impl Default for EntryColors {
    fn default() -> Self {
        EntryColors {
            directory: Color::DarkBlue,
            hidden_dir: Color::DarkBlue,
            symlink: Color::DarkCyan,
            dead_link: Color::DarkRed,
            executable: Color::DarkGreen,
            recognized_file: Color::Grey,
            unrecognized_file: Color::Grey,
            hidden: Color::Grey,
            socket: Color::DarkGreen,
            block_device: Color::DarkGreen,
            char_device: Color::DarkGreen,
            fifo: Color::DarkYellow,
        }
    }
}

impl EntryColors {
    fn apply_user_overrides(&mut self, user: &EntryColors, defaults: &EntryColors) {
        override_if_changed!(
            self,
            user,
            defaults,
            directory,
            hidden_dir,
            symlink,
            dead_link,
            executable,
            recognized_file,
            unrecognized_file,
            hidden,
            socket,
            block_device,
            char_device,
            fifo
        );
    }
}

/// Colors of git status badges.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GitColors {
    #[serde(deserialize_with = "deserialize_color_field")]
    addition: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    modification: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    deletion: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    untracked: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    conflict: Color,
}

impl Default for GitColors {
    fn default() -> Self {
        GitColors {
            addition: Color::DarkGreen,
            modification: Color::DarkYellow,
            deletion: Color::DarkRed,
            untracked: Color::DarkMagenta,
            conflict: Color::DarkRed,
        }
    }
}

impl GitColors {
    fn apply_user_overrides(&mut self, user: &GitColors, defaults: &GitColors) {
        override_if_changed!(
            self,
            user,
            defaults,
            addition,
            modification,
            deletion,
            untracked,
            conflict
        );
    }
}

/// Colors of the permission column.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PermColors {
    #[serde(deserialize_with = "deserialize_color_field")]
    read: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    write: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    exec: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    dir: Color,
    #[serde(deserialize_with = "deserialize_color_field")]
    link: Color,
}

impl Default for PermColors {
    fn default() -> Self {
        PermColors {
            read: Color::DarkGreen,
            write: Color::DarkRed,
            exec: Color::DarkYellow,
            dir: Color::DarkBlue,
            link: Color::DarkCyan,
        }
    }
}

impl PermColors {
    fn apply_user_overrides(&mut self, user: &PermColors, defaults: &PermColors) {
        override_if_changed!(self, user, defaults, read, write, exec, dir, link);
    }
}

/// Scheme tuned for light terminal backgrounds.
fn light() -> Theme {
    Theme {
        name: Some("light".to_string()),
        entry: EntryColors {
            directory: Color::AnsiValue(25),
            hidden_dir: Color::AnsiValue(25),
            symlink: Color::AnsiValue(30),
            dead_link: Color::AnsiValue(160),
            executable: Color::AnsiValue(28),
            recognized_file: Color::Black,
            unrecognized_file: Color::Black,
            hidden: Color::AnsiValue(242),
            fifo: Color::AnsiValue(130),
            ..EntryColors::default()
        },
        git: GitColors {
            modification: Color::AnsiValue(130),
            ..GitColors::default()
        },
        perms: PermColors {
            exec: Color::AnsiValue(130),
            ..PermColors::default()
        },
        tree: Color::AnsiValue(30),
        header: Color::AnsiValue(30),
        ..Theme::default()
    }
}

/// SGR sequence selecting `color` as foreground, or `None` for [Color::Reset].
pub fn ansi_fg(color: Color) -> Option<String> {
    let code = match color {
        Color::Reset => return None,
        Color::Black => "30".to_string(),
        Color::DarkRed => "31".to_string(),
        Color::DarkGreen => "32".to_string(),
        Color::DarkYellow => "33".to_string(),
        Color::DarkBlue => "34".to_string(),
        Color::DarkMagenta => "35".to_string(),
        Color::DarkCyan => "36".to_string(),
        Color::Grey => "37".to_string(),
        Color::DarkGrey => "90".to_string(),
        Color::Red => "91".to_string(),
        Color::Green => "92".to_string(),
        Color::Yellow => "93".to_string(),
        Color::Blue => "94".to_string(),
        Color::Magenta => "95".to_string(),
        Color::Cyan => "96".to_string(),
        Color::White => "97".to_string(),
        Color::AnsiValue(n) => format!("38;5;{}", n),
        Color::Rgb { r, g, b } => format!("38;2;{};{};{}", r, g, b),
    };
    Some(format!("\x1b[{}m", code))
}

/// Wrap `text` in the SGR sequence for `color` followed by [RESET].
/// Returns the text unchanged for [Color::Reset].
pub fn paint(color: Color, text: &str) -> String {
    match ansi_fg(color) {
        Some(seq) => {
            let mut out = String::with_capacity(seq.len() + text.len() + RESET.len());
            out.push_str(&seq);
            out.push_str(text);
            out.push_str(RESET);
            out
        }
        None => text.to_string(),
    }
}

// Helper function to deserialize Theme colors
fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
