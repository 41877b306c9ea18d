//! Helpers for nicels.
//!
//! This module provides small utilities used across nicels:
//! - Color parsing from names or hex codes
//! - Case-folding lookups without heap allocation for short keys
//! - Parsing `--block-size` arguments
//! - Locating the home directory

use crate::config::BlockSize;

use crossterm::style::Color;
use std::path::PathBuf;

/// Keys up to this length are lowercased on the stack.
const LOWER_STACK_LEN: usize = 64;

/// Parses a string (color name or hex) into a [Color].
///
/// Supports standard names (red, green, etc.), their `bright-` variants
/// and hex values (#RRGGBB or #RGB). Unknown values fall back to [Color::Reset].
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().replace('_', "-").as_str() {
        "default" | "reset" | "none" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" | "purple" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "white" | "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" | "bright-black" => Color::DarkGrey,
        "bright-red" => Color::Red,
        "bright-green" => Color::Green,
        "bright-yellow" => Color::Yellow,
        "bright-blue" => Color::Blue,
        "bright-magenta" => Color::Magenta,
        "bright-cyan" => Color::Cyan,
        "bright-white" => Color::White,
        other => {
            if let Ok(n) = other.parse::<u8>() {
                return Color::AnsiValue(n);
            }
            if let Some(color) = other.strip_prefix('#') {
                let expanded = match color.len() {
                    6 => color.to_string(),
                    3 => color.chars().flat_map(|c| [c, c]).collect(),
                    _ => return Color::Reset,
                };
                if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                    return Color::Rgb {
                        r: ((rgb >> 16) & 0xFF) as u8,
                        g: ((rgb >> 8) & 0xFF) as u8,
                        b: (rgb & 0xFF) as u8,
                    };
                }
            }
            // fallback
            Color::Reset
        }
    }
}

/// Runs `f` with an ASCII-lowercased copy of `s`.
/// Short ASCII keys are lowered in a stack buffer, anything else goes through [str::to_lowercase].
pub fn with_lowered_stack<R>(s: &str, f: impl FnOnce(&str) -> R) -> R {
    if s.len() <= LOWER_STACK_LEN && s.is_ascii() {
        let mut buf = [0u8; LOWER_STACK_LEN];
        let bytes = &mut buf[..s.len()];
        bytes.copy_from_slice(s.as_bytes());
        bytes.make_ascii_lowercase();
        match std::str::from_utf8(bytes) {
            Ok(lowered) => f(lowered),
            Err(_) => f(&s.to_lowercase()),
        }
    } else {
        f(&s.to_lowercase())
    }
}

/// Parses a `--block-size` argument of the form `[N][K|M|G|T|P|E|Z|Y|R|Q][iB|B]`.
///
/// A unit letter alone or with `iB` is a power of 1024, with `B` a power of 1000.
/// When no number is given the unit text is kept as the printed suffix.
///
/// # Examples
/// `"M"` is 1048576 bytes printed with an `M` suffix, `"1KB"` is 1000 bytes with no suffix.
pub fn parse_block_size(arg: &str) -> Option<BlockSize> {
    let arg = arg.trim();
    if arg.is_empty() {
        return None;
    }

    let digits_end = arg
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(arg.len());
    let (num, unit) = arg.split_at(digits_end);

    let count: u64 = if num.is_empty() { 1 } else { num.parse().ok()? };
    if count == 0 {
        return None;
    }

    let multiplier = if unit.is_empty() {
        1
    } else {
        let mut chars = unit.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let exp = "KMGTPEZYRQ".find(letter)? as u32 + 1;
        let base: u64 = match chars.as_str() {
            "" | "iB" => 1024,
            "B" => 1000,
            _ => return None,
        };
        base.checked_pow(exp)?
    };

    Some(BlockSize {
        unit: count.checked_mul(multiplier)?,
        suffix: num.is_empty().then(|| unit.to_string()),
    })
}

/// Home directory of the current user, if known.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}
