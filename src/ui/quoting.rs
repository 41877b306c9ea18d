//! Name quoting and control-character hiding.
//!
//! [sanitize] masks non-printable characters, [quote] applies one of the
//! [QuotingStyle] disciplines. When both are used, sanitize runs first.

use crate::config::QuotingStyle;

use std::fmt::Write;

/// Replace every control character in `name` with `?`.
/// Tabs are left alone when `keep_tabs` is set.
pub fn sanitize(name: &str, keep_tabs: bool) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() && !(keep_tabs && c == '\t') {
                '?'
            } else {
                c
            }
        })
        .collect()
}

/// Present `name` under `style`.
pub fn quote(name: &str, style: QuotingStyle) -> String {
    match style {
        QuotingStyle::Literal => name.to_string(),
        QuotingStyle::C | QuotingStyle::Locale => {
            let mut out = String::with_capacity(name.len() + 2);
            out.push('"');
            push_c_escaped(&mut out, name, '"');
            out.push('"');
            out
        }
        QuotingStyle::Escape => {
            let mut out = String::with_capacity(name.len());
            push_c_escaped(&mut out, name, '"');
            out
        }
        QuotingStyle::Shell => shell_quote(name, false),
        QuotingStyle::ShellAlways => shell_quote(name, true),
        QuotingStyle::ShellEscape => shell_escape_quote(name, false),
        QuotingStyle::ShellEscapeAlways => shell_escape_quote(name, true),
    }
}

/// Characters that never force shell quoting.
fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

fn needs_shell_quotes(name: &str) -> bool {
    name.is_empty() || !name.chars().all(is_shell_safe)
}

fn shell_quote(name: &str, always: bool) -> String {
    if !always && !needs_shell_quotes(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 2);
    out.push('\'');
    for c in name.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

fn shell_escape_quote(name: &str, always: bool) -> String {
    if name.is_empty() {
        return "''".to_string();
    }
    if !always && !needs_shell_quotes(name) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 3);
    out.push_str("$'");
    push_c_escaped(&mut out, name, '\'');
    out.push('\'');
    out
}

/// Append `name` with C backslash escapes. `quote_char` is the delimiter that needs escaping.
fn push_c_escaped(out: &mut String, name: &str, quote_char: char) {
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            c if c == quote_char => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(out, "\\x{:02x}", byte);
                }
            }
            c => out.push(c),
        }
    }
}
