//! Tree layout.
//!
//! Walks directories depth-first with an explicit stack of frames, fetching
//! children lazily from a [ChildSource]. Each line is the branch prefix of its
//! ancestors, a connector and the entry's cell.

use crate::config::theme::paint;
use crate::config::{RenderOptions, Theme};
use crate::core::{ChildSource, Entry};
use crate::error::ExitStatus;
use crate::ui::cell::CellBuilder;

use std::io::{self, Write};
use std::path::PathBuf;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUE: &str = "│   ";
const BLANK: &str = "    ";

/// Siblings at one level of the walk.
struct Frame {
    entries: Vec<Entry>,
    next: usize,
    /// Canonical path of the directory these entries came from, for cycle checks.
    origin: Option<PathBuf>,
}

impl Frame {
    fn has_more(&self) -> bool {
        self.next < self.entries.len()
    }
}

/// Renders `roots` and everything below them, up to `options.tree_depth` levels.
///
/// Directories that cannot be read are reported on stderr and skipped; their
/// siblings still render and the result escalates to [ExitStatus::Minor].
pub fn render_tree<W: Write>(
    roots: Vec<Entry>,
    source: &mut dyn ChildSource,
    builder: &CellBuilder<'_>,
    options: &RenderOptions,
    theme: &Theme,
    out: &mut W,
) -> io::Result<ExitStatus> {
    let term = options.line_terminator();
    let mut status = ExitStatus::Ok;
    let mut stack = vec![Frame {
        entries: roots,
        next: 0,
        origin: None,
    }];

    while let Some(frame) = stack.last_mut() {
        if !frame.has_more() {
            stack.pop();
            continue;
        }
        let entry = frame.entries[frame.next].clone();
        frame.next += 1;
        let is_last = !frame.has_more();
        let depth = stack.len() - 1;

        let mut prefix = String::new();
        for ancestor in &stack[..depth] {
            prefix.push_str(if ancestor.has_more() { CONTINUE } else { BLANK });
        }
        prefix.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        if options.color {
            prefix = paint(theme.tree(), &prefix);
        }
        write!(out, "{}{}{}", prefix, builder.build(&entry).text(), term)?;

        if !should_descend(&entry, depth, options) {
            continue;
        }
        let origin = entry.path().canonicalize().ok();
        if origin.is_some() && stack.iter().any(|f| f.origin == origin) {
            tracing::debug!(path = %entry.path().display(), "directory cycle, not descending");
            continue;
        }

        match source.children(&entry) {
            Ok(children) if !children.is_empty() => stack.push(Frame {
                entries: children,
                next: 0,
                origin,
            }),
            Ok(_) => {}
            Err(e) => {
                out.flush()?;
                eprintln!("nls: {}", e);
                status = status.combine(ExitStatus::Minor);
            }
        }
    }
    Ok(status)
}

/// Directories below the depth limit are expanded; `.` and `..` never are.
/// Symlinks only count as directories when dereferenced by the scanner.
fn should_descend(entry: &Entry, depth: usize, options: &RenderOptions) -> bool {
    if !entry.is_dir() || entry.is_dot_link() {
        return false;
    }
    match options.tree_depth {
        Some(limit) => depth + 1 < limit,
        None => true,
    }
}
