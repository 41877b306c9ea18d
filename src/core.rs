//! Core listing logic for nicels.
//!
//! This module contains the non-rendering pieces of the pipeline:
//! - [entry]: the [Entry] model every other stage consumes.
//! - [scan]: directory traversal and per-entry metadata (see [scan_path], [FsChildSource]).
//! - [formatter]: visibility rules, ordering, and long-format column formatting.
//! - [pattern]: compiled globs used by `--hide` and `--ignore`.
//! - [git]: repository status lookup through the `git` binary.
//! - [terminal]: width and color detection for stdout.

pub mod entry;
pub mod formatter;
pub mod git;
pub mod pattern;
pub mod scan;
pub mod terminal;

pub use entry::{Entry, EntryKind};
pub use formatter::{
    Formatter, UNKNOWN_PERMISSIONS, format_blocks, format_file_size, format_file_time,
    format_permissions, prepare,
};
pub use git::GitStatusCache;
pub use pattern::{NamePatterns, glob_match};
pub use scan::{ChildSource, FsChildSource, Listing, Scanner, scan_path};
