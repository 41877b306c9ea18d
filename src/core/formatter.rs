//! Filtering, sorting and column formatting for entries in nicels.
//!
//! The [Formatter] holds the visibility and ordering rules of one invocation
//! and turns a scanned sequence into the sequence that gets rendered.
//!
//! Also formats the long-format columns: permission strings, sizes and times.

use crate::config::{RenderOptions, SizeMode, SortKey, TimeStyle};
use crate::core::pattern::NamePatterns;
use crate::core::{Entry, EntryKind};

use chrono::{DateTime, Local};
use humansize::{BINARY, format_size};

use std::cmp::Ordering;
use std::fmt::Write;
use std::time::SystemTime;

/// Placeholder permission string for entries whose mode is unknown.
pub const UNKNOWN_PERMISSIONS: &str = "??????????";

/// Formatter struct to handle filtering and sorting of entries
/// based on the resolved options.
pub struct Formatter<'a> {
    options: &'a RenderOptions,
    hide: NamePatterns,
    ignore: NamePatterns,
}

impl<'a> Formatter<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            hide: NamePatterns::new(&options.hide_patterns),
            ignore: NamePatterns::new(&options.ignore_patterns),
        }
    }

    /// Filter then order `entries`, returning the sequence to render.
    pub fn prepare(&self, mut entries: Vec<Entry>) -> Vec<Entry> {
        self.filter_entries(&mut entries);
        self.sort_entries(&mut entries);
        entries
    }

    /// Drops entries hidden by the visibility rules.
    pub fn filter_entries(&self, entries: &mut Vec<Entry>) {
        entries.retain(|e| self.is_visible(e));
    }

    fn is_visible(&self, e: &Entry) -> bool {
        let opts = self.options;
        let show_hidden = opts.all || opts.almost_all;

        if e.is_dot_link() && !opts.all {
            return false;
        }
        if e.is_hidden() && !show_hidden {
            return false;
        }
        if opts.ignore_backups && e.name().ends_with('~') {
            return false;
        }
        if self.ignore.is_match(e.name()) || self.hide.is_match(e.name()) {
            return false;
        }
        if opts.dirs_only && !e.is_dir() {
            return false;
        }
        if opts.files_only && e.is_dir() {
            return false;
        }
        true
    }

    /// Orders entries in place: primary key, grouping, dot grouping, then reverse.
    /// Every step is a stable sort.
    pub fn sort_entries(&self, entries: &mut [Entry]) {
        let opts = self.options;

        match opts.sort {
            SortKey::Name => entries.sort_by(by_name),
            SortKey::Time => entries.sort_by(|a, b| b.modified().cmp(&a.modified()).then_with(|| by_name(a, b))),
            SortKey::Size => entries.sort_by(|a, b| b.size().cmp(&a.size()).then_with(|| by_name(a, b))),
            SortKey::Extension => {
                entries.sort_by(|a, b| a.extension().cmp(&b.extension()).then_with(|| by_name(a, b)))
            }
            SortKey::None => {}
        }

        if opts.dirs_first {
            entries.sort_by_key(|e| !e.is_dir());
        } else if opts.files_first {
            entries.sort_by_key(|e| e.is_dir());
        }

        if opts.dots_first {
            entries.sort_by_key(|e| !e.is_hidden());
        }

        if opts.reverse {
            entries.reverse();
        }
    }
}

/// Byte-wise name order, so `B` sorts before `a`.
fn by_name(a: &Entry, b: &Entry) -> Ordering {
    a.name().cmp(b.name())
}

/// Shorthand for `Formatter::new(options).prepare(entries)`.
pub fn prepare(entries: Vec<Entry>, options: &RenderOptions) -> Vec<Entry> {
    Formatter::new(options).prepare(entries)
}

/// Formats the type and mode of an entry in the unix `drwxr-xr-x` form,
/// including setuid/setgid (`s`/`S`) and sticky (`t`/`T`) bits.
///
/// # Returns
/// [UNKNOWN_PERMISSIONS] when the mode is not known.
pub fn format_permissions(kind: EntryKind, mode: Option<u32>) -> String {
    let Some(mode) = mode else {
        return UNKNOWN_PERMISSIONS.to_string();
    };

    let mut chars = [kind.type_char(), '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1 != 0 {
            chars[base + 2] = 'x';
        }
    }

    let special = [(0o4000, 3, 's'), (0o2000, 6, 's'), (0o1000, 9, 't')];
    for (bit, pos, lower) in special {
        if mode & bit != 0 {
            chars[pos] = if chars[pos] == 'x' {
                lower
            } else {
                lower.to_ascii_uppercase()
            };
        }
    }
    chars.iter().collect()
}

/// Formats a size for the size column.
pub fn format_file_size(size: u64, mode: &SizeMode) -> String {
    match mode {
        SizeMode::Human => format_size(size, BINARY),
        SizeMode::Bytes => size.to_string(),
        SizeMode::Scaled(block) => {
            let scaled = size.div_ceil(block.unit.max(1));
            match &block.suffix {
                Some(suffix) => format!("{}{}", scaled, suffix),
                None => scaled.to_string(),
            }
        }
    }
}

/// Formats the allocated size for the blocks column, in 1024-byte units unless
/// a block size is configured.
pub fn format_blocks(allocated: Option<u64>, mode: &SizeMode) -> String {
    let Some(bytes) = allocated else {
        return "-".to_string();
    };
    let unit = match mode {
        SizeMode::Scaled(block) => block.unit.max(1),
        _ => 1024,
    };
    bytes.div_ceil(unit).to_string()
}

/// Formats the modification time with the given style.
/// # Returns
/// `-` if the time is unknown or the pattern cannot be rendered.
pub fn format_file_time(modified: Option<SystemTime>, style: &TimeStyle) -> String {
    let Some(mtime) = modified else {
        return "-".to_string();
    };
    let dt: DateTime<Local> = DateTime::from(mtime);
    let mut out = String::new();
    match write!(out, "{}", dt.format(style.pattern())) {
        Ok(()) => out,
        Err(_) => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlockSize;
    use std::time::Duration;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name()).collect()
    }

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("b.txt", EntryKind::Regular).with_size(10),
            Entry::new("A.md", EntryKind::Regular).with_size(30),
            Entry::new("src", EntryKind::Directory).with_size(4096),
            Entry::new(".env", EntryKind::Regular).with_size(5),
            Entry::new("notes~", EntryKind::Regular).with_size(1),
        ]
    }

    #[test]
    fn hidden_and_backups_are_dropped() {
        let opts = RenderOptions {
            ignore_backups: true,
            ..RenderOptions::default()
        };
        let out = prepare(sample(), &opts);
        assert_eq!(names(&out), ["A.md", "b.txt", "src"]);
    }

    #[test]
    fn almost_all_drops_dot_links() {
        let mut entries = sample();
        entries.push(Entry::new(".", EntryKind::Directory));
        entries.push(Entry::new("..", EntryKind::Directory));

        let almost = RenderOptions {
            almost_all: true,
            ..RenderOptions::default()
        };
        let out = prepare(entries.clone(), &almost);
        assert!(!out.iter().any(|e| e.is_dot_link()));
        assert!(out.iter().any(|e| e.name() == ".env"));

        let all = RenderOptions {
            all: true,
            ..RenderOptions::default()
        };
        let out = prepare(entries, &all);
        assert_eq!(out.iter().filter(|e| e.is_dot_link()).count(), 2);
    }

    #[test]
    fn hide_and_ignore_apply_with_hidden_shown() {
        let opts = RenderOptions {
            hide_patterns: vec!["*.md".into()],
            ignore_patterns: vec!["b*".into()],
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(sample(), &opts)), ["notes~", "src"]);

        let almost = RenderOptions {
            almost_all: true,
            ..opts.clone()
        };
        assert_eq!(names(&prepare(sample(), &almost)), [".env", "notes~", "src"]);

        let all = RenderOptions { all: true, ..opts };
        assert_eq!(names(&prepare(sample(), &all)), [".env", "notes~", "src"]);
    }

    #[test]
    fn almost_all_still_hides_object_files() {
        let entries = vec![
            Entry::new("x.o", EntryKind::Regular),
            Entry::new("y", EntryKind::Regular),
        ];
        let opts = RenderOptions {
            almost_all: true,
            hide_patterns: vec!["*.o".into()],
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(entries, &opts)), ["y"]);
    }

    #[test]
    fn name_sort_is_byte_order() {
        let entries = vec![
            Entry::new("a", EntryKind::Regular),
            Entry::new("B", EntryKind::Regular),
            Entry::new("_c", EntryKind::Regular),
        ];
        let opts = RenderOptions {
            sort: SortKey::Name,
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(entries, &opts)), ["B", "_c", "a"]);
    }

    #[test]
    fn size_sort_is_largest_first() {
        let opts = RenderOptions {
            sort: SortKey::Size,
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(sample(), &opts)), ["src", "A.md", "b.txt", "notes~"]);
    }

    #[test]
    fn time_sort_is_newest_first() {
        let base = SystemTime::UNIX_EPOCH;
        let entries = vec![
            Entry::new("old", EntryKind::Regular).with_modified(base),
            Entry::new("new", EntryKind::Regular).with_modified(base + Duration::from_secs(60)),
            Entry::new("unknown", EntryKind::Regular),
        ];
        let opts = RenderOptions {
            sort: SortKey::Time,
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(entries, &opts)), ["new", "old", "unknown"]);
    }

    #[test]
    fn extension_sort_ties_by_name() {
        let entries = vec![
            Entry::new("z.rs", EntryKind::Regular),
            Entry::new("Makefile", EntryKind::Regular),
            Entry::new("a.rs", EntryKind::Regular),
            Entry::new("b.c", EntryKind::Regular),
            Entry::new("y.C", EntryKind::Regular),
        ];
        let opts = RenderOptions {
            sort: SortKey::Extension,
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(entries, &opts)), ["Makefile", "y.C", "b.c", "a.rs", "z.rs"]);
    }

    #[test]
    fn dots_first_after_grouping() {
        let entries = vec![
            Entry::new("b", EntryKind::Regular),
            Entry::new(".a", EntryKind::Regular),
            Entry::new("d", EntryKind::Directory),
        ];
        let opts = RenderOptions {
            all: true,
            dirs_first: true,
            dots_first: true,
            ..RenderOptions::default()
        };
        assert_eq!(names(&prepare(entries, &opts)), [".a", "d", "b"]);
    }

    #[test]
    fn permission_strings() {
        assert_eq!(format_permissions(EntryKind::Directory, Some(0o755)), "drwxr-xr-x");
        assert_eq!(format_permissions(EntryKind::Regular, Some(0o644)), "-rw-r--r--");
        assert_eq!(format_permissions(EntryKind::Regular, Some(0o4755)), "-rwsr-xr-x");
        assert_eq!(format_permissions(EntryKind::Regular, Some(0o2644)), "-rw-r-Sr--");
        assert_eq!(format_permissions(EntryKind::Directory, Some(0o1777)), "drwxrwxrwt");
        assert_eq!(format_permissions(EntryKind::Directory, Some(0o1776)), "drwxrwxrwT");
        assert_eq!(format_permissions(EntryKind::Fifo, None), UNKNOWN_PERMISSIONS);
    }

    #[test]
    fn size_modes() {
        assert_eq!(format_file_size(1536, &SizeMode::Bytes), "1536");
        let mb = SizeMode::Scaled(BlockSize {
            unit: 1024 * 1024,
            suffix: Some("M".into()),
        });
        assert_eq!(format_file_size(1, &mb), "1M");
        assert_eq!(format_file_size(0, &mb), "0M");
        let k = SizeMode::Scaled(BlockSize { unit: 1000, suffix: None });
        assert_eq!(format_file_size(1001, &k), "2");
        assert_eq!(format_blocks(Some(8192), &SizeMode::Human), "8");
        assert_eq!(format_blocks(None, &SizeMode::Human), "-");
    }

    #[test]
    fn unknown_time_is_dash() {
        assert_eq!(format_file_time(None, &TimeStyle::LongIso), "-");
        let t = format_file_time(Some(SystemTime::UNIX_EPOCH), &TimeStyle::Custom("%Y".into()));
        assert!(t == "1970" || t == "1969");
    }
}
