//! Summary report printed after a listing.

use crate::config::theme::paint;
use crate::config::{ReportMode, RenderOptions, Theme};
use crate::core::Entry;

use std::io::{self, Write};

const COMPACT_UNITS: [&str; 7] = ["B", "K", "M", "G", "T", "P", "E"];

/// Counts gathered over the rendered entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub folders: usize,
    pub recognized_files: usize,
    pub unrecognized_files: usize,
    pub links: usize,
    pub dead_links: usize,
    pub total_size: u64,
}

impl ReportStats {
    #[inline]
    pub fn files(&self) -> usize {
        self.recognized_files + self.unrecognized_files
    }

    /// Add the counts of another listing.
    pub fn merge(&mut self, other: &ReportStats) {
        self.total += other.total;
        self.folders += other.folders;
        self.recognized_files += other.recognized_files;
        self.unrecognized_files += other.unrecognized_files;
        self.links += other.links;
        self.dead_links += other.dead_links;
        self.total_size += other.total_size;
    }
}

/// Tally `entries`. Symlinks count as links, not files; directory sizes are not summed.
pub fn aggregate(entries: &[Entry]) -> ReportStats {
    let mut stats = ReportStats {
        total: entries.len(),
        ..ReportStats::default()
    };
    for entry in entries {
        if entry.is_symlink() {
            stats.links += 1;
            if entry.is_broken_symlink() {
                stats.dead_links += 1;
            }
        } else if entry.is_dir() {
            stats.folders += 1;
            continue;
        } else if entry.is_recognized() {
            stats.recognized_files += 1;
        } else {
            stats.unrecognized_files += 1;
        }
        stats.total_size += entry.size();
    }
    stats
}

/// Binary size with one decimal and a single-letter unit, e.g. `1.0K`.
pub fn compact_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{}B", bytes);
    }
    let mut value = bytes as f64;
    let mut idx = 0;
    while value >= 1024.0 && idx < COMPACT_UNITS.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }
    format!("{:.1}{}", value, COMPACT_UNITS[idx])
}

/// Lines of the report for `mode`; empty for [ReportMode::None].
pub fn report_lines(stats: &ReportStats, mode: ReportMode) -> Vec<String> {
    match mode {
        ReportMode::None => Vec::new(),
        ReportMode::Short => vec![format!(
            "Folders: {}, Files: {}, Size: {}",
            stats.folders,
            stats.files(),
            compact_size(stats.total_size)
        )],
        ReportMode::Long => vec![
            format!("Found {} items", stats.total),
            format!("  Folders:            {}", stats.folders),
            format!("  Recognized files:   {}", stats.recognized_files),
            format!("  Unrecognized files: {}", stats.unrecognized_files),
            format!("  Links:              {}", stats.links),
            format!("  Dead links:         {}", stats.dead_links),
            format!(
                "  Total size:         {} ({} bytes)",
                compact_size(stats.total_size),
                stats.total_size
            ),
        ],
    }
}

/// Write the report, preceded by a blank line.
pub fn write_report<W: Write>(
    stats: &ReportStats,
    options: &RenderOptions,
    theme: &Theme,
    out: &mut W,
) -> io::Result<()> {
    let lines = report_lines(stats, options.report);
    if lines.is_empty() {
        return Ok(());
    }
    let term = options.line_terminator();
    out.write_all(term.as_bytes())?;
    for line in lines {
        if options.color {
            write!(out, "{}{}", paint(theme.report(), &line), term)?;
        } else {
            write!(out, "{}{}", line, term)?;
        }
    }
    Ok(())
}
