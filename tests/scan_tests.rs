//! Filesystem tests for nicels
//!
//! These tests build small directory trees in temporary directories and run the
//! whole listing pipeline over them: scanning, filtering, tree expansion and the
//! exit status. Temporary resources are cleaned up when the tests complete.

use nicels::app::App;
use nicels::config::{IndicatorStyle, LayoutMode, RenderOptions, Theme};
use nicels::core::{EntryKind, Listing, scan_path};
use nicels::error::ExitStatus;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn list(opts: &RenderOptions, paths: &[std::path::PathBuf]) -> Result<(String, ExitStatus), Box<dyn std::error::Error>> {
    let theme = Theme::default();
    let mut buf = Vec::new();
    let status = App::new(opts, &theme).run(paths, &mut buf)?;
    Ok((String::from_utf8(buf)?, status))
}

#[test]
fn test_tree_expands_subdirectories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("a"))?;
    fs::create_dir(dir.path().join("b"))?;
    File::create(dir.path().join("b").join("c"))?;

    let opts = RenderOptions {
        layout: LayoutMode::Tree,
        indicator: IndicatorStyle::None,
        ..RenderOptions::default()
    };
    let (out, status) = list(&opts, &[dir.path().to_path_buf()])?;
    assert_eq!(out, "├── a\n└── b\n    └── c\n");
    assert_eq!(status, ExitStatus::Ok);
    Ok(())
}

#[test]
fn test_tree_children_follow_filters() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("src"))?;
    File::create(dir.path().join("src").join(".hidden"))?;
    File::create(dir.path().join("src").join("main.rs"))?;
    File::create(dir.path().join("src").join("main.rs~"))?;

    let opts = RenderOptions {
        layout: LayoutMode::Tree,
        ignore_backups: true,
        ..RenderOptions::default()
    };
    let (out, _) = list(&opts, &[dir.path().to_path_buf()])?;
    assert_eq!(out, "└── src/\n    └── main.rs\n");
    Ok(())
}

#[test]
fn test_hidden_entries_and_dot_links() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join(".env"))?;
    File::create(dir.path().join("visible"))?;

    let single = RenderOptions {
        layout: LayoutMode::SingleColumn,
        ..RenderOptions::default()
    };
    let (out, _) = list(&single, &[dir.path().to_path_buf()])?;
    assert_eq!(out, "visible\n");

    let almost = RenderOptions {
        almost_all: true,
        ..single.clone()
    };
    let (out, _) = list(&almost, &[dir.path().to_path_buf()])?;
    assert_eq!(out, ".env\nvisible\n");

    let all = RenderOptions {
        all: true,
        ..single
    };
    let (out, _) = list(&all, &[dir.path().to_path_buf()])?;
    assert_eq!(out, "./\n../\n.env\nvisible\n");
    Ok(())
}

#[test]
fn test_patterns_hide_and_ignore() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["keep.rs", "drop.o", "build.log"] {
        File::create(dir.path().join(name))?;
    }

    let opts = RenderOptions {
        layout: LayoutMode::CommaSeparated,
        hide_patterns: vec!["*.o".to_string()],
        ignore_patterns: vec!["*.log".to_string()],
        ..RenderOptions::default()
    };
    let (out, _) = list(&opts, &[dir.path().to_path_buf()])?;
    assert_eq!(out, "keep.rs\n");

    // Both kinds of pattern still apply once hidden entries are shown.
    let shown = RenderOptions {
        almost_all: true,
        ..opts
    };
    let (out, _) = list(&shown, &[dir.path().to_path_buf()])?;
    assert_eq!(out, "keep.rs\n");
    Ok(())
}

#[test]
fn test_file_argument_is_named_as_given() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("notes.txt");
    let mut file = File::create(&path)?;
    file.write_all(b"twelve bytes")?;

    let listing = scan_path(&path, &RenderOptions::default())?;
    let Listing::File(entry) = listing else {
        return Err("expected a file listing".into());
    };
    assert_eq!(entry.name(), path.to_string_lossy());
    assert_eq!(entry.kind(), EntryKind::Regular);
    assert_eq!(entry.size(), 12);
    Ok(())
}

#[test]
fn test_missing_argument_escalates_to_serious() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let opts = RenderOptions {
        layout: LayoutMode::SingleColumn,
        ..RenderOptions::default()
    };
    let (out, status) = list(&opts, &[dir.path().join("nope")])?;
    assert!(out.is_empty());
    assert_eq!(status, ExitStatus::Serious);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_long_format_shows_link_target() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::os::unix::fs::symlink("gone", dir.path().join("dangling"))?;

    let opts = RenderOptions {
        layout: LayoutMode::Long,
        show_owner: false,
        show_group: false,
        ..RenderOptions::default()
    };
    let (out, status) = list(&opts, &[dir.path().to_path_buf()])?;
    let line = out.lines().next().ok_or("no output")?;
    assert!(line.starts_with('l'), "{:?}", line);
    assert!(line.ends_with("dangling -> gone [Dead link]"), "{:?}", line);
    assert_eq!(status, ExitStatus::Ok);
    Ok(())
}
