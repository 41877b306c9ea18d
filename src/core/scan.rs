//! Filesystem scanning for nicels.
//!
//! Turns a path given on the command line into a [Listing]: either the entries of a
//! directory or a single entry for anything else. Every entry carries the stat data
//! the long format needs. Objects that cannot be stat'ed still produce an entry,
//! with placeholder metadata.
//!
//! [FsChildSource] exposes the same scanner to tree mode through the [ChildSource] trait.

use crate::config::{LayoutMode, RenderOptions};
use crate::core::{Entry, EntryKind, Formatter, GitStatusCache};
use crate::error::{ExitStatus, ScanError};
use crate::ui::icons;

use std::cell::Cell;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use users::{Groups, Users, UsersCache};

/// Result of scanning one command-line path.
#[derive(Debug)]
pub enum Listing {
    /// A directory and its (unfiltered, unsorted) entries.
    Directory { path: PathBuf, entries: Vec<Entry> },
    /// Anything that is not listed as a directory.
    File(Entry),
}

/// Lazily lists the children of a directory entry in tree mode.
pub trait ChildSource {
    /// Children of `parent`, already filtered and ordered for display.
    fn children(&mut self, parent: &Entry) -> Result<Vec<Entry>, ScanError>;
}

/// Reads entries from the filesystem.
///
/// Holds the options that change how metadata is resolved and a cache for
/// uid/gid name lookups.
pub struct Scanner {
    all: bool,
    status: Cell<ExitStatus>,
    numeric_ids: bool,
    dereference: bool,
    follow_dir_args: bool,
    #[cfg(unix)]
    ids: UsersCache,
}

impl Scanner {
    pub fn new(options: &RenderOptions) -> Self {
        Scanner {
            all: options.all,
            status: Cell::new(ExitStatus::Ok),
            numeric_ids: options.numeric_ids,
            dereference: options.dereference,
            follow_dir_args: options.layout != LayoutMode::Long || options.dereference,
            #[cfg(unix)]
            ids: UsersCache::new(),
        }
    }

    /// Scan a path given on the command line.
    ///
    /// Symlinks to directories are listed as directories, except in the long format
    /// without dereferencing.
    pub fn scan_path(&self, path: &Path) -> Result<Listing, ScanError> {
        let meta =
            fs::symlink_metadata(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;

        let is_dir = if meta.file_type().is_symlink() {
            self.follow_dir_args && fs::metadata(path).is_ok_and(|m| m.is_dir())
        } else {
            meta.is_dir()
        };

        if is_dir {
            let entries = self.read_dir(path)?;
            Ok(Listing::Directory {
                path: path.to_path_buf(),
                entries,
            })
        } else {
            let name = path.to_string_lossy().into_owned();
            Ok(Listing::File(self.entry_for(path, name)))
        }
    }

    /// Entries of `dir` in scan order, plus `.` and `..` when showing everything.
    pub fn read_dir(&self, dir: &Path) -> Result<Vec<Entry>, ScanError> {
        let reader = fs::read_dir(dir).map_err(|e| ScanError::from_io(dir.to_path_buf(), e))?;
        let mut entries = Vec::with_capacity(64);

        if self.all {
            entries.push(self.entry_for(dir, ".".to_string()));
            entries.push(self.entry_for(&dir.join(".."), "..".to_string()));
        }

        for item in reader {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    self.report_item_error(dir, e);
                    continue;
                }
            };
            let name = item.file_name().to_string_lossy().into_owned();
            entries.push(self.entry_for(&item.path(), name));
        }
        Ok(entries)
    }

    /// Worst problem met below the named paths since the last call.
    pub fn take_status(&self) -> ExitStatus {
        self.status.replace(ExitStatus::Ok)
    }

    fn report_item_error(&self, dir: &Path, err: std::io::Error) {
        let err = ScanError::Item {
            path: dir.to_path_buf(),
            source: err,
        };
        eprintln!("nls: {}", err);
        self.status.set(self.status.get().combine(ExitStatus::Minor));
    }

    /// Build the entry for `path`, displayed as `name`.
    pub fn entry_for(&self, path: &Path, name: String) -> Entry {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "stat failed, using placeholder");
                return Entry::placeholder(name, path.to_path_buf());
            }
        };

        let is_link = meta.file_type().is_symlink();
        let target_meta = if is_link { fs::metadata(path).ok() } else { None };
        let broken = is_link && target_meta.is_none();

        let stat: &Metadata = match (&target_meta, self.dereference) {
            (Some(target), true) => target,
            _ => &meta,
        };
        let kind = kind_of(stat);

        let mut flags = 0u8;
        if broken {
            flags |= Entry::IS_BROKEN_SYM;
        }
        if icons::lookup(&name, kind == EntryKind::Directory).recognized {
            flags |= Entry::IS_RECOGNIZED;
        }

        let mut entry = Entry::new(name, kind)
            .with_path(path.to_path_buf())
            .with_size(stat.len());
        if let Ok(modified) = stat.modified() {
            entry = entry.with_modified(modified);
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;

            let mode = stat.mode();
            if kind == EntryKind::Regular && mode & Entry::EXEC_FLAG != 0 {
                flags |= Entry::IS_EXECUTABLE;
            }
            entry = entry
                .with_mode(mode)
                .with_links(stat.nlink())
                .with_inode(stat.ino())
                .with_allocated(stat.blocks() * 512)
                .with_ids(stat.uid(), stat.gid());

            if !self.numeric_ids {
                let owner = self
                    .ids
                    .get_user_by_uid(stat.uid())
                    .map(|u| u.name().to_string_lossy().into_owned());
                let group = self
                    .ids
                    .get_group_by_gid(stat.gid())
                    .map(|g| g.name().to_string_lossy().into_owned());
                entry = entry.with_owner(owner, group);
            }
        }

        #[cfg(not(unix))]
        {
            let mode = if stat.permissions().readonly() { 0o444 } else { 0o644 };
            let mode = if kind == EntryKind::Directory { mode | 0o111 } else { mode };
            entry = entry.with_mode(mode).with_links(1);
        }

        let mut entry = entry.with_flags(flags);
        if is_link && entry.is_symlink() {
            if let Ok(target) = fs::read_link(path) {
                entry = entry.with_symlink_target(target.to_string_lossy().into_owned());
            }
        }
        entry
    }
}

/// Kind of the object described by `meta` (not following links).
fn kind_of(meta: &Metadata) -> EntryKind {
    let ft = meta.file_type();
    if ft.is_dir() {
        return EntryKind::Directory;
    }
    if ft.is_file() {
        return EntryKind::Regular;
    }
    if ft.is_symlink() {
        return EntryKind::Symlink;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;
        if ft.is_block_device() {
            return EntryKind::Block;
        }
        if ft.is_char_device() {
            return EntryKind::Character;
        }
        if ft.is_fifo() {
            return EntryKind::Fifo;
        }
        if ft.is_socket() {
            return EntryKind::Socket;
        }
    }
    EntryKind::Unknown
}

/// Scan one path with a fresh [Scanner].
pub fn scan_path(path: &Path, options: &RenderOptions) -> Result<Listing, ScanError> {
    Scanner::new(options).scan_path(path)
}

/// [ChildSource] backed by the filesystem.
///
/// Children are filtered and ordered with the same rules as the top level and
/// annotated with git status when a cache is attached.
pub struct FsChildSource<'a> {
    scanner: &'a Scanner,
    formatter: Formatter<'a>,
    git: Option<&'a mut GitStatusCache>,
}

impl<'a> FsChildSource<'a> {
    pub fn new(options: &'a RenderOptions, scanner: &'a Scanner, git: Option<&'a mut GitStatusCache>) -> Self {
        FsChildSource {
            scanner,
            formatter: Formatter::new(options),
            git,
        }
    }
}

impl ChildSource for FsChildSource<'_> {
    fn children(&mut self, parent: &Entry) -> Result<Vec<Entry>, ScanError> {
        let entries = self.scanner.read_dir(parent.path())?;
        let mut entries = self.formatter.prepare(entries);
        if let Some(git) = self.git.as_deref_mut() {
            git.annotate(&mut entries);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn directory_listing_has_metadata() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let mut file = File::create(tmp.path().join("hello.rs"))?;
        writeln!(file, "fn main() {{}}")?;
        fs::create_dir(tmp.path().join("sub"))?;

        let listing = scan_path(tmp.path(), &RenderOptions::default())?;
        let Listing::Directory { entries, .. } = listing else {
            panic!("expected a directory listing");
        };
        assert_eq!(entries.len(), 2);

        let hello = entries.iter().find(|e| e.name() == "hello.rs").ok_or("missing hello.rs")?;
        assert_eq!(hello.kind(), EntryKind::Regular);
        assert_eq!(hello.size(), 13);
        assert!(hello.is_recognized());
        assert!(hello.modified().is_some());

        let sub = entries.iter().find(|e| e.name() == "sub").ok_or("missing sub")?;
        assert!(sub.is_dir());
        Ok(())
    }

    #[test]
    fn all_adds_dot_links() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let opts = RenderOptions {
            all: true,
            ..RenderOptions::default()
        };
        let Listing::Directory { entries, .. } = scan_path(tmp.path(), &opts)? else {
            panic!("expected a directory listing");
        };
        let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, [".", ".."]);
        Ok(())
    }

    #[test]
    fn file_argument_keeps_given_name() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("notes.txt");
        File::create(&path)?;

        let Listing::File(entry) = scan_path(&path, &RenderOptions::default())? else {
            panic!("expected a file listing");
        };
        assert_eq!(entry.name(), path.to_string_lossy());
        Ok(())
    }

    #[test]
    fn missing_path_is_not_found() {
        let result = scan_path(Path::new("/path/does/not/exist"), &RenderOptions::default());
        assert!(matches!(result, Err(ScanError::NotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlink_is_flagged() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        std::os::unix::fs::symlink("nowhere", tmp.path().join("dangling"))?;

        let scanner = Scanner::new(&RenderOptions::default());
        let entry = scanner.entry_for(&tmp.path().join("dangling"), "dangling".into());
        assert!(entry.is_symlink());
        assert!(entry.is_broken_symlink());
        assert_eq!(entry.symlink_target(), Some("nowhere"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn dereference_reports_the_target() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("real"))?;
        std::os::unix::fs::symlink("real", tmp.path().join("alias"))?;

        let plain = Scanner::new(&RenderOptions::default());
        let entry = plain.entry_for(&tmp.path().join("alias"), "alias".into());
        assert_eq!(entry.kind(), EntryKind::Symlink);

        let deref = Scanner::new(&RenderOptions {
            dereference: true,
            ..RenderOptions::default()
        });
        let entry = deref.entry_for(&tmp.path().join("alias"), "alias".into());
        assert_eq!(entry.kind(), EntryKind::Directory);
        assert!(!entry.is_symlink());
        Ok(())
    }

    #[test]
    fn child_source_prepares_children() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join("b"))?;
        File::create(tmp.path().join("A"))?;
        File::create(tmp.path().join(".hidden"))?;

        let opts = RenderOptions::default();
        let scanner = Scanner::new(&opts);
        let mut source = FsChildSource::new(&opts, &scanner, None);
        let root = Entry::new("root", EntryKind::Directory).with_path(tmp.path().to_path_buf());
        let names: Vec<_> = source
            .children(&root)?
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, ["A", "b"]);
        Ok(())
    }

    #[test]
    fn unreadable_items_escalate_to_minor() {
        let scanner = Scanner::new(&RenderOptions::default());
        assert_eq!(scanner.take_status(), ExitStatus::Ok);

        let err = std::io::Error::other("stale handle");
        scanner.report_item_error(Path::new("/some/dir"), err);
        assert_eq!(scanner.take_status(), ExitStatus::Minor);
        assert_eq!(scanner.take_status(), ExitStatus::Ok);
    }

    #[test]
    fn item_error_names_the_directory() {
        let err = ScanError::Item {
            path: PathBuf::from("/some/dir"),
            source: std::io::Error::other("stale handle"),
        };
        assert_eq!(err.to_string(), "reading directory '/some/dir': stale handle");
    }
}
