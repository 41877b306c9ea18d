//! The entry model for nicels.
//!
//! Provides the [Entry] struct which describes one filesystem object as seen by the
//! render pipeline. Entries are built by the scanner (see [crate::core::scan]) and are
//! read-only for everything downstream of it.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kind of filesystem object an [Entry] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    Regular,
    Symlink,
    Block,
    Character,
    Fifo,
    Socket,
    Unknown,
}

impl EntryKind {
    /// Leading character of the permission string.
    pub fn type_char(self) -> char {
        match self {
            EntryKind::Directory => 'd',
            EntryKind::Regular => '-',
            EntryKind::Symlink => 'l',
            EntryKind::Block => 'b',
            EntryKind::Character => 'c',
            EntryKind::Fifo => 'p',
            EntryKind::Socket => 's',
            EntryKind::Unknown => '?',
        }
    }
}

/// A single object in a listing.
///
/// Holds the name, kind and the stat data shown by the long format, plus the
/// flags used for coloring and filtering.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    path: PathBuf,
    kind: EntryKind,
    flags: u8,
    mode: Option<u32>,
    links: u64,
    size: u64,
    allocated: Option<u64>,
    modified: Option<SystemTime>,
    owner: Option<String>,
    group: Option<String>,
    uid: Option<u32>,
    gid: Option<u32>,
    inode: Option<u64>,
    symlink_target: Option<String>,
    git_status: Option<String>,
}

impl Entry {
    // Flag bit definitions
    pub const IS_HIDDEN: u8 = 1 << 0;
    pub const IS_SYMLINK: u8 = 1 << 1;
    pub const IS_BROKEN_SYM: u8 = 1 << 2;
    pub const IS_EXECUTABLE: u8 = 1 << 3;
    pub const IS_RECOGNIZED: u8 = 1 << 4;

    /// Any execute bit.
    #[cfg(unix)]
    pub const EXEC_FLAG: u32 = 0o111;

    /// New entry with empty metadata. `path` defaults to the name itself.
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        let mut flags = 0u8;
        if name.starts_with('.') {
            flags |= Self::IS_HIDDEN;
        }
        if kind == EntryKind::Symlink {
            flags |= Self::IS_SYMLINK;
        }
        Entry {
            path: PathBuf::from(&name),
            name,
            kind,
            flags,
            mode: None,
            links: 0,
            size: 0,
            allocated: None,
            modified: None,
            owner: None,
            group: None,
            uid: None,
            gid: None,
            inode: None,
            symlink_target: None,
            git_status: None,
        }
    }

    /// Entry for an object whose metadata could not be read.
    pub fn placeholder(name: impl Into<String>, path: PathBuf) -> Self {
        Entry::new(name, EntryKind::Unknown).with_path(path)
    }

    // Builders

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_links(mut self, links: u64) -> Self {
        self.links = links;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_allocated(mut self, allocated: u64) -> Self {
        self.allocated = Some(allocated);
        self
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_ids(mut self, uid: u32, gid: u32) -> Self {
        self.uid = Some(uid);
        self.gid = Some(gid);
        self
    }

    pub fn with_owner(mut self, owner: Option<String>, group: Option<String>) -> Self {
        self.owner = owner;
        self.group = group;
        self
    }

    pub fn with_inode(mut self, inode: u64) -> Self {
        self.inode = Some(inode);
        self
    }

    /// Record the link target. Ignored for non-symlinks.
    pub fn with_symlink_target(mut self, target: impl Into<String>) -> Self {
        if self.is_symlink() {
            self.symlink_target = Some(target.into());
        }
        self
    }

    pub fn with_git_status(mut self, code: impl Into<String>) -> Self {
        self.git_status = Some(code.into());
        self
    }

    pub fn set_git_status(&mut self, code: Option<String>) {
        self.git_status = code;
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline(always)]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    #[inline]
    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    #[inline]
    pub fn links(&self) -> u64 {
        self.links
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn allocated(&self) -> Option<u64> {
        self.allocated
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    #[inline]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    #[inline]
    pub fn uid(&self) -> Option<u32> {
        self.uid
    }

    #[inline]
    pub fn gid(&self) -> Option<u32> {
        self.gid
    }

    #[inline]
    pub fn inode(&self) -> Option<u64> {
        self.inode
    }

    #[inline]
    pub fn symlink_target(&self) -> Option<&str> {
        self.symlink_target.as_deref()
    }

    #[inline]
    pub fn git_status(&self) -> Option<&str> {
        self.git_status.as_deref()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    /// Only meaningful together with [Entry::is_symlink].
    #[inline]
    pub fn is_broken_symlink(&self) -> bool {
        self.is_symlink() && self.flags & Self::IS_BROKEN_SYM != 0
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.flags & Self::IS_EXECUTABLE != 0
    }

    #[inline]
    pub fn is_recognized(&self) -> bool {
        self.flags & Self::IS_RECOGNIZED != 0
    }

    /// `.` or `..`
    #[inline]
    pub fn is_dot_link(&self) -> bool {
        self.name == "." || self.name == ".."
    }

    /// Text after the last `.`, if any. A leading dot alone is not an extension.
    pub fn extension(&self) -> Option<&str> {
        let idx = self.name.rfind('.')?;
        if idx == 0 {
            return None;
        }
        Some(&self.name[idx + 1..])
    }
}
