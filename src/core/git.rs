//! Git status lookup for nicels.
//!
//! Runs the `git` binary (located with `which`) once per repository and answers
//! per-path queries from the parsed porcelain output.
//!
//! Missing `git`, paths outside a repository or a failing command all mean "no badge".

use crate::core::Entry;

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Stdio};

/// Parsed `git status` of one repository, keyed by path relative to the root.
#[derive(Debug, Default)]
struct RepoStatus {
    files: BTreeMap<PathBuf, String>,
}

impl RepoStatus {
    /// Parse `git status --porcelain=v1 -z` output.
    fn parse(raw: &[u8]) -> Self {
        let mut files = BTreeMap::new();
        let mut records = raw.split(|&b| b == 0).filter(|r| !r.is_empty());

        while let Some(record) = records.next() {
            if record.len() < 4 {
                continue;
            }
            let code = String::from_utf8_lossy(&record[..2]).into_owned();
            let path = String::from_utf8_lossy(&record[3..]);
            let path = path.trim_end_matches('/');

            // renames and copies carry the original path as the next record
            if matches!(record[0], b'R' | b'C') {
                records.next();
            }
            files.entry(PathBuf::from(path)).or_insert(code);
        }
        RepoStatus { files }
    }

    /// Code of `rel` itself, or the first non-clean code of anything below it.
    fn status_for(&self, rel: &Path) -> Option<&str> {
        if let Some(code) = self.files.get(rel) {
            return Some(code);
        }
        if rel.as_os_str().is_empty() {
            return self.files.values().next().map(String::as_str);
        }
        self.files
            .range(rel.to_path_buf()..)
            .take_while(|(path, _)| path.starts_with(rel))
            .map(|(_, code)| code.as_str())
            .next()
    }
}

/// Memoizes git status per repository root.
///
/// Directories are mapped to their repository root on first use; each root is
/// queried at most once.
#[derive(Debug)]
pub struct GitStatusCache {
    git: Option<PathBuf>,
    roots: HashMap<PathBuf, Option<PathBuf>>,
    repos: HashMap<PathBuf, RepoStatus>,
}

impl Default for GitStatusCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GitStatusCache {
    pub fn new() -> Self {
        let git = which::which("git").ok();
        if git.is_none() {
            tracing::debug!("git not found in PATH, git status disabled");
        }
        GitStatusCache {
            git,
            roots: HashMap::new(),
            repos: HashMap::new(),
        }
    }

    /// Two-character status code for `path`, if it is not clean.
    pub fn status_for(&mut self, path: &Path) -> Option<String> {
        let git = self.git.clone()?;
        let abs = absolute_path(path)?;
        let dir = abs.parent().unwrap_or(&abs).to_path_buf();

        let root = self.root_of(&git, &dir)?;
        if !self.repos.contains_key(&root) {
            let status = query_status(&git, &root).unwrap_or_default();
            self.repos.insert(root.clone(), status);
        }

        let rel = abs.strip_prefix(&root).ok()?;
        self.repos.get(&root)?.status_for(rel).map(str::to_string)
    }

    /// Set the git status of every entry.
    pub fn annotate(&mut self, entries: &mut [Entry]) {
        for entry in entries.iter_mut() {
            if entry.is_dot_link() {
                continue;
            }
            let code = self.status_for(entry.path());
            entry.set_git_status(code);
        }
    }

    fn root_of(&mut self, git: &Path, dir: &Path) -> Option<PathBuf> {
        if let Some(root) = self.roots.get(dir) {
            return root.clone();
        }
        let root = query_root(git, dir);
        if root.is_none() {
            tracing::debug!(dir = %dir.display(), "not inside a git repository");
        }
        self.roots.insert(dir.to_path_buf(), root.clone());
        root
    }
}

/// Absolute, lexically normalized form of `path`.
/// The parent directory is canonicalized so that symlinked working trees resolve
/// to the same root git reports, while the final component itself is kept.
fn absolute_path(path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    match (normalized.parent(), normalized.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = parent.canonicalize().unwrap_or_else(|_| parent.to_path_buf());
            Some(parent.join(name))
        }
        _ => Some(normalized),
    }
}

fn query_root(git: &Path, dir: &Path) -> Option<PathBuf> {
    let output = Command::new(git)
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--show-toplevel"])
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        return None;
    }
    let root = PathBuf::from(root);
    Some(root.canonicalize().unwrap_or(root))
}

fn query_status(git: &Path, root: &Path) -> Option<RepoStatus> {
    let output = Command::new(git)
        .arg("-C")
        .arg(root)
        .args([
            "status",
            "--porcelain=v1",
            "-z",
            "--ignored=no",
            "--untracked-files=all",
        ])
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!(root = %root.display(), "git status failed");
        return None;
    }
    Some(RepoStatus::parse(&output.stdout))
}
