//! Error types and the exit-status ladder for nicels.
//!
//! Failures are split by the scope they affect:
//! - [ScanError]: a named path could not be listed at all.
//! - [ConfigError]: the `nicels.toml` file could not be read, parsed or generated.
//! - [RenderError]: writing the listing to the output stream failed.
//!
//! [ExitStatus] is the per-path result that the caller folds into the process exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to list a path given on the command line.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot access '{}': No such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("cannot access '{}': Permission denied", .0.display())]
    Access(PathBuf),

    #[error("cannot open directory '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An item of an open directory could not be read.
    #[error("reading directory '{}': {source}", .path.display())]
    Item {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an io error raised while opening `path`.
    pub fn from_io(path: PathBuf, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path),
            io::ErrorKind::PermissionDenied => ScanError::Access(path),
            _ => ScanError::Io { path, source: err },
        }
    }
}

/// Errors raised while loading or generating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config file already exists at '{}'", .0.display())]
    AlreadyExists(PathBuf),

    #[error("config io error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while emitting output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write listing: {0}")]
    Write(#[from] io::Error),
}

/// Severity of the outcome of listing one path.
///
/// Ordered so that combining two results keeps the worse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ExitStatus {
    #[default]
    Ok = 0,
    /// Something below a named path was unreadable.
    Minor = 1,
    /// A named path itself could not be accessed.
    Serious = 2,
}

impl ExitStatus {
    #[inline]
    pub fn combine(self, other: ExitStatus) -> ExitStatus {
        self.max(other)
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }
}
