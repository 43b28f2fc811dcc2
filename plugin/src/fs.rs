//! Filesystem capability injected into validation and installation.
//!
//! Path validation and binary installation never reach for `std::fs`
//! directly. They receive a [`FileSystem`] so that production wiring can
//! supply [`OsFileSystem`] while tests use an in-memory implementation.

use camino::Utf8Path;
use std::fmt;
use std::io;

/// The kind of entry found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file (or a symlink resolving to one).
    File,
    /// A directory (or a symlink resolving to one).
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// Filesystem operations needed by the plugin.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use vela_hugo::fs::{EntryKind, FileSystem, OsFileSystem};
///
/// let fs = OsFileSystem;
/// let kind = fs.stat(Utf8Path::new("content"))?;
/// assert_eq!(kind, EntryKind::Directory);
/// # Ok::<(), std::io::Error>(())
/// ```
pub trait FileSystem {
    /// Report what kind of entry exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::ErrorKind::NotFound`] error when nothing exists at
    /// `path`, or any other I/O error raised while querying it.
    fn stat(&self, path: &Utf8Path) -> io::Result<EntryKind>;

    /// Rename `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the rename.
    fn rename(&self, from: &Utf8Path, to: &Utf8Path) -> io::Result<()>;

    /// Create `path` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while creating the directories.
    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()>;

    /// Set the Unix permission bits of `path`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while updating the permissions.
    fn set_mode(&self, path: &Utf8Path, mode: u32) -> io::Result<()>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &Utf8Path) -> io::Result<EntryKind> {
        let metadata = std::fs::metadata(path)?;
        if metadata.is_dir() {
            Ok(EntryKind::Directory)
        } else {
            Ok(EntryKind::File)
        }
    }

    fn rename(&self, from: &Utf8Path, to: &Utf8Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Utf8Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(mode);
        std::fs::set_permissions(path, perms)
    }

    // Windows has no mode bits; existence is still checked.
    #[cfg(not(unix))]
    fn set_mode(&self, path: &Utf8Path, _mode: u32) -> io::Result<()> {
        std::fs::metadata(path).map(|_| ())
    }
}
