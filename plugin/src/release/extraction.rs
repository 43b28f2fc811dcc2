//! Archive extraction for engine release archives.
//!
//! Extracts `.tar.gz` archives to a target directory. Entries with absolute
//! paths or `..` components are rejected before anything is written, and
//! link entries are refused so no later entry can be written through one.

use flate2::read::GzDecoder;
use std::path::{Component, Path};

/// Trait for extracting release archives, enabling test mocking.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use vela_hugo::release::extraction::{ArchiveExtractor, TarGzExtractor};
///
/// let files = TarGzExtractor.extract(
///     Path::new("/tmp/hugo_0.110.0_linux-amd64.tar.gz"),
///     Path::new("/bin/download"),
/// )?;
/// assert!(files.iter().any(|file| file == "hugo"));
/// # Ok::<(), vela_hugo::release::extraction::ExtractionError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor {
    /// Extract the archive at `archive_path` into `dest_dir`.
    ///
    /// Returns the relative paths of the regular files that were extracted.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry
    /// attempts to escape the destination directory.
    /// Returns [`ExtractionError::LinkEntry`] for symbolic or hard links.
    /// Returns [`ExtractionError::EmptyArchive`] if no files are found.
    /// Returns [`ExtractionError::Io`] on I/O failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path)
    -> Result<Vec<String>, ExtractionError>;
}

/// Errors arising from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains a symbolic or hard link.
    #[error("link entries are not allowed: {path}")]
    LinkEntry {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains no files.
    #[error("archive contains no files")]
    EmptyArchive,
}

/// Default extractor using the `tar` and `flate2` crates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl ArchiveExtractor for TarGzExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<String>, ExtractionError> {
        let file = std::fs::File::open(archive_path)?;
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        std::fs::create_dir_all(dest_dir)?;
        let mut extracted = Vec::new();

        for entry_result in archive.entries()? {
            let mut entry = entry_result?;
            let entry_path = entry.path()?.into_owned();

            validate_entry_path(&entry_path)?;
            let entry_type = entry.header().entry_type();
            if entry_type.is_symlink() || entry_type.is_hard_link() {
                return Err(ExtractionError::LinkEntry {
                    path: entry_path.display().to_string(),
                });
            }

            if !entry.unpack_in(dest_dir)? {
                return Err(ExtractionError::PathTraversal {
                    path: entry_path.display().to_string(),
                });
            }

            if entry_type.is_file() {
                extracted.push(entry_path.to_string_lossy().into_owned());
            }
        }

        if extracted.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }

        log::debug!(
            "extracted {} file(s) into {}",
            extracted.len(),
            dest_dir.display()
        );
        Ok(extracted)
    }
}

/// Validate that a tar entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|component| matches!(component, Component::ParentDir | Component::RootDir));
    if escapes {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use rstest::rstest;
    use std::path::PathBuf;

    fn write_archive(archive_path: &Path, entries: &[(&str, &[u8])]) {
        let output_file = std::fs::File::create(archive_path).expect("create archive");
        let encoder = GzEncoder::new(output_file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, contents) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, name, *contents)
                .expect("append");
        }
        let encoder = builder.into_inner().expect("tar finish");
        encoder.finish().expect("gzip finish");
    }

    #[test]
    fn extracts_engine_archive() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("hugo_0.110.0_linux-amd64.tar.gz");
        let dest_dir = temp_dir.path().join("download");
        write_archive(
            &archive_path,
            &[("hugo", b"#!/bin/sh\n"), ("LICENSE", b"Apache-2.0")],
        );

        let files = TarGzExtractor
            .extract(&archive_path, &dest_dir)
            .expect("extract");
        assert_eq!(files, vec!["hugo", "LICENSE"]);
        assert!(dest_dir.join("hugo").is_file());
    }

    #[test]
    fn extract_empty_archive() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("empty.tar.gz");
        write_archive(&archive_path, &[]);

        let result = TarGzExtractor.extract(&archive_path, temp_dir.path());
        assert!(matches!(result, Err(ExtractionError::EmptyArchive)));
    }

    #[test]
    fn corrupt_archive_is_io_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("corrupt.tar.gz");
        std::fs::write(&archive_path, b"not a gzip stream").expect("write");

        let result = TarGzExtractor.extract(&archive_path, temp_dir.path());
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn refuses_to_write_through_symlink() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let outside = temp_dir.path().join("outside");
        std::fs::create_dir(&outside).expect("create outside dir");
        let archive_path = temp_dir.path().join("links.tar.gz");
        let dest_dir = temp_dir.path().join("download");

        let output_file = std::fs::File::create(&archive_path).expect("create archive");
        let mut builder = tar::Builder::new(GzEncoder::new(output_file, Compression::default()));
        let mut link = tar::Header::new_gnu();
        link.set_entry_type(tar::EntryType::Symlink);
        link.set_size(0);
        link.set_mode(0o777);
        builder
            .append_link(&mut link, "link", &outside)
            .expect("append link");
        let contents: &[u8] = b"escaped";
        let mut file = tar::Header::new_gnu();
        file.set_size(contents.len() as u64);
        file.set_mode(0o644);
        file.set_cksum();
        builder
            .append_data(&mut file, "link/evil", contents)
            .expect("append file");
        builder
            .into_inner()
            .expect("tar finish")
            .finish()
            .expect("gzip finish");

        let result = TarGzExtractor.extract(&archive_path, &dest_dir);

        assert!(
            matches!(result, Err(ExtractionError::LinkEntry { ref path }) if path == "link"),
            "unexpected result {result:?}"
        );
        assert!(!outside.join("evil").exists());
    }

    #[rstest]
    #[case::parent_dir("../escape.txt")]
    #[case::nested_parent("foo/../../escape.txt")]
    #[case::absolute("/etc/passwd")]
    fn rejects_path_traversal(#[case] bad_path: &str) {
        let result = validate_entry_path(&PathBuf::from(bad_path));
        assert!(
            matches!(result, Err(ExtractionError::PathTraversal { .. })),
            "expected PathTraversal for {bad_path}"
        );
    }

    #[test]
    fn accepts_normal_paths() {
        assert!(validate_entry_path(&PathBuf::from("docs/README.md")).is_ok());
    }
}
