//! Published checksums and archive hashing.
//!
//! Every engine release ships a `hugo_<version>_checksums.txt` file in the
//! `sha256sum` format: one `<digest>  <filename>` pair per line.

use super::sha256_digest::Sha256Digest;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors arising from checksum parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// A digest is not a 64-character hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    InvalidDigest {
        /// Description of the validation failure.
        reason: String,
    },

    /// A line does not follow the `<digest>  <filename>` layout.
    #[error("malformed checksums line {line_number}: {line}")]
    MalformedLine {
        /// One-based line number.
        line_number: usize,
        /// The offending line.
        line: String,
    },
}

/// Parsed contents of a checksums file.
///
/// # Examples
///
/// ```
/// use vela_hugo::release::checksum::ChecksumFile;
///
/// let digest = "a".repeat(64);
/// let text = format!("{digest}  hugo_0.110.0_linux-amd64.tar.gz\n");
/// let checksums = ChecksumFile::parse(&text).expect("valid checksums");
/// assert!(checksums.lookup("hugo_0.110.0_linux-amd64.tar.gz").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumFile {
    entries: BTreeMap<String, Sha256Digest>,
}

impl ChecksumFile {
    /// Parse `sha256sum`-style text.
    ///
    /// Blank lines are ignored and a leading `*` (binary mode marker) on the
    /// filename is stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::MalformedLine`] for lines without exactly a
    /// digest and a filename, and [`ChecksumError::InvalidDigest`] for
    /// digests that are not valid SHA-256 hex.
    pub fn parse(text: &str) -> Result<Self, ChecksumError> {
        let mut entries = BTreeMap::new();
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut fields = trimmed.split_whitespace();
            let (Some(digest), Some(filename), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(ChecksumError::MalformedLine {
                    line_number: index + 1,
                    line: line.to_owned(),
                });
            };
            let filename = filename.strip_prefix('*').unwrap_or(filename);
            entries.insert(filename.to_owned(), Sha256Digest::try_from(digest)?);
        }
        Ok(Self { entries })
    }

    /// The published digest for `filename`, if listed.
    #[must_use]
    pub fn lookup(&self, filename: &str) -> Option<&Sha256Digest> {
        self.entries.get(filename)
    }

    /// Number of listed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns any I/O error raised while reading the file.
pub fn compute_sha256(path: &Path) -> std::io::Result<Sha256Digest> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(Sha256Digest::from_hasher(hasher))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE: &str = "hugo_extended_0.110.0_linux-amd64.tar.gz";

    #[test]
    fn parses_published_layout() {
        let first = "1".repeat(64);
        let second = "2".repeat(64);
        let text = format!(
            "{first}  {ARCHIVE}\n\n{second}  hugo_0.110.0_linux-amd64.tar.gz\n"
        );

        let checksums = ChecksumFile::parse(&text).expect("valid checksums");
        assert_eq!(checksums.len(), 2);
        assert_eq!(
            checksums.lookup(ARCHIVE).map(Sha256Digest::as_str),
            Some(first.as_str())
        );
    }

    #[test]
    fn strips_binary_marker() {
        let digest = "3".repeat(64);
        let checksums =
            ChecksumFile::parse(&format!("{digest} *{ARCHIVE}")).expect("valid checksums");
        assert!(checksums.lookup(ARCHIVE).is_some());
    }

    #[test]
    fn rejects_lines_without_filename() {
        let err = ChecksumFile::parse(&"4".repeat(64)).expect_err("missing filename");
        assert!(matches!(err, ChecksumError::MalformedLine { line_number: 1, .. }));
    }

    #[test]
    fn rejects_invalid_digest() {
        let err = ChecksumFile::parse(&format!("nothex  {ARCHIVE}")).expect_err("bad digest");
        assert!(matches!(err, ChecksumError::InvalidDigest { .. }));
    }

    #[test]
    fn computes_file_digest() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("archive.tar.gz");
        std::fs::write(&path, b"hello world").expect("write archive");

        let digest = compute_sha256(&path).expect("hash file");
        assert_eq!(digest, Sha256Digest::of_bytes(b"hello world"));
    }
}
