//! Engine binary installation.
//!
//! The plugin image ships a default engine build at `/bin/hugo`. When a
//! different version or the extended variant is requested, the installer
//! moves the bundled binary aside, downloads the matching release archive,
//! verifies it against the published checksums, extracts it and puts the
//! new binary in place.
//!
//! Collaborators are injected so the whole flow runs against an in-memory
//! filesystem and mocked network in tests; [`Installer::system`] wires the
//! production implementations.

use crate::fs::{EntryKind, FileSystem, OsFileSystem};
use crate::release::checksum::{ChecksumError, ChecksumFile, compute_sha256};
use crate::release::download::{DownloadError, HttpDownloader, ReleaseDownloader};
use crate::release::extraction::{ArchiveExtractor, ExtractionError, TarGzExtractor};
use crate::release::naming::{ENGINE_BINARY, ReleaseAsset};
use crate::release::verification::VerificationPolicy;
use crate::version::{Arch, EngineVersion, Platform, VersionError, resolve_for};
use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Mode applied to the installed binary.
const BINARY_MODE: u32 = 0o700;

/// Suffix appended to the bundled binary when it is moved aside.
const BACKUP_SUFFIX: &str = ".default";

/// Where the engine binary lives and where archives are unpacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Path of the engine binary the plugin executes.
    pub binary: Utf8PathBuf,
    /// Directory release archives are extracted into.
    pub scratch_dir: Utf8PathBuf,
}

impl InstallLayout {
    /// Path the bundled binary is moved to before installing.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::install::InstallLayout;
    ///
    /// assert_eq!(InstallLayout::default().backup_path(), "/bin/hugo.default");
    /// ```
    #[must_use]
    pub fn backup_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}{BACKUP_SUFFIX}", self.binary))
    }

    /// Path of the binary inside the extracted archive.
    #[must_use]
    pub fn extracted_binary(&self) -> Utf8PathBuf {
        self.scratch_dir.join(ENGINE_BINARY)
    }
}

impl Default for InstallLayout {
    fn default() -> Self {
        Self {
            binary: Utf8PathBuf::from("/bin/hugo"),
            scratch_dir: Utf8PathBuf::from("/bin/download"),
        }
    }
}

/// Errors arising from binary installation.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The requested or default version did not parse.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// The bundled binary could not be moved aside.
    #[error("unable to rename {path} to {backup}: {source}")]
    Backup {
        /// The bundled binary.
        path: Utf8PathBuf,
        /// Where it was being moved to.
        backup: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The temporary download directory could not be created.
    #[error("unable to create download directory: {source}")]
    DownloadDir {
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The scratch directory could not be created.
    #[error("unable to create directory {path}: {source}")]
    ScratchDir {
        /// The directory.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// Fetching the archive or checksums failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// The checksums file could not be parsed.
    #[error("invalid checksums file: {0}")]
    Checksum(#[from] ChecksumError),

    /// The checksums file has no entry for the archive.
    #[error("no checksum published for {filename}")]
    ChecksumMissing {
        /// The archive filename.
        filename: String,
    },

    /// The archive digest does not match the published checksum.
    #[error("checksum mismatch for {filename}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// The archive filename.
        filename: String,
        /// The published digest.
        expected: String,
        /// The digest of the downloaded archive.
        actual: String,
    },

    /// The downloaded archive could not be hashed.
    #[error("unable to hash {filename}: {source}")]
    Hash {
        /// The archive filename.
        filename: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The archive could not be extracted.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The archive did not contain the engine binary.
    #[error("no engine binary found @ {path}")]
    MissingBinary {
        /// Where the binary was expected.
        path: Utf8PathBuf,
    },

    /// The extracted binary could not be moved into place.
    #[error("unable to rename {from} to {to}: {source}")]
    Move {
        /// The extracted binary.
        from: Utf8PathBuf,
        /// The install location.
        to: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The installed binary could not be made executable.
    #[error("unable to set permissions on {path}: {source}")]
    Permissions {
        /// The installed binary.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// What [`Installer::install`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The bundled binary already satisfies the request.
    UsingBundled {
        /// The bundled version.
        version: EngineVersion,
    },
    /// A release archive was downloaded and installed.
    Installed {
        /// The installed version.
        version: EngineVersion,
        /// Where the archive was downloaded from.
        url: String,
    },
}

/// Downloads and installs engine releases.
pub struct Installer<'a> {
    fs: &'a dyn FileSystem,
    downloader: &'a dyn ReleaseDownloader,
    extractor: &'a dyn ArchiveExtractor,
    policy: VerificationPolicy,
    layout: InstallLayout,
    platform: Platform,
    arch: Arch,
}

impl Installer<'static> {
    /// An installer using the host filesystem, HTTP and `.tar.gz` archives.
    #[must_use]
    pub fn system() -> Self {
        Self::new(&OsFileSystem, &HttpDownloader, &TarGzExtractor)
    }
}

impl<'a> Installer<'a> {
    /// Create an installer with the default layout and verification policy,
    /// targeting the host platform.
    #[must_use]
    pub fn new(
        fs: &'a dyn FileSystem,
        downloader: &'a dyn ReleaseDownloader,
        extractor: &'a dyn ArchiveExtractor,
    ) -> Self {
        Self {
            fs,
            downloader,
            extractor,
            policy: VerificationPolicy::default(),
            layout: InstallLayout::default(),
            platform: Platform::current(),
            arch: Arch::current(),
        }
    }

    /// Use `layout` instead of the default paths.
    #[must_use]
    pub fn with_layout(mut self, layout: InstallLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Use `policy` for archive verification.
    #[must_use]
    pub fn with_policy(mut self, policy: VerificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Download assets for `platform`/`arch` instead of the host.
    #[must_use]
    pub fn with_target(mut self, platform: Platform, arch: Arch) -> Self {
        self.platform = platform;
        self.arch = arch;
        self
    }

    /// Install the engine build satisfying `requested` (or `default` when
    /// empty), in its extended variant when `extended` is set.
    ///
    /// Returns [`InstallOutcome::UsingBundled`] without touching the
    /// filesystem or network when the bundled default suffices.
    ///
    /// # Errors
    ///
    /// Returns an [`InstallError`] describing the first step that failed.
    /// Nothing is retried; once the bundled binary has been moved aside a
    /// later failure leaves it at [`InstallLayout::backup_path`].
    pub fn install(
        &self,
        extended: bool,
        requested: &str,
        default: &str,
    ) -> Result<InstallOutcome, InstallError> {
        let resolved = resolve_for(requested, default, self.platform, self.arch)?;
        if !resolved.needs_install(extended) {
            log::debug!("using bundled engine version {}", resolved.version());
            return Ok(InstallOutcome::UsingBundled {
                version: resolved.version().clone(),
            });
        }

        let backup = self.layout.backup_path();
        log::debug!("moving {} to {backup}", self.layout.binary);
        self.fs
            .rename(&self.layout.binary, &backup)
            .map_err(|source| InstallError::Backup {
                path: self.layout.binary.clone(),
                backup: backup.clone(),
                source,
            })?;

        let asset = ReleaseAsset::new(&resolved, extended);
        if !asset.target().is_supported() {
            log::warn!("no engine release is published for {}", asset.target());
        }
        let url = asset.url();
        log::info!("downloading engine version {}", resolved.version());
        log::debug!("fetching {url}");

        let download_dir =
            tempfile::tempdir().map_err(|source| InstallError::DownloadDir { source })?;
        let archive_path = download_dir.path().join(asset.filename());
        self.downloader.download_file(&url, &archive_path)?;

        if self.policy.require_checksum() {
            self.verify(&asset, &archive_path)?;
        } else {
            log::debug!("{}", self.policy);
        }

        self.fs
            .create_dir_all(&self.layout.scratch_dir)
            .map_err(|source| InstallError::ScratchDir {
                path: self.layout.scratch_dir.clone(),
                source,
            })?;
        let files = self
            .extractor
            .extract(&archive_path, self.layout.scratch_dir.as_std_path())?;
        log::trace!("extracted {files:?}");

        self.place_binary()?;
        log::info!("installed engine version {}", resolved.version());

        Ok(InstallOutcome::Installed {
            version: resolved.version().clone(),
            url,
        })
    }

    /// Check the archive at `archive_path` against the published checksums.
    fn verify(&self, asset: &ReleaseAsset, archive_path: &Path) -> Result<(), InstallError> {
        let filename = asset.filename();
        let checksums = ChecksumFile::parse(&self.downloader.download_text(&asset.checksums_url())?)?;
        let expected = checksums
            .lookup(&filename)
            .ok_or_else(|| InstallError::ChecksumMissing {
                filename: filename.clone(),
            })?;
        let actual = compute_sha256(archive_path).map_err(|source| InstallError::Hash {
            filename: filename.clone(),
            source,
        })?;
        if actual != *expected {
            return Err(InstallError::ChecksumMismatch {
                filename,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
        log::debug!("verified {filename} ({actual})");
        Ok(())
    }

    /// Move the extracted binary into place and make it executable.
    fn place_binary(&self) -> Result<(), InstallError> {
        let extracted = self.layout.extracted_binary();
        require_file(self.fs, &extracted)?;

        self.fs
            .rename(&extracted, &self.layout.binary)
            .map_err(|source| InstallError::Move {
                from: extracted.clone(),
                to: self.layout.binary.clone(),
                source,
            })?;
        self.fs
            .set_mode(&self.layout.binary, BINARY_MODE)
            .map_err(|source| InstallError::Permissions {
                path: self.layout.binary.clone(),
                source,
            })
    }
}

fn require_file(fs: &dyn FileSystem, path: &Utf8Path) -> Result<(), InstallError> {
    match fs.stat(path) {
        Ok(EntryKind::File) => Ok(()),
        _ => Err(InstallError::MissingBinary {
            path: path.to_owned(),
        }),
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
