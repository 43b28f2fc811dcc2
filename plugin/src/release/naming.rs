//! Release asset naming for engine downloads.
//!
//! Assets live at
//! `https://github.com/gohugoio/hugo/releases/download/v<version>/<binary>_<version>_<platform>-<arch>.tar.gz`
//! next to a `hugo_<version>_checksums.txt` file listing their SHA-256
//! digests.

use crate::version::{AssetTarget, EngineVersion, ResolvedVersion};
use std::fmt;

/// Base URL of the engine's release downloads.
const RELEASE_BASE_URL: &str = "https://github.com/gohugoio/hugo/releases/download";

/// Name of the standard engine binary, inside and outside archives.
pub const ENGINE_BINARY: &str = "hugo";

/// Asset prefix of the extended build variant.
pub const EXTENDED_BINARY: &str = "hugo_extended";

/// Archive extension used for every published target.
const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// A single downloadable engine archive.
///
/// # Examples
///
/// ```
/// use vela_hugo::release::naming::ReleaseAsset;
/// use vela_hugo::version::{Arch, Platform, resolve_for};
///
/// let resolved = resolve_for("0.110.0", "0.100.0", Platform::Linux, Arch::Amd64)
///     .expect("valid version");
/// let asset = ReleaseAsset::new(&resolved, true);
/// assert_eq!(asset.filename(), "hugo_extended_0.110.0_linux-amd64.tar.gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    version: EngineVersion,
    binary: &'static str,
    target: AssetTarget,
}

impl ReleaseAsset {
    /// Describe the archive for `resolved`, choosing the extended variant
    /// when `extended` is set.
    #[must_use]
    pub fn new(resolved: &ResolvedVersion, extended: bool) -> Self {
        Self {
            version: resolved.version().clone(),
            binary: if extended {
                EXTENDED_BINARY
            } else {
                ENGINE_BINARY
            },
            target: resolved.target(),
        }
    }

    /// The archive filename.
    #[must_use]
    pub fn filename(&self) -> String {
        format!(
            "{}_{}_{}{ARCHIVE_EXTENSION}",
            self.binary, self.version, self.target
        )
    }

    /// The archive download URL.
    #[must_use]
    pub fn url(&self) -> String {
        self.release_url(&self.filename())
    }

    /// The filename of the checksums file published with the release.
    #[must_use]
    pub fn checksums_filename(&self) -> String {
        format!("{ENGINE_BINARY}_{}_checksums.txt", self.version)
    }

    /// The checksums file download URL.
    #[must_use]
    pub fn checksums_url(&self) -> String {
        self.release_url(&self.checksums_filename())
    }

    /// The asset target tokens.
    #[must_use]
    pub fn target(&self) -> AssetTarget {
        self.target
    }

    fn release_url(&self, filename: &str) -> String {
        format!("{RELEASE_BASE_URL}/v{}/{filename}", self.version)
    }
}

impl fmt::Display for ReleaseAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename())
    }
}
