//! Engine version resolution.
//!
//! Turns a requested version (possibly empty) and the bundled default into
//! a [`ResolvedVersion`]: the effective semantic version, whether it is the
//! bundled default, and the tokens naming the release asset for this host.
//!
//! # Sub-modules
//!
//! - [`engine_version`] - Semantic version newtype (`EngineVersion`).
//! - [`error`] - Parse failures (`VersionError`).
//! - [`platform`] - Platform, architecture and asset naming tokens.

pub mod engine_version;
pub mod error;
pub mod platform;

pub use engine_version::EngineVersion;
pub use error::VersionError;
pub use platform::{Arch, AssetNaming, AssetTarget, Platform};

/// The engine version bundled with the plugin image when no other default
/// is configured.
pub const DEFAULT_ENGINE_VERSION: &str = "0.139.4";

/// A request for a particular engine build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequest {
    /// Version asked for; empty means "use the default".
    pub requested: String,
    /// Version already installed in the plugin image.
    pub default: String,
    /// Whether the extended build variant is wanted.
    pub extended: bool,
}

impl VersionRequest {
    /// Resolve the request for the host platform.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersion`] if the effective version
    /// does not parse.
    pub fn resolve(&self) -> Result<ResolvedVersion, VersionError> {
        resolve(&self.requested, &self.default)
    }

    /// Whether a download is needed to satisfy the request.
    ///
    /// The extended variant is never bundled, so it always needs one.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::InvalidVersion`] if the effective version
    /// does not parse.
    pub fn needs_install(&self) -> Result<bool, VersionError> {
        Ok(self.resolve()?.needs_install(self.extended))
    }
}

/// The outcome of resolving a version request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    version: EngineVersion,
    is_default: bool,
    target: AssetTarget,
}

impl ResolvedVersion {
    /// The effective engine version.
    #[must_use]
    pub fn version(&self) -> &EngineVersion {
        &self.version
    }

    /// Whether the effective version is the bundled default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Asset tokens for the host platform and architecture.
    #[must_use]
    pub fn target(&self) -> AssetTarget {
        self.target
    }

    /// Whether installing `extended` (or not) at this version needs a
    /// download.
    #[must_use]
    pub fn needs_install(&self, extended: bool) -> bool {
        !self.is_default || extended
    }
}

/// Resolve `requested` (or `default` when empty) for the host.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] if the effective version does
/// not parse.
///
/// # Examples
///
/// ```
/// use vela_hugo::version::resolve;
///
/// let resolved = resolve("", "0.100.0").expect("valid default");
/// assert_eq!(resolved.version().to_string(), "0.100.0");
/// assert!(resolved.is_default());
/// ```
pub fn resolve(requested: &str, default: &str) -> Result<ResolvedVersion, VersionError> {
    resolve_for(requested, default, Platform::current(), Arch::current())
}

/// Resolve `requested` (or `default` when empty) for an explicit target.
///
/// # Errors
///
/// Returns [`VersionError::InvalidVersion`] if the effective version does
/// not parse.
pub fn resolve_for(
    requested: &str,
    default: &str,
    platform: Platform,
    arch: Arch,
) -> Result<ResolvedVersion, VersionError> {
    let version: EngineVersion = effective(requested, default).parse()?;
    let normalised_default = default
        .parse::<EngineVersion>()
        .map_or_else(|_| default.trim().to_owned(), |parsed| parsed.to_string());
    let is_default = version
        .to_string()
        .eq_ignore_ascii_case(&normalised_default);
    let target = AssetTarget::new(&version, platform, arch);

    Ok(ResolvedVersion {
        version,
        is_default,
        target,
    })
}

fn effective<'a>(requested: &'a str, default: &'a str) -> &'a str {
    if requested.trim().is_empty() {
        default
    } else {
        requested
    }
}
