//! Semantic version newtype for engine releases.
//!
//! Parsing is lenient in the same ways release tags are: a leading `v` is
//! accepted and dropped, and missing minor or patch components default to
//! zero. Pre-release and build metadata are kept verbatim.

use super::error::{Result, VersionError};
use std::fmt;
use std::str::FromStr;

/// A parsed engine version such as `0.105.2` or `0.111.0-rc1`.
///
/// # Examples
///
/// ```
/// use vela_hugo::version::EngineVersion;
///
/// let version: EngineVersion = "v0.105".parse().expect("valid version");
/// assert_eq!(version.to_string(), "0.105.0");
/// assert_eq!(version.minor(), 105);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<String>,
    build: Option<String>,
}

impl EngineVersion {
    /// Create a release version with no pre-release or build metadata.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build: None,
        }
    }

    /// The major component.
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.major
    }

    /// The minor component.
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.minor
    }

    /// The patch component.
    #[must_use]
    pub const fn patch(&self) -> u64 {
        self.patch
    }

    /// The pre-release identifier, if any.
    #[must_use]
    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    /// Whether the numeric part is at least `major.minor.patch`.
    #[must_use]
    pub fn is_at_least(&self, major: u64, minor: u64, patch: u64) -> bool {
        (self.major, self.minor, self.patch) >= (major, minor, patch)
    }
}

impl FromStr for EngineVersion {
    type Err = VersionError;

    fn from_str(value: &str) -> Result<Self> {
        parse(value).map_err(|reason| VersionError::InvalidVersion {
            value: value.to_owned(),
            reason,
        })
    }
}

impl TryFrom<&str> for EngineVersion {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

fn parse(value: &str) -> std::result::Result<EngineVersion, String> {
    let trimmed = value.trim();
    let unprefixed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    if unprefixed.is_empty() {
        return Err("version is empty".to_owned());
    }

    let (rest, build) = split_suffix(unprefixed, '+', "build metadata")?;
    let (core, pre_release) = split_suffix(rest, '-', "pre-release")?;

    let mut components = core.split('.');
    let major = parse_component(components.next(), "major")?;
    let minor = parse_optional_component(components.next(), "minor")?;
    let patch = parse_optional_component(components.next(), "patch")?;
    if components.next().is_some() {
        return Err("too many version components".to_owned());
    }

    Ok(EngineVersion {
        major,
        minor,
        patch,
        pre_release,
        build,
    })
}

/// Split `value` at the first `separator`, validating the suffix.
fn split_suffix<'a>(
    value: &'a str,
    separator: char,
    label: &str,
) -> std::result::Result<(&'a str, Option<String>), String> {
    match value.split_once(separator) {
        None => Ok((value, None)),
        Some((head, suffix)) => {
            let valid = !suffix.is_empty()
                && suffix.split('.').all(|part| {
                    !part.is_empty()
                        && part
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || c == '-')
                });
            if valid {
                Ok((head, Some(suffix.to_owned())))
            } else {
                Err(format!("invalid {label} \"{suffix}\""))
            }
        }
    }
}

fn parse_component(part: Option<&str>, label: &str) -> std::result::Result<u64, String> {
    match part {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => digits
            .parse()
            .map_err(|err| format!("{label} component \"{digits}\": {err}")),
        Some(other) => Err(format!("{label} component \"{other}\" is not a number")),
        None => Err(format!("missing {label} component")),
    }
}

fn parse_optional_component(part: Option<&str>, label: &str) -> std::result::Result<u64, String> {
    match part {
        None => Ok(0),
        some => parse_component(some, label),
    }
}
