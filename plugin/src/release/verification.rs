//! Verification policy for downloaded engine archives.
//!
//! The policy is a value type: it records whether the published checksum
//! must be checked before extraction and leaves the hashing to the
//! installer.

use std::fmt;

/// Policy governing how a downloaded archive is verified before use.
///
/// # Examples
///
/// ```
/// use vela_hugo::release::verification::VerificationPolicy;
///
/// let policy = VerificationPolicy::default();
/// assert!(policy.require_checksum());
/// assert!(!VerificationPolicy::disabled().require_checksum());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationPolicy {
    require_checksum: bool,
}

impl VerificationPolicy {
    /// A policy that skips checksum verification.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            require_checksum: false,
        }
    }

    /// Return whether checksum verification is required.
    ///
    /// When true (the default), the installer downloads the release's
    /// checksums file and compares the archive's SHA-256 digest against the
    /// listed entry before extracting anything.
    #[must_use]
    pub const fn require_checksum(&self) -> bool {
        self.require_checksum
    }
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            require_checksum: true,
        }
    }
}

impl fmt::Display for VerificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.require_checksum {
            write!(f, "checksum verification required")
        } else {
            write!(f, "checksum verification disabled")
        }
    }
}
