//! Platform and architecture naming for engine release assets.
//!
//! Release assets are named `<binary>_<version>_<platform>-<arch>.tar.gz`.
//! The engine switched naming schemes at 0.103.0: earlier releases use
//! `macOS`, `Linux`, `64bit` and friends, later ones use Go-style tokens
//! (`darwin`, `linux`, `amd64`). Since 0.102.0 macOS ships a single
//! universal binary.

use super::EngineVersion;
use std::fmt;

/// Operating systems the engine publishes binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS.
    Darwin,
    /// Linux.
    Linux,
    /// Windows.
    Windows,
    /// Anything else; produces the `unsupported` token.
    Unsupported,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an operating system name (Rust or Go spelling) to a platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::version::Platform;
    ///
    /// assert_eq!(Platform::from_os("macos"), Platform::Darwin);
    /// assert_eq!(Platform::from_os("freebsd"), Platform::Unsupported);
    /// ```
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "darwin" => Self::Darwin,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Unsupported,
        }
    }

    /// The asset token for this platform under `naming`.
    #[must_use]
    pub const fn token(self, naming: AssetNaming) -> &'static str {
        match (self, naming) {
            (Self::Darwin, AssetNaming::Legacy) => "macOS",
            (Self::Darwin, AssetNaming::Modern) => "darwin",
            (Self::Linux, AssetNaming::Legacy) => "Linux",
            (Self::Linux, AssetNaming::Modern) => "linux",
            (Self::Windows, AssetNaming::Legacy) => "Windows",
            (Self::Windows, AssetNaming::Modern) => "windows",
            (Self::Unsupported, _) => UNSUPPORTED,
        }
    }
}

/// CPU architectures the engine publishes binaries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    /// 64-bit x86.
    Amd64,
    /// 64-bit ARM.
    Arm64,
    /// 32-bit ARM.
    Arm,
    /// 32-bit x86.
    X86,
    /// Anything else; produces the `unsupported` token.
    Unsupported,
}

impl Arch {
    /// The architecture this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_arch(std::env::consts::ARCH)
    }

    /// Map an architecture name (Rust or Go spelling) to an architecture.
    #[must_use]
    pub fn from_arch(arch: &str) -> Self {
        match arch {
            "x86_64" | "amd64" => Self::Amd64,
            "aarch64" | "arm64" => Self::Arm64,
            "arm" => Self::Arm,
            "x86" | "386" => Self::X86,
            _ => Self::Unsupported,
        }
    }

    /// The asset token for this architecture under `naming`.
    #[must_use]
    pub const fn token(self, naming: AssetNaming) -> &'static str {
        match (self, naming) {
            (Self::Amd64, AssetNaming::Legacy) => "64bit",
            (Self::Amd64, AssetNaming::Modern) => "amd64",
            (Self::Arm64, _) => "arm64",
            (Self::Arm, _) => "arm",
            (Self::X86, AssetNaming::Legacy) => "32bit",
            (Self::X86, AssetNaming::Modern) => "386",
            (Self::Unsupported, _) => UNSUPPORTED,
        }
    }
}

const UNSUPPORTED: &str = "unsupported";

/// Token used for the combined macOS binary.
pub const UNIVERSAL_ARCH: &str = "universal";

/// Highest minor version that still shipped per-architecture macOS builds.
const LAST_SPLIT_MACOS_MINOR: u64 = 101;

/// Asset naming scheme used by a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetNaming {
    /// `macOS-64bit`, `Linux-ARM64` style names used before 0.103.0.
    Legacy,
    /// `darwin-universal`, `linux-amd64` style names used from 0.103.0.
    Modern,
}

impl AssetNaming {
    /// The naming scheme used by `version`.
    #[must_use]
    pub fn for_version(version: &EngineVersion) -> Self {
        if version.is_at_least(0, 103, 0) {
            Self::Modern
        } else {
            Self::Legacy
        }
    }
}

impl fmt::Display for AssetNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Modern => write!(f, "modern"),
        }
    }
}

/// Platform and architecture tokens for one release asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetTarget {
    /// Platform token, e.g. `linux` or `macOS`.
    pub platform: &'static str,
    /// Architecture token, e.g. `amd64` or `universal`.
    pub arch: &'static str,
}

impl AssetTarget {
    /// Compute the asset tokens for `version` on `platform`/`arch`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vela_hugo::version::{Arch, AssetTarget, EngineVersion, Platform};
    ///
    /// let version = EngineVersion::new(0, 105, 2);
    /// let target = AssetTarget::new(&version, Platform::Darwin, Arch::Arm64);
    /// assert_eq!((target.platform, target.arch), ("darwin", "universal"));
    /// ```
    #[must_use]
    pub fn new(version: &EngineVersion, platform: Platform, arch: Arch) -> Self {
        let naming = AssetNaming::for_version(version);
        let arch_token = if platform == Platform::Darwin && version.minor() > LAST_SPLIT_MACOS_MINOR
        {
            UNIVERSAL_ARCH
        } else {
            arch.token(naming)
        };
        Self {
            platform: platform.token(naming),
            arch: arch_token,
        }
    }

    /// Whether both tokens name a published target.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.platform != UNSUPPORTED && self.arch != UNSUPPORTED
    }
}

impl fmt::Display for AssetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}
