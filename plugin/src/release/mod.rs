//! Engine release assets: naming, download, verification and extraction.
//!
//! # Sub-modules
//!
//! - [`naming`] - Asset filenames and download URLs (`ReleaseAsset`).
//! - [`download`] - Downloader trait and HTTP implementation.
//! - [`sha256_digest`] - SHA-256 digest newtype (`Sha256Digest`).
//! - [`checksum`] - Published checksums file parsing and archive hashing.
//! - [`verification`] - Verification policy.
//! - [`extraction`] - `.tar.gz` extraction with path traversal protection.

pub mod checksum;
pub mod download;
pub mod extraction;
pub mod naming;
pub mod sha256_digest;
pub mod verification;
