//! Release download over HTTP.
//!
//! Provides a trait-based abstraction for fetching release assets so that
//! installation can be exercised without network access.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Time allowed to establish a connection to the release host.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Time allowed for the release host to start responding.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for downloading release assets.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use vela_hugo::release::download::{HttpDownloader, ReleaseDownloader};
///
/// HttpDownloader.download_file(
///     "https://github.com/gohugoio/hugo/releases/download/v0.110.0/hugo_0.110.0_linux-amd64.tar.gz",
///     Path::new("/tmp/hugo.tar.gz"),
/// )?;
/// # Ok::<(), vela_hugo::release::download::DownloadError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseDownloader {
    /// Download `url` and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the asset is not found.
    fn download_text(&self, url: &str) -> Result<String, DownloadError>;

    /// Download `url` into the file at `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or the file write fails.
    fn download_file(&self, url: &str, dest: &Path) -> Result<(), DownloadError>;
}

/// Errors arising from release downloads.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested asset was not found (HTTP 404).
    #[error("release asset not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded file.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP downloader using `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl ReleaseDownloader for HttpDownloader {
    fn download_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        response
            .into_body()
            .read_to_string()
            .map_err(|e| DownloadError::HttpError {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }

    fn download_file(&self, url: &str, dest: &Path) -> Result<(), DownloadError> {
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        let mut reader = response.into_body().into_reader();
        std::io::copy(&mut reader, &mut file)?;
        Ok(())
    }
}

/// Shared `ureq` agent.
///
/// Only connection and first-response timeouts are set: archives are large
/// and the body transfer is left unbounded.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(CONNECT_TIMEOUT))
            .timeout_recv_response(Some(RESPONSE_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`DownloadError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> DownloadError {
    match err {
        ureq::Error::StatusCode(404) => DownloadError::NotFound {
            url: url.to_owned(),
        },
        other => DownloadError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_ureq_error_maps_404_to_not_found() {
        let err = ureq::Error::StatusCode(404);
        let mapped = map_ureq_error("https://example.test/hugo.tar.gz", &err);
        assert!(matches!(mapped, DownloadError::NotFound { .. }));
    }

    #[test]
    fn map_ureq_error_maps_other_status_to_http_error() {
        let err = ureq::Error::StatusCode(500);
        let mapped = map_ureq_error("https://example.test/hugo.tar.gz", &err);
        match mapped {
            DownloadError::HttpError { url, .. } => {
                assert_eq!(url, "https://example.test/hugo.tar.gz");
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn not_found_message_names_url() {
        let err = DownloadError::NotFound {
            url: "https://example.test/missing".to_owned(),
        };
        assert!(err.to_string().contains("https://example.test/missing"));
    }
}
