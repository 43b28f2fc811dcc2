//! Build options forwarded to the engine.

/// Options that control which content the engine renders.
///
/// Plain data; every combination of values is acceptable, so there is no
/// validation step for this record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSettings {
    /// Hostname (and path) to the root, e.g. `https://example.com/`.
    pub base_url: String,
    /// Include content marked as draft.
    pub include_drafts: bool,
    /// Include expired content.
    pub include_expired: bool,
    /// Include content with a publish date in the future.
    pub include_future: bool,
}
