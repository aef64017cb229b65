//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for resource-discovery operations.
pub type Result<T, E = DiscoveryError> = std::result::Result<T, E>;

/// Errors raised at the public boundary of the discovery core.
///
/// Scoring and classification never fail; everything here is a caller
/// mistake or a problem with external input (catalog files, configuration).
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A required argument was missing or malformed.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A filter parameter was present but held a different type than requested.
    #[error("filter `{name}` has type {actual}, expected {expected}")]
    FilterType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A slug did not name any known concept, category, difficulty or type.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownSlug {
        kind: &'static str,
        value: String,
        expected: String,
    },

    /// BM25 scoring was requested before corpus statistics were computed.
    #[error("BM25 corpus statistics have not been computed")]
    StatisticsNotReady,

    /// A catalog entry failed validation.
    #[error("invalid catalog entry #{index}: {reason}")]
    Catalog { index: usize, reason: String },

    /// Catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    /// Configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a catalog or configuration file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Shorthand for [`DiscoveryError::InvalidArgument`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
