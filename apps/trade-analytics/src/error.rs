//! Error types for the trade analytics crate.
//!
//! The statistics engine itself only fails on malformed calls
//! ([`StatsError`]); everything else here comes from the outer surfaces
//! (configuration and journal loading).

use thiserror::Error;

use crate::config::ConfigError;
use crate::stats::StatsError;

/// Top-level error for loading inputs and building reports.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Configuration could not be loaded or failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trade journal could not be read.
    #[error("Failed to read trade journal '{path}': {source}")]
    Journal {
        /// Path to the journal file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Trade journal is not a valid JSON trade list.
    #[error("Invalid trade journal '{path}': {source}")]
    JournalFormat {
        /// Path to the journal file.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The statistics engine rejected an argument.
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl AnalyticsError {
    /// Stable reason string for structured logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Journal { .. } => "JOURNAL_UNREADABLE",
            Self::JournalFormat { .. } => "JOURNAL_INVALID",
            Self::Stats(StatsError::InvalidArgument { .. }) => "INVALID_ARGUMENT",
        }
    }
}

/// Result alias for [`AnalyticsError`].
pub type Result<T> = std::result::Result<T, AnalyticsError>;
