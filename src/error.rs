//! Unified error types for channelpress.
//!
//! This module provides a single [`ReportError`] enum that covers every way
//! a report can fail to generate. Frontends branch on the variant, not on a
//! type hierarchy.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **End users** get a short, actionable message — never a stack trace
//! - **Frontends** decide presentation (exit code, inline form error)

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for channelpress operations.
///
/// # Example
///
/// ```rust
/// use channelpress::error::Result;
/// use channelpress::Post;
///
/// fn my_function() -> Result<Vec<Post>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ReportError>;

/// The error type for report generation.
///
/// Every failure in the pipeline is translated into one of these five
/// categories before it reaches a frontend. Each variant carries a short
/// human-readable message; downstream errors that do not fit a more
/// specific category are wrapped into [`GenerationFailure`] with a one-line
/// description.
///
/// [`GenerationFailure`]: ReportError::GenerationFailure
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The caller supplied a parameter the pipeline cannot work with.
    ///
    /// This occurs when:
    /// - The channel identifier is empty or blank
    /// - The date range is inverted (`date_to < date_from`)
    /// - A sort key or direction string is not recognized
    ///
    /// Validation happens before any network or filesystem work, so this
    /// error guarantees no side effects took place.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// What was wrong with the input
        message: String,
    },

    /// The target channel does not resolve or cannot be accessed.
    ///
    /// Typically the username does not exist, or the channel is private.
    #[error("channel '{channel}' is unavailable: {reason}")]
    ChannelUnavailable {
        /// The channel identifier as the user entered it
        channel: String,
        /// Why it could not be used
        reason: String,
    },

    /// The request was valid but no posts matched the date window.
    ///
    /// No output file is produced for an empty result. The CLI treats this
    /// outcome as a zero-exit, since there is nothing to correct.
    #[error("no posts found {message}")]
    EmptyResult {
        /// Description of the window that came up empty
        message: String,
    },

    /// The message source could not be reached or authenticated.
    ///
    /// Covers transport failures, missing authorization, and the explicit
    /// fetch deadline expiring.
    #[error("message source unavailable: {reason}")]
    SourceUnavailable {
        /// Why the source could not be used
        reason: String,
    },

    /// Sorting or document assembly failed.
    ///
    /// This is the catch-all for downstream failures after posts were
    /// acquired; the message is a short description, never a full trace.
    #[error("report generation failed: {message}")]
    GenerationFailure {
        /// What went wrong
        message: String,
    },
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        ReportError::GenerationFailure {
            message: format!("IO error: {err}"),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ReportError {
    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        ReportError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a channel-unavailable error.
    pub fn channel_unavailable(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::ChannelUnavailable {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    /// Creates an empty-result error for a date window.
    pub fn empty_window(date_from: chrono::NaiveDate, date_to: chrono::NaiveDate) -> Self {
        ReportError::EmptyResult {
            message: format!("between {date_from} and {date_to}"),
        }
    }

    /// Creates a source-unavailable error.
    pub fn source_unavailable(reason: impl Into<String>) -> Self {
        ReportError::SourceUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates a generation-failure error.
    pub fn generation_failure(message: impl Into<String>) -> Self {
        ReportError::GenerationFailure {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a caller-correctable input error.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ReportError::InvalidParameter { .. })
    }

    /// Returns `true` if the channel could not be resolved or accessed.
    pub fn is_channel_unavailable(&self) -> bool {
        matches!(self, ReportError::ChannelUnavailable { .. })
    }

    /// Returns `true` if the request was valid but matched no posts.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ReportError::EmptyResult { .. })
    }

    /// Returns `true` if the message source could not be reached.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, ReportError::SourceUnavailable { .. })
    }

    /// Returns `true` if sorting or assembly failed.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, ReportError::GenerationFailure { .. })
    }

    /// Short machine-friendly label for the error category.
    ///
    /// Used as the `error_type` field in analytics events, where a full
    /// message would leak user input into aggregate counters.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ReportError::InvalidParameter { .. } => "InvalidParameter",
            ReportError::ChannelUnavailable { .. } => "ChannelUnavailable",
            ReportError::EmptyResult { .. } => "EmptyResult",
            ReportError::SourceUnavailable { .. } => "SourceUnavailable",
            ReportError::GenerationFailure { .. } => "GenerationFailure",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    // =========================================================================
    // Display tests for all error variants
    // =========================================================================

    #[test]
    fn test_invalid_parameter_display() {
        let err = ReportError::invalid_parameter("channel must not be empty");
        let display = err.to_string();
        assert!(display.contains("invalid parameter"));
        assert!(display.contains("channel must not be empty"));
    }

    #[test]
    fn test_channel_unavailable_display() {
        let err = ReportError::channel_unavailable("@durov", "username not found");
        let display = err.to_string();
        assert!(display.contains("@durov"));
        assert!(display.contains("username not found"));
    }

    #[test]
    fn test_empty_result_display() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let err = ReportError::empty_window(from, to);
        let display = err.to_string();
        assert!(display.contains("no posts found"));
        assert!(display.contains("2024-01-01"));
        assert!(display.contains("2024-01-31"));
    }

    #[test]
    fn test_source_unavailable_display() {
        let err = ReportError::source_unavailable("connection refused");
        let display = err.to_string();
        assert!(display.contains("message source unavailable"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn test_generation_failure_display() {
        let err = ReportError::generation_failure("renderer rejected the markup");
        let display = err.to_string();
        assert!(display.contains("report generation failed"));
        assert!(display.contains("renderer rejected the markup"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: ReportError = io_err.into();
        assert!(err.is_generation_failure());
        assert!(err.to_string().contains("access denied"));
    }

    // =========================================================================
    // is_* methods tests
    // =========================================================================

    #[test]
    fn test_is_methods_are_exclusive() {
        let err = ReportError::invalid_parameter("bad");
        assert!(err.is_invalid_parameter());
        assert!(!err.is_channel_unavailable());
        assert!(!err.is_empty_result());
        assert!(!err.is_source_unavailable());
        assert!(!err.is_generation_failure());

        let err = ReportError::source_unavailable("down");
        assert!(err.is_source_unavailable());
        assert!(!err.is_invalid_parameter());
    }

    // =========================================================================
    // Analytics label tests
    // =========================================================================

    #[test]
    fn test_kind_labels() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let cases = [
            (
                ReportError::invalid_parameter("x"),
                "InvalidParameter",
            ),
            (
                ReportError::channel_unavailable("c", "r"),
                "ChannelUnavailable",
            ),
            (ReportError::empty_window(from, from), "EmptyResult"),
            (
                ReportError::source_unavailable("r"),
                "SourceUnavailable",
            ),
            (
                ReportError::generation_failure("m"),
                "GenerationFailure",
            ),
        ];
        for (err, label) in cases {
            assert_eq!(err.kind_label(), label);
        }
    }

    #[test]
    fn test_error_debug() {
        let err = ReportError::invalid_parameter("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidParameter"));
    }
}
