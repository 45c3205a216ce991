//! Message source contract.
//!
//! The pipeline never touches client-library types directly: everything it
//! needs from the outside world comes through [`MessageSource`], a small
//! async trait an adapter implements. The live MTProto adapter lives in
//! [`telegram`] behind the `live` cargo feature; tests use spy
//! implementations; builds without an adapter fall back to
//! [`DisabledSource`].

#[cfg(feature = "live")]
pub mod telegram;

use chrono::NaiveDate;

use crate::Post;
use crate::error::{ReportError, Result};

/// An inclusive date window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day of the window.
    pub date_from: NaiveDate,
    /// Last day of the window.
    pub date_to: NaiveDate,
}

impl DateWindow {
    /// Creates a window without validating the bounds.
    ///
    /// The orchestrator rejects inverted windows before one is built, so
    /// construction stays infallible.
    pub fn new(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self { date_from, date_to }
    }

    /// Whether `date` falls inside the window, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.date_from && date <= self.date_to
    }
}

/// A normalized channel identifier.
///
/// Users enter channels as a bare handle, an `@`-prefixed handle, or a
/// `t.me` link; [`ChannelRef::parse`] reduces all three to the plain
/// username.
///
/// # Example
///
/// ```
/// use channelpress::source::ChannelRef;
///
/// for input in ["durov", "@durov", "https://t.me/durov", "t.me/durov/"] {
///     assert_eq!(ChannelRef::parse(input).unwrap().name(), "durov");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    name: String,
}

impl ChannelRef {
    /// Normalizes a user-entered channel identifier.
    ///
    /// Blank input (after normalization) is an
    /// [`InvalidParameter`](ReportError::InvalidParameter) error.
    pub fn parse(input: &str) -> Result<Self> {
        let mut name = input.trim();

        // Link form: the username is the last path segment after t.me/
        if let Some(idx) = name.rfind("t.me/") {
            name = &name[idx + "t.me/".len()..];
            name = name.trim_end_matches('/');
            if let Some(last) = name.rsplit('/').next() {
                name = last;
            }
        }

        let name = name.trim_start_matches('@').trim();
        if name.is_empty() {
            return Err(ReportError::invalid_parameter(
                "channel identifier must not be empty",
            ));
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    /// The bare channel username.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Source of channel posts for one report.
///
/// # Contract
///
/// `fetch_window` returns every post whose publication date falls inside
/// the inclusive window and whose body is non-blank, newest first as the
/// underlying source yields them. Implementations walk the channel from
/// the newest message and stop once the walk passes the window's lower
/// bound. Reactions are reduced to at most the top 3 by count, source
/// order breaking ties.
///
/// Any connection an implementation opens is scoped to the single call
/// and released on every exit path.
#[allow(async_fn_in_trait)]
pub trait MessageSource {
    /// Fetches the posts of `channel` within `window`.
    async fn fetch_window(&self, channel: &ChannelRef, window: DateWindow) -> Result<Vec<Post>>;
}

/// Placeholder source for builds without a live adapter.
///
/// Configurations that resolve to demo mode never reach a source at all;
/// this exists so the frontends still compile and fail with a clear
/// message when live mode is requested without the `live` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSource;

impl MessageSource for DisabledSource {
    async fn fetch_window(&self, _channel: &ChannelRef, _window: DateWindow) -> Result<Vec<Post>> {
        Err(ReportError::source_unavailable(
            "live fetching is not available in this build; enable demo mode or rebuild with the live adapter",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_handle() {
        assert_eq!(ChannelRef::parse("rustlang").unwrap().name(), "rustlang");
    }

    #[test]
    fn test_parse_strips_marker() {
        assert_eq!(ChannelRef::parse("@rustlang").unwrap().name(), "rustlang");
        assert_eq!(ChannelRef::parse("  @rustlang  ").unwrap().name(), "rustlang");
    }

    #[test]
    fn test_parse_link_forms() {
        for input in [
            "t.me/rustlang",
            "https://t.me/rustlang",
            "https://t.me/rustlang/",
            "http://t.me/s/rustlang",
        ] {
            assert_eq!(ChannelRef::parse(input).unwrap().name(), "rustlang", "{input}");
        }
    }

    #[test]
    fn test_parse_blank_is_invalid() {
        for input in ["", "   ", "@", "t.me/"] {
            let err = ChannelRef::parse(input).unwrap_err();
            assert!(err.is_invalid_parameter(), "{input:?}");
        }
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let window = DateWindow::new(from, to);
        assert!(window.contains(from));
        assert!(window.contains(to));
        assert!(!window.contains(from.pred_opt().unwrap()));
        assert!(!window.contains(to.succ_opt().unwrap()));
    }

    #[tokio::test]
    async fn test_disabled_source_reports_unavailable() {
        let source = DisabledSource;
        let channel = ChannelRef::parse("anything").unwrap();
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        let err = source.fetch_window(&channel, window).await.unwrap_err();
        assert!(err.is_source_unavailable());
    }
}
