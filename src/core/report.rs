//! Report generation pipeline.
//!
//! [`generate_report`] is the coordinator both frontends call: it
//! validates a [`ReportRequest`], picks the data source (demo catalog or
//! live fetch), orders the posts, and drives the document assembler. Every
//! failure leaves as one of the [`ReportError`] categories, and no file is
//! written unless the whole pipeline succeeds — filesystem work starts
//! only after posts are in hand.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::demo::demo_posts;
use crate::core::sort::{SortKey, sort_posts};
use crate::error::{ReportError, Result};
use crate::pdf;
use crate::source::{ChannelRef, DateWindow, MessageSource};

/// Parameter set for one report.
///
/// Constructed fresh per invocation from frontend input and valid only for
/// the duration of one [`generate_report`] call; nothing here is
/// persisted.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Channel identifier as the user entered it (handle, `@`-handle or
    /// `t.me` link).
    pub channel: String,

    /// First day of the inclusive window.
    pub date_from: chrono::NaiveDate,

    /// Last day of the inclusive window.
    pub date_to: chrono::NaiveDate,

    /// Ordering criterion.
    pub sort_key: SortKey,

    /// Sort direction; `false` means descending.
    pub ascending: bool,

    /// Output file name override. Derived from the channel and window when
    /// absent.
    pub output_name: Option<String>,
}

impl ReportRequest {
    /// Creates a request with a derived output name.
    pub fn new(
        channel: impl Into<String>,
        date_from: chrono::NaiveDate,
        date_to: chrono::NaiveDate,
        sort_key: SortKey,
        ascending: bool,
    ) -> Self {
        Self {
            channel: channel.into(),
            date_from,
            date_to,
            sort_key,
            ascending,
            output_name: None,
        }
    }

    /// Overrides the output file name.
    ///
    /// Blank input is ignored and the derived name is used instead.
    #[must_use]
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.output_name = Some(name.trim().to_string());
        }
        self
    }

    /// The final artifact file name.
    ///
    /// Defaults to `{channel}_{date_from}_{date_to}.pdf` using the
    /// normalized channel name. A caller-supplied name gets path
    /// separators flattened and a `.pdf` extension appended when missing,
    /// so the artifact always lands inside the output directory.
    pub fn output_file_name(&self, channel: &ChannelRef) -> String {
        let mut name = match &self.output_name {
            Some(name) => name.replace(['/', '\\'], "_"),
            None => format!(
                "{}_{}_{}",
                channel.name(),
                self.date_from,
                self.date_to
            ),
        };
        if !name.ends_with(".pdf") {
            name.push_str(".pdf");
        }
        name
    }
}

/// Generates one PDF report and returns the artifact path.
///
/// # Pipeline
///
/// 1. Validate the identifier and window — violations fail as
///    [`InvalidParameter`](ReportError::InvalidParameter) with no side
///    effects.
/// 2. Decide demo vs. live once, from configuration alone.
/// 3. Acquire posts: the demo catalog cannot fail; a live fetch runs
///    under the configured deadline, and the adapter releases its
///    connection on every path.
/// 4. Zero posts → [`EmptyResult`](ReportError::EmptyResult); an empty
///    document is never produced.
/// 5. Stable sort by the requested key and direction.
/// 6. Create the output directory and assemble the PDF; assembler
///    failures become
///    [`GenerationFailure`](ReportError::GenerationFailure).
pub async fn generate_report<S: MessageSource>(
    config: &AppConfig,
    source: &S,
    request: &ReportRequest,
) -> Result<PathBuf> {
    let channel = ChannelRef::parse(&request.channel)?;
    if request.date_to < request.date_from {
        return Err(ReportError::invalid_parameter(
            "end date must not precede start date",
        ));
    }
    let window = DateWindow::new(request.date_from, request.date_to);

    let demo = config.demo_mode();
    info!(
        channel = %channel,
        date_from = %request.date_from,
        date_to = %request.date_to,
        sort_key = %request.sort_key,
        ascending = request.ascending,
        demo,
        "generating report"
    );

    let posts = if demo {
        debug!("using demo catalog");
        demo_posts(request.date_from, request.date_to)
    } else {
        match tokio::time::timeout(config.fetch_timeout, source.fetch_window(&channel, window))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(ReportError::source_unavailable(format!(
                    "fetch did not complete within {}s",
                    config.fetch_timeout.as_secs()
                )));
            }
        }
    };

    if posts.is_empty() {
        return Err(ReportError::empty_window(request.date_from, request.date_to));
    }
    debug!(count = posts.len(), "posts acquired");

    let sorted = sort_posts(&posts, request.sort_key, request.ascending);

    // First filesystem touch of the pipeline.
    fs::create_dir_all(&config.output_dir)?;
    let path = config.output_dir.join(request.output_file_name(&channel));

    let artifact = pdf::render_report(&sorted, &request.channel, &path)?;
    info!(path = %artifact.display(), "report written");
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::NaiveDate;

    use super::*;
    use crate::Post;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn request(channel: &str) -> ReportRequest {
        ReportRequest::new(channel, date(1), date(7), SortKey::Date, true)
    }

    /// Spy source that counts calls and replays a canned outcome.
    struct SpySource {
        calls: Arc<AtomicUsize>,
        outcome: Box<dyn Fn() -> Result<Vec<Post>> + Send + Sync>,
    }

    impl SpySource {
        fn new(outcome: impl Fn() -> Result<Vec<Post>> + Send + Sync + 'static) -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                outcome: Box::new(outcome),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MessageSource for SpySource {
        async fn fetch_window(
            &self,
            _channel: &ChannelRef,
            _window: DateWindow,
        ) -> Result<Vec<Post>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    /// Source that never finishes; used to exercise the fetch deadline.
    struct StalledSource;

    impl MessageSource for StalledSource {
        async fn fetch_window(
            &self,
            _channel: &ChannelRef,
            _window: DateWindow,
        ) -> Result<Vec<Post>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec![])
        }
    }

    fn live_config(dir: &std::path::Path) -> AppConfig {
        AppConfig::default()
            .with_credentials(12345, "hash")
            .with_output_dir(dir.join("generated"))
    }

    #[tokio::test]
    async fn test_inverted_window_fails_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let config = live_config(dir.path());
        let source = SpySource::new(|| Ok(vec![Post::new(date(1), "x")]));

        let mut req = request("@channel");
        req.date_from = date(7);
        req.date_to = date(1);

        let err = generate_report(&config, &source, &req).await.unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(source.call_count(), 0, "source must not be touched");
        assert!(!config.output_dir.exists(), "no filesystem work expected");
    }

    #[tokio::test]
    async fn test_blank_channel_fails_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let config = live_config(dir.path());
        let source = SpySource::new(|| Ok(vec![Post::new(date(1), "x")]));

        let err = generate_report(&config, &source, &request("   "))
            .await
            .unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(source.call_count(), 0);
        assert!(!config.output_dir.exists());
    }

    #[tokio::test]
    async fn test_empty_fetch_is_empty_result_and_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = live_config(dir.path());
        let source = SpySource::new(|| Ok(vec![]));

        let err = generate_report(&config, &source, &request("@channel"))
            .await
            .unwrap_err();
        assert!(err.is_empty_result());
        assert_eq!(source.call_count(), 1);
        assert!(!config.output_dir.exists(), "no output directory on failure");
    }

    #[tokio::test]
    async fn test_source_errors_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let config = live_config(dir.path());
        let source =
            SpySource::new(|| Err(ReportError::channel_unavailable("@channel", "private")));

        let err = generate_report(&config, &source, &request("@channel"))
            .await
            .unwrap_err();
        assert!(err.is_channel_unavailable());
    }

    #[tokio::test]
    async fn test_fetch_deadline_maps_to_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = live_config(dir.path()).with_fetch_timeout(Duration::from_millis(20));

        let err = generate_report(&config, &StalledSource, &request("@channel"))
            .await
            .unwrap_err();
        assert!(err.is_source_unavailable());
        assert!(err.to_string().contains("did not complete"));
    }

    #[tokio::test]
    async fn test_demo_mode_never_calls_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::default()
            .with_force_demo(true)
            .with_output_dir(dir.path().join("generated"));
        let source = SpySource::new(|| Ok(vec![]));

        let path = generate_report(&config, &source, &request("demo_channel"))
            .await
            .unwrap();
        assert_eq!(source.call_count(), 0);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_live_posts_are_sorted_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = live_config(dir.path());
        let source = SpySource::new(|| {
            Ok(vec![
                Post::new(date(3), "newest").with_views(5),
                Post::new(date(2), "middle").with_views(50),
                Post::new(date(1), "oldest").with_views(500),
            ])
        });

        let req = ReportRequest::new("@channel", date(1), date(7), SortKey::Views, false);
        let path = generate_report(&config, &source, &req).await.unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
    }

    #[test]
    fn test_default_output_name() {
        let req = request("@my_channel");
        let channel = ChannelRef::parse("@my_channel").unwrap();
        assert_eq!(
            req.output_file_name(&channel),
            "my_channel_2024-03-01_2024-03-07.pdf"
        );
    }

    #[test]
    fn test_output_name_override() {
        let channel = ChannelRef::parse("c").unwrap();

        let req = request("c").with_output_name("report");
        assert_eq!(req.output_file_name(&channel), "report.pdf");

        let req = request("c").with_output_name("report.pdf");
        assert_eq!(req.output_file_name(&channel), "report.pdf");

        // Blank override falls back to the derived name
        let req = request("c").with_output_name("   ");
        assert_eq!(
            req.output_file_name(&channel),
            "c_2024-03-01_2024-03-07.pdf"
        );
    }

    #[test]
    fn test_output_name_flattens_separators() {
        let channel = ChannelRef::parse("c").unwrap();
        let req = request("c").with_output_name("../escape");
        assert_eq!(req.output_file_name(&channel), ".._escape.pdf");
    }
}
