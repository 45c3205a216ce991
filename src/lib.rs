//! # Channelpress
//!
//! A Rust library and toolset for exporting Telegram channel posts into
//! sorted, paginated PDF reports.
//!
//! ## Overview
//!
//! Channelpress fetches the posts of a public channel over a date range
//! (or synthesizes a demo catalog when no credentials are configured),
//! orders them by date, reactions or views, and renders one PDF report.
//! Two frontends drive the same pipeline:
//!
//! - **CLI** (`channelpress`) — interactive prompts in the terminal
//! - **Web** (`channelpress-web`) — an HTTP form with downloadable results
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use channelpress::config::AppConfig;
//! use channelpress::core::{ReportRequest, SortKey, generate_report};
//! use channelpress::source::DisabledSource;
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> channelpress::Result<()> {
//!     let config = AppConfig::from_env().with_force_demo(true);
//!
//!     let request = ReportRequest::new(
//!         "demo_channel",
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
//!         SortKey::Reactions,
//!         false,
//!     );
//!
//!     let path = generate_report(&config, &DisabledSource, &request).await?;
//!     println!("report written to {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] — the report pipeline
//!   - [`core::report`] — [`ReportRequest`](core::ReportRequest),
//!     [`generate_report`](core::generate_report)
//!   - [`core::sort`] — [`SortKey`](core::SortKey), stable post ordering
//!   - [`core::normalize`] — markup stripping, emoji rewriting, escaping
//!   - [`core::demo`] — deterministic demo catalog
//! - [`source`] — [`MessageSource`](source::MessageSource) contract,
//!   channel identifier parsing, live MTProto adapter (`live` feature)
//! - [`pdf`] — report markup assembly and the external rendering engine
//! - [`analytics`] — append-only event log and its aggregation
//! - [`config`] — [`AppConfig`](config::AppConfig), built once at startup
//! - [`error`] — [`ReportError`] taxonomy and [`Result`]
//! - [`cli`] — terminal frontend building blocks (`cli` feature)
//! - [`web`] — HTTP frontend (`web` feature)

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod pdf;
pub mod post;
pub mod source;
#[cfg(feature = "web")]
pub mod web;

// Re-export the main types at the crate root for convenience
pub use error::{ReportError, Result};
pub use post::{Post, Reaction};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use channelpress::prelude::*;
/// ```
pub mod prelude {
    // Domain types
    pub use crate::post::{Post, Reaction};

    // Error types
    pub use crate::error::{ReportError, Result};

    // Pipeline
    pub use crate::core::demo::demo_posts;
    pub use crate::core::report::{ReportRequest, generate_report};
    pub use crate::core::sort::{SortKey, sort_posts};

    // Configuration
    pub use crate::config::AppConfig;

    // Source contract
    pub use crate::source::{ChannelRef, DateWindow, DisabledSource, MessageSource};
}
