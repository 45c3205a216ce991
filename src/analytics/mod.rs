//! Privacy-aware usage analytics.
//!
//! A thin, self-contained pipeline: the web frontend builds a
//! [`RequestContext`] per request, the [`EventSink`] appends one JSON line
//! per [`Event`] to the log, and [`aggregate`] turns the log back into the
//! counters the admin dashboard shows. Nothing here is required for report
//! generation — the CLI never touches it.

pub mod aggregate;
pub mod event;
pub mod sink;

pub use aggregate::{AnalyticsSummary, parse_log_file};
pub use event::{Event, EventType, RequestContext, hash_client_ip, truncate_user_agent};
pub use sink::EventSink;
