//! Append-only event sink.
//!
//! The sink opens its log file once at startup and appends one JSON line
//! per event behind a mutex, since concurrent requests may log at the same
//! time. Logging is strictly best-effort: a failing append is reported via
//! `tracing` and otherwise swallowed, because analytics must never fail a
//! user request. There is no teardown — each line is flushed as it is
//! written, so process exit loses nothing.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use super::event::{
    Event, EventType, RequestContext, truncate_channel_input,
};

/// Process-wide analytics writer.
///
/// Owned by the web application state and shared by reference; opening it
/// twice would interleave fine (appends are atomic per line) but is never
/// needed.
#[derive(Debug)]
pub struct EventSink {
    file: Mutex<File>,
}

impl EventSink {
    /// Opens (creating if needed) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event as a JSON line.
    pub fn record(&self, event: &Event) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "failed to serialize analytics event");
                return;
            }
        };

        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(file, "{line}") {
            warn!(%err, "failed to append analytics event");
        }
    }

    /// Records a form page view.
    pub fn page_view(&self, ctx: &RequestContext) {
        self.record(
            &Event::new(EventType::PageView, ctx)
                .with_extra(serde_json::json!({ "lang": ctx.lang })),
        );
    }

    /// Records the start of an export.
    pub fn export_started(&self, ctx: &RequestContext, channel: &str, date_from: &str, date_to: &str) {
        self.record(
            &Event::new(EventType::ExportStarted, ctx).with_extra(serde_json::json!({
                "channel_input": truncate_channel_input(channel),
                "date_from": date_from,
                "date_to": date_to,
                "lang": ctx.lang,
            })),
        );
    }

    /// Records a successful export.
    pub fn export_success(&self, ctx: &RequestContext, channel: &str, posts_count: Option<usize>) {
        let mut extra = serde_json::json!({
            "channel_input": truncate_channel_input(channel),
            "lang": ctx.lang,
        });
        if let Some(count) = posts_count {
            extra["posts_count"] = serde_json::json!(count);
        }
        self.record(&Event::new(EventType::ExportSuccess, ctx).with_extra(extra));
    }

    /// Records a failed export with a short error label, never a trace.
    pub fn export_failed(&self, ctx: &RequestContext, channel: &str, error_type: &str) {
        self.record(
            &Event::new(EventType::ExportFailed, ctx).with_extra(serde_json::json!({
                "channel_input": truncate_channel_input(channel),
                "error_type": error_type,
                "lang": ctx.lang,
            })),
        );
    }

    /// Records an interface language change.
    pub fn lang_changed(&self, ctx: &RequestContext, new_lang: &str) {
        self.record(
            &Event::new(EventType::LangChanged, ctx)
                .with_extra(serde_json::json!({ "new_lang": new_lang })),
        );
    }
}
