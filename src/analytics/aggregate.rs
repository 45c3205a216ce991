//! Event log aggregation for the admin dashboard.
//!
//! Reads the append-only NDJSON log line by line and produces counters per
//! event type, language, error type, day and channel. The reader is
//! deliberately forgiving: blank lines, non-JSON lines (other log output
//! may share the file) and JSON without an `event_type` are counted in
//! `total_lines` and otherwise skipped.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

/// Per-day export funnel counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyCounts {
    /// Exports requested.
    pub started: u64,
    /// Exports that produced a report.
    pub success: u64,
    /// Exports that failed.
    pub failed: u64,
}

/// Aggregated analytics over the whole event log.
#[derive(Debug, Default)]
pub struct AnalyticsSummary {
    /// Lines read, including skipped ones.
    pub total_lines: u64,
    /// Lines that parsed as analytics events.
    pub valid_events: u64,
    /// Event counts keyed by event type.
    pub events_count: BTreeMap<String, u64>,
    /// Event counts keyed by interface language.
    pub lang_distribution: BTreeMap<String, u64>,
    /// Failed-export counts keyed by error label.
    pub errors_by_type: BTreeMap<String, u64>,
    /// Export funnel per day (`YYYY-MM-DD` keys, sorted ascending).
    pub daily: BTreeMap<String, DailyCounts>,
    /// Export-start counts per channel input.
    pub channels: HashMap<String, u64>,
}

impl AnalyticsSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw log line into the counters.
    pub fn add_line(&mut self, line: &str) {
        self.total_lines += 1;
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let Ok(value) = serde_json::from_str::<Value>(line) else {
            return;
        };
        if value.get("event_type").and_then(Value::as_str).is_some() {
            self.add_event(&value);
        }
    }

    /// Feeds one parsed event into the counters.
    fn add_event(&mut self, event: &Value) {
        let Some(event_type) = event.get("event_type").and_then(Value::as_str) else {
            return;
        };
        self.valid_events += 1;
        *self.events_count.entry(event_type.to_string()).or_default() += 1;

        let lang = event
            .get("lang")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        *self.lang_distribution.entry(lang.to_string()).or_default() += 1;

        // Day buckets only track the export funnel.
        if let ("export_started" | "export_success" | "export_failed", Some(timestamp)) =
            (event_type, event.get("timestamp").and_then(Value::as_str))
        {
            if let Some(day) = timestamp.split('T').next() {
                let counts = self.daily.entry(day.to_string()).or_default();
                match event_type {
                    "export_started" => counts.started += 1,
                    "export_success" => counts.success += 1,
                    _ => counts.failed += 1,
                }
            }
        }

        let extra = event.get("extra");
        if event_type == "export_started" {
            if let Some(channel) = extra
                .and_then(|e| e.get("channel_input"))
                .and_then(Value::as_str)
            {
                *self.channels.entry(channel.to_string()).or_default() += 1;
            }
        }
        if event_type == "export_failed" {
            let label = extra
                .and_then(|e| e.get("error_type"))
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            *self.errors_by_type.entry(label.to_string()).or_default() += 1;
        }
    }

    /// Success-over-started percentage, when any export was started.
    pub fn conversion_rate(&self) -> Option<f64> {
        let started = self.events_count.get("export_started").copied().unwrap_or(0);
        if started == 0 {
            return None;
        }
        let success = self.events_count.get("export_success").copied().unwrap_or(0);
        Some(success as f64 / started as f64 * 100.0)
    }

    /// The `n` most-exported channels, highest first; name breaks count
    /// ties so the order is deterministic.
    pub fn top_channels(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self
            .channels
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Daily funnel rows, newest day first, at most `limit` rows.
    pub fn recent_days(&self, limit: usize) -> Vec<(String, DailyCounts)> {
        self.daily
            .iter()
            .rev()
            .take(limit)
            .map(|(day, counts)| (day.clone(), *counts))
            .collect()
    }
}

/// Aggregates an event log file.
///
/// A missing file is not an error: the dashboard simply shows zero
/// activity until the first event is written.
pub fn parse_log_file(path: impl AsRef<Path>) -> std::io::Result<AnalyticsSummary> {
    let path = path.as_ref();
    let mut summary = AnalyticsSummary::new();
    if !path.exists() {
        return Ok(summary);
    }

    let reader = BufReader::new(File::open(path)?);
    for line in reader.lines() {
        summary.add_line(&line?);
    }
    Ok(summary)
}
