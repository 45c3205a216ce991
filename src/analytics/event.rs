//! Analytics event records.
//!
//! One [`Event`] is one line in the append-only log. Events carry no
//! sensitive data: the client IP is stored only as a truncated one-way
//! digest, the user agent is capped, and channel input is cut to a prefix
//! before it reaches the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Maximum stored user-agent length.
const USER_AGENT_MAX: usize = 200;

/// Maximum stored channel-input length.
const CHANNEL_INPUT_MAX: usize = 100;

/// Lifecycle events the application records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The form page was viewed.
    PageView,
    /// A report generation was requested.
    ExportStarted,
    /// A report was generated and is downloadable.
    ExportSuccess,
    /// A report request failed.
    ExportFailed,
    /// The interface language cookie changed.
    LangChanged,
}

/// Request-scoped context attached to every event.
///
/// Built once per HTTP request by the web frontend; the CLI does not log
/// analytics events.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request path, e.g. `/generate`.
    pub path: String,
    /// Interface language (`en` or `ru`).
    pub lang: String,
    /// Truncated SHA-256 digest of the client IP.
    pub client_ip_hash: String,
    /// Truncated user-agent string.
    pub user_agent: String,
}

/// One analytics record, serialized as a single JSON object per log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// When the event happened, UTC.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub event_type: EventType,
    /// Request path.
    pub path: String,
    /// Interface language.
    pub lang: String,
    /// Privacy-hashed client identifier.
    pub client_ip_hash: String,
    /// Truncated user agent.
    pub user_agent: String,
    /// Event-specific payload; never raw post text or full traces.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

impl Event {
    /// Creates an event from a request context, stamped with the current
    /// time.
    pub fn new(event_type: EventType, ctx: &RequestContext) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            path: ctx.path.clone(),
            lang: ctx.lang.clone(),
            client_ip_hash: ctx.client_ip_hash.clone(),
            user_agent: ctx.user_agent.clone(),
            extra: None,
        }
    }

    /// Attaches an extra payload.
    #[must_use]
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// One-way digest of a client IP: first 16 hex characters of SHA-256.
///
/// Irreversible on purpose; the log never holds a real address.
pub fn hash_client_ip(ip: &str) -> String {
    let digest = Sha256::digest(ip.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..16].to_string()
}

/// Caps a user-agent string to its stored length.
pub fn truncate_user_agent(user_agent: &str) -> String {
    truncate_chars(user_agent, USER_AGENT_MAX)
}

/// Caps channel input to its stored length.
pub fn truncate_channel_input(input: &str) -> String {
    truncate_chars(input, CHANNEL_INPUT_MAX)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_to_one_json_object() {
        let ctx = RequestContext {
            path: "/generate".into(),
            lang: "en".into(),
            client_ip_hash: hash_client_ip("203.0.113.9"),
            user_agent: "curl/8.0".into(),
        };
        let event = Event::new(EventType::ExportStarted, &ctx)
            .with_extra(serde_json::json!({"channel_input": "@test"}));

        let line = serde_json::to_string(&event).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"event_type\":\"export_started\""));
        assert!(line.contains("\"channel_input\":\"@test\""));
    }

    #[test]
    fn test_extra_omitted_when_absent() {
        let event = Event::new(EventType::PageView, &RequestContext::default());
        let line = serde_json::to_string(&event).unwrap();
        assert!(!line.contains("extra"));
    }

    #[test]
    fn test_hash_is_stable_short_and_opaque() {
        let a = hash_client_ip("198.51.100.7");
        let b = hash_client_ip("198.51.100.7");
        let c = hash_client_ip("198.51.100.8");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
        assert!(!a.contains("198"));
    }

    #[test]
    fn test_truncation_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate_user_agent(&long).len(), 200);
        assert_eq!(truncate_channel_input(&long).len(), 100);
        assert_eq!(truncate_user_agent("short"), "short");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let emoji = "🎉".repeat(300);
        let truncated = truncate_channel_input(&emoji);
        assert_eq!(truncated.chars().count(), 100);
    }
}
