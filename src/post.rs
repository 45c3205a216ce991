//! Channel post model.
//!
//! This module provides [`Post`], the normalized representation of one
//! channel message selected for a report. Both the live fetcher and the
//! demo generator produce this structure, so the rest of the pipeline never
//! sees client-library types.
//!
//! # Overview
//!
//! A post consists of:
//! - **Required**: `occurred_on` (publication date) and `body` (non-blank text)
//! - **Optional**: `view_count`, `reactions`
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use channelpress::Post;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let post = Post::new(date, "Release day!");
//! assert_eq!(post.body, "Release day!");
//! assert!(post.view_count.is_none());
//! ```
//!
//! ## Builder Pattern
//!
//! ```
//! use channelpress::{Post, Reaction};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let post = Post::new(date, "Release day!")
//!     .with_views(1543)
//!     .with_reactions(vec![Reaction::new("🔥", 42)]);
//!
//! assert_eq!(post.reaction_total(), 42);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An engagement signal attached to a post: a symbol and how many times it
/// was given.
///
/// The fetcher reduces each post's reactions to at most the top 3 by count,
/// keeping the source order for ties, so consumers can render the list
/// as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// The reaction symbol, usually a single emoji.
    pub symbol: String,

    /// How many times this reaction was given.
    pub count: u32,
}

impl Reaction {
    /// Creates a new reaction.
    pub fn new(symbol: impl Into<String>, count: u32) -> Self {
        Self {
            symbol: symbol.into(),
            count,
        }
    }
}

/// One channel post selected for inclusion in a report.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `occurred_on` | `NaiveDate` | Publication date; time of day carries no meaning here |
/// | `body` | `String` | Post text, may span multiple paragraphs; never blank |
/// | `view_count` | `Option<u32>` | View counter; `None` means "not available", not zero |
/// | `reactions` | `Vec<Reaction>` | Top reactions, at most 3, possibly empty |
///
/// Posts are constructed by a [`MessageSource`](crate::source::MessageSource)
/// or the demo generator and are immutable afterwards; the sorter returns a
/// reordered copy rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Date the post was published.
    pub occurred_on: NaiveDate,

    /// Text content of the post.
    ///
    /// May contain Telegram-flavored markdown and multiple paragraphs;
    /// posts without text are excluded by the fetcher, so this is never
    /// blank.
    pub body: String,

    /// Number of views, when the source exposes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub view_count: Option<u32>,

    /// Highest-count reactions, at most 3 entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

impl Post {
    /// Creates a post with the required fields only.
    pub fn new(occurred_on: NaiveDate, body: impl Into<String>) -> Self {
        Self {
            occurred_on,
            body: body.into(),
            view_count: None,
            reactions: Vec::new(),
        }
    }

    /// Sets the view counter.
    #[must_use]
    pub fn with_views(mut self, views: u32) -> Self {
        self.view_count = Some(views);
        self
    }

    /// Sets the reaction list.
    #[must_use]
    pub fn with_reactions(mut self, reactions: Vec<Reaction>) -> Self {
        self.reactions = reactions;
        self
    }

    /// Sum of all reaction counts; 0 when the post has none.
    ///
    /// This is the key the sorter uses for the reactions criterion.
    pub fn reaction_total(&self) -> u64 {
        self.reactions.iter().map(|r| u64::from(r.count)).sum()
    }

    /// View count with absence treated as zero.
    ///
    /// Sorting cannot distinguish a post with no counter from one with
    /// zero views; display code should check `view_count` directly
    /// instead.
    pub fn views_or_zero(&self) -> u32 {
        self.view_count.unwrap_or(0)
    }
}
