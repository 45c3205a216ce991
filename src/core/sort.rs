//! Post ordering.
//!
//! This module provides [`SortKey`] and [`sort_posts`], the single ordering
//! function of the pipeline. The sort is stable in both directions: a
//! descending sort reflects the key comparison instead of reversing the
//! result, so posts with equal keys keep their original relative order
//! either way.
//!
//! # Example
//!
//! ```
//! use channelpress::core::sort::{SortKey, sort_posts};
//! use channelpress::Post;
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let posts = vec![
//!     Post::new(d(2), "second").with_views(10),
//!     Post::new(d(1), "first").with_views(99),
//! ];
//!
//! let by_date = sort_posts(&posts, SortKey::Date, true);
//! assert_eq!(by_date[0].body, "first");
//!
//! let by_views = sort_posts(&posts, SortKey::Views, false);
//! assert_eq!(by_views[0].body, "first");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Post;
use crate::error::ReportError;

/// Criterion used to order posts in a report.
///
/// Parsed from the frontend strings `date`, `reactions` and `views`;
/// anything else is an [`InvalidParameter`](ReportError::InvalidParameter)
/// at the parse boundary, so the pipeline itself never sees an unknown key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Order by publication date.
    Date,
    /// Order by the sum of all reaction counts (0 when none).
    Reactions,
    /// Order by view count, treating an absent counter as 0.
    Views,
}

impl SortKey {
    /// All accepted string forms, in frontend menu order.
    pub const ALL: [SortKey; 3] = [SortKey::Date, SortKey::Reactions, SortKey::Views];

    /// The canonical string form (what [`FromStr`] accepts).
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Reactions => "reactions",
            SortKey::Views => "views",
        }
    }

    /// Human-readable label for frontends.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Reactions => "reaction count",
            SortKey::Views => "view count",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(SortKey::Date),
            "reactions" => Ok(SortKey::Reactions),
            "views" => Ok(SortKey::Views),
            other => Err(ReportError::invalid_parameter(format!(
                "unknown sort key '{other}', expected one of: date, reactions, views"
            ))),
        }
    }
}

/// Returns a stable reordering of `posts` by `key`.
///
/// The input is never mutated. With `ascending = false` only the key
/// comparison is reflected; ties keep their original relative order in
/// both directions.
pub fn sort_posts(posts: &[Post], key: SortKey, ascending: bool) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.occurred_on.cmp(&b.occurred_on),
            SortKey::Reactions => a.reaction_total().cmp(&b.reaction_total()),
            SortKey::Views => a.views_or_zero().cmp(&b.views_or_zero()),
        };
        if ascending {
            ordering
        } else {
            // Reflect instead of reversing the list afterwards: equal keys
            // must stay Equal so the stable sort preserves tie order.
            match ordering {
                Ordering::Less => Ordering::Greater,
                Ordering::Equal => Ordering::Equal,
                Ordering::Greater => Ordering::Less,
            }
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Reaction;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn sample() -> Vec<Post> {
        vec![
            Post::new(date(3), "c")
                .with_views(50)
                .with_reactions(vec![Reaction::new("❤", 5)]),
            Post::new(date(1), "a").with_reactions(vec![
                Reaction::new("🔥", 100),
                Reaction::new("❤", 20),
            ]),
            Post::new(date(2), "b").with_views(500),
        ]
    }

    #[test]
    fn test_sort_by_date() {
        let posts = sample();
        let asc = sort_posts(&posts, SortKey::Date, true);
        let bodies: Vec<_> = asc.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, ["a", "b", "c"]);

        let desc = sort_posts(&posts, SortKey::Date, false);
        let bodies: Vec<_> = desc.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, ["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_reactions_sum() {
        let posts = sample();
        let desc = sort_posts(&posts, SortKey::Reactions, false);
        let bodies: Vec<_> = desc.iter().map(|p| p.body.as_str()).collect();
        // 120 > 5 > 0
        assert_eq!(bodies, ["a", "c", "b"]);
    }

    #[test]
    fn test_sort_by_views_absent_is_zero() {
        let posts = sample();
        let asc = sort_posts(&posts, SortKey::Views, true);
        let bodies: Vec<_> = asc.iter().map(|p| p.body.as_str()).collect();
        // "a" has no counter and sorts exactly like a zero-view post
        assert_eq!(bodies, ["a", "c", "b"]);
    }

    #[test]
    fn test_absent_views_tie_with_explicit_zero() {
        let posts = vec![
            Post::new(date(1), "none"),
            Post::new(date(2), "zero").with_views(0),
        ];
        let asc = sort_posts(&posts, SortKey::Views, true);
        let desc = sort_posts(&posts, SortKey::Views, false);
        // Indistinguishable keys: original order retained both ways.
        assert_eq!(asc[0].body, "none");
        assert_eq!(desc[0].body, "none");
    }

    #[test]
    fn test_ties_keep_original_order_in_both_directions() {
        let posts = vec![
            Post::new(date(5), "first").with_views(7),
            Post::new(date(5), "second").with_views(7),
            Post::new(date(5), "third").with_views(7),
        ];
        for ascending in [true, false] {
            for key in SortKey::ALL {
                let sorted = sort_posts(&posts, key, ascending);
                let bodies: Vec<_> = sorted.iter().map(|p| p.body.as_str()).collect();
                assert_eq!(bodies, ["first", "second", "third"], "{key} asc={ascending}");
            }
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let posts = sample();
        let before = posts.clone();
        let _ = sort_posts(&posts, SortKey::Date, false);
        assert_eq!(posts, before);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!(" views ".parse::<SortKey>().unwrap(), SortKey::Views);
        let err = "rating".parse::<SortKey>().unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("rating"));
    }

    #[test]
    fn test_sort_key_display_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }
}
