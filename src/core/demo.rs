//! Canned posts for demo mode.
//!
//! When no live credentials are configured the pipeline runs against this
//! fixed catalog instead of the network. The catalog is a pure function of
//! the requested window: the same dates always produce the same posts, so
//! demo output is reproducible and testable.
//!
//! The seven posts cover every header permutation the PDF assembler has to
//! handle: views with reactions (short and long text), views only,
//! reactions only, neither, a reaction-heavy outlier for sort testing, and
//! a long multi-paragraph body.

use chrono::{Days, NaiveDate};

use crate::{Post, Reaction};

/// Generates the demo catalog for an inclusive date window.
///
/// Post `k` (0-based) is dated `date_from + min(k, days_in_window)` and the
/// result is filtered to `[date_from, date_to]`, so a one-day window
/// collapses every post onto `date_from` and a seven-day window spreads
/// them one per day.
pub fn demo_posts(date_from: NaiveDate, date_to: NaiveDate) -> Vec<Post> {
    let days_in_window = (date_to - date_from).num_days().max(0) as u64;

    let dated = |k: u64| {
        date_from
            .checked_add_days(Days::new(k.min(days_in_window)))
            .unwrap_or(date_from)
    };

    let catalog = vec![
        Post::new(
            dated(0),
            "First demo post! Short text with both reactions and views.",
        )
        .with_views(1543)
        .with_reactions(vec![
            Reaction::new("❤", 120),
            Reaction::new("👍", 85),
            Reaction::new("🔥", 42),
        ]),
        Post::new(
            dated(1),
            "This is the second demo post, with a longer body.\n\n\
             Several paragraphs demonstrate how the report handles multi-line \
             content.\n\n\
             This post also carries reactions and views, which exercises the \
             post header formatting.\n\n\
             A third paragraph rounds it out.",
        )
        .with_views(2847)
        .with_reactions(vec![
            Reaction::new("😂", 230),
            Reaction::new("❤", 156),
            Reaction::new("🎉", 94),
        ]),
        Post::new(
            dated(2),
            "Third post: views but no reactions. The reactions block should \
             not appear for this one.",
        )
        .with_views(987),
        Post::new(
            dated(3),
            "Fourth post: reactions but no view counter. Checks that the \
             views line is omitted.",
        )
        .with_reactions(vec![Reaction::new("👏", 67), Reaction::new("💯", 45)]),
        Post::new(
            dated(4),
            "Fifth post is minimalist. No reactions, no views. Just a date \
             and this text.",
        ),
        Post::new(
            dated(5),
            "Sixth post with a huge number of reactions!\n\n\
             Unusually popular by reactions while views stay modest.\n\n\
             Used to verify sorting by reaction count.",
        )
        .with_views(543)
        .with_reactions(vec![
            Reaction::new("🔥", 890),
            Reaction::new("❤", 723),
            Reaction::new("😍", 612),
        ]),
        Post::new(
            dated(6),
            "Seventh post, the longest of them all!\n\n\
             This text exists to check how the report handles large bodies.\n\n\
             Paragraph one talks about the importance of exercising edge \
             cases when building software.\n\n\
             Paragraph two points out that boundary conditions, very long \
             text, missing data and odd parameter combinations are exactly \
             where formatting bugs hide.\n\n\
             Paragraph three notes that the report should keep every line \
             break of a long body intact.\n\n\
             Paragraph four checks that the post header still renders \
             correctly above a long body.\n\n\
             Final paragraph: if this text appears in the PDF with its \
             formatting preserved, everything works.",
        )
        .with_views(1876)
        .with_reactions(vec![
            Reaction::new("📚", 234),
            Reaction::new("👍", 187),
            Reaction::new("🤔", 156),
        ]),
    ];

    catalog
        .into_iter()
        .filter(|post| post.occurred_on >= date_from && post.occurred_on <= date_to)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_week_yields_all_seven() {
        let from = date(2024, 3, 1);
        let to = date(2024, 3, 7);
        let posts = demo_posts(from, to);
        assert_eq!(posts.len(), 7);
        // One post per day, in catalog order
        for (k, post) in posts.iter().enumerate() {
            assert_eq!(post.occurred_on, from.checked_add_days(Days::new(k as u64)).unwrap());
        }
    }

    #[test]
    fn test_single_day_window_collapses_to_day_zero() {
        let day = date(2024, 3, 1);
        let posts = demo_posts(day, day);
        assert_eq!(posts.len(), 7);
        assert!(posts.iter().all(|p| p.occurred_on == day));
    }

    #[test]
    fn test_short_window_clamps_offsets() {
        let from = date(2024, 3, 1);
        let to = date(2024, 3, 3);
        let posts = demo_posts(from, to);
        // Offsets clamp to the window, nothing is filtered out
        assert_eq!(posts.len(), 7);
        assert!(posts.iter().all(|p| p.occurred_on >= from && p.occurred_on <= to));
        // Posts 2..7 all land on the window's last day
        assert_eq!(posts.iter().filter(|p| p.occurred_on == to).count(), 5);
    }

    #[test]
    fn test_deterministic() {
        let from = date(2024, 3, 1);
        let to = date(2024, 3, 7);
        assert_eq!(demo_posts(from, to), demo_posts(from, to));
    }

    #[test]
    fn test_header_permutations_present() {
        let posts = demo_posts(date(2024, 3, 1), date(2024, 3, 7));
        assert!(posts.iter().any(|p| p.view_count.is_some() && !p.reactions.is_empty()));
        assert!(posts.iter().any(|p| p.view_count.is_some() && p.reactions.is_empty()));
        assert!(posts.iter().any(|p| p.view_count.is_none() && !p.reactions.is_empty()));
        assert!(posts.iter().any(|p| p.view_count.is_none() && p.reactions.is_empty()));
    }

    #[test]
    fn test_reaction_heavy_post_has_highest_total() {
        let posts = demo_posts(date(2024, 3, 1), date(2024, 3, 7));
        let max = posts.iter().map(Post::reaction_total).max().unwrap();
        let heavy = posts.iter().find(|p| p.reaction_total() == max).unwrap();
        assert!(heavy.body.starts_with("Sixth post"));
    }
}
