//! Text normalization for report output.
//!
//! Post bodies arrive with Telegram-flavored markdown and emoji sequences
//! that the PDF engine's font stack renders badly. This module flattens
//! both before the text is embedded into the report markup:
//!
//! 1. [`strip_markup`] — remove markdown markers, keep their inner text
//! 2. [`rewrite_symbols`] — substitute emoji sequences with font-safe forms
//! 3. [`escape_markup`] — HTML-escape so the result embeds verbatim
//!
//! [`normalize`] composes the three in exactly that order. The order is
//! load-bearing: escaping before stripping would corrupt literal
//! angle-bracket text a user typed, so keep strip → rewrite → escape.

use std::sync::OnceLock;

use regex::Regex;

/// Emoji sequences replaced wholesale before the generic cleanup pass.
///
/// These are presentation-selector pairs that common PDF base fonts ship a
/// text glyph for; substituting the bare codepoint avoids the half-rendered
/// color overlay artifact.
const SYMBOL_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("❤️", "❤"),
    ("♥️", "♥"),
    ("☺️", "☺"),
    ("✌️", "✌"),
    ("☝️", "☝"),
    ("✔️", "✔"),
    ("✳️", "✳"),
    ("☀️", "☀"),
    ("⚡️", "⚡"),
    ("⭐️", "⭐"),
    ("‼️", "‼"),
    ("™️", "™"),
    ("©️", "©"),
    ("®️", "®"),
];

/// Markdown stripper with all patterns compiled once.
struct MarkupStripper {
    bold_star: Regex,
    bold_under: Regex,
    italic_star: Regex,
    italic_under: Regex,
    strike: Regex,
    code_fence: Regex,
    code_inline: Regex,
    link: Regex,
    leading_stars: Regex,
    trailing_stars: Regex,
    leading_unders: Regex,
    trailing_unders: Regex,
    bullet: Regex,
}

impl MarkupStripper {
    fn new() -> Self {
        // Patterns are static; construction failure is a programmer error.
        Self {
            bold_star: Regex::new(r"(?s)\*\*(.+?)\*\*").unwrap(),
            bold_under: Regex::new(r"(?s)__(.+?)__").unwrap(),
            italic_star: Regex::new(r"\*([^*]+?)\*").unwrap(),
            italic_under: Regex::new(r"_([^_]+?)_").unwrap(),
            strike: Regex::new(r"(?s)~~(.+?)~~").unwrap(),
            code_fence: Regex::new(r"(?s)```(.+?)```").unwrap(),
            code_inline: Regex::new(r"`(.+?)`").unwrap(),
            link: Regex::new(r"\[(.+?)\]\(.+?\)").unwrap(),
            leading_stars: Regex::new(r"(?m)^\*+[ \t]*").unwrap(),
            trailing_stars: Regex::new(r"(?m)[ \t]*\*+$").unwrap(),
            leading_unders: Regex::new(r"(?m)^_+[ \t]*").unwrap(),
            trailing_unders: Regex::new(r"(?m)[ \t]*_+$").unwrap(),
            bullet: Regex::new(r"(?m)^[ \t]*[-*+][ \t]+").unwrap(),
        }
    }

    fn strip(&self, text: &str) -> String {
        // Bold before italic, fences before inline code: the longer marker
        // contains the shorter one.
        let text = self.bold_star.replace_all(text, "$1");
        let text = self.bold_under.replace_all(&text, "$1");
        let text = self.italic_star.replace_all(&text, "$1");
        let text = self.italic_under.replace_all(&text, "$1");
        let text = self.strike.replace_all(&text, "$1");
        let text = self.code_fence.replace_all(&text, "$1");
        let text = self.code_inline.replace_all(&text, "$1");
        let text = self.link.replace_all(&text, "$1");
        let text = self.leading_stars.replace_all(&text, "");
        let text = self.trailing_stars.replace_all(&text, "");
        let text = self.leading_unders.replace_all(&text, "");
        let text = self.trailing_unders.replace_all(&text, "");
        let text = self.bullet.replace_all(&text, "");
        text.into_owned()
    }
}

fn stripper() -> &'static MarkupStripper {
    static STRIPPER: OnceLock<MarkupStripper> = OnceLock::new();
    STRIPPER.get_or_init(MarkupStripper::new)
}

/// Removes lightweight markup markers, leaving their inner content.
///
/// Handles bold (`**x**`, `__x__`), italic (`*x*`, `_x_`), strikethrough
/// (`~~x~~`), inline and fenced code, link syntax (`[text](url)` becomes
/// `text`), emphasis runs left dangling at line edges, and leading list
/// bullets. Idempotent on text that is already free of markup.
///
/// # Example
///
/// ```
/// use channelpress::core::normalize::strip_markup;
///
/// assert_eq!(strip_markup("**bold** and [a link](https://example.com)"),
///            "bold and a link");
/// ```
pub fn strip_markup(text: &str) -> String {
    stripper().strip(text)
}

/// Rewrites emoji sequences into forms the PDF font stack can display.
///
/// Applies the explicit substitution table first, then drops variation
/// selectors (U+FE0F), zero-width joiners (U+200D) and skin-tone modifiers
/// that base fonts render as overlay artifacts. Independent of markup
/// stripping.
pub fn rewrite_symbols(text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in SYMBOL_SUBSTITUTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out.chars()
        .filter(|c| !matches!(c, '\u{FE0F}' | '\u{200D}' | '\u{1F3FB}'..='\u{1F3FF}'))
        .collect()
}

/// Escapes characters with special meaning in the report markup.
///
/// After this step the text can be embedded verbatim into an HTML
/// fragment. Ampersand is replaced first so entities are not
/// double-escaped.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full normalization: strip markup, rewrite symbols, escape.
///
/// Used on every post body and on the channel label before either is
/// embedded into the report markup.
pub fn normalize(text: &str) -> String {
    escape_markup(&rewrite_symbols(&strip_markup(text)))
}
