//! Report document assembly.
//!
//! Builds the structured markup for one report — a title plus one block per
//! post — and hands it to the external rendering engine for the actual PDF
//! bytes. The engine is a black box here: markup in, binary artifact out,
//! any failure surfaced as
//! [`GenerationFailure`](crate::error::ReportError::GenerationFailure).
//!
//! Post order is the caller's responsibility; the assembler renders blocks
//! exactly in the order given.

use std::path::{Path, PathBuf};

use pdf_oxide::api::PdfBuilder;
use pdf_oxide::writer::PageSize;

use crate::Post;
use crate::core::normalize::normalize;
use crate::error::{ReportError, Result};

/// Page font size in points.
const FONT_SIZE: f32 = 12.0;

/// Line height multiplier.
const LINE_HEIGHT: f32 = 1.6;

/// Page margin in points (2 cm).
const MARGIN: f32 = 56.7;

/// Non-breaking space, used so a reaction symbol never wraps away from its
/// count.
const NBSP: char = '\u{00A0}';

/// Visual separator line between post blocks.
const SEPARATOR: &str = "----------";

/// Formats a reaction list as `symbol count` pairs.
///
/// The symbol is bound to its count with a non-breaking space; pairs are
/// separated by two spaces. Symbols go through the normalizer so the font
/// substitutions apply to reactions as well.
fn format_reactions(post: &Post) -> String {
    post.reactions
        .iter()
        .map(|r| format!("{}{}{}", normalize(&r.symbol), NBSP, r.count))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Formats a post header line: date, then reactions and views when present.
fn format_header(post: &Post) -> String {
    let mut parts = vec![format!("[{}]", post.occurred_on.format("%d.%m.%Y"))];

    if !post.reactions.is_empty() {
        parts.push(format_reactions(post));
    }
    if let Some(views) = post.view_count {
        parts.push(format!("Views: {views}"));
    }

    parts.join(" / ")
}

/// Builds the HTML document for a report.
///
/// Structure: an `<h1>` title naming the channel, then per post a header
/// paragraph and a body paragraph with the original line breaks preserved
/// as `<br/>`. Blocks are separated by a rule line, except after the last.
/// Every piece of user-controlled text is normalized before embedding.
pub fn build_report_html(posts: &[Post], channel_label: &str) -> String {
    let mut html = String::new();

    html.push_str("<h1>Posts from channel ");
    html.push_str(&normalize(channel_label));
    html.push_str("</h1>\n");

    for (i, post) in posts.iter().enumerate() {
        html.push_str("<p><b>");
        html.push_str(&format_header(post));
        html.push_str("</b></p>\n");

        html.push_str("<p>");
        html.push_str(&normalize(&post.body).replace('\n', "<br/>"));
        html.push_str("</p>\n");

        if i + 1 < posts.len() {
            html.push_str("<p>");
            html.push_str(SEPARATOR);
            html.push_str("</p>\n");
        }
    }

    html
}

/// Renders a report to a PDF file and returns its path.
///
/// The caller passes already-sorted posts and the final artifact path; the
/// parent directory must exist. Engine failures and file I/O failures both
/// map to [`GenerationFailure`](ReportError::GenerationFailure).
pub fn render_report(posts: &[Post], channel_label: &str, path: &Path) -> Result<PathBuf> {
    let html = build_report_html(posts, channel_label);

    let mut pdf = PdfBuilder::new()
        .title(format!("Posts from channel {channel_label}"))
        .page_size(PageSize::A4)
        .margin(MARGIN)
        .font_size(FONT_SIZE)
        .line_height(LINE_HEIGHT)
        .from_html(&html)
        .map_err(|e| ReportError::generation_failure(format!("PDF engine error: {e}")))?;

    pdf.save(path)
        .map_err(|e| ReportError::generation_failure(format!("failed to write PDF: {e}")))?;

    Ok(path.to_path_buf())
}
