//! Command-line interface definition and interactive prompts.
//!
//! The CLI collects report parameters through interactive prompts rather
//! than flags: channel, date window, sort key, direction and output file
//! name, re-asking on invalid input. Prompt reading is generic over
//! [`BufRead`] so the whole dialog is testable (and e2e-drivable) through
//! a prepared stdin.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::Parser;

use crate::core::report::ReportRequest;
use crate::core::sort::SortKey;

/// Export Telegram channel posts into a sorted PDF report.
#[derive(Parser, Debug, Clone)]
#[command(name = "channelpress")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    channelpress
    channelpress --output-dir reports
    channelpress --demo")]
pub struct Args {
    /// Directory the report is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Use demo data even if credentials are configured
    #[arg(long)]
    pub demo: bool,
}

/// Date format accepted by the prompts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn read_trimmed(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended before all parameters were provided",
        ));
    }
    Ok(line.trim().to_string())
}

fn prompt(output: &mut impl Write, text: &str) -> io::Result<()> {
    write!(output, "{text}")?;
    output.flush()
}

/// Asks for a channel identifier until a non-blank one is entered.
pub fn prompt_channel(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<String> {
    loop {
        prompt(output, "Channel username or link (e.g. @channelname): ")?;
        let channel = read_trimmed(input)?;
        if !channel.is_empty() {
            return Ok(channel);
        }
        writeln!(output, "The channel must not be empty.")?;
    }
}

/// Asks for a `YYYY-MM-DD` date until one parses.
pub fn prompt_date(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> io::Result<NaiveDate> {
    loop {
        prompt(output, &format!("{label} (YYYY-MM-DD, e.g. 2024-01-15): "))?;
        let raw = read_trimmed(input)?;
        match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => return Ok(date),
            Err(_) => writeln!(
                output,
                "Invalid date '{raw}'. Use the YYYY-MM-DD format."
            )?,
        }
    }
}

/// Asks for the window's end date, re-prompting while it precedes the
/// start.
pub fn prompt_end_date(
    input: &mut impl BufRead,
    output: &mut impl Write,
    date_from: NaiveDate,
) -> io::Result<NaiveDate> {
    loop {
        let date_to = prompt_date(input, output, "End date")?;
        if date_to >= date_from {
            return Ok(date_to);
        }
        writeln!(output, "The end date must not precede the start date.")?;
    }
}

/// Asks for the sort key as a 1–3 menu choice.
pub fn prompt_sort_key(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<SortKey> {
    writeln!(output)?;
    writeln!(output, "Sort posts by:")?;
    for (i, key) in SortKey::ALL.iter().enumerate() {
        writeln!(output, "  {} - {}", i + 1, key.label())?;
    }
    loop {
        prompt(output, "Enter a number (1-3): ")?;
        match read_trimmed(input)?.as_str() {
            "1" => return Ok(SortKey::Date),
            "2" => return Ok(SortKey::Reactions),
            "3" => return Ok(SortKey::Views),
            _ => writeln!(output, "Please choose 1, 2 or 3.")?,
        }
    }
}

/// Asks for the sort direction as a 1–2 menu choice; returns `ascending`.
pub fn prompt_direction(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    writeln!(output)?;
    writeln!(output, "Sort direction:")?;
    writeln!(output, "  1 - ascending")?;
    writeln!(output, "  2 - descending")?;
    loop {
        prompt(output, "Enter a number (1-2): ")?;
        match read_trimmed(input)?.as_str() {
            "1" => return Ok(true),
            "2" => return Ok(false),
            _ => writeln!(output, "Please choose 1 or 2.")?,
        }
    }
}

/// Asks for an output file name, offering a derived default.
pub fn prompt_filename(
    input: &mut impl BufRead,
    output: &mut impl Write,
    default: &str,
) -> io::Result<String> {
    writeln!(output)?;
    prompt(output, &format!("Output file name (Enter for '{default}'): "))?;
    let name = read_trimmed(input)?;
    Ok(if name.is_empty() {
        default.to_string()
    } else {
        name
    })
}

/// Runs the full parameter dialog and assembles a [`ReportRequest`].
///
/// In demo mode the channel prompt is skipped and a placeholder name is
/// used, since no live channel will be contacted.
pub fn prompt_request(
    input: &mut impl BufRead,
    output: &mut impl Write,
    demo_mode: bool,
) -> io::Result<ReportRequest> {
    let channel = if demo_mode {
        writeln!(output, "Demo mode: the channel prompt is skipped.")?;
        "demo_channel".to_string()
    } else {
        prompt_channel(input, output)?
    };

    let date_from = prompt_date(input, output, "Start date")?;
    let date_to = prompt_end_date(input, output, date_from)?;
    let sort_key = prompt_sort_key(input, output)?;
    let ascending = prompt_direction(input, output)?;

    let default_name = format!(
        "{}_{}_{}.pdf",
        channel.replace('@', "").replace(['/', '\\'], "_"),
        date_from,
        date_to
    );
    let filename = prompt_filename(input, output, &default_name)?;

    Ok(
        ReportRequest::new(channel, date_from, date_to, sort_key, ascending)
            .with_output_name(filename),
    )
}
