//! Transcript parsing.
//!
//! A transcript is the text the calling program writes when sequences are
//! exported. Sequences are separated by form feeds. Each one starts with a
//! header line (date, program version and level separated by wide runs of
//! spaces), then an optional indented comment, then one block per call:
//!
//! ```text
//! Sat May  6 02:22:24 2023     Sd 39.45:db39.45     Plus
//!    { optional sequence comment }
//!
//! heads star thru
//! { leading comment } double pass thru
//!   Warning:  Do not use "double pass thru" here,
//!      because it is weird.
//!
//!           2B>
//!     1B<   4G<   1G>
//!     3G<   2G>   3B<
//!           4B<
//! ```
//!
//! Parsing is total: anything unexpected degrades to a best-effort value
//! instead of failing the batch.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use sdcard_model::{Call, Level, Metadata, Sequence, SequenceId};
use tracing::{debug, info, warn};

use crate::date::parse_transcript_date;
use crate::formation::decode_formation;

/// Separates sequences in a transcript.
pub const FORM_FEED: char = '\x0c';

const WARNING_MARKER: &str = "Warning";
const ROTATION_MARKER: &str = "45 degrees";
const CONTINUATION_INDENT: &str = "   ";

/// Fields of a sequence header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub date: NaiveDateTime,
    pub version: String,
    pub level: Level,
}

/// Parses every sequence in a transcript, in order.
///
/// Fragments containing only whitespace (for example after a trailing form
/// feed) are skipped.
pub fn parse_transcript(text: &str) -> Vec<Sequence> {
    let sequences: Vec<Sequence> = text
        .split(FORM_FEED)
        .filter(|fragment| !fragment.trim().is_empty())
        .map(parse_sequence)
        .collect();
    info!(sequence_count = sequences.len(), "parsed transcript");
    sequences
}

/// Parses one form-feed delimited fragment.
pub fn parse_sequence(fragment: &str) -> Sequence {
    let mut lines = fragment.trim().lines();
    let header = parse_header(lines.next().unwrap_or_default());
    let body: Vec<&str> = lines.collect();

    let mut blocks = chunk_blocks(&body).into_iter();
    let comment = blocks
        .next()
        .map(|block| parse_comment(&block))
        .unwrap_or_default();
    let calls: Vec<Call> = blocks.map(|block| parse_block(&block)).collect();

    debug!(
        date = %header.date,
        level = %header.level,
        call_count = calls.len(),
        "parsed sequence"
    );

    Sequence {
        id: SequenceId::generate(),
        date: header.date,
        version: header.version,
        level: header.level,
        comment,
        calls,
        metadata: Metadata::default(),
    }
}

fn field_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r" {5,}").expect("header separator pattern is valid"))
}

/// Parses a header line, falling back field by field.
///
/// An unparseable date becomes [`Sequence::UNKNOWN_DATE`] and an unknown
/// level becomes [`Level::All`].
pub fn parse_header(line: &str) -> Header {
    let mut fields = field_separator().split(line.trim());
    let date_text = fields.next().unwrap_or_default();
    let version = fields.next().unwrap_or_default().trim().to_string();
    let level = Level::from_label(fields.next().unwrap_or_default());

    let date = parse_transcript_date(date_text).unwrap_or_else(|| {
        warn!(header = %line, "unparseable sequence date");
        Sequence::UNKNOWN_DATE
    });

    Header {
        date,
        version,
        level,
    }
}

/// Groups lines into blocks. A block starts at every non-empty line that is
/// not indented; the first block holds whatever precedes the first call.
fn chunk_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks: Vec<Vec<&'a str>> = vec![Vec::new()];
    for line in lines {
        if !line.is_empty() && !line.starts_with(' ') {
            blocks.push(vec![*line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(*line);
        }
    }
    blocks
}

/// The first non-blank line of the leading block.
fn parse_comment(block: &[&str]) -> String {
    block
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(CONTINUATION_INDENT) && !line.contains(WARNING_MARKER)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parses one call block: call text, warnings, then an optional diagram.
fn parse_block(block: &[&str]) -> Call {
    let mut lines = block.iter().copied().peekable();
    let Some(first) = lines.next() else {
        return Call::default();
    };

    let mut text = first.trim().to_string();
    while let Some(line) = lines.next_if(|line| is_continuation(line)) {
        text.push(' ');
        text.push_str(line.trim());
    }
    let (comment, call) = split_leading_comment(&text);

    let mut warnings = Vec::new();
    loop {
        while lines.next_if(|line| is_blank(line)).is_some() {}
        let Some(line) = lines.next_if(|line| line.contains(WARNING_MARKER)) else {
            break;
        };
        let mut warning = line.trim().to_string();
        while let Some(more) = lines.next_if(|line| is_continuation(line)) {
            warning.push(' ');
            warning.push_str(more.trim());
        }
        warnings.push(warning);
    }

    let mut diagram = Vec::new();
    let mut rotated45 = false;
    for line in lines {
        if line.contains(ROTATION_MARKER) {
            rotated45 = true;
            break;
        }
        if !is_blank(line) {
            diagram.push(line);
        }
    }

    Call {
        call,
        comment,
        warnings,
        formation: decode_formation(&diagram),
        rotated45,
    }
}

/// Splits `{ comment } call` into its comment and call.
fn split_leading_comment(text: &str) -> (String, String) {
    if let Some(rest) = text.strip_prefix('{')
        && let Some((comment, call)) = rest.split_once(" } ")
    {
        let comment = comment.strip_prefix(' ').unwrap_or(comment);
        return (comment.to_string(), call.to_string());
    }
    (String::new(), text.to_string())
}
