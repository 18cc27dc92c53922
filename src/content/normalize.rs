//! Blog body normalization
//!
//! Content coming back from the API is a mix of HTML produced by a rich
//! text editor and hand-written Markdown. Before it reaches the Markdown
//! renderer the HTML structure is flattened into blank-line separated
//! paragraphs, every remaining tag is dropped and the common entities are
//! decoded.
//!
//! The passes run in a fixed order: block tags become line breaks, then
//! generic tags are stripped, then entities are decoded, then whitespace is
//! collapsed. Reordering them reintroduces artifacts that an earlier pass
//! already removed.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Reading speed used by [`estimate_read_minutes`]
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref PARAGRAPH_END: Regex = Regex::new(r"(?i)</p>").unwrap();
    static ref DIV_END: Regex = Regex::new(r"(?i)</div>").unwrap();
    static ref HEADING_END: Regex = Regex::new(r"(?i)</h[1-6]>").unwrap();
    static ref LIST_ITEM_END: Regex = Regex::new(r"(?i)</li>").unwrap();
    static ref LIST_END: Regex = Regex::new(r"(?i)</(?:ul|ol)>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(amp|lt|gt|quot|#039|nbsp);").unwrap();
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref LEADING_WHITESPACE: Regex = Regex::new(r"(?m)^\s+").unwrap();
}

/// Normalize raw blog content into renderer-ready Markdown.
///
/// Runs [`strip_html_tags`] and then forces a paragraph break after every
/// non-empty line, so each source line renders as its own paragraph.
/// Never fails; the empty string maps to the empty string.
pub fn normalize(raw: &str) -> String {
    let stripped = strip_html_tags(raw);

    let lines: Vec<&str> = stripped.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    let mut processed: Vec<&str> = Vec::with_capacity(lines.len() * 2);

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            processed.push("");
            continue;
        }

        processed.push(line);
        if i < last {
            processed.push("");
        }
    }

    let joined = processed.join("\n");
    collapse_newlines(&joined).trim().to_string()
}

/// Convert block structure to line breaks, drop all tags, decode entities
/// and tidy whitespace.
pub fn strip_html_tags(html: &str) -> String {
    let clean = convert_block_tags(html);
    let clean = remove_tags(&clean);
    let clean = decode_entities(&clean);
    // Decoded `&lt;`/`&gt;` pairs must not smuggle markup past the strip.
    let clean = remove_tags(&clean);

    let clean = collapse_newlines(&clean);
    let clean = LEADING_WHITESPACE.replace_all(&clean, "");
    clean.trim().to_string()
}

/// Replace closing block tags with the line breaks they imply.
pub fn convert_block_tags(html: &str) -> String {
    let clean = LINE_BREAK.replace_all(html, "\n");
    let clean = PARAGRAPH_END.replace_all(&clean, "\n\n");
    let clean = DIV_END.replace_all(&clean, "\n\n");
    let clean = HEADING_END.replace_all(&clean, "\n\n");
    let clean = LIST_ITEM_END.replace_all(&clean, "\n");
    let clean = LIST_END.replace_all(&clean, "\n\n");
    clean.into_owned()
}

/// Remove every `<...>` sequence regardless of tag name or attributes.
pub fn remove_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Decode `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&#039;` and `&nbsp;`.
///
/// Single pass: an ampersand produced by `&amp;` is never decoded again.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "#039" => "'",
            _ => " ",
        })
        .into_owned()
}

fn collapse_newlines(text: &str) -> String {
    EXCESS_NEWLINES.replace_all(text, "\n\n").into_owned()
}

/// Estimated reading time in minutes at [`WORDS_PER_MINUTE`].
pub fn estimate_read_minutes(content: &str) -> u32 {
    estimate_read_minutes_at(content, WORDS_PER_MINUTE)
}

/// Estimated reading time in minutes at a given reading speed.
///
/// Counts whitespace-delimited words of the raw content and rounds up.
/// The result is never below one minute, including for empty content.
pub fn estimate_read_minutes_at(content: &str, words_per_minute: usize) -> u32 {
    let wpm = if words_per_minute == 0 {
        WORDS_PER_MINUTE
    } else {
        words_per_minute
    };
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(wpm).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
