// Compiled text patterns used by the segmenter and cleaner
// Author: kelexine (https://github.com/kelexine)
//
// These are English-centric heuristics. Callers depend on their exact
// false positives and negatives, so keep changes behavior-neutral.

use once_cell::sync::Lazy;
use regex::Regex;

/// A heading at the start of a line: `#`..`###` followed by a title filling
/// the rest of the line, or a capitalized phrase ending in a colon. Anything
/// after that colon belongs to the section body. Group 1 or 2 holds the title.
pub static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(?:#{1,3}[ \t]+([^\r\n]*[^\s#][^\r\n]*?)[ \t]*\r?$|([A-Z][A-Za-z0-9 \t'&,/-]*?)[ \t]*:)",
    )
    .expect("heading pattern must compile")
});

/// A capitalized phrase, a linking word or colon, then a clause up to the
/// first sentence terminator on the same line.
pub static KEY_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][A-Za-z]*(?:[ \t]+[A-Z][A-Za-z]*)*(?::|[ \t]+(?:is|are|refers to|means)\b)[^.!?\r\n]+[.!?]",
    )
    .expect("key term pattern must compile")
});

/// `[3]`, `[12]`, `[note 4]`, `[Note4]`
pub static FOOTNOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[(?:note[ \t]*)?\d+\]").expect("footnote pattern must compile")
});

/// A parenthetical containing a four-digit year, e.g. `(Smith, 2019)`.
pub static YEAR_CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\([^()]*\b\d{4}\b[^()]*\)").expect("citation pattern must compile")
});

pub static BARE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("url pattern must compile"));

pub static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// `()` left behind once its contents were stripped, with its leading gap.
pub static EMPTY_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" ?\(\s*\)").expect("empty parens pattern must compile"));

pub static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("newline pattern must compile"));
