// Section body cleaning
// Author: kelexine (https://github.com/kelexine)

use super::patterns::{
    BARE_URL, EMPTY_PARENS, EXCESS_NEWLINES, FOOTNOTE, WHITESPACE_RUN, YEAR_CITATION,
};

/// Strip reference noise from a section body and normalize its whitespace.
///
/// Steps run in a fixed order:
/// 1. footnote markers (`[3]`, `[note 3]`)
/// 2. parenthetical citations containing a four-digit year
/// 3. bare `http(s)://` URLs
/// 4. runs of whitespace, line breaks included, collapse to one space
/// 5. empty `()` pairs
/// 6. CRLF to LF
/// 7. three or more newlines collapse to a blank line
/// 8. outer trim
///
/// A removal can expose new noise (`[1[2]]` leaves `[1]`), so the steps
/// repeat until the text stops changing. The result is a fixed point.
pub fn clean_content(text: &str) -> String {
    let mut current = clean_once(text);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    let text = FOOTNOTE.replace_all(text, "");
    let text = YEAR_CITATION.replace_all(&text, "");
    let text = BARE_URL.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = EMPTY_PARENS.replace_all(&text, "");
    let text = text.replace("\r\n", "\n");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
