//! Finds the occurrences of a search term in a paragraph's flattened text.

use crate::utf16::utf16_len;

/// Start offsets (UTF-16 units) of every non-overlapping occurrence of `term`,
/// left to right. Each search resumes right after the previous match, so
/// `"aaaa"` holds `"aa"` at 0 and 2 only.
pub fn find_matches(content: &str, term: &str) -> Vec<usize> {
    if term.is_empty() || content.is_empty() {
        return vec![];
    }
    let term_len = utf16_len(term);
    let mut offsets = Vec::new();
    let mut units = 0;
    let mut consumed = 0;
    for (byte, _) in content.match_indices(term) {
        units += utf16_len(&content[consumed..byte]);
        offsets.push(units);
        units += term_len;
        consumed = byte + term.len();
    }
    offsets
}

pub fn count_matches(content: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    content.matches(term).count()
}
