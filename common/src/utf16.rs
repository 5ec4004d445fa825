//! Conversions between Rust byte offsets and DOM (UTF-16 code unit) offsets.

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index of the UTF-16 position `offset` in `text`.
///
/// Returns `None` when `offset` is past the end or falls between the two halves
/// of a surrogate pair.
pub fn byte_index(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units == offset {
            return Some(byte);
        }
        if units > offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == offset).then_some(text.len())
}
