/// Longest reply line, in characters
pub const MAX_REPLY_LENGTH: usize = 400;

/// Appended when a line was cut
pub const ELLIPSIS: char = '…';

/// Cut `text` to at most `max` characters.
///
/// The cut goes at the last whitespace at or before `max`; without one the
/// text is hard-cut at `max`. [`ELLIPSIS`] is appended only when the
/// result is shorter than the input.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    // Byte offset of the char at index `max`; exists because len > max
    let hard_cut = text
        .char_indices()
        .nth(max)
        .map_or(text.len(), |(offset, _)| offset);

    let cut = text
        .char_indices()
        .take(max + 1)
        .filter(|(_, c)| c.is_whitespace())
        .map(|(offset, _)| offset)
        .last()
        .unwrap_or(hard_cut);

    let mut result = text[..cut].to_string();
    if result.len() < text.len() {
        result.push(ELLIPSIS);
    }
    result
}
