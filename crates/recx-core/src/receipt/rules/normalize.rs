//! Line normalization for OCR output.

use super::patterns::LINE_BREAK;

/// First code point of the full-width ASCII block (`！`).
const FULL_WIDTH_FIRST: u32 = 0xFF01;
/// Last code point of the full-width ASCII block (`～`).
const FULL_WIDTH_LAST: u32 = 0xFF5E;
/// Distance between a full-width form and its ASCII counterpart.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Map full-width Latin letters, digits and punctuation to ASCII.
///
/// The ideographic space becomes a plain space. Everything else, Hangul
/// included, is left alone.
pub fn to_half_width(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if (FULL_WIDTH_FIRST..=FULL_WIDTH_LAST).contains(&code) {
                char::from_u32(code - FULL_WIDTH_OFFSET).unwrap_or(c)
            } else if c == IDEOGRAPHIC_SPACE {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Normalize a single OCR line.
///
/// Converts full-width forms to half-width and then drops every whitespace
/// character, since OCR scatters spaces inside words and numbers.
pub fn normalize_line(line: &str) -> String {
    to_half_width(line)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Split recognized text into lines on `\r\n`, `\r` or `\n`.
pub fn split_lines(text: &str) -> Vec<&str> {
    LINE_BREAK.split(text).collect()
}
