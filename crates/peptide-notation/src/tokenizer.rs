//! Splitting strings on delimiters that fall outside of brackets or quotes

/// The opening and closing markers of a bracketed or quoted span
///
/// The two markers may be identical (like `"`), in which case each occurrence toggles between the inside and outside
/// of a span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Brackets {
    pub open: char,
    pub close: char,
}

impl Brackets {
    pub const SQUARE: Self = Self::new('[', ']');

    #[must_use]
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    #[must_use]
    pub const fn quotes(quote: char) -> Self {
        Self::new(quote, quote)
    }
}

/// Splits `text` at every one of the `delimiters` that isn't inside of `brackets`
///
/// Only a single level of brackets is tracked: an opening marker always toggles the inside / outside state, and a
/// closing marker always returns to the outside, so `"[a[b]c]"` is considered to end its span at the first `]`.
/// Unbalanced brackets are not an error. If `keep_markers` is `false`, every bracket marker is removed from the
/// output.
#[must_use]
pub fn split_outside(
    text: &str,
    delimiters: &[char],
    brackets: Brackets,
    keep_markers: bool,
) -> Vec<String> {
    let mut pieces = vec![String::new()];
    let mut inside = false;
    for c in text.chars() {
        let is_marker = if c == brackets.open {
            inside = !inside;
            true
        } else if c == brackets.close {
            inside = false;
            true
        } else {
            false
        };

        if is_marker && !keep_markers {
            continue;
        }
        if !is_marker && !inside && delimiters.contains(&c) {
            pieces.push(String::new());
        } else if let Some(piece) = pieces.last_mut() {
            piece.push(c);
        }
    }
    pieces
}
