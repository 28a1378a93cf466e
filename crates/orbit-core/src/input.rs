//! Turning raw puzzle input into labels.

use orbit_ring::Label;

/// Errors that can occur while parsing label input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The input held no labels after trimming whitespace.
    #[error("input contains no labels")]
    Empty,

    /// A character other than an ASCII digit was found.
    #[error("invalid character {found:?} at position {position}: expected a digit")]
    InvalidDigit {
        /// Zero-based character position within the trimmed input.
        position: usize,
        /// The offending character.
        found: char,
    },
}

/// Parse a line of digit characters into labels, one label per digit.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`InputError::Empty`] for blank input and
/// [`InputError::InvalidDigit`] for any non-digit character.
pub fn parse_labels(line: &str) -> Result<Vec<Label>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    trimmed
        .chars()
        .enumerate()
        .map(|(position, found)| {
            found
                .to_digit(10)
                .ok_or(InputError::InvalidDigit { position, found })
        })
        .collect()
}

/// Append `max + 1 ..= total` to `labels`, in increasing order.
///
/// Nothing is appended when `total` does not exceed the current largest
/// label.
pub fn expand_labels(mut labels: Vec<Label>, total: Label) -> Vec<Label> {
    let next = labels
        .iter()
        .copied()
        .max()
        .map_or(1, |max| max.saturating_add(1));
    labels.extend(next..=total);
    labels
}
