//! Key layouts.
//!
//! A layout is rows of key labels, row-major. `""` is a filler slot, `" "`
//! is the space bar and `"⌫"` is backspace (see [`crate::key`]).

use crate::key::KeyKind;

/// Numeric pad: digits, decimal point and backspace.
pub const NUMERIC_LAYOUT: &[&[&str]] = &[
    &["1", "2", "3"],
    &["4", "5", "6"],
    &["7", "8", "9"],
    &[".", "0", "⌫"],
];

/// Full alphabetic layout (Spanish QWERTY): digit row, letters with Ñ,
/// punctuation, space bar and backspace.
pub const ALPHA_LAYOUT: &[&[&str]] = &[
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", "Ñ"],
    &["Z", "X", "C", "V", "B", "N", "M", "⌫"],
    &[".", ",", " ", "@", ";"],
];

/// Owned layout used by keyboards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyLayout {
    rows: Vec<Vec<String>>,
}

impl KeyLayout {
    pub fn from_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|label| (*label).to_owned()).collect())
                .collect(),
        }
    }

    pub fn numeric() -> Self {
        Self::from_rows(NUMERIC_LAYOUT)
    }

    pub fn alpha() -> Self {
        Self::from_rows(ALPHA_LAYOUT)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Every label with its `(row, column)`, row-major.
    pub fn keys(&self) -> impl Iterator<Item = (usize, usize, &str)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, labels)| {
            labels
                .iter()
                .enumerate()
                .map(move |(column, label)| (row, column, label.as_str()))
        })
    }

    /// Labels that produce a pressable key.
    pub fn interactive_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys()
            .map(|(_, _, label)| label)
            .filter(|label| KeyKind::of(label).is_interactive())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.keys().any(|(_, _, candidate)| candidate == label)
    }
}

impl From<&[&[&str]]> for KeyLayout {
    fn from(rows: &[&[&str]]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Vec<Vec<String>>> for KeyLayout {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{BACKSPACE, SPACE};

    #[test]
    fn numeric_layout_has_digits_point_and_backspace() {
        let layout = KeyLayout::numeric();
        assert_eq!(layout.row_count(), 4);
        for digit in 0..10 {
            assert!(layout.contains(&digit.to_string()), "missing {digit}");
        }
        assert!(layout.contains("."));
        assert!(layout.contains(BACKSPACE));
        assert_eq!(layout.interactive_keys().count(), 12);
    }

    #[test]
    fn alpha_layout_has_space_and_backspace() {
        let layout = KeyLayout::alpha();
        assert!(layout.contains(SPACE));
        assert!(layout.contains(BACKSPACE));
        assert!(layout.contains("Ñ"));
        assert!(layout.contains("@"));
        assert_eq!(layout.interactive_keys().count(), 43);
    }

    #[test]
    fn keys_are_row_major() {
        let layout = KeyLayout::from_rows(&[&["a", ""], &["b"]]);
        let keys: Vec<_> = layout.keys().collect();
        assert_eq!(keys, vec![(0, 0, "a"), (0, 1, ""), (1, 0, "b")]);
        let interactive: Vec<_> = layout.interactive_keys().collect();
        assert_eq!(interactive, vec!["a", "b"]);
    }
}
