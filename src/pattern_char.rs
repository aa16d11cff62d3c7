use std::collections::HashMap;
use std::sync::LazyLock;

/// Symbol for a white cell (or a letter slot) whose letter is not yet known.
/// Doubles as the single-letter wildcard in search patterns.
pub const UNKNOWN_LETTER: char = '.';
/// Symbol for a black (blocked) cell in a grid specification.
pub const BLACK_SYMBOL: char = '#';
/// Wildcard in a search template: exactly one letter.
pub const WILDCARD: char = UNKNOWN_LETTER;

pub(crate) const WORD_SEPARATOR: char = ' ';
pub(crate) const HYPHEN: char = '-';

pub(crate) const GRID_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// Paired position-for-position; the spaces only group the blocks visually.
const ACCENTED: &str = "àèìòùÀÈÌÒÙ äëïöüÄËÏÖÜ âêîôûÂÊÎÔÛ áéíóúÁÉÍÓÚðÐýÝ ãñõÃÑÕšŠžŽçÇåÅøØ";
const UNACCENTED: &str = "aeiouAEIOU aeiouAEIOU aeiouAEIOU aeiouAEIOUdDyY anoANOsSzZcCaAoO";

static ACCENT_TABLE: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    ACCENTED
        .chars()
        .zip(UNACCENTED.chars())
        .filter(|&(accented, _)| accented != ' ')
        .collect()
});

pub(crate) trait PatternChar {
    fn is_wildcard(&self) -> bool;
    fn is_separator(&self) -> bool;
    /// Letters, wildcards and separators survive pattern normalization;
    /// everything else (apostrophes, digits, ...) is dropped.
    fn is_pattern_kept(&self) -> bool;
    fn is_grid_letter(&self) -> bool;
    fn unaccented(&self) -> char;
}

impl PatternChar for char {
    fn is_wildcard(&self) -> bool {
        *self == WILDCARD
    }
    fn is_separator(&self) -> bool {
        *self == WORD_SEPARATOR || *self == HYPHEN
    }
    fn is_pattern_kept(&self) -> bool {
        self.is_alphabetic() || self.is_wildcard() || self.is_separator()
    }
    fn is_grid_letter(&self) -> bool {
        self.is_ascii_uppercase()
    }
    fn unaccented(&self) -> char {
        ACCENT_TABLE.get(self).copied().unwrap_or(*self)
    }
}

/// Replace every accented character covered by the folding table with its plain equivalent.
pub fn unaccent_str(s: &str) -> String {
    s.chars().map(|c| c.unaccented()).collect()
}

/// Fold a single character; characters outside the table pass through unchanged.
pub fn unaccent(c: char) -> char {
    c.unaccented()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unaccent_vowels() {
        assert_eq!('à'.unaccented(), 'a');
        assert_eq!('É'.unaccented(), 'E');
        assert_eq!('ü'.unaccented(), 'u');
        assert_eq!('Ô'.unaccented(), 'O');
    }

    #[test]
    fn test_unaccent_consonants() {
        assert_eq!('ñ'.unaccented(), 'n');
        assert_eq!('ç'.unaccented(), 'c');
        assert_eq!('Š'.unaccented(), 'S');
        assert_eq!('ð'.unaccented(), 'd');
        assert_eq!('ø'.unaccented(), 'o');
    }

    #[test]
    fn test_unaccent_passthrough() {
        assert_eq!('a'.unaccented(), 'a');
        assert_eq!('Z'.unaccented(), 'Z');
        assert_eq!(' '.unaccented(), ' ');
        assert_eq!('ß'.unaccented(), 'ß');
    }

    #[test]
    fn test_table_is_paired() {
        assert_eq!(ACCENTED.chars().count(), UNACCENTED.chars().count());
        // spaces line up in both strings
        for (a, u) in ACCENTED.chars().zip(UNACCENTED.chars()) {
            assert_eq!(a == ' ', u == ' ', "misaligned pair {a}/{u}");
        }
    }

    #[test]
    fn test_unaccent_str() {
        assert_eq!(unaccent_str("Crème brûlée"), "Creme brulee");
        assert_eq!(unaccent_str("façade"), "facade");
    }

    #[test]
    fn test_separators_and_wildcards() {
        assert!(' '.is_separator());
        assert!('-'.is_separator());
        assert!(!'.'.is_separator());
        assert!('.'.is_wildcard());
        assert!(!'a'.is_wildcard());
    }

    #[test]
    fn test_pattern_kept() {
        assert!('a'.is_pattern_kept());
        assert!('é'.is_pattern_kept());
        assert!('.'.is_pattern_kept());
        assert!('-'.is_pattern_kept());
        assert!(!'\''.is_pattern_kept());
        assert!(!'3'.is_pattern_kept());
    }

    #[test]
    fn test_grid_letters() {
        assert_eq!(GRID_LETTERS.len(), 26);
        assert!(GRID_LETTERS.chars().all(|c| c.is_grid_letter()));
        assert!(!'a'.is_grid_letter());
        assert!(!UNKNOWN_LETTER.is_grid_letter());
        assert!(!BLACK_SYMBOL.is_grid_letter());
    }
}
