//! Candidate character sets
//!
//! Recognition is always asked against a candidate string; these are the
//! named sets used by the recognizer and the label combiner.

/// Uppercase letters plus the symbols used for abbreviations in labels
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ$%^&#";
/// Lowercase letters
pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
/// Digits
pub const DIGITS: &str = "0123456789";
/// Brackets
pub const BRACKETS: &str = "()[]";
/// Charge signs
pub const CHARGES: &str = "+-";
/// Characters that a plain bond stroke is easily mistaken for
pub const LIKE_BONDS: &str = "lL1iIVv";
/// Label of the templates that stand for graphics rather than text
pub const GRAPHICS: char = '!';

/// Every recognizable character, the graphics sentinel included
pub const ALL: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ$%^&#",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "+-",
    "()[]",
    "=!"
);

/// Check whether `c` is confusable with a bond stroke.
pub fn is_like_bond(c: char) -> bool {
    LIKE_BONDS.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_union() {
        let expected = [UPPER, LOWER, DIGITS, CHARGES, BRACKETS, "=!"].concat();
        assert_eq!(ALL, expected);
        assert!(ALL.contains(GRAPHICS));
    }

    #[test]
    fn test_like_bond() {
        assert!(is_like_bond('l'));
        assert!(is_like_bond('I'));
        assert!(!is_like_bond('O'));
    }
}
