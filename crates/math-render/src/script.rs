//! Unicode super- and subscript substitution for single-row scripts.
//! Only digits, signs and parentheses have dedicated script code points; a
//! script containing anything else keeps its drawn 2D form.

use phf::phf_map;

static SUPERSCRIPT: phf::Map<char, char> = phf_map! {
    '0' => '⁰',
    '1' => '¹',
    '2' => '²',
    '3' => '³',
    '4' => '⁴',
    '5' => '⁵',
    '6' => '⁶',
    '7' => '⁷',
    '8' => '⁸',
    '9' => '⁹',
    '+' => '⁺',
    '-' => '⁻',
    '=' => '⁼',
    '(' => '⁽',
    ')' => '⁾',
};

static SUBSCRIPT: phf::Map<char, char> = phf_map! {
    '0' => '₀',
    '1' => '₁',
    '2' => '₂',
    '3' => '₃',
    '4' => '₄',
    '5' => '₅',
    '6' => '₆',
    '7' => '₇',
    '8' => '₈',
    '9' => '₉',
    '+' => '₊',
    '-' => '₋',
    '=' => '₌',
    '(' => '₍',
    ')' => '₎',
};

fn convert(map: &phf::Map<char, char>, s: &str) -> Option<String> {
    s.chars().map(|c| map.get(&c).copied()).collect()
}

fn ends_in(map: &phf::Map<char, char>, s: &str) -> bool {
    s.chars()
        .next_back()
        .is_some_and(|last| map.values().any(|&v| v == last))
}

/// Converts `s` to superscript code points, or `None` if any character has
/// no superscript form.
pub(crate) fn to_superscript(s: &str) -> Option<String> {
    convert(&SUPERSCRIPT, s)
}

/// Whether `s` already ends in a superscript code point, meaning another
/// superscript appended to it would visually merge with it.
pub(crate) fn is_superscript(s: &str) -> bool {
    ends_in(&SUPERSCRIPT, s)
}

pub(crate) fn to_subscript(s: &str) -> Option<String> {
    convert(&SUBSCRIPT, s)
}

pub(crate) fn is_subscript(s: &str) -> bool {
    ends_in(&SUBSCRIPT, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_convert() {
        assert_eq!(to_superscript("-12").as_deref(), Some("⁻¹²"));
        assert_eq!(to_subscript("(0)").as_deref(), Some("₍₀₎"));
    }

    #[test]
    fn letters_do_not_convert() {
        assert_eq!(to_superscript("n"), None);
        assert_eq!(to_subscript("2x"), None);
    }

    #[test]
    fn script_detection_looks_at_the_last_char() {
        assert!(is_superscript("x²"));
        assert!(!is_superscript("x"));
        assert!(is_subscript("a₁"));
        assert!(!is_subscript(""));
    }
}
