fn is_var_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == 'π' || c == 'Π'
}

/// Whether `s` is a single (optionally negated) number token.
pub(crate) fn one_number(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '-' || c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_digit())
}

/// Whether `s` is a single (optionally negated) identifier token, i.e. a
/// variable character followed by variable characters or digits.
pub(crate) fn one_var(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() {
        return false;
    }
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if is_var_char(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_digit() || is_var_char(c))
}

pub(crate) fn one_num_or_var(s: &str) -> bool {
    one_number(s) || one_var(s)
}

/// Whether every line of `s` starts and ends with a blank, i.e. the text
/// carries its own spacing (like `" mod "`).
pub(crate) fn has_padding(s: &str) -> bool {
    if s.contains('\n') {
        return s.lines().all(has_padding);
    }
    s.chars().count() >= 3 && s.starts_with(' ') && s.ends_with(' ')
}
