use text_canvas::TextCanvas;

/// The bracket styles understood by the bracket nodes and the matrix
/// bracket option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Bracket {
    Round,
    Square,
    Curly,
    Angle,
    Ceil,
    Floor,
    Abs,
}

impl Bracket {
    pub(crate) fn left_ascii(self) -> &'static str {
        match self {
            Bracket::Round => "(",
            Bracket::Square => "[",
            Bracket::Curly => "{",
            Bracket::Angle => "<",
            Bracket::Ceil => "[",
            Bracket::Floor => "|_",
            Bracket::Abs => "|",
        }
    }

    pub(crate) fn right_ascii(self) -> &'static str {
        match self {
            Bracket::Round => ")",
            Bracket::Square => "]",
            Bracket::Curly => "}",
            Bracket::Angle => ">",
            Bracket::Ceil => "]",
            Bracket::Floor => "_|",
            Bracket::Abs => "|",
        }
    }

    pub(crate) fn left_unicode(self) -> &'static str {
        match self {
            Bracket::Round => "(",
            Bracket::Square => "[",
            Bracket::Curly => "{",
            Bracket::Angle => "⟨",
            Bracket::Ceil => "⌈",
            Bracket::Floor => "⌊",
            Bracket::Abs => "│",
        }
    }

    pub(crate) fn right_unicode(self) -> &'static str {
        match self {
            Bracket::Round => ")",
            Bracket::Square => "]",
            Bracket::Curly => "}",
            Bracket::Angle => "⟩",
            Bracket::Ceil => "⌉",
            Bracket::Floor => "⌋",
            Bracket::Abs => "│",
        }
    }

    pub(crate) fn left_latex(self) -> &'static str {
        match self {
            Bracket::Round => "(",
            Bracket::Square => "[",
            Bracket::Curly => "\\{",
            Bracket::Angle => "<",
            Bracket::Ceil => "\\lceil",
            Bracket::Floor => "\\lfloor",
            Bracket::Abs => "\\vert",
        }
    }

    pub(crate) fn right_latex(self) -> &'static str {
        match self {
            Bracket::Round => ")",
            Bracket::Square => "]",
            Bracket::Curly => "\\}",
            Bracket::Angle => ">",
            Bracket::Ceil => "\\rceil",
            Bracket::Floor => "\\rfloor",
            Bracket::Abs => "\\vert",
        }
    }
}

fn blank(n: usize) -> String {
    " ".repeat(n)
}

/// A three-piece vertical shape: top row, bottom row, filler in between.
fn stretched(height: usize, top: &str, middle: &str, bottom: &str) -> TextCanvas {
    let (top, middle, bottom) = (top.to_string(), middle.to_string(), bottom.to_string());
    TextCanvas::from_rows(height, move |i| {
        let piece = if i == 0 {
            &top
        } else if i == height - 1 {
            &bottom
        } else {
            &middle
        };
        piece.clone()
    })
}

fn curly(height: usize, pieces: [&str; 6]) -> TextCanvas {
    let [top, bottom, mid, upper_kink, lower_kink, filler] =
        pieces.map(str::to_string);
    TextCanvas::from_rows(height, move |i| {
        let piece = if i == 0 {
            &top
        } else if i == height - 1 {
            &bottom
        } else if height % 2 == 1 && i == height / 2 {
            &mid
        } else if height % 2 == 0 && i == height / 2 - 1 {
            &upper_kink
        } else if height % 2 == 0 && i == height / 2 {
            &lower_kink
        } else {
            &filler
        };
        piece.clone()
    })
}

fn angle(left: bool, height: usize, left_tip: &str, right_tip: &str) -> TextCanvas {
    let (left_tip, right_tip) = (left_tip.to_string(), right_tip.to_string());
    TextCanvas::from_rows(height, move |i| {
        if height % 2 == 1 && i == height / 2 {
            if left {
                return left_tip.clone();
            }
            return blank(height / 2) + &right_tip;
        }
        if left {
            blank(height / 2 - i.min(height - i - 1)) + if i < height / 2 { "/" } else { "\\" }
        } else {
            blank(i.min(height - i - 1)) + if i < height / 2 { "\\" } else { "/" }
        }
    })
}

/// Multi-row bracket art from the Unicode bracket-piece blocks. Height 1
/// falls back to the plain one-character form.
pub(crate) fn bracket_art_unicode(kind: Bracket, left: bool, height: usize) -> TextCanvas {
    if height <= 1 {
        return TextCanvas::new(if left {
            kind.left_unicode()
        } else {
            kind.right_unicode()
        });
    }
    match (kind, left) {
        (Bracket::Round, true) => stretched(height, "⎛", "⎜", "⎝"),
        (Bracket::Round, false) => stretched(height, "⎞", "⎟", "⎠"),
        (Bracket::Square, true) => stretched(height, "⎡", "⎢", "⎣"),
        (Bracket::Square, false) => stretched(height, "⎤", "⎥", "⎦"),
        (Bracket::Curly, true) => {
            if height == 2 {
                TextCanvas::new("⎰\n⎱")
            } else {
                curly(height, ["⎧", "⎩", "⎨", "⎭", "⎫", "⎪"])
            }
        }
        (Bracket::Curly, false) => {
            if height == 2 {
                TextCanvas::new("⎱\n⎰")
            } else {
                curly(height, ["⎫", "⎭", "⎬", "⎩", "⎧", "⎪"])
            }
        }
        (Bracket::Angle, _) => angle(left, height, "⟨", "⟩"),
        (Bracket::Ceil, true) => stretched(height, "⎡", "⎢", "⎢"),
        (Bracket::Ceil, false) => stretched(height, "⎤", "⎥", "⎥"),
        (Bracket::Floor, true) => {
            TextCanvas::from_rows(height, |i| {
                let piece = if i == height - 1 { "⎣" } else { "⎢" };
                piece.to_string()
            })
        }
        (Bracket::Floor, false) => {
            TextCanvas::from_rows(height, |i| {
                let piece = if i == height - 1 { "⎦" } else { "⎥" };
                piece.to_string()
            })
        }
        (Bracket::Abs, _) => TextCanvas::from_rows(height, |_| "│".to_string()),
    }
}

/// Multi-row ASCII approximations built from `/ | \ _`. The square and ceil
/// shapes need an extra overhang row for the top bar.
pub(crate) fn bracket_art_ascii(kind: Bracket, left: bool, height: usize) -> TextCanvas {
    if height <= 1 && kind != Bracket::Ceil {
        return TextCanvas::new(if left {
            kind.left_ascii()
        } else {
            kind.right_ascii()
        });
    }
    match (kind, left) {
        (Bracket::Round, true) => stretched(height, "/", "|", "\\"),
        (Bracket::Round, false) => stretched(height, "\\", "|", "/"),
        (Bracket::Square, true) => stretched(height + 1, " _", "|", "|_"),
        (Bracket::Square, false) => stretched(height + 1, "_", " |", "_|"),
        (Bracket::Curly, true) => {
            if height == 2 {
                TextCanvas::new("/\n\\")
            } else {
                curly(height, ["/ ", "\\", "<", "/", "\\", "|"])
            }
        }
        (Bracket::Curly, false) => {
            if height == 2 {
                TextCanvas::new("\\\n/")
            } else {
                curly(height, [" \\", " /", " >", " \\", " /", " |"])
            }
        }
        (Bracket::Angle, _) => angle(left, height, "<", ">"),
        (Bracket::Ceil, true) => stretched(height + 1, " _", "|", "|"),
        (Bracket::Ceil, false) => stretched(height + 1, "_", " |", " |"),
        (Bracket::Floor, true) => {
            TextCanvas::from_rows(height, |i| {
                let piece = if i == height - 1 { "|_" } else { "|" };
                piece.to_string()
            })
        }
        (Bracket::Floor, false) => {
            TextCanvas::from_rows(height, |i| {
                let piece = if i == height - 1 { "_|" } else { " |" };
                piece.to_string()
            })
        }
        (Bracket::Abs, _) => TextCanvas::from_rows(height, |_| "|".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_brackets_use_plain_symbols() {
        assert_eq!(bracket_art_unicode(Bracket::Round, true, 1).to_string(), "(");
        assert_eq!(bracket_art_ascii(Bracket::Floor, false, 1).to_string(), "_|");
    }

    #[test]
    fn round_ascii_bracket_shape() {
        let art = bracket_art_ascii(Bracket::Round, true, 3);
        assert_eq!(art.to_string(), "/\n|\n\\");
    }

    #[test]
    fn square_ascii_bracket_has_overhang_row() {
        let art = bracket_art_ascii(Bracket::Square, true, 2);
        assert_eq!(art.height(), 3);
        assert_eq!(art.to_string(), " _\n| \n|_");
    }

    #[test]
    fn curly_unicode_bracket_marks_the_middle() {
        let art = bracket_art_unicode(Bracket::Curly, true, 5);
        assert_eq!(art.to_string(), "⎧\n⎪\n⎨\n⎪\n⎩");
    }

    #[test]
    fn even_height_curly_bracket_uses_kink_pieces() {
        let art = bracket_art_unicode(Bracket::Curly, true, 4);
        assert_eq!(art.to_string(), "⎧\n⎭\n⎫\n⎩");
    }

    #[test]
    fn angle_bracket_diagonals_meet_at_the_tip() {
        let art = bracket_art_ascii(Bracket::Angle, true, 3);
        assert_eq!(art.to_string(), " /\n< \n \\");
    }
}
