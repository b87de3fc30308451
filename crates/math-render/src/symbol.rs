//! The predefined symbol catalog: every special glyph carries one form per
//! output surface, so a renderer only ever picks a form (with the ASCII art
//! as fallback when the Unicode form is not representable).

use crate::expr::Expr;

/// Per-surface forms of a special symbol: inline text, ASCII art, Unicode
/// art, LaTeX source and MathML text. Art forms may override the default
/// center row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolForms {
    pub(crate) inline: String,
    pub(crate) ascii: String,
    pub(crate) ascii_center: Option<usize>,
    pub(crate) unicode: String,
    pub(crate) unicode_center: Option<usize>,
    pub(crate) latex: String,
    pub(crate) mathml: String,
    /// Whether the MathML form is an operator (`<mo>`) or an identifier
    /// (`<mi>`).
    pub(crate) operator: bool,
}

impl SymbolForms {
    pub(crate) fn new(
        operator: bool,
        inline: &str,
        ascii: &str,
        unicode: &str,
        latex: &str,
        mathml: &str,
    ) -> SymbolForms {
        SymbolForms {
            inline: inline.to_string(),
            ascii: ascii.to_string(),
            ascii_center: None,
            unicode: unicode.to_string(),
            unicode_center: None,
            latex: latex.to_string(),
            mathml: mathml.to_string(),
            operator,
        }
    }

    fn centered(mut self, ascii_center: usize, unicode_center: usize) -> SymbolForms {
        self.ascii_center = Some(ascii_center);
        self.unicode_center = Some(unicode_center);
        self
    }

    pub(crate) fn ascii_canvas(&self) -> text_canvas::TextCanvas {
        let canvas = text_canvas::TextCanvas::new(&self.ascii);
        match self.ascii_center {
            Some(center) => canvas.set_center(center),
            None => canvas,
        }
    }

    pub(crate) fn unicode_canvas(&self) -> text_canvas::TextCanvas {
        let canvas = text_canvas::TextCanvas::new(&self.unicode);
        match self.unicode_center {
            Some(center) => canvas.set_center(center),
            None => canvas,
        }
    }
}

fn named(inline: &str, ascii: &str, unicode: &str, latex: &str) -> Expr {
    Expr::Glyph(Box::new(SymbolForms::new(
        false, inline, ascii, unicode, latex, unicode,
    )))
}

fn op(inline: &str, ascii: &str, unicode: &str, latex: &str) -> Expr {
    Expr::Glyph(Box::new(SymbolForms::new(
        true, inline, ascii, unicode, latex, unicode,
    )))
}

fn op_mathml(inline: &str, ascii: &str, unicode: &str, latex: &str, mathml: &str) -> Expr {
    Expr::Glyph(Box::new(SymbolForms::new(
        true, inline, ascii, unicode, latex, mathml,
    )))
}

fn plain_op(s: &str) -> Expr {
    Expr::Literal {
        operator: true,
        value: s.to_string(),
    }
}

pub fn pi() -> Expr {
    named("π", "pi", "π", "\\pi")
}

pub fn cap_pi() -> Expr {
    named("Π", "Pi", "Π", "\\Pi")
}

pub fn naturals() -> Expr {
    named("ℕ", "N", "ℕ", "\\mathbb{N}")
}

pub fn integers() -> Expr {
    named("ℤ", "Z", "ℤ", "\\mathbb{Z}")
}

pub fn rationals() -> Expr {
    named("ℚ", "Q", "ℚ", "\\mathbb{Q}")
}

pub fn reals() -> Expr {
    named("ℝ", "R", "ℝ", "\\mathbb{R}")
}

pub fn complexes() -> Expr {
    named("ℂ", "C", "ℂ", "\\mathbb{C}")
}

pub fn infinity() -> Expr {
    named("∞", "oo", "∞", "\\infty")
}

pub fn sum_sym() -> Expr {
    Expr::Glyph(Box::new(SymbolForms::new(
        false,
        "Σ",
        "__\n\\\n/_",
        "__\n╲\n╱_",
        "\\sum",
        "∑",
    )))
}

pub fn prod_sym() -> Expr {
    Expr::Glyph(Box::new(SymbolForms::new(
        false,
        "Π",
        "___\n| |\n| |",
        "___\n│ │\n│ │",
        "\\prod",
        "∏",
    )))
}

pub fn lim_sym() -> Expr {
    named("lim", "lim", "lim", "\\lim")
}

pub fn plus_sign() -> Expr {
    plain_op("+")
}

pub fn minus_sign() -> Expr {
    op_mathml("-", "-", "-", "-", "−")
}

pub fn times_sign() -> Expr {
    op("·", "*", "·", "\\cdot")
}

pub fn divide_sign() -> Expr {
    plain_op("/")
}

pub fn cross_sign() -> Expr {
    op("⨯", "x", "⨯", "\\times")
}

pub fn modulo_sign() -> Expr {
    op(" mod ", " mod ", " mod ", "\\mod")
}

pub fn eq_sign() -> Expr {
    plain_op("=")
}

pub fn neq_sign() -> Expr {
    op("!=", "!=", "≠", "\\neq")
}

pub fn approx_sign() -> Expr {
    op("≈", "~", "≈", "\\approx")
}

pub fn napprox_sign() -> Expr {
    op("≉", "!~", "≉", "\\not\\approx")
}

pub fn less_sign() -> Expr {
    plain_op("<")
}

pub fn nless_sign() -> Expr {
    op("≮", "!<", "≮", "\\not<")
}

pub fn greater_sign() -> Expr {
    plain_op(">")
}

pub fn ngreater_sign() -> Expr {
    op("≯", "!>", "≯", "\\not>")
}

pub fn leq_sign() -> Expr {
    op("<=", "<=", "⩽", "\\leq")
}

pub fn nleq_sign() -> Expr {
    op("≰", "!<=", "≰", "\\not\\leq")
}

pub fn geq_sign() -> Expr {
    op(">=", ">=", "⩾", "\\geq")
}

pub fn ngeq_sign() -> Expr {
    op("≱", "!>=", "≱", "\\not\\geq")
}

pub fn define_sign() -> Expr {
    op_mathml(" := ", " := ", " ≔ ", " := ", "≔")
}

pub fn define_rev_sign() -> Expr {
    op_mathml(" =: ", " =: ", " ≕ ", " =: ", "≕")
}

pub fn elem_sign() -> Expr {
    Expr::Glyph(Box::new(
        SymbolForms::new(true, " ∈ ", "  __ \n /__ \n \\__ ", " ∈ ", "\\in", "∈").centered(1, 0),
    ))
}

pub fn nelem_sign() -> Expr {
    Expr::Glyph(Box::new(
        SymbolForms::new(
            true,
            " ∉ ",
            "  __/\n /_/ \n \\/_ \n /",
            " ∉ ",
            "\\not\\in",
            "∉",
        )
        .centered(1, 0),
    ))
}

pub fn contains_sign() -> Expr {
    Expr::Glyph(Box::new(
        SymbolForms::new(
            true,
            " ∋ ",
            " __/\n _/\\ \n /_/\n/",
            " ∋ ",
            "\\ni",
            "∋",
        )
        .centered(1, 0),
    ))
}

pub fn ncontains_sign() -> Expr {
    Expr::Glyph(Box::new(
        SymbolForms::new(
            true,
            " ∌ ",
            "  __/\n /_/ \n \\/_ \n /",
            " ∌ ",
            "\\not\\ni",
            "∌",
        )
        .centered(1, 0),
    ))
}

pub fn and_sign() -> Expr {
    op("∧", "&", "∧", "\\land")
}

pub fn or_sign() -> Expr {
    op("∨", " || ", "∨", "\\lor")
}

pub fn negate_sign() -> Expr {
    plain_op("-")
}

pub fn not_sign() -> Expr {
    op("¬", "!", "¬", "\\lnot")
}

pub fn factorial_sign() -> Expr {
    plain_op("!")
}

pub fn percent_sign() -> Expr {
    op("%", "%", "%", "\\%")
}

pub fn degree_sign() -> Expr {
    op("°", "°", "°", "^\\circ")
}

/// An arrow symbol. `right` picks the direction (`None` for both
/// directions), `double_line` picks `⇒` over `→`.
pub fn arrow(right: Option<bool>, double_line: bool) -> Expr {
    match (right, double_line) {
        (None, false) => op("<->", "<->", "↔", "\\leftrightarrow"),
        (None, true) => op("<=>", "<=>", "⇔", "\\Leftrightarrow"),
        (Some(true), false) => op("->", "->", "→", "\\rightarrow"),
        (Some(true), true) => op("=>", "=>", "⇒", "\\Rightarrow"),
        (Some(false), false) => op("<-", "<-", "←", "\\leftarrow"),
        (Some(false), true) => op("<==", "<==", "⇐", "\\Leftarrow"),
    }
}
