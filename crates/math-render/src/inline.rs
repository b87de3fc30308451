//! The single-line render surface: a compact string approximation of the
//! tree, using Unicode script characters and symbols where the active
//! charset allows and plain ASCII spellings otherwise.

use crate::bracket::Bracket;
use crate::expr::{self, Expr};
use crate::options::{RenderOptions, SpaceMode};
use crate::{number, precedence, script, util};

/// Renders `inner` wrapped in the given bracket pair. Shared between the
/// bracket nodes and the auto-parenthesis rule.
pub(crate) fn brackets(kind: Bracket, inner: &Expr, o: &RenderOptions) -> String {
    let inner_str = inner.render_inline(&o.outside(precedence::MIN));
    match kind {
        Bracket::Ceil => format!("ceil({inner_str})"),
        Bracket::Floor => format!("floor({inner_str})"),
        kind => format!("{}{inner_str}{}", kind.left_ascii(), kind.right_ascii()),
    }
}

/// Appends `script_expr` as a superscript: as Unicode superscript
/// characters when possible, as `^`-notation otherwise.
fn sup_suffix(base: String, script_expr: &Expr, o: &RenderOptions) -> String {
    if !script::is_superscript(&base) {
        let rendered = script_expr.render_inline(&o.outside(precedence::MIN));
        if let Some(sup) = script::to_superscript(&rendered) {
            if o.charset.can_display(&sup) {
                return base + &sup;
            }
        }
    }
    format!(
        "{base}^{}",
        script_expr.render_inline(&o.outside(precedence::MAX))
    )
}

fn sub_suffix(base: String, script_expr: &Expr, o: &RenderOptions) -> String {
    if !script::is_subscript(&base) {
        let rendered = script_expr.render_inline(&o.outside(precedence::MIN));
        if let Some(sub) = script::to_subscript(&rendered) {
            if o.charset.can_display(&sub) {
                return base + &sub;
            }
        }
    }
    format!(
        "{base}_{}",
        script_expr.render_inline(&o.outside(precedence::MAX))
    )
}

fn root(degree: &Expr, radicand: &Expr, o: &RenderOptions) -> String {
    let deg = degree.render_inline(&o.outside(precedence::MIN));
    if deg.is_empty() || deg == "2" {
        if o.charset.can_display("√") {
            return format!(
                "√{}",
                radicand.render_inline(&o.outside(precedence::MAX))
            );
        }
        if matches!(
            radicand,
            Expr::Brackets {
                kind: Bracket::Round,
                ..
            }
        ) {
            return format!("sqrt{}", radicand.render_inline(o));
        }
        return format!(
            "sqrt({})",
            radicand.render_inline(&o.outside(precedence::MIN))
        );
    }
    if let Some(sup_deg) = script::to_superscript(&deg) {
        if o.charset.can_display(&format!("√{sup_deg}")) {
            return format!(
                "{sup_deg}√{}",
                radicand.render_inline(&o.outside(precedence::MAX))
            );
        }
    }
    let o2 = o.outside(precedence::COMMA.saturating_add(1));
    format!(
        "root({}, {})",
        degree.render_inline(&o2),
        radicand.render_inline(&o2)
    )
}

fn grid(rows: &[Vec<Expr>], o: &RenderOptions) -> String {
    let o2 = o.outside(precedence::MIN);
    let comma = if o.space_mode == SpaceMode::Compact {
        ","
    } else {
        ", "
    };
    let mut out = String::new();
    for (i, grid_row) in rows.iter().enumerate() {
        if i != 0 {
            out.push_str(comma);
        }
        for (j, cell) in grid_row.iter().enumerate() {
            if j != 0 {
                out.push_str("  ");
            }
            out.push_str(&cell.render_inline(&o2));
        }
    }
    out
}

fn aug_grid(left: &[Vec<Expr>], right: &[Vec<Expr>], o: &RenderOptions) -> String {
    let o2 = o.outside(precedence::MID);
    let compact = o.space_mode == SpaceMode::Compact;
    let comma = if compact { "," } else { ", " };
    let bar = if compact { "|" } else { " | " };
    let space = if compact { " " } else { "  " };
    let mut out = String::new();
    for (i, (left_row, right_row)) in left.iter().zip(right).enumerate() {
        if i != 0 {
            out.push_str(comma);
        }
        for (j, cell) in left_row.iter().enumerate() {
            if j != 0 {
                out.push_str(space);
            }
            out.push_str(&cell.render_inline(&o2));
        }
        out.push_str(bar);
        for (j, cell) in right_row.iter().enumerate() {
            if j != 0 {
                out.push_str(space);
            }
            out.push_str(&cell.render_inline(&o2));
        }
    }
    out
}

fn list(delimiter: &Expr, elements: &[Expr], whole: &Expr, o: &RenderOptions) -> String {
    match elements {
        [] => String::new(),
        [only] => only.render_inline(o),
        elements => {
            let sep = delimiter.render_inline(o);
            let o2 = o.outside(whole.precedence().saturating_add(1));
            let mut out = String::new();
            for (i, element) in elements.iter().enumerate() {
                if i != 0 {
                    out.push_str(&sep);
                }
                out.push_str(&element.render_inline(&o2));
            }
            out
        }
    }
}

pub(crate) fn render(e: &Expr, o: &RenderOptions) -> String {
    match e {
        Expr::Literal { value, .. } | Expr::NumberLiteral(value) | Expr::Text(value) => {
            value.replace('\n', " ")
        }
        Expr::Rational { value, precise } => {
            number::format_rational(value, *precise, o).render_inline(o)
        }
        Expr::Glyph(forms) => forms.inline.clone(),
        Expr::Infix {
            symbol,
            lhs,
            rhs,
            precedence: prec,
            associative,
        } => {
            let a = lhs.render_inline(&o.outside(*prec));
            let b = rhs.render_inline(&o.outside(if *associative {
                *prec
            } else {
                prec.saturating_add(1)
            }));
            let sym = symbol.render_inline(&o.outside(precedence::MIN));
            let pad = if o.space_mode == SpaceMode::Force && !util::has_padding(&sym) {
                " "
            } else {
                ""
            };
            format!("{a}{pad}{sym}{pad}{b}")
        }
        Expr::Prefix {
            symbol,
            value,
            precedence: prec,
        } => format!(
            "{}{}",
            symbol.render_inline(&o.outside(precedence::MIN)),
            value.render_inline(&o.outside(prec.saturating_add(1)))
        ),
        Expr::Negate(value) => format!(
            "-{}",
            value.render_inline(&o.outside(precedence::NEGATE + 1))
        ),
        Expr::Postfix {
            symbol,
            value,
            precedence: prec,
        } => format!(
            "{}{}",
            value.render_inline(&o.outside(*prec)),
            symbol.render_inline(&o.outside(precedence::MIN))
        ),
        Expr::Fraction { num, denom } => format!(
            "{}/{}",
            num.render_inline(&o.outside(precedence::DIVIDE)),
            denom.render_inline(&o.outside(precedence::DIVIDE + 1))
        ),
        Expr::Root { degree, radicand } => root(degree, radicand, o),
        Expr::Superscript { base, script } => {
            let a = base.render_inline(&o.outside(precedence::SUPERSCRIPT + 1));
            sup_suffix(a, script, o)
        }
        Expr::Subscript { base, script } => {
            let a = base.render_inline(&o.outside(precedence::MAX));
            sub_suffix(a, script, o)
        }
        Expr::SuperSubscript { base, sup, sub } => {
            let a = base.render_inline(&o.outside(precedence::MAX));
            sup_suffix(sub_suffix(a, sub, o), sup, o)
        }
        Expr::BigSymbol {
            symbol,
            sub,
            sup,
            body,
        } => {
            let o2 = o.outside(precedence::ITERATION);
            let mut header = symbol.render_inline(&o2);
            if let Some(sub) = sub {
                header = sub_suffix(header, sub, o);
            }
            if let Some(sup) = sup {
                header = sup_suffix(header, sup, o);
            }
            header + &body.render_inline(&o2)
        }
        Expr::Integral { lower, upper, body } => {
            let o2 = o.outside(precedence::ITERATION);
            let mut header = "∫".to_string();
            if let Some(lower) = lower {
                header = sub_suffix(header, lower, o);
            }
            if let Some(upper) = upper {
                header = sup_suffix(header, upper, o);
            }
            header + &body.render_inline(&o2)
        }
        Expr::Grid(rows) => grid(rows, o),
        Expr::AugmentedGrid { left, right } => aug_grid(left, right, o),
        Expr::Brackets { kind, inner } => brackets(*kind, inner, o),
        Expr::BracketLiteral { kind, left, inner } => {
            let inner_str = inner.render_inline(&o.outside(precedence::MIN));
            if *left {
                format!("{}{inner_str}", kind.left_ascii())
            } else {
                format!("{inner_str}{}", kind.right_ascii())
            }
        }
        Expr::MatrixBrackets(inner) => brackets(o.matrix_brackets, inner, o),
        Expr::Middle { lhs, rhs } => {
            let o2 = o.outside(precedence::MID + 1);
            let space = if o.space_mode == SpaceMode::Compact {
                ""
            } else {
                " "
            };
            format!(
                "{}{space}|{space}{}",
                lhs.render_inline(&o2),
                rhs.render_inline(&o2)
            )
        }
        Expr::List {
            delimiter,
            elements,
        } => list(delimiter, elements, e, o),
        Expr::Concatenation {
            lhs,
            rhs,
            implicit_space,
        } => {
            let o2 = o.outside(e.precedence());
            let space = if expr::concat_space(lhs, rhs, *implicit_space, o) {
                " "
            } else {
                ""
            };
            format!(
                "{}{space}{}",
                lhs.render_inline(&o2),
                rhs.render_inline(&o2)
            )
        }
        Expr::Exp(value) => expr::call("exp", vec![(**value).clone()]).render_inline(o),
    }
}
