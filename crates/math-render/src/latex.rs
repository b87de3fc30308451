//! The LaTeX render surface. Layout decisions live in the tree and the
//! shared precedence contract; this module is string glue over the same
//! recursive render calls.

use crate::bracket::Bracket;
use crate::expr::{self, Expr};
use crate::options::{RenderOptions, SpaceMode};
use crate::precedence;

/// Renders `inner` between a stretched `\left`/`\right` pair. Shared
/// between the bracket nodes and the auto-parenthesis rule.
pub(crate) fn brackets(kind: Bracket, inner: &Expr, o: &RenderOptions) -> String {
    format!(
        "\\left{}{}\\right{}",
        kind.left_latex(),
        inner.render_latex(&o.outside(precedence::MIN)),
        kind.right_latex()
    )
}

fn is_empty_literal(e: &Expr) -> bool {
    matches!(e, Expr::NumberLiteral(v) | Expr::Literal { value: v, .. } if v.is_empty())
}

fn grid_body(rows: &[Vec<Expr>], o: &RenderOptions) -> String {
    let o2 = o.outside(precedence::MIN);
    let mut out = String::new();
    for (i, grid_row) in rows.iter().enumerate() {
        if i != 0 {
            out.push_str("\\\\");
        }
        for (j, cell) in grid_row.iter().enumerate() {
            if j != 0 {
                out.push('&');
            }
            out.push_str(&cell.render_latex(&o2));
        }
    }
    out
}

pub(crate) fn render(e: &Expr, o: &RenderOptions) -> String {
    match e {
        Expr::Literal { value, .. } | Expr::NumberLiteral(value) => value.clone(),
        Expr::Text(text) => format!("\\text{{{text}}}"),
        Expr::Rational { value, precise } => {
            crate::number::format_rational(value, *precise, o).render_latex(o)
        }
        Expr::Glyph(forms) => forms.latex.clone(),
        Expr::Infix {
            symbol,
            lhs,
            rhs,
            precedence: prec,
            associative,
        } => {
            let a = lhs.render_latex(&o.outside(*prec));
            let b = rhs.render_latex(&o.outside(if *associative {
                *prec
            } else {
                prec.saturating_add(1)
            }));
            format!(
                "{a} {} {b}",
                symbol.render_latex(&o.outside(precedence::MIN))
            )
        }
        Expr::Prefix {
            symbol,
            value,
            precedence: prec,
        } => format!(
            "{}{{{}}}",
            symbol.render_latex(&o.outside(precedence::MIN)),
            value.render_latex(&o.outside(prec.saturating_add(1)))
        ),
        Expr::Negate(value) => format!(
            "-{{{}}}",
            value.render_latex(&o.outside(precedence::NEGATE + 1))
        ),
        Expr::Postfix {
            symbol,
            value,
            precedence: prec,
        } => format!(
            "{}{}",
            value.render_latex(&o.outside(*prec)),
            symbol.render_latex(&o.outside(precedence::MIN))
        ),
        Expr::Fraction { num, denom } => {
            let o2 = o.outside(precedence::MIN);
            format!(
                "\\frac{{{}}}{{{}}}",
                num.render_latex(&o2),
                denom.render_latex(&o2)
            )
        }
        Expr::Root { degree, radicand } => {
            let o2 = o.outside(precedence::MIN);
            if is_empty_literal(degree) {
                format!("\\sqrt{{{}}}", radicand.render_latex(&o2))
            } else {
                format!(
                    "\\sqrt[{}]{{{}}}",
                    degree.render_latex(&o2),
                    radicand.render_latex(&o2)
                )
            }
        }
        Expr::Superscript { base, script } => format!(
            "{{{}}}^{{{}}}",
            base.render_latex(&o.outside(precedence::SUPERSCRIPT + 1)),
            script.render_latex(&o.outside(precedence::MIN))
        ),
        Expr::Subscript { base, script } => format!(
            "{{{}}}_{{{}}}",
            base.render_latex(&o.outside(precedence::MAX)),
            script.render_latex(&o.outside(precedence::MIN))
        ),
        Expr::SuperSubscript { base, sup, sub } => format!(
            "{{{}}}^{{{}}}_{{{}}}",
            base.render_latex(&o.outside(precedence::MAX)),
            sup.render_latex(&o.outside(precedence::MIN)),
            sub.render_latex(&o.outside(precedence::MIN))
        ),
        Expr::BigSymbol {
            symbol,
            sub,
            sup,
            body,
        } => {
            let o2 = o.outside(precedence::ITERATION);
            let mut out = symbol.render_latex(&o2);
            if let Some(sub) = sub {
                out += &format!("_{{{}}}", sub.render_latex(&o.outside(precedence::MIN)));
            }
            if let Some(sup) = sup {
                out += &format!("^{{{}}}", sup.render_latex(&o.outside(precedence::MIN)));
            }
            format!("{out}{{{}}}", body.render_latex(&o2))
        }
        Expr::Integral { lower, upper, body } => {
            let o2 = o.outside(precedence::ITERATION);
            let mut out = "\\int".to_string();
            if let Some(lower) = lower {
                out += &format!("_{{{}}}", lower.render_latex(&o.outside(precedence::MIN)));
            }
            if let Some(upper) = upper {
                out += &format!("^{{{}}}", upper.render_latex(&o.outside(precedence::MIN)));
            }
            format!("{out}{{{}}}", body.render_latex(&o2))
        }
        Expr::Grid(rows) => {
            format!("\\begin{{matrix}}{}\\end{{matrix}}", grid_body(rows, o))
        }
        Expr::AugmentedGrid { left, right } => {
            let o2 = o.outside(precedence::MID);
            let mut out = "\\begin{matrix}".to_string();
            for (i, (left_row, right_row)) in left.iter().zip(right).enumerate() {
                if i != 0 {
                    out.push_str("\\\\");
                }
                for cell in left_row {
                    out.push_str(&cell.render_latex(&o2));
                    out.push('&');
                }
                out.push_str("\\bigm|");
                for cell in right_row {
                    out.push('&');
                    out.push_str(&cell.render_latex(&o2));
                }
            }
            out.push_str("\\end{matrix}");
            out
        }
        Expr::Brackets { kind, inner } => brackets(*kind, inner, o),
        Expr::BracketLiteral { kind, left, inner } => {
            let inner_str = inner.render_latex(&o.outside(precedence::MIN));
            if *left {
                format!("\\left{}{inner_str}\\right.", kind.left_latex())
            } else {
                format!("\\left.{inner_str}\\right{}", kind.right_latex())
            }
        }
        Expr::MatrixBrackets(inner) => brackets(o.matrix_brackets, inner, o),
        Expr::Middle { lhs, rhs } => {
            let o2 = o.outside(precedence::MID + 1);
            let space = if o.space_mode == SpaceMode::Compact {
                ""
            } else {
                "\\;"
            };
            format!(
                "\\left.{}{space}\\middle|{space}{}\\right.",
                lhs.render_latex(&o2),
                rhs.render_latex(&o2)
            )
        }
        Expr::List {
            delimiter,
            elements,
        } => match elements.as_slice() {
            [] => String::new(),
            [only] => only.render_latex(o),
            elements => {
                let sep = delimiter.render_latex(o);
                let o2 = o.outside(e.precedence().saturating_add(1));
                let mut out = String::new();
                for (i, element) in elements.iter().enumerate() {
                    if i != 0 {
                        out.push_str(&sep);
                    }
                    out.push_str(&element.render_latex(&o2));
                }
                out
            }
        },
        Expr::Concatenation {
            lhs,
            rhs,
            implicit_space,
        } => {
            let o2 = o.outside(e.precedence());
            let sep = if expr::concat_space(lhs, rhs, *implicit_space, o) {
                " \\; "
            } else {
                // Math mode collapses plain spaces, so this is purely a
                // token separator.
                " "
            };
            format!("{}{sep}{}", lhs.render_latex(&o2), rhs.render_latex(&o2))
        }
        Expr::Exp(value) => {
            expr::pow(expr::name("e"), (**value).clone()).render_latex(o)
        }
    }
}
