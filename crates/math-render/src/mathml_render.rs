//! The MathML render surface: builds [`MathMlNode`] markup trees. The
//! shared precedence contract decides parenthesization exactly as on the
//! text surfaces; everything else maps one node kind to one MathML
//! construct.

use crate::bracket::Bracket;
use crate::expr::{self, Expr};
use crate::mathml::{self, MathMlElement, MathMlNode};
use crate::options::RenderOptions;
use crate::{number, precedence};

fn fence(sym: &str) -> MathMlNode {
    MathMlElement::new("mo")
        .attr("fence", "true")
        .attr("stretchy", "true")
        .text(sym)
        .into()
}

/// Renders `inner` between stretchy fence operators. Shared between the
/// bracket nodes and the auto-parenthesis rule.
pub(crate) fn brackets(kind: Bracket, inner: &Expr, o: &RenderOptions) -> MathMlNode {
    mathml::join(vec![
        fence(kind.left_unicode()),
        inner.render_mathml(&o.outside(precedence::MIN)),
        fence(kind.right_unicode()),
    ])
}

fn table(rows: &[Vec<Expr>], o: &RenderOptions) -> MathMlNode {
    let o2 = o.outside(precedence::MIN);
    let mut t = MathMlElement::new("mtable");
    for grid_row in rows {
        let mut tr = MathMlElement::new("mtr");
        for cell in grid_row {
            tr = tr.child(MathMlElement::new("mtd").child(cell.render_mathml(&o2)));
        }
        t = t.child(tr);
    }
    t.into()
}

fn bound_or_empty(bound: Option<&Expr>, o: &RenderOptions) -> MathMlNode {
    match bound {
        Some(bound) => bound.render_mathml(&o.outside(precedence::MIN)),
        None => mathml::empty(),
    }
}

pub(crate) fn render(e: &Expr, o: &RenderOptions) -> MathMlNode {
    match e {
        Expr::Literal { operator, value } => {
            let tag = if *operator { "mo" } else { "mi" };
            MathMlElement::new(tag).text(value.clone()).into()
        }
        Expr::NumberLiteral(value) => MathMlElement::new("mn").text(value.clone()).into(),
        Expr::Text(text) => MathMlElement::new("mtext").text(text.clone()).into(),
        Expr::Rational { value, precise } => {
            number::format_rational(value, *precise, o).render_mathml(o)
        }
        Expr::Glyph(forms) => {
            let tag = if forms.operator { "mo" } else { "mi" };
            MathMlElement::new(tag).text(forms.mathml.clone()).into()
        }
        Expr::Infix {
            symbol,
            lhs,
            rhs,
            precedence: prec,
            associative,
        } => mathml::join(vec![
            lhs.render_mathml(&o.outside(*prec)),
            symbol.render_mathml(&o.outside(precedence::MIN)),
            rhs.render_mathml(&o.outside(if *associative {
                *prec
            } else {
                prec.saturating_add(1)
            })),
        ]),
        Expr::Prefix {
            symbol,
            value,
            precedence: prec,
        } => mathml::join(vec![
            symbol.render_mathml(&o.outside(precedence::MIN)),
            value.render_mathml(&o.outside(prec.saturating_add(1))),
        ]),
        Expr::Negate(value) => mathml::join(vec![
            MathMlElement::new("mo").text("−").into(),
            value.render_mathml(&o.outside(precedence::NEGATE + 1)),
        ]),
        Expr::Postfix {
            symbol,
            value,
            precedence: prec,
        } => mathml::join(vec![
            value.render_mathml(&o.outside(*prec)),
            symbol.render_mathml(&o.outside(precedence::MIN)),
        ]),
        Expr::Fraction { num, denom } => {
            let o2 = o.outside(precedence::MIN);
            MathMlElement::new("mfrac")
                .child(num.render_mathml(&o2))
                .child(denom.render_mathml(&o2))
                .into()
        }
        Expr::Root { degree, radicand } => {
            let o2 = o.outside(precedence::MIN);
            let value = radicand.render_mathml(&o2);
            if matches!(&**degree, Expr::NumberLiteral(v) | Expr::Literal { value: v, .. } if v.is_empty())
            {
                MathMlElement::new("msqrt").child(value).into()
            } else {
                MathMlElement::new("mroot")
                    .child(value)
                    .child(degree.render_mathml(&o2))
                    .into()
            }
        }
        Expr::Superscript { base, script } => MathMlElement::new("msup")
            .child(base.render_mathml(&o.outside(precedence::SUPERSCRIPT + 1)))
            .child(script.render_mathml(&o.outside(precedence::MIN)))
            .into(),
        Expr::Subscript { base, script } => MathMlElement::new("msub")
            .child(base.render_mathml(&o.outside(precedence::MAX)))
            .child(script.render_mathml(&o.outside(precedence::MIN)))
            .into(),
        Expr::SuperSubscript { base, sup, sub } => MathMlElement::new("msubsup")
            .child(base.render_mathml(&o.outside(precedence::MAX)))
            .child(sub.render_mathml(&o.outside(precedence::MIN)))
            .child(sup.render_mathml(&o.outside(precedence::MIN)))
            .into(),
        Expr::BigSymbol {
            symbol,
            sub,
            sup,
            body,
        } => {
            let o2 = o.outside(precedence::ITERATION);
            let under_over = MathMlElement::new("munderover")
                .child(symbol.render_mathml(&o2))
                .child(bound_or_empty(sub.as_deref(), o))
                .child(bound_or_empty(sup.as_deref(), o));
            mathml::join(vec![under_over.into(), body.render_mathml(&o2)])
        }
        Expr::Integral { lower, upper, body } => {
            let under_over = MathMlElement::new("munderover")
                .child(MathMlElement::new("mo").text("∫"))
                .child(bound_or_empty(lower.as_deref(), o))
                .child(bound_or_empty(upper.as_deref(), o));
            mathml::join(vec![
                under_over.into(),
                body.render_mathml(&o.outside(precedence::ITERATION)),
            ])
        }
        Expr::Grid(rows) => table(rows, o),
        Expr::AugmentedGrid { left, right } => mathml::join(vec![
            table(left, o),
            MathMlElement::new("mo")
                .attr("separator", "true")
                .attr("fence", "true")
                .attr("stretchy", "true")
                .text("|")
                .into(),
            table(right, o),
        ]),
        Expr::Brackets { kind, inner } => brackets(*kind, inner, o),
        Expr::BracketLiteral { kind, left, inner } => {
            let inner_node = inner.render_mathml(&o.outside(precedence::MIN));
            if *left {
                mathml::join(vec![fence(kind.left_unicode()), inner_node])
            } else {
                mathml::join(vec![inner_node, fence(kind.right_unicode())])
            }
        }
        Expr::MatrixBrackets(inner) => brackets(o.matrix_brackets, inner, o),
        Expr::Middle { lhs, rhs } => {
            let o2 = o.outside(precedence::MID + 1);
            let bar = MathMlElement::new("mo")
                .attr("separator", "true")
                .attr("fence", "true")
                .attr("stretchy", "true")
                .text("|");
            mathml::join(vec![
                lhs.render_mathml(&o2),
                bar.into(),
                rhs.render_mathml(&o2),
            ])
        }
        Expr::List {
            delimiter,
            elements,
        } => {
            let mut row = MathMlElement::new("mrow");
            match elements.as_slice() {
                [] => row.into(),
                [only] => row.child(only.render_mathml(o)).into(),
                elements => {
                    let sep = delimiter.render_mathml(o);
                    let o2 = o.outside(e.precedence().saturating_add(1));
                    for (i, element) in elements.iter().enumerate() {
                        if i != 0 {
                            row = row.child(sep.clone());
                        }
                        row = row.child(element.render_mathml(&o2));
                    }
                    row.into()
                }
            }
        }
        Expr::Concatenation {
            lhs,
            rhs,
            implicit_space,
        } => {
            let o2 = o.outside(e.precedence());
            let a = lhs.render_mathml(&o2);
            let b = rhs.render_mathml(&o2);
            if expr::concat_space(lhs, rhs, *implicit_space, o) {
                mathml::join(vec![a, MathMlElement::new("mspace").into(), b])
            } else {
                mathml::join(vec![a, b])
            }
        }
        Expr::Exp(value) => {
            expr::pow(expr::name("e"), (**value).clone()).render_mathml(o)
        }
    }
}
