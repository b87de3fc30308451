//! Renders symbolic math expression trees into five output surfaces:
//!
//! - a single-line text approximation ([`Expr::render_inline`]),
//! - multi-line typeset art on a text canvas ([`Expr::render_art`]),
//! - LaTeX source ([`Expr::render_latex`]),
//! - MathML markup nodes ([`Expr::render_mathml`], or
//!   [`Expr::render_mathml_doc`] for a complete `<math>` element),
//! - a plain-text debug form (the `Debug` impl).
//!
//! Trees are assembled with the builder functions of this crate — there is
//! no parser. Every node is immutable, owns its children, and carries a
//! precedence used for exactly one thing: inserting parentheses where the
//! tree's meaning requires them. Rendering is configured through the
//! immutable [`RenderOptions`] bundle, which also selects the output
//! character repertoire; glyphs the charset cannot display degrade to ASCII
//! approximations instead of failing.
//!
//! ```
//! use math_render::{RenderOptions, frac, name, num, plus};
//!
//! let e = frac(plus(name("a"), num(2)), name("b"));
//! let options = RenderOptions::default();
//! assert_eq!(e.render_inline(&options), "(a+2)/b");
//! assert_eq!(e.render_latex(&options), "\\frac{a + 2}{b}");
//! assert_eq!(e.render_art(&options).to_string(), "a+2\n---\n b ");
//! ```
//!
//! Exact numbers are kept as arbitrary-precision rationals and formatted by
//! the number formatter: as fractions, exact decimals, rounded decimals or
//! scientific notation, depending on the decimal mode and precision in the
//! options.

mod art;
mod bracket;
mod charset;
mod error;
mod expr;
mod inline;
mod latex;
mod mathml;
mod mathml_render;
mod number;
mod options;
pub mod precedence;
mod script;
pub mod symbol;
mod util;

pub use bracket::Bracket;
pub use charset::CharSet;
pub use error::ExprError;
pub use expr::*;
pub use mathml::{MathDisplay, MathMlElement, MathMlNode};
pub use options::{DecimalMode, RenderOptions, SpaceMode};
pub use symbol::SymbolForms;
pub use text_canvas::TextCanvas;
