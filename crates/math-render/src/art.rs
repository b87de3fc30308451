//! The 2D typeset render surface. Each node lays out its children on
//! [`TextCanvas`] blocks and composes them with the canvas algebra; glyphs
//! that the active charset cannot display degrade to ASCII approximations.

use text_canvas::TextCanvas;

use crate::bracket::{self, Bracket};
use crate::expr::{self, Expr};
use crate::options::{RenderOptions, SpaceMode};
use crate::{number, precedence, script, util};

/// Renders `inner` between a stretched bracket pair. Shared between the
/// bracket nodes and the auto-parenthesis rule.
pub(crate) fn brackets(kind: Bracket, inner: &Expr, o: &RenderOptions) -> TextCanvas {
    let inner_art = inner.render_art(&o.outside(precedence::MIN));
    let mut left = bracket::bracket_art_unicode(kind, true, inner_art.height());
    let right;
    if !o.charset.can_display_canvas(&left) {
        left = bracket::bracket_art_ascii(kind, true, inner_art.height());
        right = bracket::bracket_art_ascii(kind, false, inner_art.height());
    } else {
        let preferred = bracket::bracket_art_unicode(kind, false, inner_art.height());
        right = if o.charset.can_display_canvas(&preferred) {
            preferred
        } else {
            bracket::bracket_art_ascii(kind, false, inner_art.height())
        };
    }
    left.append_bottom(&inner_art, false).append_bottom(&right, true)
}

fn infix(
    symbol: &Expr,
    lhs: &Expr,
    rhs: &Expr,
    prec: i32,
    associative: bool,
    o: &RenderOptions,
) -> TextCanvas {
    let a = lhs.render_art(&o.outside(prec));
    let b = rhs.render_art(&o.outside(if associative {
        prec
    } else {
        prec.saturating_add(1)
    }));
    let sym = symbol.render_art(&o.outside(precedence::MIN));
    let padded = sym.height() == 1 && util::has_padding(&sym.to_string());
    let spaces = match o.space_mode {
        SpaceMode::Force => !padded,
        SpaceMode::Compact => false,
        SpaceMode::Auto => (a.height() > 2 || b.height() > 2) && !padded,
    };
    let space = TextCanvas::new(" ");
    let mut art = a;
    if spaces {
        art = art.append_top(&space, true);
    }
    art = art.append_center(&sym);
    if spaces {
        art = art.append_top(&space, true);
    }
    art.append_center(&b)
}

fn fraction(num: &Expr, denom: &Expr, o: &RenderOptions) -> TextCanvas {
    let o2 = o.outside(precedence::MIN);
    let a = num.render_art(&o2);
    let b = denom.render_art(&o2);

    let small = a.height() == 1
        && b.height() == 1
        && a.width() < o.small_fraction_limit
        && b.width() < o.small_fraction_limit
        && util::one_num_or_var(&a.to_string())
        && util::one_num_or_var(&b.to_string());
    if small && o.space_mode != SpaceMode::Compact {
        return a.append_center(&TextCanvas::new("/")).append_center(&b);
    }

    let pad = if a.height() + b.height() > 2 { 2 } else { 0 };
    let bar = TextCanvas::new(&"-".repeat(a.width().max(b.width()) + pad));
    let a_pos = (bar.width() - a.width() + 1) / 2;
    let b_pos = (bar.width() - b.width() + 1) / 2;
    bar.draw(&b, b_pos as i64, 1, true)
        .draw(&a, a_pos as i64, -(a.height() as i64), true)
}

fn bar_height(shape_height: usize) -> usize {
    ((shape_height + 1) / 3).max(1)
}

/// The diagonal radical stroke, sized to the radicand's height.
fn root_shape(height: usize, left_diag: &str, right_diag: &str) -> TextCanvas {
    if height <= 1 {
        return TextCanvas::new(&format!("\\{right_diag}"));
    }
    let bar_h = bar_height(height);
    let min_bar_row = height - bar_h;
    let left_diag = left_diag.to_string();
    let right_diag = right_diag.to_string();
    TextCanvas::from_rows(height, move |i| {
        if i < min_bar_row {
            format!("{}{right_diag}", " ".repeat(bar_h + height - i - 1))
        } else {
            format!(
                "{}{left_diag}{}{right_diag}",
                " ".repeat(i - min_bar_row),
                " ".repeat(2 * (height - i - 1))
            )
        }
    })
}

fn root(degree: &Expr, radicand: &Expr, o: &RenderOptions) -> TextCanvas {
    let left_diag = o.charset.or_fallback("╲", "\\");
    let right_diag = o.charset.or_fallback("╱", "/");
    let vert = o.charset.or_fallback("│", "|");

    let o2 = o.outside(precedence::MIN);
    let degree_art = degree.render_art(&o2);
    let value = radicand.render_art(&o2);

    let shape = root_shape(value.height(), left_diag, right_diag);
    let mut art = shape.append_top(&value, true);
    if shape.height() >= 3 {
        let tick = TextCanvas::from_rows(shape.height() / 3, |_| vert.to_string());
        art = art.append_top(&tick, true);
    }
    let overline = TextCanvas::new(&"_".repeat(value.width()));
    art = art.draw(&overline, shape.width() as i64, -1, true);

    if value.width() == 0 {
        return art;
    }
    let bar_h = bar_height(shape.height()) as i64;
    let x = (2 * bar_h - 1 - degree_art.width() as i64).min(0);
    let y = art.height() as i64 - bar_h - degree_art.height() as i64;
    art.draw(&degree_art, x, y, true)
}

/// Draws `b` as a floating superscript right of `a`. `a_size` overrides the
/// anchor box when `a` already carries scripts of its own, so chained
/// scripts step outward instead of colliding.
fn sup_draw(a: &TextCanvas, b: &TextCanvas, a_is_script: bool, a_size: Option<(usize, usize)>) -> TextCanvas {
    let (aw, ah) = a_size.unwrap_or((a.width(), a.height()));
    let clamp = if a_is_script {
        -1
    } else {
        ah as i64 - b.height() as i64 - 1
    };
    let y = (-((b.height() / 2) as i64)).min(clamp);
    a.draw(b, aw as i64, y, true)
}

/// Draws `b` as a hanging subscript right of `a`; see [`sup_draw`].
fn sub_draw(a: &TextCanvas, b: &TextCanvas, a_is_script: bool, a_size: Option<(usize, usize)>) -> TextCanvas {
    let (_, ah) = a_size.unwrap_or((a.width(), a.height()));
    let clamp = if a_is_script {
        ah as i64 - b.height() as i64 + 1
    } else {
        a.height() as i64 - ah as i64 + 1
    };
    let y = (a.height() as i64 - ((b.height() as i64 + 1) / 2)).max(clamp);
    a.draw(b, a.width() as i64, y, true)
}

fn superscript(base: &Expr, script_expr: &Expr, o: &RenderOptions) -> TextCanvas {
    let a = base.render_art(&o.outside(precedence::SUPERSCRIPT + 1));
    let b = script_expr.render_art(&o.outside(precedence::MIN));
    if b.height() == 1 && !script::is_superscript(&a.to_string()) {
        if let Some(sup) = script::to_superscript(&b.line(0)) {
            if o.charset.can_display(&sup) {
                return a.append_top(&TextCanvas::new(&sup), true);
            }
        }
    }
    sup_draw(&a, &b, expr::is_sup_node(base), None)
}

fn subscript(base: &Expr, script_expr: &Expr, o: &RenderOptions) -> TextCanvas {
    let a = base.render_art(&o.outside(precedence::MAX));
    let b = script_expr.render_art(&o.outside(precedence::MIN));
    if b.height() == 1 && !script::is_subscript(&a.to_string()) {
        if let Some(sub) = script::to_subscript(&b.line(0)) {
            if o.charset.can_display(&sub) {
                return a.append_bottom(&TextCanvas::new(&sub), true);
            }
        }
    }
    sub_draw(&a, &b, expr::is_sub_node(base), None)
}

fn super_subscript(base: &Expr, sup: &Expr, sub: &Expr, o: &RenderOptions) -> TextCanvas {
    let main = base.render_art(&o.outside(precedence::MAX));
    let sup_art = sup.render_art(&o.outside(precedence::MIN));
    let sub_art = sub.render_art(&o.outside(precedence::MIN));
    let main_size = (main.width(), main.height());

    if sub_art.height() == 1 && !script::is_subscript(&sub_art.to_string()) {
        if let Some(sub_str) = script::to_subscript(&sub_art.line(0)) {
            if o.charset.can_display(&sub_str) {
                let with_sub = main.append_bottom(&TextCanvas::new(&sub_str), true);
                return sup_draw(&with_sub, &sup_art, expr::is_sup_node(base), Some(main_size));
            }
        }
    }

    let with_sup = sup_draw(&main, &sup_art, expr::is_sup_node(base), None);
    sub_draw(&with_sup, &sub_art, expr::is_sub_node(base), Some(main_size))
}

fn big_symbol(
    symbol: &Expr,
    sub: Option<&Expr>,
    sup: Option<&Expr>,
    body: &Expr,
    o: &RenderOptions,
) -> TextCanvas {
    let o2 = o.outside(precedence::ITERATION);
    let sym = symbol.render_art(&o2);
    let mut art = sym.clone();
    if let Some(sub) = sub {
        let s = sub.render_art(&o.outside(precedence::MIN));
        let x = (sym.width() as i64 - s.width() as i64) / 2;
        art = art.draw(&s, x, art.height() as i64, true);
    }
    if let Some(sup) = sup {
        let s = sup.render_art(&o.outside(precedence::MIN));
        let x = (sym.width() as i64 - s.width() as i64 + 1) / 2;
        art = art.draw(&s, x, -(s.height() as i64), true);
    }
    art.append_top(&TextCanvas::new(" "), true)
        .append_center(&body.render_art(&o2))
}

fn integral_symbol(height: usize, min_height: usize, inline: &str, top: &str, middle: &str, bottom: &str) -> TextCanvas {
    let h = height.max(min_height);
    if h <= 1 {
        return TextCanvas::new(inline);
    }
    let (top, middle, bottom) = (top.to_string(), middle.to_string(), bottom.to_string());
    TextCanvas::from_rows(h, move |i| {
        let piece = if i == 0 {
            &top
        } else if i == h - 1 {
            &bottom
        } else {
            &middle
        };
        format!("{piece} ")
    })
}

fn integral(lower: Option<&Expr>, upper: Option<&Expr>, body: &Expr, o: &RenderOptions) -> TextCanvas {
    let value = body.render_art(&o.outside(precedence::ITERATION));
    let symbol = if o.charset.can_display("∫⌠⎮⌡") {
        integral_symbol(value.height(), 1, "∫", "⌠", "⎮", "⌡")
    } else {
        integral_symbol(value.height(), 3, "/", "/", "|", "/")
    };

    let mut art = symbol;
    if let Some(lower) = lower {
        let a = lower.render_art(&o.outside(precedence::MIN));
        let x = -((a.width() as i64 - 1) / 2);
        art = art.draw(&a, x, art.height() as i64, true);
    }
    if let Some(upper) = upper {
        let b = upper.render_art(&o.outside(precedence::MIN));
        let x = -(b.width() as i64 / 2);
        art = art.draw(&b, x, -(b.height() as i64), true);
    }
    art.append_center(&value)
}

/// Lays out cells in column/row boxes sized to the widest and tallest cell
/// of each column and row, centering every cell within its box.
fn grid_cells(rows: &[Vec<Expr>], o: &RenderOptions) -> (Vec<Vec<TextCanvas>>, Vec<usize>, Vec<usize>) {
    let o2 = o.outside(precedence::MIN);
    let columns = rows.first().map_or(0, Vec::len);
    let mut widths = vec![0usize; columns];
    let mut heights = vec![0usize; rows.len()];
    let mut cells = Vec::with_capacity(rows.len());
    for (i, grid_row) in rows.iter().enumerate() {
        let mut row_cells = Vec::with_capacity(grid_row.len());
        for (j, cell) in grid_row.iter().enumerate() {
            let art = cell.render_art(&o2);
            widths[j] = widths[j].max(art.width());
            heights[i] = heights[i].max(art.height());
            row_cells.push(art);
        }
        cells.push(row_cells);
    }
    (cells, widths, heights)
}

fn grid(rows: &[Vec<Expr>], o: &RenderOptions) -> TextCanvas {
    let (cells, widths, heights) = grid_cells(rows, o);
    let mut art = TextCanvas::new("");
    let mut y_off = 0i64;
    for (i, row_cells) in cells.iter().enumerate() {
        let mut x_off = 0i64;
        for (j, cell) in row_cells.iter().enumerate() {
            let x = x_off + ((widths[j] - cell.width() + 1) / 2) as i64;
            let y = y_off + ((heights[i] - cell.height() + 1) / 2) as i64;
            art = art.draw(cell, x, y, true);
            x_off += widths[j] as i64 + 2;
        }
        y_off += heights[i] as i64;
    }
    art.recalculate_center()
}

fn aug_grid(left: &[Vec<Expr>], right: &[Vec<Expr>], o: &RenderOptions) -> TextCanvas {
    let bar_char = o.charset.or_fallback("│", "|");
    let (left_cells, left_widths, left_heights) = grid_cells(left, o);
    let (right_cells, right_widths, right_heights) = grid_cells(right, o);
    let heights: Vec<usize> = left_heights
        .iter()
        .zip(&right_heights)
        .map(|(a, b)| *a.max(b))
        .collect();

    let spaces: i64 = match o.space_mode {
        SpaceMode::Compact => 1,
        SpaceMode::Force => 2,
        SpaceMode::Auto => {
            if left.len() != 1 {
                1
            } else {
                2
            }
        }
    };
    let bar_space: i64 = if o.space_mode == SpaceMode::Compact { 0 } else { 1 };

    let mut art = TextCanvas::new("");
    let mut y_off = 0i64;
    for i in 0..left_cells.len() {
        let row_height = heights[i];
        let mut x_off = 0i64;
        for (j, cell) in left_cells[i].iter().enumerate() {
            let x = x_off + ((left_widths[j] - cell.width() + 1) / 2) as i64;
            let y = y_off + ((row_height - cell.height() + 1) / 2) as i64;
            art = art.draw(cell, x, y, true);
            x_off += left_widths[j] as i64 + spaces;
        }
        x_off += bar_space - spaces;
        let bar = TextCanvas::from_rows(row_height.max(1), |_| bar_char.to_string());
        art = art.draw(&bar, x_off, y_off, true);
        x_off += bar_space + 1;
        for (j, cell) in right_cells[i].iter().enumerate() {
            let x = x_off + ((right_widths[j] - cell.width() + 1) / 2) as i64;
            let y = y_off + ((row_height - cell.height() + 1) / 2) as i64;
            art = art.draw(cell, x, y, true);
            x_off += right_widths[j] as i64 + spaces;
        }
        y_off += row_height as i64;
    }
    art.recalculate_center()
}

fn middle(lhs: &Expr, rhs: &Expr, o: &RenderOptions) -> TextCanvas {
    let o2 = o.outside(precedence::MID + 1);
    let space = if o.space_mode == SpaceMode::Compact {
        ""
    } else {
        " "
    };
    let bar_char = o.charset.or_fallback("│", "|");
    let a = lhs.render_art(&o2);
    let b = rhs.render_art(&o2);

    let above = a.center().max(b.center());
    let below = (a.height() - a.center()).max(b.height() - b.center());
    let total = above + below;
    let bar = TextCanvas::from_rows(total, |_| format!("{space}{bar_char}{space}")).set_center(above);
    a.append_center(&bar).append_center(&b)
}

fn list(delimiter: &Expr, elements: &[Expr], whole: &Expr, o: &RenderOptions) -> TextCanvas {
    match elements {
        [] => TextCanvas::new(""),
        [only] => only.render_art(o),
        elements => {
            let mut delim = delimiter.render_art(o);
            let o2 = o.outside(whole.precedence().saturating_add(1));
            let parts: Vec<TextCanvas> = elements.iter().map(|e| e.render_art(&o2)).collect();
            let spaced = !util::has_padding(&delim.to_string())
                && match o.space_mode {
                    SpaceMode::Force => true,
                    SpaceMode::Auto => parts.iter().any(|p| p.width() * p.height() != 1),
                    SpaceMode::Compact => false,
                };
            if spaced {
                delim = delim.append_center(&TextCanvas::new(" "));
            }
            let mut art = parts[0].clone();
            for part in &parts[1..] {
                art = art.append_center(&delim).append_center(part);
            }
            art
        }
    }
}

pub(crate) fn render(e: &Expr, o: &RenderOptions) -> TextCanvas {
    match e {
        Expr::Literal { value, .. } | Expr::NumberLiteral(value) | Expr::Text(value) => {
            TextCanvas::new(value)
        }
        Expr::Rational { value, precise } => {
            number::format_rational(value, *precise, o).render_art(o)
        }
        Expr::Glyph(forms) => o
            .charset
            .or_fallback_canvas(forms.unicode_canvas(), forms.ascii_canvas()),
        Expr::Infix {
            symbol,
            lhs,
            rhs,
            precedence: prec,
            associative,
        } => infix(symbol, lhs, rhs, *prec, *associative, o),
        Expr::Prefix {
            symbol,
            value,
            precedence: prec,
        } => symbol
            .render_art(&o.outside(precedence::MIN))
            .append_center(&value.render_art(&o.outside(prec.saturating_add(1)))),
        Expr::Negate(value) => TextCanvas::new("-")
            .append_center(&value.render_art(&o.outside(precedence::NEGATE + 1))),
        Expr::Postfix {
            symbol,
            value,
            precedence: prec,
        } => value
            .render_art(&o.outside(*prec))
            .append_center(&symbol.render_art(&o.outside(precedence::MIN))),
        Expr::Fraction { num, denom } => fraction(num, denom, o),
        Expr::Root { degree, radicand } => root(degree, radicand, o),
        Expr::Superscript { base, script } => superscript(base, script, o),
        Expr::Subscript { base, script } => subscript(base, script, o),
        Expr::SuperSubscript { base, sup, sub } => super_subscript(base, sup, sub, o),
        Expr::BigSymbol {
            symbol,
            sub,
            sup,
            body,
        } => big_symbol(symbol, sub.as_deref(), sup.as_deref(), body, o),
        Expr::Integral { lower, upper, body } => {
            integral(lower.as_deref(), upper.as_deref(), body, o)
        }
        Expr::Grid(rows) => grid(rows, o),
        Expr::AugmentedGrid { left, right } => aug_grid(left, right, o),
        Expr::Brackets { kind, inner } => brackets(*kind, inner, o),
        Expr::BracketLiteral { kind, left, inner } => {
            let inner_art = inner.render_art(&o.outside(precedence::MIN));
            let mut glyph = bracket::bracket_art_unicode(*kind, *left, inner_art.height());
            if !o.charset.can_display_canvas(&glyph) {
                glyph = bracket::bracket_art_ascii(*kind, *left, inner_art.height());
            }
            if *left {
                glyph.append_bottom(&inner_art, false)
            } else {
                inner_art.append_bottom(&glyph, true)
            }
        }
        Expr::MatrixBrackets(inner) => brackets(o.matrix_brackets, inner, o),
        Expr::Middle { lhs, rhs } => middle(lhs, rhs, o),
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
            let a = lhs.render_art(&o2);
            let b = rhs.render_art(&o2);
            if expr::concat_space(lhs, rhs, *implicit_space, o) {
                a.append_top(&TextCanvas::new(" "), true).append_center(&b)
            } else {
                a.append_center(&b)
            }
        }
        Expr::Exp(value) => {
            expr::pow(expr::name("e"), (**value).clone()).render_art(o)
        }
    }
}
