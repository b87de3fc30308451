use math_render::{
    CharSet, RenderOptions, SpaceMode, aug_matrix, frac, grid, integral_var, matrix, mid, name,
    num, plus, sqrt, sub, sum_bounds, sup,
};

fn options() -> RenderOptions {
    RenderOptions::default()
}

fn ascii() -> RenderOptions {
    RenderOptions::default().with_charset(CharSet::ascii())
}

fn compact() -> RenderOptions {
    RenderOptions::default().with_space_mode(SpaceMode::Compact)
}

#[test]
fn small_fractions_render_inline() {
    let e = frac(num(1), num(2));
    assert_eq!(e.render_art(&options()).to_string(), "1/2");
}

#[test]
fn compact_mode_stacks_even_small_fractions() {
    let e = frac(num(1), num(2));
    let art = e.render_art(&compact());
    assert_eq!(art.to_string(), "1\n-\n2");
    assert_eq!(art.center(), 1);
}

#[test]
fn wide_operands_stack_over_a_sized_bar() {
    let e = frac(plus(name("a"), num(2)), name("b"));
    let art = e.render_art(&options());
    assert_eq!(art.to_string(), "a+2\n---\n b ");
    assert_eq!(art.center(), 1);
}

#[test]
fn superscripts_float_above_the_baseline_in_ascii() {
    let art = sup(name("x"), num(2)).render_art(&ascii());
    assert_eq!(art.to_string(), " 2\nx ");
    assert_eq!(art.center(), 1);
}

#[test]
fn single_row_scripts_substitute_unicode() {
    assert_eq!(sup(name("x"), num(2)).render_art(&options()).to_string(), "x²");
    assert_eq!(sub(name("x"), num(1)).render_art(&options()).to_string(), "x₁");
}

#[test]
fn square_roots_draw_the_radical_shape() {
    assert_eq!(
        sqrt(name("x")).render_art(&options()).to_string(),
        "  _\n\\╱x"
    );
    assert_eq!(
        sqrt(name("x")).render_art(&ascii()).to_string(),
        "  _\n\\/x"
    );
}

#[test]
fn tall_radicands_grow_the_radical_stroke() {
    let e = sqrt(frac(num(1), num(2)));
    let art = e.render_art(&ascii().with_space_mode(SpaceMode::Compact));
    assert_eq!(
        art.to_string(),
        "    _ \n   /1|\n  / - \n\\/  2 "
    );
}

#[test]
fn ascii_root_art_never_contains_the_radical_glyph() {
    let e = sqrt(frac(num(1), num(2)));
    let art = e.render_art(&ascii().with_space_mode(SpaceMode::Compact)).to_string();
    assert!(!art.contains('√'));
    assert!(!art.contains('╱'));
    assert!(!art.contains('╲'));
}

#[test]
fn matrices_center_cells_between_stretched_brackets() {
    let e = matrix(vec![vec![num(1), num(2)], vec![num(3), num(4)]]);
    assert_eq!(
        e.render_art(&options()).to_string(),
        "⎡1  2⎤\n⎣3  4⎦"
    );
    assert_eq!(
        e.render_art(&ascii()).to_string(),
        " _    _ \n| 1  2 |\n|_3  4_|"
    );
}

#[test]
fn big_operators_stack_their_bounds() {
    let i_from_one = math_render::eq(name("i"), num(1));
    let art = sum_bounds(i_from_one, name("n"), name("i")).render_art(&options());
    assert_eq!(
        art.to_string(),
        " n   \n__   \n╲   i\n╱_   \ni=1  "
    );
    assert_eq!(art.center(), 2);
}

#[test]
fn integral_bounds_sit_above_and_below_the_sign() {
    let e = integral_var(Some(num(0)), Some(num(1)), name("x"), "x");
    assert_eq!(
        e.render_art(&options()).to_string(),
        "1    \n∫x dx\n0    "
    );
}

#[test]
fn integral_sign_degrades_to_a_three_row_ascii_shape() {
    let e = integral_var(Some(num(0)), Some(num(1)), name("x"), "x");
    assert_eq!(
        e.render_art(&ascii()).to_string(),
        "1     \n/     \n| x dx\n/     \n0     "
    );
}

#[test]
fn augmented_matrices_draw_a_full_height_bar() {
    let e = aug_matrix(
        grid(vec![vec![num(1), num(0)], vec![num(0), num(1)]]),
        grid(vec![vec![name("a")], vec![name("b")]]),
    );
    assert_eq!(
        e.render_art(&options()).to_string(),
        "⎡1 0 │ a⎤\n⎣0 1 │ b⎦"
    );
}

#[test]
fn set_builder_bar_spans_both_sides() {
    let e = mid(name("x"), math_render::greater(name("x"), num(0)));
    assert_eq!(e.render_art(&options()).to_string(), "x │ (x>0)");
}
