use math_render::{
    CharSet, RenderOptions, SpaceMode, abs, call, curly, div, eq, factorial, frac, greater,
    integral_var, lim_of, mid, minus, mult, name, neg, num, num_ratio, num_str, par, plus, set,
    sqrt, sub, sup, tuple,
};

fn options() -> RenderOptions {
    RenderOptions::default()
}

fn ascii() -> RenderOptions {
    RenderOptions::default().with_charset(CharSet::ascii())
}

#[test]
fn rendering_is_pure() {
    let e = frac(plus(name("a"), num(2)), sqrt(name("b")));
    let options = options();
    assert_eq!(e.render_inline(&options), e.render_inline(&options));
    assert_eq!(
        e.render_art(&options).to_string(),
        e.render_art(&options).to_string()
    );
    assert_eq!(e.render_latex(&options), e.render_latex(&options));
    assert_eq!(
        e.render_mathml(&options).to_string(),
        e.render_mathml(&options).to_string()
    );
}

#[test]
fn left_associative_chains_drop_parens_on_the_left_only() {
    let options = options();
    let left_nested = minus(minus(name("a"), name("b")), name("c"));
    assert_eq!(left_nested.render_inline(&options), "a-b-c");
    let right_nested = minus(name("a"), minus(name("b"), name("c")));
    assert_eq!(right_nested.render_inline(&options), "a-(b-c)");

    let left_div = div(div(name("a"), name("b")), name("c"));
    assert_eq!(left_div.render_inline(&options), "a/b/c");
    let right_div = div(name("a"), div(name("b"), name("c")));
    assert_eq!(right_div.render_inline(&options), "a/(b/c)");
}

#[test]
fn lower_precedence_operands_get_parenthesized() {
    let options = options();
    assert_eq!(
        mult(plus(name("a"), name("b")), name("c")).render_inline(&options),
        "(a+b)·c"
    );
    assert_eq!(
        mult(name("a"), plus(name("b"), name("c"))).render_inline(&options),
        "a·(b+c)"
    );
    assert_eq!(
        neg(plus(name("a"), name("b"))).render_inline(&options),
        "-(a+b)"
    );
    assert_eq!(
        factorial(plus(name("a"), name("b"))).render_inline(&options),
        "(a+b)!"
    );
}

#[test]
fn auto_parenthesis_can_be_disabled() {
    let options = options().with_auto_parenthesis(false);
    assert_eq!(
        mult(name("a"), plus(name("b"), name("c"))).render_inline(&options),
        "a·b+c"
    );
}

#[test]
fn negative_numbers_parenthesize_like_negations() {
    let options = options();
    assert_eq!(mult(num(-1), name("x")).render_inline(&options), "(-1)·x");
    assert_eq!(plus(name("x"), num(2)).render_inline(&options), "x+2");
}

#[test]
fn inline_scripts_use_unicode_when_available() {
    assert_eq!(sup(name("x"), num(2)).render_inline(&options()), "x²");
    assert_eq!(sup(name("x"), num(2)).render_inline(&ascii()), "x^2");
    assert_eq!(sub(name("x"), num(1)).render_inline(&options()), "x₁");
    assert_eq!(sub(name("x"), name("i")).render_inline(&options()), "x_i");
    assert_eq!(
        sup(name("x"), plus(name("a"), name("b"))).render_inline(&options()),
        "x^(a+b)"
    );
}

#[test]
fn inline_roots_degrade_without_the_radical_glyph() {
    assert_eq!(sqrt(name("x")).render_inline(&options()), "√x");
    assert_eq!(sqrt(name("x")).render_inline(&ascii()), "sqrt(x)");
    assert_eq!(sqrt(par(name("x"))).render_inline(&ascii()), "sqrt(x)");
    assert_eq!(
        math_render::root(num_str("3"), name("x")).render_inline(&options()),
        "³√x"
    );
    assert_eq!(
        math_render::root(num_str("3"), name("x")).render_inline(&ascii()),
        "root(3, x)"
    );
}

#[test]
fn inline_integral_attaches_bounds_as_scripts() {
    let e = integral_var(Some(num(0)), Some(num(1)), name("x"), "x");
    assert_eq!(e.render_inline(&options()), "∫₀¹x dx");
    assert_eq!(e.render_inline(&ascii()), "∫_0^1x dx");
}

#[test]
fn calls_and_tuples_keep_their_brackets_tight() {
    let options = options();
    assert_eq!(call("f", vec![name("x")]).render_inline(&options), "f(x)");
    assert_eq!(
        call("f", vec![name("x"), name("y")]).render_inline(&options),
        "f(x,y)"
    );
    assert_eq!(tuple(vec![num(1), name("x")]).render_inline(&options), "(1,x)");
}

#[test]
fn set_builder_uses_the_middle_bar() {
    // The bar binds loosely, so a comparison predicate keeps its parens.
    let e = set(name("x"), greater(name("x"), num(0)));
    assert_eq!(e.render_inline(&options()), "{x | (x>0)}");
    assert_eq!(
        e.render_inline(&options().with_space_mode(SpaceMode::Compact)),
        "{x|(x>0)}"
    );
}

#[test]
fn mid_requires_matching_grids_to_augment() {
    let e = mid(name("a"), name("b"));
    assert_eq!(e.render_inline(&options()), "a | b");
}

#[test]
fn latex_surface() {
    let options = options();
    assert_eq!(
        frac(plus(name("a"), num(2)), name("b")).render_latex(&options),
        "\\frac{a + 2}{b}"
    );
    assert_eq!(sqrt(name("x")).render_latex(&options), "\\sqrt{x}");
    assert_eq!(
        math_render::cbrt(name("x")).render_latex(&options),
        "\\sqrt[3]{x}"
    );
    assert_eq!(
        sup(name("x"), num(2)).render_latex(&options),
        "{x}^{2}"
    );
    assert_eq!(
        mult(num(2), plus(name("a"), name("b"))).render_latex(&options),
        "2 \\cdot \\left(a + b\\right)"
    );
    assert_eq!(
        math_render::exp(name("x")).render_latex(&options),
        "{e}^{x}"
    );
    assert_eq!(
        integral_var(Some(num(0)), Some(num(1)), name("x"), "x").render_latex(&options),
        "\\int_{0}^{1}{x  d x}"
    );
    assert_eq!(
        abs(name("x")).render_latex(&options),
        "\\left\\vert x\\right\\vert"
    );
}

#[test]
fn latex_numbers_follow_the_decimal_mode() {
    let options = options();
    assert_eq!(
        eq(name("x"), num_ratio(1, 2)).render_latex(&options),
        "x = 0.5"
    );
    let fractions = options.with_decimal_mode(math_render::DecimalMode::ForceFraction);
    assert_eq!(
        eq(name("x"), num_ratio(1, 2)).render_latex(&fractions),
        "x = \\frac{1}{2}"
    );
}

#[test]
fn debug_form_prints_builder_calls() {
    let e = frac(plus(name("a"), num(2)), name("b"));
    assert_eq!(format!("{e:?}"), "frac(+(a, 2), b)");
    assert_eq!(
        format!("{:?}", minus(name("a"), name("b"))),
        "-(a, b)"
    );
    assert_eq!(format!("{:?}", neg(name("x"))), "neg(x)");
    assert_eq!(format!("{:?}", num_ratio(2, 4)), "1/2");
    assert_eq!(
        format!("{:?}", sup(name("x"), num(2))),
        "sup(x, 2)"
    );
    assert_eq!(
        format!("{:?}", curly(name("x"))),
        "brackets(Curly, x)"
    );
}

#[test]
fn limits_render_with_an_arrow_bound() {
    let e = lim_of("x", num(0), frac(num(1), name("x")));
    assert_eq!(e.render_inline(&options()), "lim_(x->0)1/x");
}

#[test]
fn shared_trees_render_concurrently() {
    let e = frac(plus(name("a"), num(2)), sqrt(name("b")));
    let options = options();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    (
                        e.render_inline(&options),
                        e.render_art(&options).to_string(),
                        e.render_latex(&options),
                    )
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
    });
}
