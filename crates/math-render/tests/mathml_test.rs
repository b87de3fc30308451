use insta::assert_snapshot;
use math_render::{
    DecimalMode, MathDisplay, RenderOptions, cbrt, eq, frac, integral_var, matrix, name, neg, num,
    num_ratio, sqrt, sum_of, sup,
};

fn options() -> RenderOptions {
    RenderOptions::default()
}

#[test]
fn identifiers_and_numbers() {
    assert_snapshot!(name("x").render_mathml(&options()), @"<mi>x</mi>");
    assert_snapshot!(num(3).render_mathml(&options()), @"<mn>3</mn>");
}

#[test]
fn fraction_node() {
    let e = frac(num(1), num(2));
    assert_snapshot!(e.render_mathml(&options()), @"<mfrac><mn>1</mn><mn>2</mn></mfrac>");
}

#[test]
fn formatted_fraction_value() {
    let options = options().with_decimal_mode(DecimalMode::ForceFraction);
    assert_snapshot!(
        num_ratio(1, 2).render_mathml(&options),
        @"<mfrac><mn>1</mn><mn>2</mn></mfrac>"
    );
}

#[test]
fn scripts() {
    assert_snapshot!(
        sup(name("x"), num(2)).render_mathml(&options()),
        @"<msup><mi>x</mi><mn>2</mn></msup>"
    );
}

#[test]
fn roots() {
    assert_snapshot!(sqrt(name("x")).render_mathml(&options()), @"<msqrt><mi>x</mi></msqrt>");
    assert_snapshot!(
        cbrt(name("x")).render_mathml(&options()),
        @"<mroot><mi>x</mi><mn>3</mn></mroot>"
    );
}

#[test]
fn negation_uses_the_minus_operator() {
    assert_snapshot!(
        neg(name("x")).render_mathml(&options()),
        @"<mrow><mo>−</mo><mi>x</mi></mrow>"
    );
}

#[test]
fn matrices_are_fenced_tables() {
    let e = matrix(vec![vec![num(1), num(2)], vec![num(3), num(4)]]);
    assert_snapshot!(
        e.render_mathml(&options()),
        @r#"<mrow><mo fence="true" stretchy="true">[</mo><mtable><mtr><mtd><mn>1</mn></mtd><mtd><mn>2</mn></mtd></mtr><mtr><mtd><mn>3</mn></mtd><mtd><mn>4</mn></mtd></mtr></mtable><mo fence="true" stretchy="true">]</mo></mrow>"#
    );
}

#[test]
fn big_operators_fill_missing_bounds_with_empty_rows() {
    let e = sum_of(num(1), name("i"));
    assert_snapshot!(
        e.render_mathml(&options()),
        @"<mrow><munderover><mi>∑</mi><mn>1</mn><mrow/></munderover><mi>i</mi></mrow>"
    );
}

#[test]
fn integrals_carry_their_differential() {
    let e = integral_var(Some(num(0)), Some(num(1)), name("x"), "x");
    assert_snapshot!(
        e.render_mathml(&options()),
        @"<mrow><munderover><mo>∫</mo><mn>0</mn><mn>1</mn></munderover><mrow><mi>x</mi><mrow><mi> d</mi><mi>x</mi></mrow></mrow></mrow>"
    );
}

#[test]
fn document_wrapper_sets_display_attributes() {
    let e = eq(name("x"), num(2));
    assert_snapshot!(
        e.render_mathml_doc(&options(), MathDisplay::Block),
        @r#"<math displaystyle="true" display="block"><mrow><mi>x</mi><mo>=</mo><mn>2</mn></mrow></math>"#
    );
    assert_snapshot!(
        e.render_mathml_doc(&options(), MathDisplay::Inline),
        @r#"<math displaystyle="false" display="inline"><mrow><mi>x</mi><mo>=</mo><mn>2</mn></mrow></math>"#
    );
}
