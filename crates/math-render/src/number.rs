//! The exact-to-decimal number formatter. A rational value is turned into
//! the best textual form available under the options budget: a plain
//! integer or decimal literal, a built fraction, or a scientific-notation
//! subtree (`mantissa · 10^exponent`). The result is an ordinary expression
//! tree, so the final layout reuses the infix and superscript renderers.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::expr::{self, Expr};
use crate::options::{DecimalMode, RenderOptions};

pub(crate) fn format_rational(value: &BigRational, precise: bool, options: &RenderOptions) -> Expr {
    if value.is_zero() {
        return expr::num_str("0");
    }
    if value.is_negative() {
        return match format_rational(&-value, precise, options) {
            Expr::NumberLiteral(s) => Expr::NumberLiteral(format!("-{s}")),
            other => expr::neg(other),
        };
    }
    if options.scientific && !in_display_window(value) {
        return scientific(value, precise, options);
    }
    match resolve_mode(value, precise, options) {
        Resolved::Exact { scale, factor } => expr::num_str(exact_decimal(value, scale, &factor)),
        Resolved::Rounded => expr::num_str(rounded_decimal(value, options.precision)),
        Resolved::Fraction => fraction_expr(value),
    }
}

/// The exact rational value of the shortest decimal form of `value`, so
/// `0.1_f64` becomes exactly 1/10 rather than its binary expansion.
///
/// # Panics
/// Panics if `value` is not finite.
pub(crate) fn rational_from_f64(value: f64) -> BigRational {
    assert!(
        value.is_finite(),
        "only finite numbers have an exact rational value"
    );
    let mut buffer = dtoa::Buffer::new();
    parse_decimal(buffer.format(value))
}

enum Resolved {
    /// The value has a finite decimal expansion of `scale` fractional
    /// digits; multiplying the numerator by `factor` makes the denominator a
    /// power of ten.
    Exact { scale: usize, factor: BigInt },
    /// Render as a decimal rounded to the precision budget.
    Rounded,
    Fraction,
}

fn resolve_mode(value: &BigRational, precise: bool, options: &RenderOptions) -> Resolved {
    match options.decimal_mode {
        DecimalMode::ForceDecimal => prefer_decimal(value, options),
        DecimalMode::ForceFraction => Resolved::Fraction,
        DecimalMode::DecimalIfPossible => decimal_if_finite(value, options),
        DecimalMode::Smart => {
            if precise && *value.denom() <= BigInt::from(1000) {
                decimal_if_finite(value, options)
            } else {
                prefer_decimal(value, options)
            }
        }
    }
}

fn prefer_decimal(value: &BigRational, options: &RenderOptions) -> Resolved {
    terminating(value, options).unwrap_or(Resolved::Rounded)
}

fn decimal_if_finite(value: &BigRational, options: &RenderOptions) -> Resolved {
    terminating(value, options).unwrap_or(Resolved::Fraction)
}

/// Detects a finite decimal expansion that fits the precision budget.
fn terminating(value: &BigRational, options: &RenderOptions) -> Option<Resolved> {
    let factor = factor_to_power_of_ten(value.denom())?;
    let scale = pow_of_ten_exponent(&(value.denom() * &factor));
    if scale <= options.precision as usize {
        Some(Resolved::Exact { scale, factor })
    } else {
        None
    }
}

/// The factor that completes `x` to a power of ten, which exists exactly
/// when the prime factorization of `x` consists solely of 2s and 5s.
fn factor_to_power_of_ten(x: &BigInt) -> Option<BigInt> {
    if x.is_one() {
        return Some(BigInt::one());
    }
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut x = x.clone();
    let mut twos = 0u32;
    let mut fives = 0u32;
    while x.is_even() {
        x = &x / &two;
        twos += 1;
    }
    loop {
        let (q, r) = x.div_rem(&five);
        if !r.is_zero() {
            break;
        }
        x = q;
        fives += 1;
    }
    if !x.is_one() {
        return None;
    }
    // Every paired 2·5 is already a factor of ten.
    Some(match twos.cmp(&fives) {
        Ordering::Equal => BigInt::one(),
        Ordering::Greater => five.pow(twos - fives),
        Ordering::Less => two.pow(fives - twos),
    })
}

/// The exponent of a known power of ten.
fn pow_of_ten_exponent(x: &BigInt) -> usize {
    x.to_string().len() - 1
}

/// The scientific display window: values at or below 1/1000 and values
/// above 10000 switch to scientific notation.
fn in_display_window(magnitude: &BigRational) -> bool {
    let lower = BigRational::new(BigInt::one(), BigInt::from(1000));
    let upper = BigRational::from_integer(BigInt::from(10000));
    *magnitude > lower && *magnitude <= upper
}

/// Builds `mantissa · 10^exponent` with the mantissa in `[1, 10)`. The
/// mantissa is re-formatted with scientific notation disabled, so the
/// recursion terminates after one step.
fn scientific(magnitude: &BigRational, precise: bool, options: &RenderOptions) -> Expr {
    let ten = BigRational::from_integer(BigInt::from(10));
    let one = BigRational::one();
    let mut factor = magnitude.clone();
    let mut exponent: i64 = 0;
    while factor >= ten {
        factor = &factor / &ten;
        exponent += 1;
    }
    while factor < one {
        factor = &factor * &ten;
        exponent -= 1;
    }
    let power = expr::sup(expr::num_str("10"), expr::num_str(exponent.to_string()));
    if factor.is_one() {
        power
    } else {
        let mantissa = format_rational(&factor, precise, &options.with_scientific(false));
        expr::mult(mantissa, power)
    }
}

/// The exact finite expansion: scale the numerator so the denominator
/// becomes `10^scale`, then place the decimal point. No rounding happens
/// here, and a reduced fraction never produces trailing zeros.
fn exact_decimal(value: &BigRational, scale: usize, factor: &BigInt) -> String {
    let digits = (value.numer() * factor).to_string();
    insert_point(&digits, scale)
}

/// Round half-up to `precision` fractional digits, computed exactly on the
/// scaled numerator so no double rounding can occur at the precision
/// boundary.
fn rounded_decimal(value: &BigRational, precision: u32) -> String {
    let pow = BigInt::from(10).pow(precision);
    let doubled = value.numer() * pow * BigInt::from(2) + value.denom();
    let quotient = doubled.div_floor(&(value.denom() * BigInt::from(2)));
    trim_fractional_zeros(insert_point(&quotient.to_string(), precision as usize))
}

fn insert_point(digits: &str, scale: usize) -> String {
    if scale == 0 {
        return digits.to_string();
    }
    if digits.len() <= scale {
        format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
    } else {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        format!("{int_part}.{frac_part}")
    }
}

fn trim_fractional_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A two-line built fraction, or the bare numerator for denominator 1.
fn fraction_expr(value: &BigRational) -> Expr {
    if value.denom().is_one() {
        expr::num_str(value.numer().to_string())
    } else {
        expr::frac(
            expr::num_str(value.numer().to_string()),
            expr::num_str(value.denom().to_string()),
        )
    }
}

fn parse_decimal(s: &str) -> BigRational {
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        // dtoa exponents are always well-formed.
        Some((m, e)) => (m, e.parse::<i64>().unwrap_or(0)),
        None => (s, 0),
    };
    let negative = mantissa.starts_with('-');
    let mantissa = mantissa.trim_start_matches('-');
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mut digits = String::with_capacity(int_part.len() + frac_part.len());
    digits.push_str(int_part);
    digits.push_str(frac_part);
    let numer = digits.parse::<BigInt>().unwrap_or_default();
    let scale = frac_part.len() as i64 - exponent;
    let value = if scale >= 0 {
        BigRational::new(numer, BigInt::from(10).pow(scale as u32))
    } else {
        BigRational::from_integer(numer * BigInt::from(10).pow(-scale as u32))
    };
    if negative { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DecimalMode, RenderOptions};

    fn fmt(n: i64, d: i64, options: &RenderOptions) -> String {
        format_rational(&BigRational::new(BigInt::from(n), BigInt::from(d)), true, options)
            .render_inline(options)
    }

    #[test]
    fn zero_renders_plain_in_every_mode() {
        for mode in [
            DecimalMode::ForceDecimal,
            DecimalMode::ForceFraction,
            DecimalMode::DecimalIfPossible,
            DecimalMode::Smart,
        ] {
            assert_eq!(fmt(0, 1, &RenderOptions::default().with_decimal_mode(mode)), "0");
        }
    }

    #[test]
    fn finite_expansions_render_exactly() {
        let options = RenderOptions::default().with_decimal_mode(DecimalMode::DecimalIfPossible);
        assert_eq!(fmt(1, 8, &options), "0.125");
        assert_eq!(fmt(5, 2, &options), "2.5");
        assert_eq!(fmt(2, 5, &options), "0.4");
        assert_eq!(fmt(42, 1, &options), "42");
    }

    #[test]
    fn infinite_expansions_fall_back_to_fractions() {
        let options = RenderOptions::default().with_decimal_mode(DecimalMode::DecimalIfPossible);
        assert_eq!(fmt(1, 3, &options), "1/3");
        assert_eq!(fmt(22, 7, &options), "22/7");
    }

    #[test]
    fn forced_decimals_round_half_up() {
        let options = RenderOptions::default()
            .with_decimal_mode(DecimalMode::ForceDecimal)
            .with_precision(4);
        assert_eq!(fmt(1, 3, &options), "0.3333");
        assert_eq!(fmt(2, 3, &options), "0.6667");
        assert_eq!(fmt(1, 2, &options), "0.5");
    }

    #[test]
    fn long_finite_expansions_respect_the_precision_budget() {
        // 1/2^20 terminates after 20 digits; with precision 5 it is rounded
        // away in decimal modes and becomes a fraction in the adaptive one.
        let rounded = RenderOptions::default()
            .with_decimal_mode(DecimalMode::ForceDecimal)
            .with_precision(5)
            .with_scientific(false);
        assert_eq!(fmt(1, 1 << 20, &rounded), "0");
        let adaptive = rounded.with_decimal_mode(DecimalMode::DecimalIfPossible);
        assert_eq!(fmt(1, 1 << 20, &adaptive), "1/1048576");
    }

    #[test]
    fn smart_mode_formats_approximations_as_decimals() {
        let options = RenderOptions::default();
        let third = BigRational::new(BigInt::from(1), BigInt::from(3));
        let exact = format_rational(&third, true, &options).render_inline(&options);
        assert_eq!(exact, "1/3");
        let approx = format_rational(&third, false, &options.with_precision(6))
            .render_inline(&options);
        assert_eq!(approx, "0.333333");
    }

    #[test]
    fn smart_mode_keeps_huge_denominators_decimal() {
        let options = RenderOptions::default().with_precision(6).with_scientific(false);
        assert_eq!(fmt(1, 30011, &options), "0.000033");
    }

    #[test]
    fn negative_values_carry_the_sign() {
        let options = RenderOptions::default();
        assert_eq!(fmt(-1, 2, &options), "-0.5");
        assert_eq!(
            fmt(-1, 3, &options.with_decimal_mode(DecimalMode::ForceFraction)),
            "-1/3"
        );
    }

    #[test]
    fn scientific_threshold() {
        let options = RenderOptions::default();
        assert_eq!(fmt(12345, 1, &options), "1.2345·10⁴");
        assert_eq!(fmt(5, 1, &options), "5");
        assert_eq!(fmt(10000, 1, &options), "10000");
        assert_eq!(fmt(1, 1000, &options), "10⁻³");
        assert_eq!(fmt(1, 800, &options), "0.00125");
    }

    #[test]
    fn scientific_factor_recurses_with_scientific_disabled() {
        // 1/30000 has a mantissa of 10/3, which the adaptive modes render
        // as a fraction times the power of ten.
        let options = RenderOptions::default();
        assert_eq!(fmt(1, 30000, &options), "10/3·10⁻⁵");
    }

    #[test]
    fn fraction_round_trip() {
        let options = RenderOptions::default().with_decimal_mode(DecimalMode::ForceFraction);
        for (n, d) in [(3, 4), (-3, 4), (10, 6), (7, 1), (0, 5)] {
            let value = BigRational::new(BigInt::from(n), BigInt::from(d));
            let rendered = fmt(n, d, &options);
            let parsed = match rendered.split_once('/') {
                Some((n, d)) => BigRational::new(
                    n.parse::<BigInt>().unwrap(),
                    d.parse::<BigInt>().unwrap(),
                ),
                None => BigRational::from_integer(rendered.parse::<BigInt>().unwrap()),
            };
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn floats_parse_to_their_shortest_decimal_value() {
        assert_eq!(
            rational_from_f64(0.1),
            BigRational::new(BigInt::from(1), BigInt::from(10))
        );
        assert_eq!(rational_from_f64(-2.5), BigRational::new(BigInt::from(-5), BigInt::from(2)));
        assert_eq!(rational_from_f64(3.0), BigRational::from_integer(BigInt::from(3)));
        assert_eq!(
            rational_from_f64(1e-7),
            BigRational::new(BigInt::from(1), BigInt::from(10_000_000))
        );
    }
}
