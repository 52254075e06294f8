use std::str::FromStr;

use num_bigint::BigInt;
use numtower::{Complex, Runtime, Value, init_types};
use pretty_assertions::assert_eq;

fn repr(value: &Value) -> String {
    Runtime::new(init_types()).repr(value).unwrap()
}

fn complex_repr(re: f64, im: f64) -> String {
    repr(&Value::from(Complex::new(re, im)))
}

#[test]
fn zero_real_part_uses_bare_form() {
    assert_eq!(complex_repr(0.0, 1.0), "1j");
    assert_eq!(complex_repr(0.0, -2.5), "-2.5j");
    assert_eq!(complex_repr(0.0, 0.0), "0j");
    assert_eq!(complex_repr(0.0, -0.0), "-0j");
    assert_eq!(complex_repr(0.0, f64::INFINITY), "infj");
}

#[test]
fn parenthesized_form() {
    assert_eq!(complex_repr(1.0, 2.0), "(1+2j)");
    assert_eq!(complex_repr(1.0, -1.0), "(1-1j)");
    assert_eq!(complex_repr(1.5, 2.25), "(1.5+2.25j)");
    assert_eq!(complex_repr(-3.0, 0.0), "(-3+0j)");
    assert_eq!(complex_repr(0.1, 0.2), "(0.1+0.2j)");
}

#[test]
fn signed_zeros() {
    // any zero real part gives the bare form
    assert_eq!(complex_repr(-0.0, 1.0), "1j");
    assert_eq!(complex_repr(-0.0, -0.0), "-0j");
    // the imaginary sign follows the sign bit
    assert_eq!(complex_repr(1.0, -0.0), "(1-0j)");
}

#[test]
fn nan_is_never_signed() {
    assert_eq!(complex_repr(1.0, -f64::NAN), "(1+nanj)");
    assert_eq!(complex_repr(-f64::NAN, 1.0), "(nan+1j)");
}

#[test]
fn exponent_notation_outside_positional_range() {
    assert_eq!(complex_repr(1e16, 1e-5), "(1e+16+1e-05j)");
    assert_eq!(complex_repr(1e15, 0.0001), "(1000000000000000+0.0001j)");
    assert_eq!(complex_repr(0.0, 1.5e300), "1.5e+300j");
    assert_eq!(complex_repr(2.5e-10, -1.0), "(2.5e-10-1j)");
}

#[test]
fn non_finite_components() {
    assert_eq!(complex_repr(f64::INFINITY, 2.0), "(inf+2j)");
    assert_eq!(complex_repr(1.0, f64::NEG_INFINITY), "(1-infj)");
    assert_eq!(complex_repr(f64::NEG_INFINITY, f64::INFINITY), "(-inf+infj)");
}

#[test]
fn display_matches_repr() {
    let z = Complex::new(1.0, -1.0);
    assert_eq!(z.to_string(), z.repr());
    assert_eq!(z.to_string(), "(1-1j)");
}

#[test]
fn other_builtin_reprs() {
    assert_eq!(repr(&Value::Int(-7)), "-7");
    assert_eq!(repr(&Value::Bool(true)), "True");
    assert_eq!(repr(&Value::Float(2.0)), "2.0");
    assert_eq!(repr(&Value::Float(1e16)), "1e+16");
    assert_eq!(repr(&Value::from(BigInt::from(2).pow(70))), "1180591620717411303424");
    assert_eq!(repr(&Value::from("it's")), "\"it's\"");
    assert_eq!(repr(&Value::from("a\nb")), "'a\\nb'");
    assert_eq!(repr(&Value::None), "None");
    assert_eq!(repr(&Value::NotImplemented), "NotImplemented");
}

/// Splits `(<re><sign><im>j)` or `<im>j` and parses each part with `f64::from_str`.
fn parse_complex_repr(text: &str) -> (f64, f64) {
    if let Some(inner) = text.strip_prefix('(') {
        let inner = inner.strip_suffix("j)").unwrap();
        let bytes = inner.as_bytes();
        let split = (1..bytes.len())
            .rev()
            .find(|&i| matches!(bytes[i], b'+' | b'-') && bytes[i - 1] != b'e')
            .unwrap();
        let re = f64::from_str(&inner[..split]).unwrap();
        let im = f64::from_str(&inner[split..]).unwrap();
        (re, im)
    } else {
        (0.0, f64::from_str(text.strip_suffix('j').unwrap()).unwrap())
    }
}

#[test]
fn repr_reparses_to_the_same_components() {
    let samples = [
        0.1,
        1e16,
        1e-5,
        5e-324,
        1.797_693_134_862_315_7e308,
        -2.5,
        1.0 / 3.0,
        123_456.789,
        -1e-300,
        f64::INFINITY,
        f64::NEG_INFINITY,
    ];
    for &re in &samples {
        for &im in samples.iter().chain(&[0.0, -0.0]) {
            let text = Complex::new(re, im).repr();
            let (parsed_re, parsed_im) = parse_complex_repr(&text);
            assert_eq!(parsed_re.to_bits(), re.to_bits(), "real part of {text}");
            assert_eq!(parsed_im.to_bits(), im.to_bits(), "imaginary part of {text}");
        }
    }
    for &im in &samples {
        let text = Complex::new(0.0, im).repr();
        assert_eq!(parse_complex_repr(&text), (0.0, im), "{text}");
        assert_eq!(parse_complex_repr(&text).1.to_bits(), im.to_bits(), "{text}");
    }
}
