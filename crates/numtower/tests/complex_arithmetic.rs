//! `+` and `-` with complex operands, including the reflected slots reached
//! from int, bool and float left operands.

use num_bigint::BigInt;
use numtower::{Complex, ExcType, Runtime, Value, init_types};
use pretty_assertions::assert_eq;

fn rt() -> Runtime {
    Runtime::new(init_types())
}

fn c(re: f64, im: f64) -> Value {
    Value::from(Complex::new(re, im))
}

fn unwrap_complex(value: Value) -> Complex {
    match value {
        Value::Complex(z) => z,
        other => panic!("expected a complex result, got {other:?}"),
    }
}

fn huge_int() -> Value {
    Value::from(BigInt::from(10).pow(400))
}

#[test]
fn complex_plus_complex() {
    let z = unwrap_complex(rt().add(&c(1.0, 2.0), &c(3.0, 4.0)).unwrap());
    assert_eq!(z, Complex::new(4.0, 6.0));
}

#[test]
fn int_plus_complex_uses_reflected_add() {
    let z = unwrap_complex(rt().add(&Value::Int(1), &c(0.0, 2.0)).unwrap());
    assert_eq!(z, Complex::new(1.0, 2.0));
}

#[test]
fn bool_plus_complex() {
    let z = unwrap_complex(rt().add(&Value::Bool(true), &c(0.0, 1.0)).unwrap());
    assert_eq!(z, Complex::new(1.0, 1.0));
}

#[test]
fn complex_plus_float() {
    let z = unwrap_complex(rt().add(&c(1.0, 1.0), &Value::Float(0.5)).unwrap());
    assert_eq!(z, Complex::new(1.5, 1.0));
}

#[test]
fn complex_minus_int() {
    let z = unwrap_complex(rt().sub(&c(5.0, 1.0), &Value::Int(2)).unwrap());
    assert_eq!(z, Complex::new(3.0, 1.0));
}

#[test]
fn int_minus_complex_keeps_operand_order() {
    let z = unwrap_complex(rt().sub(&Value::Int(2), &c(1.0, 1.0)).unwrap());
    assert_eq!(z, Complex::new(1.0, -1.0));
}

#[test]
fn float_minus_complex_keeps_operand_order() {
    let z = unwrap_complex(rt().sub(&Value::Float(0.5), &c(0.0, 1.0)).unwrap());
    assert_eq!(z, Complex::new(0.5, -1.0));
}

#[test]
fn long_int_within_double_range_converts() {
    let two_64 = Value::from(BigInt::from(2).pow(64));
    let z = unwrap_complex(rt().add(&c(0.0, 1.0), &two_64).unwrap());
    assert_eq!(z, Complex::new(18_446_744_073_709_551_616.0, 1.0));
}

#[test]
fn int_too_large_for_float_overflows() {
    for result in [
        rt().add(&c(1.0, 1.0), &huge_int()),
        rt().add(&huge_int(), &c(1.0, 1.0)),
        rt().sub(&c(1.0, 1.0), &huge_int()),
        rt().sub(&huge_int(), &c(1.0, 1.0)),
    ] {
        let err = result.unwrap_err();
        assert!(err.is_exception_type(ExcType::OverflowError), "{err}");
        assert!(err.exception().unwrap().exc_type().is_subclass_of(ExcType::ArithmeticError));
        assert_eq!(err.exception().unwrap().arg(), Some("int too large to convert to float"));
    }
}

#[test]
fn negative_huge_int_overflows_too() {
    let neg = Value::from(-BigInt::from(10).pow(400));
    let err = rt().add(&c(0.0, 0.0), &neg).unwrap_err();
    assert!(err.is_exception_type(ExcType::OverflowError));
}

#[test]
fn infinities_propagate() {
    let z = unwrap_complex(rt().add(&c(f64::INFINITY, 0.0), &c(1.0, 1.0)).unwrap());
    assert_eq!(z, Complex::new(f64::INFINITY, 1.0));

    let z = unwrap_complex(rt().add(&c(1.0, 0.0), &Value::Float(f64::NEG_INFINITY)).unwrap());
    assert_eq!(z, Complex::new(f64::NEG_INFINITY, 0.0));
}

#[test]
fn nan_propagates() {
    let z = unwrap_complex(rt().sub(&c(1.0, 1.0), &Value::Float(f64::NAN)).unwrap());
    assert!(z.re.is_nan());
    assert_eq!(z.im, 1.0);
}

#[test]
fn complex_plus_str_is_type_error() {
    let err = rt().add(&c(1.0, 1.0), &Value::from("x")).unwrap_err();
    assert!(err.is_exception_type(ExcType::TypeError));
    assert_eq!(
        err.exception().unwrap().arg(),
        Some("unsupported operand type(s) for +: 'complex' and 'str'")
    );
}

#[test]
fn str_plus_complex_uses_concatenation_message() {
    let err = rt().add(&Value::from("x"), &c(1.0, 1.0)).unwrap_err();
    assert_eq!(
        err.exception().unwrap().arg(),
        Some("can only concatenate str (not \"complex\") to str")
    );
}

#[test]
fn complex_minus_none_is_type_error() {
    let err = rt().sub(&c(1.0, 1.0), &Value::None).unwrap_err();
    assert_eq!(
        err.exception().unwrap().arg(),
        Some("unsupported operand type(s) for -: 'complex' and 'NoneType'")
    );
    let err = rt().sub(&Value::None, &c(1.0, 1.0)).unwrap_err();
    assert_eq!(
        err.exception().unwrap().arg(),
        Some("unsupported operand type(s) for -: 'NoneType' and 'complex'")
    );
}

#[test]
fn operands_are_not_mutated() {
    let lhs = c(1.0, 2.0);
    let rhs = c(3.0, 4.0);
    rt().add(&lhs, &rhs).unwrap();
    rt().sub(&lhs, &rhs).unwrap();
    assert_eq!(unwrap_complex(lhs), Complex::new(1.0, 2.0));
    assert_eq!(unwrap_complex(rhs), Complex::new(3.0, 4.0));
}

#[test]
fn real_arithmetic_still_works() {
    let mut rt = rt();
    assert!(matches!(rt.add(&Value::Int(2), &Value::Int(3)).unwrap(), Value::Int(5)));
    assert!(matches!(rt.sub(&Value::Int(i64::MIN), &Value::Int(1)).unwrap(), Value::LongInt(_)));
    match rt.add(&Value::Int(1), &Value::Float(0.5)).unwrap() {
        Value::Float(f) => assert_eq!(f, 1.5),
        other => panic!("expected float, got {other:?}"),
    }
    match rt.add(&Value::from("ab"), &Value::from("cd")).unwrap() {
        Value::Str(s) => assert_eq!(s, "abcd"),
        other => panic!("expected str, got {other:?}"),
    }
}

#[test]
fn int_slot_overflows_when_mixing_with_float() {
    let err = rt().add(&huge_int(), &Value::Float(1.5)).unwrap_err();
    assert!(err.is_exception_type(ExcType::OverflowError));
    let err = rt().sub(&Value::Float(1.5), &huge_int()).unwrap_err();
    assert!(err.is_exception_type(ExcType::OverflowError));
}
