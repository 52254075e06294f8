//! Algebraic laws checked over every pair drawn from a mixed set of numbers.

use num_bigint::BigInt;
use numtower::{Complex, Runtime, Value, init_types};

fn rt() -> Runtime {
    Runtime::new(init_types())
}

fn numbers() -> Vec<Value> {
    let two_70 = 2f64.powi(70);
    vec![
        Value::from(Complex::new(1.0, 2.0)),
        Value::from(Complex::new(-0.5, 0.0)),
        Value::from(Complex::new(3.0, 0.0)),
        Value::from(Complex::new(two_70, 0.0)),
        Value::from(Complex::new(0.0, -1.0)),
        Value::Int(3),
        Value::Int(-7),
        Value::Bool(true),
        Value::Bool(false),
        Value::Float(2.5),
        Value::Float(-0.5),
        Value::Float(two_70),
        Value::from(BigInt::from(2).pow(70)),
        Value::from(BigInt::from(2).pow(70) + 1),
    ]
}

#[test]
fn addition_commutes() {
    let mut rt = rt();
    let values = numbers();
    for a in &values {
        for b in &values {
            let ab = rt.add(a, b).unwrap();
            let ba = rt.add(b, a).unwrap();
            assert!(rt.eq(&ab, &ba).unwrap(), "{a:?} + {b:?}: {ab:?} vs {ba:?}");
        }
    }
}

#[test]
fn equality_is_reflexive() {
    let mut rt = rt();
    for a in &numbers() {
        assert!(rt.eq(a, a).unwrap(), "{a:?}");
        assert!(!rt.ne(a, a).unwrap(), "{a:?}");
    }
}

#[test]
fn equality_is_symmetric_and_agrees_with_hash() {
    let mut rt = rt();
    let values = numbers();
    for a in &values {
        for b in &values {
            let ab = rt.eq(a, b).unwrap();
            assert_eq!(ab, rt.eq(b, a).unwrap(), "{a:?} == {b:?}");
            assert_eq!(!ab, rt.ne(a, b).unwrap(), "{a:?} != {b:?}");
            if ab {
                assert_eq!(rt.hash(a).unwrap(), rt.hash(b).unwrap(), "{a:?} == {b:?}");
            }
        }
    }
}

#[test]
fn subtraction_is_antisymmetric_for_complex() {
    let mut rt = rt();
    let values = numbers();
    for a in &values {
        for b in values.iter().filter(|v| matches!(v, Value::Complex(_))) {
            let Value::Complex(ab) = rt.sub(a, b).unwrap() else {
                panic!("expected complex");
            };
            let Value::Complex(ba) = rt.sub(b, a).unwrap() else {
                panic!("expected complex");
            };
            assert_eq!(ab.re, -ba.re, "{a:?} - {b:?}");
            assert_eq!(ab.im, -ba.im, "{a:?} - {b:?}");
        }
    }
}
