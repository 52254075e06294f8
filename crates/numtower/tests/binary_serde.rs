//! Values and errors cross process boundaries as postcard bytes.

use num_bigint::BigInt;
use numtower::{Complex, ExcType, RunError, Runtime, SimpleException, Value, init_types};

fn roundtrip_value(value: &Value) -> Value {
    let bytes = postcard::to_allocvec(value).unwrap();
    postcard::from_bytes(&bytes).unwrap()
}

#[test]
fn complex_keeps_signed_zeros() {
    let Value::Complex(z) = roundtrip_value(&Value::from(Complex::new(-0.0, -0.0))) else {
        panic!("expected complex");
    };
    assert!(z.re.is_sign_negative());
    assert!(z.im.is_sign_negative());
    assert_eq!(Runtime::new(init_types()).repr(&Value::from(z)).unwrap(), "-0j");
}

#[test]
fn long_int_survives() {
    let big = BigInt::from(10).pow(400);
    let Value::LongInt(li) = roundtrip_value(&Value::from(big.clone())) else {
        panic!("expected long int");
    };
    assert_eq!(li.inner(), &big);
}

#[test]
fn dispatch_result_can_be_snapshotted() {
    let mut rt = Runtime::new(init_types());
    let z = rt.add(&Value::Float(0.5), &Value::from(Complex::new(1.0, 2.0))).unwrap();
    let loaded = roundtrip_value(&z);
    assert!(rt.eq(&z, &loaded).unwrap());
    assert_eq!(rt.hash(&z).unwrap(), rt.hash(&loaded).unwrap());
}

#[test]
fn errors_roundtrip() {
    let err: RunError = SimpleException::new_msg(ExcType::OverflowError, "int too large to convert to float").into();
    let bytes = postcard::to_allocvec(&err).unwrap();
    let loaded: RunError = postcard::from_bytes(&bytes).unwrap();
    assert_eq!(loaded, err);

    let internal = RunError::internal("registry missing");
    let bytes = postcard::to_allocvec(&internal).unwrap();
    let loaded: RunError = postcard::from_bytes(&bytes).unwrap();
    assert_eq!(loaded, internal);
}
