mod common;

use common::*;
use enumutil::{Error, unchecked};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Plain(u8);

#[test]
fn declared_types_are_registered() {
    let registered: Vec<_> = unchecked::registered().collect();
    for name in ["Permissions", "Signed", "Wide", "Empty", "U8Enum", "I64Enum"] {
        assert!(registered.contains(&name), "{} missing from {:?}", name, registered);
    }
}

#[test]
fn registered_types_behave_like_the_typed_facade() {
    assert_eq!(
        unchecked::bitwise_or(Permissions::Read, Permissions::Write),
        Ok(Permissions::ReadWrite)
    );
    assert_eq!(
        unchecked::unset_flag(Permissions::All, Permissions::Write),
        Ok(Permissions::from_bits(5))
    );
    assert_eq!(unchecked::has_flag(Permissions::All, Permissions::Execute), Ok(true));
    assert_eq!(unchecked::to_numeric::<_, i64>(Signed::Minus), Ok(-1));
    assert_eq!(unchecked::from_numeric::<Signed, f64>(32767.0), Ok(Signed::Max));
    assert_eq!(unchecked::is_defined_numeric::<U8Enum, u64>(4), Ok(true));
    assert_eq!(unchecked::quick_parse::<Wide>("High"), Ok(Wide::High));
    assert_eq!(unchecked::names::<Wide>(), Ok(vec!["Low", "High"]));

    let operations = unchecked::operations::<Permissions>().unwrap();
    assert!(std::ptr::eq(operations, <Permissions as enumutil::Enumeration>::operations()));
    assert_eq!(
        operations.to_numeric::<u8>(Permissions::All),
        enumutil::to_numeric::<_, u8>(Permissions::All)
    );
    assert_eq!(
        unchecked::metadata::<Permissions>().unwrap().underlying(),
        enumutil::UnderlyingKind::U16
    );
}

#[test]
fn quick_parse_failures_are_not_initialization_failures() {
    let error = unchecked::quick_parse::<U16Enum>("Three").unwrap_err();
    assert!(error.is_parse_failure());
}

fn assert_not_an_enumeration(error: Error, expected: &str) {
    match error {
        Error::Initialization { type_name, source } => {
            assert!(type_name.ends_with(expected), "{}", type_name);
            assert!(source.is_not_an_enumeration(), "{}", source);
        }
        other => panic!("expected an initialization failure, got {other:?}"),
    }
}

#[test]
fn undeclared_types_fail_every_time() {
    for _ in 0..3 {
        assert_not_an_enumeration(unchecked::operations::<Plain>().unwrap_err(), "Plain");
        assert_not_an_enumeration(unchecked::bitwise_or(Plain(1), Plain(2)).unwrap_err(), "Plain");
        assert_not_an_enumeration(unchecked::quick_parse::<Plain>("1").unwrap_err(), "Plain");
    }

    assert_not_an_enumeration(unchecked::to_numeric::<u32, f64>(7).unwrap_err(), "u32");
    assert_not_an_enumeration(unchecked::names::<bool>().unwrap_err(), "bool");
    assert_eq!(
        unchecked::operations::<u32>().unwrap_err(),
        unchecked::operations::<u32>().unwrap_err()
    );
}

#[test]
fn failure_message_names_the_type() {
    let message = unchecked::metadata::<Plain>().unwrap_err().to_string();
    assert!(message.contains("Plain"), "{}", message);
    assert!(message.contains("enumeration!"), "{}", message);

    // unrelated failures leave the typed facade alone
    assert_eq!(enumutil::to_numeric::<_, f32>(U32Enum::Four), 4.0);
}
