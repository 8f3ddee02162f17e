mod common;

use common::*;
use enumutil::*;

#[test]
fn powers_of_two_scenario() {
    let six = bitwise_or(U8Enum::Two, U8Enum::Four);
    assert_eq!(six.bits(), 6);
    assert!(has_flag(six, U8Enum::Four));
    assert!(!has_flag(six, U8Enum::One));
    assert_eq!(unset_flag(six, U8Enum::Two), U8Enum::Four);
}

#[test]
fn operators_delegate_to_the_compiled_set() {
    let rw = Permissions::Read | Permissions::Write;
    assert_eq!(rw, Permissions::ReadWrite);
    assert_eq!(rw & Permissions::Write, Permissions::Write);
    assert_eq!(rw ^ Permissions::Read, Permissions::Write);
    assert_eq!((!Permissions::None).bits(), u16::MAX);
    assert_eq!(!Signed::Zero, Signed::Minus);
}

#[test]
fn zero_flag_is_always_set() {
    assert!(has_flag(Permissions::None, Permissions::None));
    assert!(has_flag(Permissions::Execute, Permissions::None));
    assert!(has_flag(Empty::default(), Empty::default()));
}

#[test]
fn flag_laws() {
    let values = [
        Permissions::None,
        Permissions::Read,
        Permissions::ReadWrite,
        Permissions::All,
        Permissions::from_bits(0x8010),
    ];
    for &v in &values {
        for &f in &values {
            assert!(has_flag(set_flag(v, f), f), "{v:?} | {f:?}");
            assert_eq!(
                has_flag(unset_flag(v, f), f),
                f == Permissions::None,
                "{v:?} & !{f:?}"
            );
            assert_eq!(unset_flag(unset_flag(v, f), f), unset_flag(v, f));
        }
        assert_eq!(bitwise_or(v, v), v);
        assert_eq!(bitwise_and(v, v), v);
        assert_eq!(bitwise_xor(v, v), Permissions::None);
        assert_eq!(bitwise_not(bitwise_not(v)), v);
    }
}

#[test]
fn toggling() {
    let value = Permissions::Read;
    assert_eq!(toggle_flag(value, Permissions::Write), Permissions::ReadWrite);
    assert_eq!(toggle_flag(Permissions::ReadWrite, Permissions::Write), value);

    assert_eq!(
        toggle_flag_to(value, Permissions::Write, true),
        Permissions::ReadWrite
    );
    assert_eq!(toggle_flag_to(value, Permissions::Write, false), value);
    assert_eq!(
        toggle_flag_to(Permissions::All, Permissions::Read, false),
        Permissions::from_bits(6)
    );
}

#[test]
fn signed_representations() {
    assert!(has_flag(Signed::Minus, Signed::Max));
    assert_eq!(unset_flag(Signed::Minus, Signed::Max).bits(), i16::MIN);
    assert_eq!(bitwise_and(Signed::Minus, Signed::Max), Signed::Max);

    assert_eq!(bitwise_or(I64Enum::Eight, I64Enum::One).bits(), 9);
    assert_eq!(bitwise_not(I8Enum::One).bits(), -2);
}

#[test]
fn wide_representation_keeps_the_high_bit() {
    let both = Wide::Low | Wide::High;
    assert_eq!(both.bits(), (1 << 63) | 1);
    assert!(has_flag(both, Wide::High));
    assert_eq!(unset_flag(both, Wide::Low), Wide::High);
}
