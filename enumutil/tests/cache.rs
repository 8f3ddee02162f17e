mod common;

use common::*;
use enumutil::{
    compiler::{self, OpCode},
    config::Settings,
    *,
};

#[test]
fn slots_are_built_once() {
    let first = I32Enum::operations();
    let second = I32Enum::operations();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first.metadata(), I32Enum::metadata()));
    assert!(I32Enum::slot().is_compiled());
}

#[test]
fn concurrent_first_use_observes_one_instance() {
    let addresses: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let operations = U32Enum::operations();
                    assert!(has_flag(U32Enum::Eight, U32Enum::Eight));
                    operations as *const _ as usize
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn metadata_is_captured_verbatim() {
    let metadata = Signed::metadata();
    assert_eq!(metadata.type_name(), "Signed");
    assert_eq!(metadata.underlying(), UnderlyingKind::I16);
    assert!(!metadata.is_flags());
    assert_eq!(metadata.len(), 4);
    assert_eq!(metadata.members()[3].value.bits(), i16::MAX);
    assert_eq!(metadata.find_ignore_case("ALIAS").map(|m| m.value), Some(Signed::Minus));
}

#[test]
fn every_opcode_has_a_verified_program() {
    let operations = Permissions::operations();
    assert_eq!(operations.programs().len(), OpCode::COUNT);
    for opcode in OpCode::all() {
        let program = operations.program(opcode);
        assert_eq!(program.opcode, opcode);
        assert_eq!(program.type_name, "Permissions");
        program.verify().unwrap();
    }

    let listing = operations.program(OpCode::ToNumeric(NumericKind::I64)).to_string();
    assert!(listing.starts_with("define i64 @to_numeric.i64<Permissions: u16>(enum %a0)"));
    assert!(listing.contains("cast.zext %0 to i64"));
}

#[test]
fn compile_with_self_check() {
    let settings = Settings {
        verify_programs: true,
        self_check: true,
        log_listings: true,
    };
    compiler::compile::<U8Enum>(U8Enum::metadata(), &settings).unwrap();
    compiler::compile::<I8Enum>(I8Enum::metadata(), &settings).unwrap();
    compiler::compile::<U64Enum>(U64Enum::metadata(), &settings).unwrap();
    compiler::compile::<I64Enum>(I64Enum::metadata(), &settings).unwrap();
    compiler::compile::<Signed>(Signed::metadata(), &settings).unwrap();
    compiler::compile::<Wide>(Wide::metadata(), &settings).unwrap();
    compiler::compile::<Permissions>(Permissions::metadata(), &settings).unwrap();
    compiler::compile::<Empty>(Empty::metadata(), &settings).unwrap();
}

#[test]
fn configure_after_first_use_is_rejected() {
    let _ = U16Enum::operations();
    assert_eq!(
        config::configure(Settings::default()),
        Err(Error::AlreadyConfigured)
    );
}
