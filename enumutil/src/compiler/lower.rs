//! Front-end: lowers every opcode of an enumeration type to a [`Program`].
use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::{
    compiler::OpCode,
    consts::NumericValue,
    ir::{BitOp, Operand, Program, ProgramBuilder, SwitchCase, Ty},
    types::{NumericKind, UnderlyingKind},
};

/// The part of an enumeration's metadata the front-end consumes.
#[derive(Debug, Clone)]
pub struct LoweringInput<'a> {
    pub type_name: &'static str,
    pub underlying: UnderlyingKind,
    /// Declared members, in declaration order, with values of kind `underlying`.
    pub members: &'a [(&'static str, NumericValue)],
}

/// Lowers every opcode, in [`OpCode::all`] order.
pub fn lower_all(input: &LoweringInput<'_>) -> Vec<Program> {
    OpCode::all().map(|opcode| lower(input, opcode)).collect()
}

pub fn lower(input: &LoweringInput<'_>, opcode: OpCode) -> Program {
    let repr: NumericKind = input.underlying.into();
    let builder = |params: &[Ty], ret: Ty| {
        ProgramBuilder::new(opcode, input.type_name, input.underlying, params, ret)
    };

    match opcode {
        OpCode::BitwiseOr | OpCode::BitwiseAnd | OpCode::BitwiseXor => {
            let op = match opcode {
                OpCode::BitwiseOr => BitOp::Or,
                OpCode::BitwiseAnd => BitOp::And,
                _ => BitOp::Xor,
            };
            let mut b = builder(&[Ty::Enum, Ty::Enum], Ty::Enum);
            let lhs = b.to_repr(Operand::Arg(0));
            let rhs = b.to_repr(Operand::Arg(1));
            let value = b.bitwise(op, lhs, rhs);
            let result = b.from_repr(value);
            b.ret(result)
        }
        OpCode::BitwiseNot => {
            let mut b = builder(&[Ty::Enum], Ty::Enum);
            let value = b.to_repr(Operand::Arg(0));
            let inverted = b.not(value);
            let result = b.from_repr(inverted);
            b.ret(result)
        }
        OpCode::HasFlag => {
            // (value & flag) == flag, trivially true for a zero flag
            let mut b = builder(&[Ty::Enum, Ty::Enum], Ty::Bool);
            let value = b.to_repr(Operand::Arg(0));
            let flag = b.to_repr(Operand::Arg(1));
            let masked = b.bitwise(BitOp::And, value, flag.clone());
            let result = b.icmp_eq(masked, flag);
            b.ret(result)
        }
        OpCode::UnsetFlag => {
            let mut b = builder(&[Ty::Enum, Ty::Enum], Ty::Enum);
            let value = b.to_repr(Operand::Arg(0));
            let flag = b.to_repr(Operand::Arg(1));
            let inverted = b.not(flag);
            let masked = b.bitwise(BitOp::And, value, inverted);
            let result = b.from_repr(masked);
            b.ret(result)
        }
        OpCode::ToNumeric(kind) => {
            let mut b = builder(&[Ty::Enum], Ty::Num(kind));
            let value = b.to_repr(Operand::Arg(0));
            let result = b.cast(value, repr, kind);
            b.ret(result)
        }
        OpCode::FromNumeric(kind) => {
            let mut b = builder(&[Ty::Num(kind)], Ty::Enum);
            let value = b.cast(Operand::Arg(0), kind, repr);
            let result = b.from_repr(value);
            b.ret(result)
        }
        OpCode::IsDefined(kind) => {
            let mut b = builder(&[Ty::Num(kind)], Ty::Bool);
            let value = b.cast(Operand::Arg(0), kind, repr);
            let table = input.members.iter().map(|(_, value)| *value).collect();
            let result = b.member(value, table);
            b.ret(result)
        }
        OpCode::QuickParse => {
            let mut b = builder(&[Ty::Str], Ty::Enum);
            let result = b.switch(Operand::Arg(0), quick_parse_cases(input.members));
            b.ret(result)
        }
    }
}

/// One case per member, labelled with its name and the decimal form of its
/// value. A label already taken by an earlier member is dropped.
fn quick_parse_cases(members: &[(&'static str, NumericValue)]) -> Box<[SwitchCase]> {
    let mut taken = BTreeSet::new();
    let mut cases = Vec::with_capacity(members.len());

    for (name, value) in members {
        let mut labels: SmallVec<Box<str>, 2> = SmallVec::new();
        for label in [name.to_string(), value.to_string()] {
            if taken.insert(label.clone()) {
                labels.push(label.into_boxed_str());
            }
        }
        if !labels.is_empty() {
            cases.push(SwitchCase {
                labels,
                value: *value,
            });
        }
    }

    cases.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Instr, Value};

    const MEMBERS: &[(&str, NumericValue)] = &[
        ("One", NumericValue::U8(1)),
        ("Two", NumericValue::U8(2)),
        ("Deux", NumericValue::U8(2)),
        ("Four", NumericValue::U8(4)),
    ];

    fn input() -> LoweringInput<'static> {
        LoweringInput {
            type_name: "Sample",
            underlying: UnderlyingKind::U8,
            members: MEMBERS,
        }
    }

    #[test]
    fn every_program_verifies() {
        let programs = lower_all(&input());
        assert_eq!(programs.len(), OpCode::COUNT);
        for (program, opcode) in programs.iter().zip(OpCode::all()) {
            assert_eq!(program.opcode, opcode);
            program.verify().unwrap();
        }
    }

    #[test]
    fn identity_conversions_emit_no_cast() {
        let program = lower(&input(), OpCode::ToNumeric(NumericKind::U8));
        assert!(!program.body.iter().any(|i| matches!(i, Instr::Cast { .. })));

        let program = lower(&input(), OpCode::ToNumeric(NumericKind::I8));
        assert!(program.body.iter().any(|i| matches!(i, Instr::Cast { .. })));
    }

    #[test]
    fn quick_parse_first_declaration_wins() {
        let program = lower(&input(), OpCode::QuickParse);
        let Some(Instr::Switch { cases, .. }) = program.body.first() else {
            panic!("expected a switch, got:\n{program}");
        };
        let deux = cases.iter().find(|c| c.labels.iter().any(|l| &**l == "Deux"));
        assert_eq!(deux.map(|c| c.labels.len()), Some(1));

        let parse = |s: &str| program.eval(&[Value::Str(s.into())]);
        assert_eq!(parse("2"), Ok(Value::Enum(NumericValue::U8(2))));
        assert_eq!(parse("Deux"), Ok(Value::Enum(NumericValue::U8(2))));
        assert!(parse("6").unwrap_err().is_parse_failure());
    }

    #[test]
    fn has_flag_of_zero_is_true() {
        let program = lower(&input(), OpCode::HasFlag);
        let out = program
            .eval(&[
                Value::Enum(NumericValue::U8(6)),
                Value::Enum(NumericValue::U8(0)),
            ])
            .unwrap();
        assert_eq!(out, Value::Bool(true));
    }

    #[test]
    fn is_defined_converts_before_scanning() {
        let program = lower(&input(), OpCode::IsDefined(NumericKind::F64));
        let defined = |v: f64| program.eval(&[Value::Num(NumericValue::F64(v))]).unwrap();
        assert_eq!(defined(4.0), Value::Bool(true));
        assert_eq!(defined(4.5), Value::Bool(true));
        assert_eq!(defined(3.0), Value::Bool(false));
        assert_eq!(defined(0.0), Value::Bool(false));
    }
}
