//! Operation IR
//!
//! Every specialized operation of an enumeration type is first lowered to a
//! tiny typed SSA [`Program`]: a straight-line list of instructions ending in
//! a single `ret`. The program is the reference the bound kernels are
//! checked against; it does not run on the call path. It can be verified
//! ([`Program::verify`]), interpreted ([`Program::eval`]) and printed as a
//! listing (`Display`).
//!
//! Values flow through numbered registers (`%0`, `%1`, ...). Program
//! parameters are referred to as `%a0`, `%a1`, ...
use std::collections::BTreeSet;

use smallvec::SmallVec;
use strum::{EnumIs, EnumIter, IntoEnumIterator};

use crate::{
    compiler::OpCode,
    consts::NumericValue,
    types::{NumericKind, UnderlyingKind, cast::CastOp},
    utils::Error,
};

pub mod eval;
mod fmt;

pub use eval::Value;

/// SSA value identifier used to name the destination of an instruction.
pub type Name = u32;

/// Type of an IR value.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIs)]
pub enum Ty {
    /// The enumeration type the program is specialized for.
    Enum,
    Num(NumericKind),
    Bool,
    Str,
}

/// Instruction operand.
#[derive(Debug, Clone, PartialEq, EnumIs)]
pub enum Operand {
    /// Program parameter, by position.
    Arg(u32),
    /// Reference to a previously defined SSA value.
    Reg(Name),
    /// Immediate numeric literal.
    Imm(NumericValue),
}

/// Bitwise binary operator.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
pub enum BitOp {
    And,
    Or,
    Xor,
}

impl BitOp {
    pub fn from_str(s: &str) -> Option<Self> {
        BitOp::iter().find(|op| op.to_str() == s)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            BitOp::And => "and",
            BitOp::Or => "or",
            BitOp::Xor => "xor",
        }
    }

    /// Applies the operator to two integers of the same kind.
    pub fn apply(&self, lhs: NumericValue, rhs: NumericValue) -> Option<NumericValue> {
        match self {
            BitOp::And => lhs.bit_and(rhs),
            BitOp::Or => lhs.bit_or(rhs),
            BitOp::Xor => lhs.bit_xor(rhs),
        }
    }
}

/// One arm of a `switch` instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Exact strings selecting this arm.
    pub labels: SmallVec<Box<str>, 2>,
    /// Underlying representation of the enumeration value produced.
    pub value: NumericValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// Bit-preserving conversion between the enumeration and its underlying kind.
    Reinterpret { dest: Name, src: Operand, to: Ty },
    /// Numeric conversion with native cast semantics.
    Cast {
        dest: Name,
        op: CastOp,
        src: Operand,
        to: NumericKind,
    },
    Bitwise {
        dest: Name,
        op: BitOp,
        lhs: Operand,
        rhs: Operand,
    },
    Not { dest: Name, src: Operand },
    /// Equality comparison, produces a `bool`.
    ICmpEq {
        dest: Name,
        lhs: Operand,
        rhs: Operand,
    },
    /// Linear membership scan over a constant table, produces a `bool`.
    Member {
        dest: Name,
        src: Operand,
        table: Box<[NumericValue]>,
    },
    /// Exact string dispatch producing an enumeration value. Faults when no
    /// label matches.
    Switch {
        dest: Name,
        src: Operand,
        cases: Box<[SwitchCase]>,
    },
    Ret { src: Operand },
}

impl Instr {
    /// Name defined by the instruction, if any.
    pub fn destination(&self) -> Option<Name> {
        match self {
            Instr::Reinterpret { dest, .. }
            | Instr::Cast { dest, .. }
            | Instr::Bitwise { dest, .. }
            | Instr::Not { dest, .. }
            | Instr::ICmpEq { dest, .. }
            | Instr::Member { dest, .. }
            | Instr::Switch { dest, .. } => Some(*dest),
            Instr::Ret { .. } => None,
        }
    }

    /// Operands read by the instruction, in order.
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        let operands: SmallVec<&Operand, 2> = match self {
            Instr::Reinterpret { src, .. }
            | Instr::Cast { src, .. }
            | Instr::Not { src, .. }
            | Instr::Member { src, .. }
            | Instr::Switch { src, .. }
            | Instr::Ret { src } => smallvec::smallvec![src],
            Instr::Bitwise { lhs, rhs, .. } | Instr::ICmpEq { lhs, rhs, .. } => {
                smallvec::smallvec![lhs, rhs]
            }
        };
        operands.into_iter()
    }

    pub fn opname(&self) -> &'static str {
        match self {
            Instr::Reinterpret { .. } => "reinterpret",
            Instr::Cast { .. } => "cast",
            Instr::Bitwise { op, .. } => op.to_str(),
            Instr::Not { .. } => "not",
            Instr::ICmpEq { .. } => "icmp.eq",
            Instr::Member { .. } => "member",
            Instr::Switch { .. } => "switch",
            Instr::Ret { .. } => "ret",
        }
    }
}

/// A lowered operation, specialized to one enumeration type.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub opcode: OpCode,
    pub type_name: &'static str,
    pub underlying: UnderlyingKind,
    pub params: SmallVec<Ty, 2>,
    pub ret: Ty,
    pub body: Vec<Instr>,
}

impl Program {
    /// Identifier used in listings and error messages (`has_flag<Color>`).
    pub fn label(&self) -> String {
        format!("{}<{}>", self.opcode, self.type_name)
    }

    /// IR type holding the underlying representation.
    pub fn repr_ty(&self) -> Ty {
        Ty::Num(self.underlying.into())
    }

    /// Verifies the program:
    /// 1) each name is defined exactly once and before any use,
    /// 2) arguments are in range,
    /// 3) every operand has the type its instruction requires,
    /// 4) switch labels are unique,
    /// 5) the body ends with exactly one `ret` of the declared return type.
    pub fn verify(&self) -> Result<(), Error> {
        let mut types: Vec<(Name, Ty)> = Vec::with_capacity(self.body.len());
        let mut defined = BTreeSet::new();
        let repr = self.repr_ty();

        match self.body.last() {
            Some(Instr::Ret { .. }) => {}
            _ => return Err(self.missing_return()),
        }

        for (index, instr) in self.body.iter().enumerate() {
            let is_last = index + 1 == self.body.len();
            let operand_ty = |operand: &Operand| self.type_of(operand, &types);

            let produced = match instr {
                Instr::Reinterpret { src, to, .. } => {
                    let from = operand_ty(src)?;
                    match (from, *to) {
                        (Ty::Enum, to) if to == repr => to,
                        (from, Ty::Enum) if from == repr => Ty::Enum,
                        (Ty::Enum, _) => return Err(self.mismatch(repr, *to)),
                        _ => return Err(self.mismatch(Ty::Enum, from)),
                    }
                }
                Instr::Cast { op, src, to, .. } => {
                    let from = match operand_ty(src)? {
                        Ty::Num(kind) => kind,
                        other => return Err(self.mismatch_str("numeric", other)),
                    };
                    let expected = CastOp::between(from, *to);
                    if expected != *op {
                        return Err(Error::TypeMismatch {
                            program: self.label(),
                            expected: format!("cast.{}", expected),
                            found: format!("cast.{}", op),
                        });
                    }
                    Ty::Num(*to)
                }
                Instr::Bitwise { lhs, rhs, .. } => {
                    self.expect(operand_ty(lhs)?, repr)?;
                    self.expect(operand_ty(rhs)?, repr)?;
                    repr
                }
                Instr::Not { src, .. } => {
                    self.expect(operand_ty(src)?, repr)?;
                    repr
                }
                Instr::ICmpEq { lhs, rhs, .. } => {
                    let lhs = operand_ty(lhs)?;
                    let rhs = operand_ty(rhs)?;
                    if matches!(lhs, Ty::Bool | Ty::Str) {
                        return Err(self.mismatch_str("numeric or enum", lhs));
                    }
                    self.expect(rhs, lhs)?;
                    Ty::Bool
                }
                Instr::Member { src, table, .. } => {
                    self.expect(operand_ty(src)?, repr)?;
                    if let Some(entry) = table.iter().find(|v| Ty::Num(v.kind()) != repr) {
                        return Err(self.mismatch(repr, Ty::Num(entry.kind())));
                    }
                    Ty::Bool
                }
                Instr::Switch { src, cases, .. } => {
                    self.expect(operand_ty(src)?, Ty::Str)?;
                    let mut labels = BTreeSet::new();
                    for case in cases.iter() {
                        if Ty::Num(case.value.kind()) != repr {
                            return Err(self.mismatch(repr, Ty::Num(case.value.kind())));
                        }
                        for label in case.labels.iter() {
                            if !labels.insert(&**label) {
                                return Err(Error::DuplicateSwitchLabel {
                                    program: self.label(),
                                    label: label.to_string(),
                                });
                            }
                        }
                    }
                    Ty::Enum
                }
                Instr::Ret { src } => {
                    if !is_last {
                        return Err(self.missing_return());
                    }
                    self.expect(operand_ty(src)?, self.ret)?;
                    continue;
                }
            };

            if let Some(dest) = instr.destination() {
                if !defined.insert(dest) {
                    return Err(Error::DuplicateSSAName {
                        program: self.label(),
                        name: dest,
                    });
                }
                types.push((dest, produced));
            }
        }

        Ok(())
    }

    fn type_of(&self, operand: &Operand, types: &[(Name, Ty)]) -> Result<Ty, Error> {
        match operand {
            Operand::Arg(index) => {
                self.params
                    .get(*index as usize)
                    .copied()
                    .ok_or_else(|| Error::ArgumentOutOfRange {
                        program: self.label(),
                        index: *index,
                        count: self.params.len(),
                    })
            }
            Operand::Reg(name) => types
                .iter()
                .find(|(defined, _)| defined == name)
                .map(|(_, ty)| *ty)
                .ok_or_else(|| Error::UndefinedSSAName {
                    program: self.label(),
                    name: *name,
                }),
            Operand::Imm(value) => Ok(Ty::Num(value.kind())),
        }
    }

    fn expect(&self, found: Ty, expected: Ty) -> Result<(), Error> {
        if found == expected {
            Ok(())
        } else {
            Err(self.mismatch(expected, found))
        }
    }

    fn mismatch(&self, expected: Ty, found: Ty) -> Error {
        Error::TypeMismatch {
            program: self.label(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    fn mismatch_str(&self, expected: &str, found: Ty) -> Error {
        Error::TypeMismatch {
            program: self.label(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    fn missing_return(&self) -> Error {
        Error::MissingReturn {
            program: self.label(),
        }
    }
}

/// Appends instructions to a program under construction, allocating
/// sequential destination names.
pub struct ProgramBuilder {
    program: Program,
    next: Name,
}

impl ProgramBuilder {
    pub fn new(
        opcode: OpCode,
        type_name: &'static str,
        underlying: UnderlyingKind,
        params: &[Ty],
        ret: Ty,
    ) -> Self {
        Self {
            program: Program {
                opcode,
                type_name,
                underlying,
                params: params.iter().copied().collect(),
                ret,
                body: Vec::new(),
            },
            next: 0,
        }
    }

    fn fresh(&mut self) -> Name {
        let name = self.next;
        self.next += 1;
        name
    }

    fn push(&mut self, build: impl FnOnce(Name) -> Instr) -> Operand {
        let dest = self.fresh();
        self.program.body.push(build(dest));
        Operand::Reg(dest)
    }

    /// Enumeration value to underlying representation.
    pub fn to_repr(&mut self, src: Operand) -> Operand {
        let to = self.program.repr_ty();
        self.push(|dest| Instr::Reinterpret { dest, src, to })
    }

    /// Underlying representation to enumeration value.
    pub fn from_repr(&mut self, src: Operand) -> Operand {
        self.push(|dest| Instr::Reinterpret {
            dest,
            src,
            to: Ty::Enum,
        })
    }

    /// Converts `src` from `from` to `to`. Identity conversions emit nothing.
    pub fn cast(&mut self, src: Operand, from: NumericKind, to: NumericKind) -> Operand {
        match CastOp::between(from, to) {
            CastOp::Nop => src,
            op => self.push(|dest| Instr::Cast { dest, op, src, to }),
        }
    }

    pub fn bitwise(&mut self, op: BitOp, lhs: Operand, rhs: Operand) -> Operand {
        self.push(|dest| Instr::Bitwise { dest, op, lhs, rhs })
    }

    pub fn not(&mut self, src: Operand) -> Operand {
        self.push(|dest| Instr::Not { dest, src })
    }

    pub fn icmp_eq(&mut self, lhs: Operand, rhs: Operand) -> Operand {
        self.push(|dest| Instr::ICmpEq { dest, lhs, rhs })
    }

    pub fn member(&mut self, src: Operand, table: Box<[NumericValue]>) -> Operand {
        self.push(|dest| Instr::Member { dest, src, table })
    }

    pub fn switch(&mut self, src: Operand, cases: Box<[SwitchCase]>) -> Operand {
        self.push(|dest| Instr::Switch { dest, src, cases })
    }

    /// Terminates the program.
    pub fn ret(mut self, src: Operand) -> Program {
        self.program.body.push(Instr::Ret { src });
        self.program
    }

    /// Appends an arbitrary instruction. Used to construct malformed programs
    /// in tests.
    pub fn raw(mut self, instr: Instr) -> Self {
        self.program.body.push(instr);
        self
    }

    pub fn finish(self) -> Program {
        self.program
    }
}
