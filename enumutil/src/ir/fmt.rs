use std::fmt::{Display, Formatter, Result};

use crate::ir::{Instr, Operand, Program, Ty};

impl Display for Ty {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Ty::Enum => write!(f, "enum"),
            Ty::Num(kind) => write!(f, "{}", kind),
            Ty::Bool => write!(f, "bool"),
            Ty::Str => write!(f, "str"),
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Operand::Arg(index) => write!(f, "%a{}", index),
            Operand::Reg(name) => write!(f, "%{}", name),
            Operand::Imm(value) => write!(f, "{} {}", value.kind(), value),
        }
    }
}

impl Display for Instr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if let Some(dest) = self.destination() {
            write!(f, "%{} = ", dest)?;
        }

        match self {
            Instr::Reinterpret { src, to, .. } => write!(f, "reinterpret {} to {}", src, to),
            Instr::Cast { op, src, to, .. } => write!(f, "cast.{} {} to {}", op, src, to),
            Instr::Bitwise { op, lhs, rhs, .. } => write!(f, "{} {}, {}", op.to_str(), lhs, rhs),
            Instr::Not { src, .. } => write!(f, "not {}", src),
            Instr::ICmpEq { lhs, rhs, .. } => write!(f, "icmp.eq {}, {}", lhs, rhs),
            Instr::Member { src, table, .. } => {
                write!(f, "member {} [", src)?;
                for (i, value) in table.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Instr::Switch { src, cases, .. } => {
                writeln!(f, "switch {} {{", src)?;
                for case in cases.iter() {
                    write!(f, "    ")?;
                    for (i, label) in case.labels.iter().enumerate() {
                        if i > 0 {
                            write!(f, " | ")?;
                        }
                        write!(f, "{:?}", label)?;
                    }
                    writeln!(f, " => {}", case.value)?;
                }
                write!(f, "  }} else fault")
            }
            Instr::Ret { src } => write!(f, "ret {}", src),
        }
    }
}

/// Prints the program as a listing:
///
/// ```text
/// define bool @has_flag<Flags: u8>(enum %a0, enum %a1) {
///   %0 = reinterpret %a0 to u8
///   ...
///   ret %3
/// }
/// ```
impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "define {} @{}<{}: {}>(",
            self.ret, self.opcode, self.type_name, self.underlying
        )?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} %a{}", param, i)?;
        }
        writeln!(f, ") {{")?;
        for instr in &self.body {
            writeln!(f, "  {}", instr)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        compiler::OpCode,
        ir::{BitOp, Operand, ProgramBuilder, Ty},
        types::{NumericKind, UnderlyingKind},
    };

    #[test]
    fn listing_of_has_flag() {
        let mut b = ProgramBuilder::new(
            OpCode::HasFlag,
            "Flags",
            UnderlyingKind::U8,
            &[Ty::Enum, Ty::Enum],
            Ty::Bool,
        );
        let value = b.to_repr(Operand::Arg(0));
        let flag = b.to_repr(Operand::Arg(1));
        let masked = b.bitwise(BitOp::And, value, flag.clone());
        let eq = b.icmp_eq(masked, flag);
        let program = b.ret(eq);

        let expected = "\
define bool @has_flag<Flags: u8>(enum %a0, enum %a1) {
  %0 = reinterpret %a0 to u8
  %1 = reinterpret %a1 to u8
  %2 = and %0, %1
  %3 = icmp.eq %2, %1
  ret %3
}";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn listing_of_cast() {
        let mut b = ProgramBuilder::new(
            OpCode::FromNumeric(NumericKind::F64),
            "Flags",
            UnderlyingKind::I16,
            &[Ty::Num(NumericKind::F64)],
            Ty::Enum,
        );
        let repr = b.cast(Operand::Arg(0), NumericKind::F64, NumericKind::I16);
        let value = b.from_repr(repr);
        let program = b.ret(value);

        assert!(program.to_string().contains("%0 = cast.fptosi %a0 to i16"));
        assert!(
            program
                .to_string()
                .starts_with("define enum @from_numeric.f64<Flags: i16>(f64 %a0)")
        );
    }
}
