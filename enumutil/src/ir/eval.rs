//! Reference interpreter for [`Program`]s.
//!
//! The interpreter is slow and allocates; it exists to give every lowered
//! program an executable meaning that bound kernels can be checked against.
use std::collections::BTreeMap;

use strum::EnumIs;

use crate::{
    consts::NumericValue,
    ir::{Instr, Name, Operand, Program, Ty},
    utils::Error,
};

/// A runtime value of the interpreter.
#[derive(Debug, Clone, PartialEq, EnumIs)]
pub enum Value {
    /// Enumeration value, carried as its underlying representation.
    Enum(NumericValue),
    Num(NumericValue),
    Bool(bool),
    Str(Box<str>),
}

impl Value {
    pub fn ty(&self) -> Ty {
        match self {
            Value::Enum(_) => Ty::Enum,
            Value::Num(value) => Ty::Num(value.kind()),
            Value::Bool(_) => Ty::Bool,
            Value::Str(_) => Ty::Str,
        }
    }

    fn numeric(&self) -> Option<NumericValue> {
        match self {
            Value::Enum(value) | Value::Num(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Enum(value) => write!(f, "enum {}", value),
            Value::Num(value) => write!(f, "{} {}", value.kind(), value),
            Value::Bool(value) => write!(f, "bool {}", value),
            Value::Str(value) => write!(f, "str {:?}", value),
        }
    }
}

impl Program {
    /// Runs the program on `args`.
    ///
    /// The program is expected to have been verified; malformed programs
    /// report a type mismatch rather than panicking. A `switch` without a
    /// matching label fails with [`Error::ParseFailure`].
    pub fn eval(&self, args: &[Value]) -> Result<Value, Error> {
        if args.len() != self.params.len() {
            return Err(Error::ArgumentOutOfRange {
                program: self.label(),
                index: args.len() as u32,
                count: self.params.len(),
            });
        }

        let mut registers: BTreeMap<Name, Value> = BTreeMap::new();

        for instr in &self.body {
            let read = |operand: &Operand| -> Result<Value, Error> {
                match operand {
                    Operand::Arg(index) => args.get(*index as usize).cloned().ok_or_else(|| {
                        Error::ArgumentOutOfRange {
                            program: self.label(),
                            index: *index,
                            count: args.len(),
                        }
                    }),
                    Operand::Reg(name) => {
                        registers
                            .get(name)
                            .cloned()
                            .ok_or_else(|| Error::UndefinedSSAName {
                                program: self.label(),
                                name: *name,
                            })
                    }
                    Operand::Imm(value) => Ok(Value::Num(*value)),
                }
            };
            let numeric = |operand: &Operand| -> Result<NumericValue, Error> {
                let value = read(operand)?;
                value
                    .numeric()
                    .ok_or_else(|| self.unexpected("numeric", &value))
            };

            let result = match instr {
                Instr::Reinterpret { src, to, .. } => {
                    let value = numeric(src)?;
                    match to {
                        Ty::Enum => Value::Enum(value),
                        _ => Value::Num(value),
                    }
                }
                Instr::Cast { src, to, .. } => Value::Num(numeric(src)?.cast(*to)),
                Instr::Bitwise { op, lhs, rhs, .. } => {
                    let (lhs, rhs) = (numeric(lhs)?, numeric(rhs)?);
                    let value = op
                        .apply(lhs, rhs)
                        .ok_or_else(|| self.unexpected("integer", &Value::Num(rhs)))?;
                    Value::Num(value)
                }
                Instr::Not { src, .. } => {
                    let value = numeric(src)?;
                    Value::Num(
                        value
                            .bit_not()
                            .ok_or_else(|| self.unexpected("integer", &Value::Num(value)))?,
                    )
                }
                Instr::ICmpEq { lhs, rhs, .. } => Value::Bool(numeric(lhs)? == numeric(rhs)?),
                Instr::Member { src, table, .. } => {
                    let value = numeric(src)?;
                    Value::Bool(table.iter().any(|entry| *entry == value))
                }
                Instr::Switch { src, cases, .. } => {
                    let input = match read(src)? {
                        Value::Str(input) => input,
                        other => return Err(self.unexpected("str", &other)),
                    };
                    let case = cases
                        .iter()
                        .find(|case| case.labels.iter().any(|label| **label == *input))
                        .ok_or_else(|| Error::ParseFailure {
                            type_name: self.type_name.to_string(),
                            input: input.to_string(),
                        })?;
                    Value::Enum(case.value)
                }
                Instr::Ret { src } => return read(src),
            };

            if let Some(dest) = instr.destination() {
                registers.insert(dest, result);
            }
        }

        Err(Error::MissingReturn {
            program: self.label(),
        })
    }

    fn unexpected(&self, expected: &str, found: &Value) -> Error {
        Error::TypeMismatch {
            program: self.label(),
            expected: expected.to_string(),
            found: found.ty().to_string(),
        }
    }
}
