//! Cross-checks bound kernels against the interpreter.
use crate::{
    Enumeration,
    compiler::{CompiledOperationSet, OpCode},
    ir::{Program, Value},
    numeric::{Numeric, Underlying, dispatch_numeric},
    utils::Error,
};

/// Number of declared members sampled.
const MEMBER_SAMPLES: usize = 16;

fn enum_value<T: Enumeration>(value: T) -> Value {
    Value::Enum(value.to_repr().into_value())
}

/// Runs `program` on `args` and compares with what the kernel produced.
fn compare(program: &Program, args: &[Value], kernel: Result<Value, Error>) -> Result<(), Error> {
    let expected = program.eval(args);
    let agrees = match (&kernel, &expected) {
        (Ok(kernel), Ok(expected)) => kernel == expected,
        (Err(kernel), Err(expected)) => kernel.is_parse_failure() && expected.is_parse_failure(),
        _ => false,
    };
    if agrees {
        return Ok(());
    }

    let render = |result: &Result<Value, Error>| match result {
        Ok(value) => value.to_string(),
        Err(error) => format!("error ({error})"),
    };
    let input: Vec<_> = args.iter().map(Value::to_string).collect();
    Err(Error::LoweringMismatch {
        type_name: program.type_name.to_string(),
        program: program.label(),
        input: format!("({})", input.join(", ")),
        kernel: render(&kernel),
        program_result: render(&expected),
    })
}

/// Checks every kernel of `ops` on the first declared members, the zero
/// value and the all-ones value.
pub(super) fn self_check<T: Enumeration>(ops: &CompiledOperationSet<T>) -> Result<(), Error> {
    let metadata = ops.metadata();
    let mut samples: Vec<T> = metadata.values().take(MEMBER_SAMPLES).collect();
    samples.push(T::from_repr(T::Repr::ZERO));
    samples.push(T::from_repr(!T::Repr::ZERO));

    for program in ops.programs() {
        match program.opcode {
            OpCode::BitwiseOr
            | OpCode::BitwiseAnd
            | OpCode::BitwiseXor
            | OpCode::HasFlag
            | OpCode::UnsetFlag => {
                for &lhs in &samples {
                    for &rhs in &samples {
                        let args = [enum_value(lhs), enum_value(rhs)];
                        let kernel = match program.opcode {
                            OpCode::BitwiseOr => enum_value((ops.bitwise_or)(lhs, rhs)),
                            OpCode::BitwiseAnd => enum_value((ops.bitwise_and)(lhs, rhs)),
                            OpCode::BitwiseXor => enum_value((ops.bitwise_xor)(lhs, rhs)),
                            OpCode::HasFlag => Value::Bool((ops.has_flag)(lhs, rhs)),
                            _ => enum_value((ops.unset_flag)(lhs, rhs)),
                        };
                        compare(program, &args, Ok(kernel))?;
                    }
                }
            }
            OpCode::BitwiseNot => {
                for &value in &samples {
                    let kernel = enum_value((ops.bitwise_not)(value));
                    compare(program, &[enum_value(value)], Ok(kernel))?;
                }
            }
            OpCode::ToNumeric(kind) => {
                for &value in &samples {
                    let kernel = dispatch_numeric!(kind, N => N::to_kernel(ops)(value).into_value());
                    compare(program, &[enum_value(value)], Ok(Value::Num(kernel)))?;
                }
            }
            OpCode::FromNumeric(kind) | OpCode::IsDefined(kind) => {
                for &value in &samples {
                    let input = value.to_repr().into_value().cast(kind);
                    let kernel = dispatch_numeric!(kind, N => {
                        let Some(input) = N::from_value(input) else {
                            continue;
                        };
                        match program.opcode {
                            OpCode::IsDefined(_) => Value::Bool(N::is_defined_kernel(ops)(input)),
                            _ => enum_value(N::from_kernel(ops)(input)),
                        }
                    });
                    compare(program, &[Value::Num(input)], Ok(kernel))?;
                }
            }
            OpCode::QuickParse => {
                let inputs = metadata
                    .names()
                    .map(str::to_string)
                    .chain(samples.iter().map(|value| value.to_repr().to_string()))
                    .chain([String::new()]);
                for input in inputs {
                    let kernel = ops.quick_parse(&input).map(enum_value);
                    compare(program, &[Value::Str(input.into_boxed_str())], kernel)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compiler::lower, consts::NumericValue, ir::Ty, types::UnderlyingKind};

    #[test]
    fn disagreement_is_reported() {
        let members = [("One", NumericValue::U8(1))];
        let program = lower::lower(
            &lower::LoweringInput {
                type_name: "Sample",
                underlying: UnderlyingKind::U8,
                members: &members,
            },
            OpCode::BitwiseNot,
        );
        assert_eq!(program.params.as_slice(), &[Ty::Enum]);

        let args = [Value::Enum(NumericValue::U8(1))];
        compare(&program, &args, Ok(Value::Enum(NumericValue::U8(254)))).unwrap();

        let error = compare(&program, &args, Ok(Value::Enum(NumericValue::U8(1)))).unwrap_err();
        assert_eq!(
            error,
            Error::LoweringMismatch {
                type_name: "Sample".to_string(),
                program: "bitwise_not<Sample>".to_string(),
                input: "(enum 1)".to_string(),
                kernel: "enum 1".to_string(),
                program_result: "enum 254".to_string(),
            }
        );
    }
}
