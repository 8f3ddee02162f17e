//! Specialization compiler
//!
//! [`compile`] turns the metadata of an enumeration type into a
//! [`CompiledOperationSet`]:
//!
//! 1. **Lowering**: one [`Program`] per [`OpCode`] ([`lower`]).
//! 2. **Verification**: every program is checked by [`Program::verify`].
//! 3. **Binding**: every opcode is bound to a monomorphized kernel whose
//!    signature must match the program's; the quick-parse dispatch table is
//!    built from the program's `switch`.
//! 4. **Self-check** (optional): kernels are cross-checked against the
//!    interpreter on sample inputs.
use std::{collections::HashMap, time::Instant};

use log::{debug, trace};
use smallvec::{SmallVec, smallvec};

use crate::{
    Enumeration,
    config::Settings,
    consts::NumericValue,
    ir::{Instr, Program, Ty},
    metadata::EnumTypeMetadata,
    numeric::{Numeric, Underlying},
    utils::Error,
};

mod check;
pub mod kernels;
pub mod lower;
mod opcode;

pub use opcode::OpCode;

/// Specialized operations of one enumeration type.
///
/// Built once per type and shared by every caller for the rest of the
/// process.
pub struct CompiledOperationSet<T: 'static> {
    type_name: &'static str,
    metadata: &'static EnumTypeMetadata<T>,
    programs: Box<[Program]>,
    quick_parse: HashMap<Box<str>, T>,

    pub(crate) bitwise_or: fn(T, T) -> T,
    pub(crate) bitwise_and: fn(T, T) -> T,
    pub(crate) bitwise_xor: fn(T, T) -> T,
    pub(crate) bitwise_not: fn(T) -> T,
    pub(crate) has_flag: fn(T, T) -> bool,
    pub(crate) unset_flag: fn(T, T) -> T,

    pub(crate) to_u8: fn(T) -> u8,
    pub(crate) to_i8: fn(T) -> i8,
    pub(crate) to_u16: fn(T) -> u16,
    pub(crate) to_i16: fn(T) -> i16,
    pub(crate) to_u32: fn(T) -> u32,
    pub(crate) to_i32: fn(T) -> i32,
    pub(crate) to_u64: fn(T) -> u64,
    pub(crate) to_i64: fn(T) -> i64,
    pub(crate) to_f32: fn(T) -> f32,
    pub(crate) to_f64: fn(T) -> f64,

    pub(crate) from_u8: fn(u8) -> T,
    pub(crate) from_i8: fn(i8) -> T,
    pub(crate) from_u16: fn(u16) -> T,
    pub(crate) from_i16: fn(i16) -> T,
    pub(crate) from_u32: fn(u32) -> T,
    pub(crate) from_i32: fn(i32) -> T,
    pub(crate) from_u64: fn(u64) -> T,
    pub(crate) from_i64: fn(i64) -> T,
    pub(crate) from_f32: fn(f32) -> T,
    pub(crate) from_f64: fn(f64) -> T,

    pub(crate) is_defined_u8: fn(u8) -> bool,
    pub(crate) is_defined_i8: fn(i8) -> bool,
    pub(crate) is_defined_u16: fn(u16) -> bool,
    pub(crate) is_defined_i16: fn(i16) -> bool,
    pub(crate) is_defined_u32: fn(u32) -> bool,
    pub(crate) is_defined_i32: fn(i32) -> bool,
    pub(crate) is_defined_u64: fn(u64) -> bool,
    pub(crate) is_defined_i64: fn(i64) -> bool,
    pub(crate) is_defined_f32: fn(f32) -> bool,
    pub(crate) is_defined_f64: fn(f64) -> bool,
}

impl<T: Copy + 'static> CompiledOperationSet<T> {
    /// Name of the enumeration type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn bitwise_or(&self, lhs: T, rhs: T) -> T {
        (self.bitwise_or)(lhs, rhs)
    }

    #[inline]
    pub fn bitwise_and(&self, lhs: T, rhs: T) -> T {
        (self.bitwise_and)(lhs, rhs)
    }

    #[inline]
    pub fn bitwise_xor(&self, lhs: T, rhs: T) -> T {
        (self.bitwise_xor)(lhs, rhs)
    }

    #[inline]
    pub fn bitwise_not(&self, value: T) -> T {
        (self.bitwise_not)(value)
    }

    /// `(value & flag) == flag`. Always `true` for the zero flag.
    #[inline]
    pub fn has_flag(&self, value: T, flag: T) -> bool {
        (self.has_flag)(value, flag)
    }

    #[inline]
    pub fn unset_flag(&self, value: T, flag: T) -> T {
        (self.unset_flag)(value, flag)
    }

    /// Converts `value` to `N` with native cast semantics.
    #[inline]
    pub fn to_numeric<N: Numeric>(&self, value: T) -> N {
        N::to_kernel(self)(value)
    }

    /// Converts `value` to `T` with native cast semantics. The result may
    /// have no declared name.
    #[inline]
    pub fn from_numeric<N: Numeric>(&self, value: N) -> T {
        N::from_kernel(self)(value)
    }

    /// Converts `value` to the underlying representation, then tests exact
    /// membership. Undeclared flag combinations are not members.
    #[inline]
    pub fn is_defined_numeric<N: Numeric>(&self, value: N) -> bool {
        N::is_defined_kernel(self)(value)
    }

    /// Exact match against member names and the decimal form of member
    /// values.
    pub fn quick_parse(&self, input: &str) -> Result<T, Error> {
        self.quick_parse
            .get(input)
            .copied()
            .ok_or_else(|| Error::ParseFailure {
                type_name: self.type_name.to_string(),
                input: input.to_string(),
            })
    }

    pub fn metadata(&self) -> &'static EnumTypeMetadata<T> {
        self.metadata
    }

    /// The lowered program `opcode` was bound for.
    pub fn program(&self, opcode: OpCode) -> &Program {
        &self.programs[opcode.index()]
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }
}

impl<T: Copy + PartialEq> std::fmt::Debug for CompiledOperationSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledOperationSet")
            .field("type_name", &self.type_name)
            .field("underlying", &self.metadata.underlying())
            .field("programs", &self.programs.len())
            .field("quick_parse", &self.quick_parse.len())
            .finish_non_exhaustive()
    }
}

/// Parameter and return types of the kernel bound for `opcode`.
fn signature(opcode: OpCode) -> (SmallVec<Ty, 2>, Ty) {
    match opcode {
        OpCode::BitwiseOr | OpCode::BitwiseAnd | OpCode::BitwiseXor | OpCode::UnsetFlag => {
            (smallvec![Ty::Enum, Ty::Enum], Ty::Enum)
        }
        OpCode::BitwiseNot => (smallvec![Ty::Enum], Ty::Enum),
        OpCode::HasFlag => (smallvec![Ty::Enum, Ty::Enum], Ty::Bool),
        OpCode::ToNumeric(kind) => (smallvec![Ty::Enum], Ty::Num(kind)),
        OpCode::FromNumeric(kind) => (smallvec![Ty::Num(kind)], Ty::Enum),
        OpCode::IsDefined(kind) => (smallvec![Ty::Num(kind)], Ty::Bool),
        OpCode::QuickParse => (smallvec![Ty::Str], Ty::Enum),
    }
}

/// Checks that `program` has the signature of the kernel bound for its opcode.
fn check_signature(program: &Program) -> Result<(), Error> {
    let (params, ret) = signature(program.opcode);
    if program.params != params || program.ret != ret {
        let render = |params: &[Ty], ret: Ty| {
            let params: Vec<_> = params.iter().map(Ty::to_string).collect();
            format!("({}) -> {}", params.join(", "), ret)
        };
        return Err(Error::TypeMismatch {
            program: program.label(),
            expected: render(&params, ret),
            found: render(&program.params, program.ret),
        });
    }
    Ok(())
}

/// Builds the dispatch table of a quick-parse program from its `switch`.
fn bind_quick_parse<T: Enumeration>(program: &Program) -> Result<HashMap<Box<str>, T>, Error> {
    let Some(Instr::Switch { cases, .. }) = program
        .body
        .iter()
        .find(|instr| matches!(instr, Instr::Switch { .. }))
    else {
        return Err(Error::TypeMismatch {
            program: program.label(),
            expected: "switch".to_string(),
            found: program
                .body
                .first()
                .map(|instr| instr.opname().to_string())
                .unwrap_or_default(),
        });
    };

    let mut table = HashMap::with_capacity(cases.iter().map(|case| case.labels.len()).sum());
    for case in cases.iter() {
        let repr = <T::Repr as Numeric>::from_value(case.value).ok_or_else(|| {
            Error::TypeMismatch {
                program: program.label(),
                expected: T::Repr::UNDERLYING.to_string(),
                found: case.value.kind().to_string(),
            }
        })?;
        for label in case.labels.iter() {
            table.insert(label.clone(), T::from_repr(repr));
        }
    }
    Ok(table)
}

/// Compiles the operation set of `T`.
pub fn compile<T: Enumeration>(
    metadata: &'static EnumTypeMetadata<T>,
    settings: &Settings,
) -> Result<CompiledOperationSet<T>, Error> {
    let start = Instant::now();

    let members: Vec<(&'static str, NumericValue)> = metadata
        .members()
        .iter()
        .map(|member| (member.name, member.value.to_repr().into_value()))
        .collect();
    let input = lower::LoweringInput {
        type_name: T::NAME,
        underlying: metadata.underlying(),
        members: &members,
    };
    let programs: Box<[Program]> = lower::lower_all(&input).into_boxed_slice();

    for program in programs.iter() {
        if settings.verify_programs {
            program.verify()?;
        }
        check_signature(program)?;
        if settings.log_listings {
            trace!("{}", program);
        }
    }

    let quick_parse = bind_quick_parse::<T>(&programs[OpCode::QuickParse.index()])?;

    let operations = CompiledOperationSet {
        type_name: T::NAME,
        metadata,
        programs,
        quick_parse,

        bitwise_or: kernels::bitwise_or::<T>,
        bitwise_and: kernels::bitwise_and::<T>,
        bitwise_xor: kernels::bitwise_xor::<T>,
        bitwise_not: kernels::bitwise_not::<T>,
        has_flag: kernels::has_flag::<T>,
        unset_flag: kernels::unset_flag::<T>,

        to_u8: kernels::to_numeric::<T, u8>,
        to_i8: kernels::to_numeric::<T, i8>,
        to_u16: kernels::to_numeric::<T, u16>,
        to_i16: kernels::to_numeric::<T, i16>,
        to_u32: kernels::to_numeric::<T, u32>,
        to_i32: kernels::to_numeric::<T, i32>,
        to_u64: kernels::to_numeric::<T, u64>,
        to_i64: kernels::to_numeric::<T, i64>,
        to_f32: kernels::to_numeric::<T, f32>,
        to_f64: kernels::to_numeric::<T, f64>,

        from_u8: kernels::from_numeric::<T, u8>,
        from_i8: kernels::from_numeric::<T, i8>,
        from_u16: kernels::from_numeric::<T, u16>,
        from_i16: kernels::from_numeric::<T, i16>,
        from_u32: kernels::from_numeric::<T, u32>,
        from_i32: kernels::from_numeric::<T, i32>,
        from_u64: kernels::from_numeric::<T, u64>,
        from_i64: kernels::from_numeric::<T, i64>,
        from_f32: kernels::from_numeric::<T, f32>,
        from_f64: kernels::from_numeric::<T, f64>,

        is_defined_u8: kernels::is_defined::<T, u8>,
        is_defined_i8: kernels::is_defined::<T, i8>,
        is_defined_u16: kernels::is_defined::<T, u16>,
        is_defined_i16: kernels::is_defined::<T, i16>,
        is_defined_u32: kernels::is_defined::<T, u32>,
        is_defined_i32: kernels::is_defined::<T, i32>,
        is_defined_u64: kernels::is_defined::<T, u64>,
        is_defined_i64: kernels::is_defined::<T, i64>,
        is_defined_f32: kernels::is_defined::<T, f32>,
        is_defined_f64: kernels::is_defined::<T, f64>,
    };

    if settings.self_check {
        check::self_check(&operations)?;
    }

    debug!(
        "Compiled {} operation(s) for `{}` ({}, {} member(s), {} quick-parse label(s)) in {:?}.",
        operations.programs.len(),
        T::NAME,
        metadata.underlying(),
        metadata.len(),
        operations.quick_parse.len(),
        start.elapsed()
    );

    Ok(operations)
}
