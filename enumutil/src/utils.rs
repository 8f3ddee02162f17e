use strum::EnumIs;
use thiserror::Error;

use crate::ir::Name;

#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// A required argument is missing or blank.
    #[error("Invalid argument: {reason}.")]
    InvalidArgument { reason: String },

    /// The input matches neither a declared member name nor an accepted numeric form.
    #[error("Requested value `{input}` was not found in enumeration `{type_name}`.")]
    ParseFailure { type_name: String, input: String },

    /// The untyped facade was used with a type that was never declared through `enumeration!`.
    #[error("Type `{type_name}` is not an enumeration declared with `enumeration!`.")]
    NotAnEnumeration { type_name: String },

    /// Construction of a cache slot failed. The failure is permanent for that type.
    #[error("The operation cache of `{type_name}` failed to initialize: {source}")]
    Initialization {
        type_name: String,
        #[source]
        source: Box<Error>,
    },

    /// A name is assigned by more than one instruction.
    #[error(
        "Multiple instructions of program `{program}` share destination `%{name}`, which violates SSA requirements."
    )]
    DuplicateSSAName { program: String, name: Name },

    /// An operand refers to a name that is not defined before its use.
    #[error("An operand of program `{program}` refers to an undefined name `%{name}`.")]
    UndefinedSSAName { program: String, name: Name },

    /// An operand refers to a parameter the program does not declare.
    #[error("Program `{program}` refers to argument `%a{index}` but declares {count} parameter(s).")]
    ArgumentOutOfRange {
        program: String,
        index: u32,
        count: usize,
    },

    /// An instruction received an operand of the wrong type.
    #[error("Type mismatch in program `{program}`: expected `{expected}`, found `{found}`.")]
    TypeMismatch {
        program: String,
        expected: String,
        found: String,
    },

    /// Two cases of a switch instruction share a label.
    #[error("Switch label `{label}` appears more than once in program `{program}`.")]
    DuplicateSwitchLabel { program: String, label: String },

    /// The program does not end with exactly one `ret`.
    #[error("Program `{program}` must end with exactly one `ret` instruction.")]
    MissingReturn { program: String },

    /// A bound kernel disagrees with the lowered program it was bound for.
    #[error(
        "Kernel bound for `{program}` of `{type_name}` disagrees with its program on input {input}: kernel returned {kernel}, program returned {program_result}."
    )]
    LoweringMismatch {
        type_name: String,
        program: String,
        input: String,
        kernel: String,
        program_result: String,
    },

    /// Settings were already installed or already in use.
    #[error("Settings are already installed; `configure` must run before any other use.")]
    AlreadyConfigured,

    /// Settings could not be read or parsed.
    #[error("Failed to load settings from `{origin}`: {reason}")]
    Config { origin: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
