use strum::IntoEnumIterator;

use crate::types::NumericKind;

/// Identity of one specialized operation.
///
/// A compiled operation set holds exactly one kernel per opcode returned by
/// [`OpCode::all`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum OpCode {
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    BitwiseNot,
    HasFlag,
    UnsetFlag,
    /// Enumeration value to numeric value.
    ToNumeric(NumericKind),
    /// Numeric value to enumeration value.
    FromNumeric(NumericKind),
    /// Numeric value membership test.
    IsDefined(NumericKind),
    /// Exact name or decimal value to enumeration value.
    QuickParse,
}

impl OpCode {
    /// Number of opcodes in a complete operation set.
    pub const COUNT: usize = 7 + 3 * 10;

    /// Every opcode, in compilation order.
    pub fn all() -> impl Iterator<Item = OpCode> {
        [
            OpCode::BitwiseOr,
            OpCode::BitwiseAnd,
            OpCode::BitwiseXor,
            OpCode::BitwiseNot,
            OpCode::HasFlag,
            OpCode::UnsetFlag,
        ]
        .into_iter()
        .chain(NumericKind::iter().map(OpCode::ToNumeric))
        .chain(NumericKind::iter().map(OpCode::FromNumeric))
        .chain(NumericKind::iter().map(OpCode::IsDefined))
        .chain(std::iter::once(OpCode::QuickParse))
    }

    /// Position of the opcode in [`OpCode::all`].
    pub fn index(&self) -> usize {
        let numeric = |kind: &NumericKind| *kind as usize;
        match self {
            OpCode::BitwiseOr => 0,
            OpCode::BitwiseAnd => 1,
            OpCode::BitwiseXor => 2,
            OpCode::BitwiseNot => 3,
            OpCode::HasFlag => 4,
            OpCode::UnsetFlag => 5,
            OpCode::ToNumeric(kind) => 6 + numeric(kind),
            OpCode::FromNumeric(kind) => 16 + numeric(kind),
            OpCode::IsDefined(kind) => 26 + numeric(kind),
            OpCode::QuickParse => 36,
        }
    }

    /// Returns the base name of the operation.
    pub fn to_str(&self) -> &'static str {
        match self {
            OpCode::BitwiseOr => "bitwise_or",
            OpCode::BitwiseAnd => "bitwise_and",
            OpCode::BitwiseXor => "bitwise_xor",
            OpCode::BitwiseNot => "bitwise_not",
            OpCode::HasFlag => "has_flag",
            OpCode::UnsetFlag => "unset_flag",
            OpCode::ToNumeric(_) => "to_numeric",
            OpCode::FromNumeric(_) => "from_numeric",
            OpCode::IsDefined(_) => "is_defined",
            OpCode::QuickParse => "quick_parse",
        }
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpCode::ToNumeric(kind) | OpCode::FromNumeric(kind) | OpCode::IsDefined(kind) => {
                write!(f, "{}.{}", self.to_str(), kind)
            }
            _ => write!(f, "{}", self.to_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_iteration_order() {
        let all: Vec<_> = OpCode::all().collect();
        assert_eq!(all.len(), OpCode::COUNT);
        for (position, opcode) in all.iter().enumerate() {
            assert_eq!(opcode.index(), position, "{opcode}");
        }
    }

    #[test]
    fn display_includes_numeric_kind() {
        assert_eq!(OpCode::HasFlag.to_string(), "has_flag");
        assert_eq!(OpCode::ToNumeric(NumericKind::I8).to_string(), "to_numeric.i8");
        assert_eq!(OpCode::IsDefined(NumericKind::F64).to_string(), "is_defined.f64");
    }
}
