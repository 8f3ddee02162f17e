//! Type metadata
//!
//! [`EnumTypeMetadata`] is the static shape of one enumeration type: its
//! underlying kind and its named members in declaration order. It is captured
//! once per type from the declaration table emitted by
//! [`enumeration!`](crate::enumeration) and lives in the type's cache slot for
//! the rest of the process.
use log::debug;

use crate::{Enumeration, numeric::Underlying, types::UnderlyingKind};

/// One row of an enumeration's declaration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDef<R: 'static> {
    pub name: &'static str,
    pub value: R,
    pub description: Option<&'static str>,
}

/// A declared member of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Member<T> {
    pub name: &'static str,
    pub value: T,
    /// Optional human-readable description (`const NAME = value => "description";`).
    pub description: Option<&'static str>,
}

/// Ordered member list and underlying kind of an enumeration type.
#[derive(Debug)]
pub struct EnumTypeMetadata<T> {
    type_name: &'static str,
    underlying: UnderlyingKind,
    flags: bool,
    members: Box<[Member<T>]>,
}

impl<T: Enumeration> EnumTypeMetadata<T> {
    /// Reads the declaration table of `T`.
    ///
    /// Values are copied bit for bit from the declaration; nothing is
    /// re-derived.
    pub(crate) fn capture() -> Self {
        let members: Box<[Member<T>]> = T::DECLARATION
            .iter()
            .map(|def| Member {
                name: def.name,
                value: T::from_repr(def.value),
                description: def.description,
            })
            .collect();

        debug!(
            "Captured metadata of `{}`: {} member(s) over {}{}.",
            T::NAME,
            members.len(),
            T::Repr::UNDERLYING,
            if T::FLAGS { ", flags" } else { "" }
        );

        Self {
            type_name: T::NAME,
            underlying: T::Repr::UNDERLYING,
            flags: T::FLAGS,
            members,
        }
    }

    pub fn contains_repr(&self, repr: T::Repr) -> bool {
        self.contains(T::from_repr(repr))
    }
}

impl<T: Copy + PartialEq> EnumTypeMetadata<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn underlying(&self) -> UnderlyingKind {
        self.underlying
    }

    /// Returns `true` if the type was declared with the `#[flags]` marker.
    pub fn is_flags(&self) -> bool {
        self.flags
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[Member<T>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.members.iter().map(|member| member.name)
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.members.iter().map(|member| member.value)
    }

    /// Exact, case-sensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Member<T>> {
        self.members.iter().find(|member| member.name == name)
    }

    /// ASCII case-insensitive lookup by name. The first declared match wins.
    pub fn find_ignore_case(&self, name: &str) -> Option<&Member<T>> {
        self.members
            .iter()
            .find(|member| member.name.eq_ignore_ascii_case(name))
    }

    /// First declared member holding `value`.
    pub fn member_of(&self, value: T) -> Option<&Member<T>> {
        self.members.iter().find(|member| member.value == value)
    }

    /// Exact membership test by linear scan. Undeclared flag combinations are
    /// not members.
    pub fn contains(&self, value: T) -> bool {
        self.members.iter().any(|member| member.value == value)
    }
}
