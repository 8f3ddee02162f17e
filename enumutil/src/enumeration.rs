//! Enumeration types
//!
//! An enumeration is a `#[repr(transparent)]` newtype over one of the eight
//! integer primitives, with a fixed table of named members. Types are
//! declared with [`enumeration!`](crate::enumeration), which implements
//! [`Enumeration`] and registers the type for the
//! [`unchecked`](crate::unchecked) facade.
use std::{fmt::Debug, hash::Hash};

use crate::{
    cache::Slot, compiler::CompiledOperationSet, metadata::EnumTypeMetadata,
    metadata::MemberDef, numeric::Underlying,
};

/// A type declared with [`enumeration!`](crate::enumeration).
///
/// Conversions between the type and its representation are bit-preserving.
/// The trait is not meant to be implemented by hand.
pub trait Enumeration: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Underlying integer representation.
    type Repr: Underlying;

    /// Name of the type as declared.
    const NAME: &'static str;

    /// `true` when the type was declared with the `#[flags]` marker.
    const FLAGS: bool;

    /// Declared members, in declaration order.
    const DECLARATION: &'static [MemberDef<Self::Repr>];

    fn to_repr(self) -> Self::Repr;

    fn from_repr(repr: Self::Repr) -> Self;

    #[doc(hidden)]
    fn slot() -> &'static Slot<Self>;

    /// Metadata of the type, captured on first use.
    fn metadata() -> &'static EnumTypeMetadata<Self> {
        Self::slot().metadata()
    }

    /// Specialized operations of the type, compiled on first use.
    fn operations() -> &'static CompiledOperationSet<Self> {
        Self::slot().operations()
    }
}

/// Declares an enumeration type.
///
/// ```
/// enumutil::enumeration! {
///     #[flags]
///     pub struct Access: u8 {
///         const NONE = 0;
///         const READ = 1 => "Read access";
///         const WRITE = 2;
///         const EXECUTE = 4;
///         const ALL = 7;
///     }
/// }
///
/// let rw = Access::READ | Access::WRITE;
/// assert!(enumutil::has_flag(rw, Access::WRITE));
/// assert_eq!(rw.to_string(), "READ, WRITE");
/// ```
///
/// The optional `#[flags]` marker may appear anywhere among the outer
/// attributes, doc comments included. Member values are
/// constant expressions of the representation type. A member may carry a
/// description after `=>`.
///
/// The generated type implements `Clone`, `Copy`, `Eq`, `Ord`, `Hash`,
/// `Default` (the zero value), `Debug`, `Display` and the `| & ^ !`
/// operators.
#[macro_export]
macro_rules! enumeration {
    (
        @emit $flags:literal
        [$(#[$outer:meta])*]
        $vis:vis struct $name:ident : $repr:ty {
            $(
                [$(#[$inner:meta])*]
                const $member:ident = $value:expr $(=> $desc:literal)?;
            )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        $vis struct $name($repr);

        #[allow(non_upper_case_globals, dead_code)]
        impl $name {
            $(
                $(#[$inner])*
                pub const $member: $name = $name($value);
            )*

            /// Underlying representation.
            #[inline]
            pub const fn bits(self) -> $repr {
                self.0
            }

            /// Reinterprets `bits` as a value of this type. The result may
            /// have no declared name.
            #[inline]
            pub const fn from_bits(bits: $repr) -> Self {
                $name(bits)
            }
        }

        impl $crate::Enumeration for $name {
            type Repr = $repr;

            const NAME: &'static str = ::core::stringify!($name);
            const FLAGS: bool = $flags;
            const DECLARATION: &'static [$crate::metadata::MemberDef<$repr>] = &[
                $(
                    $crate::metadata::MemberDef {
                        name: ::core::stringify!($member),
                        value: $value,
                        description: $crate::__description!($($desc)?),
                    },
                )*
            ];

            #[inline]
            fn to_repr(self) -> $repr {
                self.0
            }

            #[inline]
            fn from_repr(repr: $repr) -> Self {
                $name(repr)
            }

            fn slot() -> &'static $crate::cache::Slot<Self> {
                static SLOT: $crate::cache::Slot<$name> = $crate::cache::Slot::new();
                &SLOT
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                $name(0)
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match <$name as $crate::Enumeration>::metadata().member_of(*self) {
                    ::core::option::Option::Some(member) => {
                        ::core::write!(f, "{}::{}", ::core::stringify!($name), member.name)
                    }
                    ::core::option::Option::None => {
                        ::core::write!(f, "{}({:?})", ::core::stringify!($name), self.0)
                    }
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::format(*self))
            }
        }

        impl ::core::ops::BitOr for $name {
            type Output = Self;

            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                $crate::bitwise_or(self, rhs)
            }
        }

        impl ::core::ops::BitAnd for $name {
            type Output = Self;

            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                $crate::bitwise_and(self, rhs)
            }
        }

        impl ::core::ops::BitXor for $name {
            type Output = Self;

            #[inline]
            fn bitxor(self, rhs: Self) -> Self {
                $crate::bitwise_xor(self, rhs)
            }
        }

        impl ::core::ops::Not for $name {
            type Output = Self;

            #[inline]
            fn not(self) -> Self {
                $crate::bitwise_not(self)
            }
        }

        $crate::inventory::submit! {
            $crate::unchecked::Registration::of::<$name>()
        }
    };

    (
        @attrs $flags:tt [$(#[$outer:meta])*]
        #[flags]
        $($rest:tt)*
    ) => {
        $crate::enumeration! {
            @attrs true [$(#[$outer])*]
            $($rest)*
        }
    };

    (
        @attrs $flags:tt [$(#[$outer:meta])*]
        #[$attr:meta]
        $($rest:tt)*
    ) => {
        $crate::enumeration! {
            @attrs $flags [$(#[$outer])* #[$attr]]
            $($rest)*
        }
    };

    (
        @attrs $flags:tt [$(#[$outer:meta])*]
        $vis:vis struct $name:ident : $repr:ty {
            $(
                $(#[$inner:meta])*
                const $member:ident = $value:expr $(=> $desc:literal)?;
            )*
        }
    ) => {
        $crate::enumeration! {
            @emit $flags
            [$(#[$outer])*]
            $vis struct $name : $repr {
                $([$(#[$inner])*] const $member = $value $(=> $desc)?;)*
            }
        }
    };

    (@ $($malformed:tt)*) => {
        ::core::compile_error!("malformed `enumeration!` declaration");
    };

    ($($input:tt)*) => {
        $crate::enumeration! {
            @attrs false []
            $($input)*
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __description {
    () => {
        ::core::option::Option::None
    };
    ($desc:literal) => {
        ::core::option::Option::Some($desc)
    };
}
