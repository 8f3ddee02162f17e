//! Per-type cache slots
//!
//! Each enumeration type owns one [`Slot`], a `static` emitted by
//! [`enumeration!`](crate::enumeration). A slot moves from *uninitialized* to
//! *compiled* exactly once; concurrent first callers block until the winner
//! has finished and then all observe the same instance. Reads after that are
//! lock-free.
use once_cell::sync::OnceCell;

use crate::{
    Enumeration,
    compiler::{self, CompiledOperationSet},
    metadata::EnumTypeMetadata,
    utils::Error,
};

pub struct Slot<T: Enumeration> {
    metadata: OnceCell<EnumTypeMetadata<T>>,
    operations: OnceCell<CompiledOperationSet<T>>,
}

impl<T: Enumeration> Slot<T> {
    pub const fn new() -> Self {
        Self {
            metadata: OnceCell::new(),
            operations: OnceCell::new(),
        }
    }

    pub fn metadata(&'static self) -> &'static EnumTypeMetadata<T> {
        self.metadata.get_or_init(EnumTypeMetadata::capture)
    }

    /// Compiled operations of `T`, built on first call.
    ///
    /// A failed build leaves the slot uninitialized and is reported to the
    /// caller.
    pub fn try_operations(&'static self) -> Result<&'static CompiledOperationSet<T>, Error> {
        self.operations
            .get_or_try_init(|| compiler::compile::<T>(self.metadata(), &crate::config::current()))
    }

    /// Compiled operations of `T`.
    ///
    /// # Panics
    ///
    /// Compilation of a type declared through `enumeration!` cannot fail
    /// unless the compiler itself is broken; such a failure panics.
    pub fn operations(&'static self) -> &'static CompiledOperationSet<T> {
        match self.try_operations() {
            Ok(operations) => operations,
            Err(error) => panic!("specialization of `{}` failed: {}", T::NAME, error),
        }
    }

    /// Returns `true` once the operation set has been built.
    pub fn is_compiled(&self) -> bool {
        self.operations.get().is_some()
    }
}

impl<T: Enumeration> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
