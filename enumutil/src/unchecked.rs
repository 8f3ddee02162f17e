//! Untyped facade
//!
//! The functions in this module accept any `'static` type instead of
//! requiring [`Enumeration`]. They are meant for generic code that cannot
//! carry the bound. Types declared with [`enumeration!`](crate::enumeration)
//! register themselves; the first lookup of a type resolves its
//! registration and caches the outcome, success or failure, for the rest of
//! the process. Using a type that was never declared fails with
//! [`Error::Initialization`] wrapping [`Error::NotAnEnumeration`], now and on
//! every later call.
use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
};

use log::info;
use parking_lot::RwLock;

use crate::{
    Enumeration,
    compiler::CompiledOperationSet,
    metadata::EnumTypeMetadata,
    numeric::Numeric,
    utils::{Error, Result},
};

type Entry = std::result::Result<&'static (dyn Any + Send + Sync), Error>;

/// Static registration of an enumeration type, submitted by `enumeration!`.
pub struct Registration {
    pub type_id: fn() -> TypeId,
    pub type_name: &'static str,
    pub resolve: fn() -> Entry,
}
inventory::collect!(Registration);

impl Registration {
    pub const fn of<T: Enumeration>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: T::NAME,
            resolve: resolve::<T>,
        }
    }
}

fn resolve<T: Enumeration>() -> Entry {
    let operations: &'static (dyn Any + Send + Sync) = T::slot().try_operations()?;
    Ok(operations)
}

static REGISTRY: RwLock<BTreeMap<TypeId, Entry>> = parking_lot::const_rwlock(BTreeMap::new());

/// Names of every registered enumeration type, in no particular order.
pub fn registered() -> impl Iterator<Item = &'static str> {
    inventory::iter::<Registration>
        .into_iter()
        .map(|registration| registration.type_name)
}

fn lookup(type_id: TypeId, type_name: &'static str) -> Entry {
    if let Some(entry) = REGISTRY.read().get(&type_id) {
        return entry.clone();
    }

    // Resolved without holding the lock; a registered type compiles at most
    // once through its slot, whoever wins the insert below.
    let entry = match inventory::iter::<Registration>
        .into_iter()
        .find(|registration| (registration.type_id)() == type_id)
    {
        Some(registration) => (registration.resolve)(),
        None => {
            info!("Type `{}` is not a registered enumeration.", type_name);
            Err(Error::NotAnEnumeration {
                type_name: type_name.to_string(),
            })
        }
    }
    .map_err(|error| Error::Initialization {
        type_name: type_name.to_string(),
        source: Box::new(error),
    });

    REGISTRY
        .write()
        .entry(type_id)
        .or_insert(entry)
        .clone()
}

/// Compiled operations of `T`.
pub fn operations<T: Any>() -> Result<&'static CompiledOperationSet<T>> {
    let type_name = std::any::type_name::<T>();
    let entry = lookup(TypeId::of::<T>(), type_name)?;
    entry
        .downcast_ref::<CompiledOperationSet<T>>()
        .ok_or_else(|| Error::Initialization {
            type_name: type_name.to_string(),
            source: Box::new(Error::NotAnEnumeration {
                type_name: type_name.to_string(),
            }),
        })
}

pub fn metadata<T: Any + Copy>() -> Result<&'static EnumTypeMetadata<T>> {
    Ok(operations::<T>()?.metadata())
}

pub fn bitwise_or<T: Any + Copy>(lhs: T, rhs: T) -> Result<T> {
    Ok(operations::<T>()?.bitwise_or(lhs, rhs))
}

pub fn bitwise_and<T: Any + Copy>(lhs: T, rhs: T) -> Result<T> {
    Ok(operations::<T>()?.bitwise_and(lhs, rhs))
}

pub fn bitwise_xor<T: Any + Copy>(lhs: T, rhs: T) -> Result<T> {
    Ok(operations::<T>()?.bitwise_xor(lhs, rhs))
}

pub fn bitwise_not<T: Any + Copy>(value: T) -> Result<T> {
    Ok(operations::<T>()?.bitwise_not(value))
}

pub fn has_flag<T: Any + Copy>(value: T, flag: T) -> Result<bool> {
    Ok(operations::<T>()?.has_flag(value, flag))
}

pub fn set_flag<T: Any + Copy>(value: T, flag: T) -> Result<T> {
    bitwise_or(value, flag)
}

pub fn unset_flag<T: Any + Copy>(value: T, flag: T) -> Result<T> {
    Ok(operations::<T>()?.unset_flag(value, flag))
}

pub fn to_numeric<T: Any + Copy, N: Numeric>(value: T) -> Result<N> {
    Ok(operations::<T>()?.to_numeric(value))
}

pub fn from_numeric<T: Any + Copy, N: Numeric>(value: N) -> Result<T> {
    Ok(operations::<T>()?.from_numeric(value))
}

pub fn is_defined_numeric<T: Any + Copy, N: Numeric>(value: N) -> Result<bool> {
    Ok(operations::<T>()?.is_defined_numeric(value))
}

pub fn quick_parse<T: Any + Copy>(input: &str) -> Result<T> {
    operations::<T>()?.quick_parse(input)
}

/// Member names of `T`, in declaration order.
pub fn names<T: Any + Copy + PartialEq>() -> Result<Vec<&'static str>> {
    Ok(metadata::<T>()?.names().collect())
}
