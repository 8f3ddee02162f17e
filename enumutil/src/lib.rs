//! Fast, type-safe operations over enumeration types.
//!
//! An enumeration is declared with [`enumeration!`] as a transparent newtype
//! over one of the eight integer primitives. The first time an operation is
//! used on a type, its metadata is captured and a full set of specialized
//! operations is compiled for it: bitwise operators, flag tests, conversions
//! to and from every numeric primitive, membership tests and a fast parser.
//! The set is cached for the rest of the process.
//!
//! ```
//! use enumutil::{enumeration, has_flag, quick_parse, to_numeric};
//!
//! enumeration! {
//!     #[flags]
//!     pub struct Color: u8 {
//!         const RED = 1;
//!         const GREEN = 2;
//!         const BLUE = 4;
//!     }
//! }
//!
//! let yellow = Color::RED | Color::GREEN;
//! assert!(has_flag(yellow, Color::GREEN));
//! assert_eq!(to_numeric::<_, i64>(yellow), 3);
//! assert_eq!(quick_parse::<Color>("BLUE"), Ok(Color::BLUE));
//! assert!(quick_parse::<Color>("3").is_err());
//! ```
//!
//! Generic code that cannot carry the [`Enumeration`] bound can use the
//! [`unchecked`] facade instead.
pub extern crate inventory;

pub mod cache;
pub mod compiler;
pub mod config;
pub mod consts;
mod enumeration;
mod facade;
pub mod ir;
pub mod magic;
pub mod metadata;
pub mod numeric;
pub mod types;
pub mod unchecked;
pub mod utils;

pub use enumeration::Enumeration;
pub use facade::*;
pub use numeric::{Numeric, Underlying};
pub use types::{NumericKind, UnderlyingKind};
pub use utils::{Error, Result};
