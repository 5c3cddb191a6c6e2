//! Type references
//!
//! The renderer only needs enough type information to print names, pick
//! literal suffixes, decompose enum flags and choose between implicit and
//! explicit declarations. Full reflection stays with the caller.

mod primitives;
mod type_ref;

pub use primitives::PrimKind;
pub use type_ref::{EnumInfo, EnumMember, NamedType, TypeKind, TypeRef, SYSTEM_NAMESPACE};
