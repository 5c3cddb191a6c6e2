//! Built-in type kinds
//!
//! Every variant here has a language keyword, so it never needs a namespace.

use serde::{Deserialize, Serialize};

/// Built-in type kinds with keyword spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PrimKind {
    /// `void`
    Void = 0,
    /// `bool`
    Bool = 1,
    /// `char`
    Char = 2,
    /// `sbyte`
    SByte = 3,
    /// `byte`
    Byte = 4,
    /// `short`
    Int16 = 5,
    /// `ushort`
    UInt16 = 6,
    /// `int`
    Int32 = 7,
    /// `uint`
    UInt32 = 8,
    /// `long`
    Int64 = 9,
    /// `ulong`
    UInt64 = 10,
    /// `float`
    Single = 11,
    /// `double`
    Double = 12,
    /// `decimal`
    Decimal = 13,
    /// `string`
    String = 14,
    /// `object`
    Object = 15,
}

impl PrimKind {
    /// Parse from a keyword or runtime name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "void" | "Void" => Some(Self::Void),
            "bool" | "Boolean" => Some(Self::Bool),
            "char" | "Char" => Some(Self::Char),
            "sbyte" | "SByte" => Some(Self::SByte),
            "byte" | "Byte" => Some(Self::Byte),
            "short" | "Int16" => Some(Self::Int16),
            "ushort" | "UInt16" => Some(Self::UInt16),
            "int" | "Int32" => Some(Self::Int32),
            "uint" | "UInt32" => Some(Self::UInt32),
            "long" | "Int64" => Some(Self::Int64),
            "ulong" | "UInt64" => Some(Self::UInt64),
            "float" | "Single" => Some(Self::Single),
            "double" | "Double" => Some(Self::Double),
            "decimal" | "Decimal" => Some(Self::Decimal),
            "string" | "String" => Some(Self::String),
            "object" | "Object" => Some(Self::Object),
            _ => None,
        }
    }

    /// Keyword spelling
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::SByte => "sbyte",
            Self::Byte => "byte",
            Self::Int16 => "short",
            Self::UInt16 => "ushort",
            Self::Int32 => "int",
            Self::UInt32 => "uint",
            Self::Int64 => "long",
            Self::UInt64 => "ulong",
            Self::Single => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Object => "object",
        }
    }

    /// Runtime (framework) name, used when naming unnamed variables
    pub const fn runtime_name(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Bool => "Boolean",
            Self::Char => "Char",
            Self::SByte => "SByte",
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Object => "Object",
        }
    }

    /// Is this an integral type?
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
        )
    }

    /// Is this a numeric type (integral or floating)?
    pub const fn is_numeric(self) -> bool {
        self.is_integral() || matches!(self, Self::Single | Self::Double | Self::Decimal)
    }

    /// Is this an unsigned integral type?
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::Byte | Self::UInt16 | Self::UInt32 | Self::UInt64)
    }

    /// Is this a value type?
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Self::String | Self::Object | Self::Void)
    }

    /// Literal suffix for numeric constants of this type
    pub const fn literal_suffix(self) -> &'static str {
        match self {
            Self::UInt32 => "U",
            Self::Int64 => "L",
            Self::UInt64 => "UL",
            Self::Single => "f",
            Self::Double => "d",
            Self::Decimal => "m",
            _ => "",
        }
    }

    /// Inclusive value range for integral types
    pub const fn integral_range(self) -> Option<(i128, i128)> {
        match self {
            Self::SByte => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::Byte => Some((0, u8::MAX as i128)),
            Self::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::UInt16 => Some((0, u16::MAX as i128)),
            Self::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::UInt32 => Some((0, u32::MAX as i128)),
            Self::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::UInt64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }
}
