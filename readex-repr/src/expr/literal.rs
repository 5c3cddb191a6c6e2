//! Constant values
//!
//! A constant pairs a value with its declared type. The type decides literal
//! suffixes, enum decomposition and the `null` versus `default(T)` spelling.

use serde::{Deserialize, Serialize};

use crate::types::{PrimKind, TypeRef};

/// Number of 100ns ticks in one millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Number of 100ns ticks in one second
pub const TICKS_PER_SECOND: i64 = TICKS_PER_MILLISECOND * 1_000;
/// Number of 100ns ticks in one minute
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
/// Number of 100ns ticks in one hour
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
/// Number of 100ns ticks in one day
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

/// Constant value payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantValue {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Character literal
    Char(char),
    /// Any integral value; the constant's type picks the suffix
    Int(i128),
    /// Floating point value stored as bits for exact equality
    Float(FloatBits, FloatPrec),
    /// Decimal value stored as its canonical text (`"1.50"`)
    Decimal(String),
    /// String literal
    String(String),
    /// Calendar date and time
    DateTime(DateTimeValue),
    /// Duration in 100ns ticks
    TimeSpan(i64),
    /// Enum value; the constant's type carries the member table
    Enum(i64),
    /// `typeof(T)`
    Type(TypeRef),
    /// Closure object holding captured variables
    Closure(Vec<CapturedValue>),
    /// Opaque object rendered through its textual form
    Object(String),
}

/// Float represented as bits for exact equality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatBits(pub u64);

impl FloatBits {
    /// Create from f32
    pub fn from_f32(v: f32) -> Self {
        Self(v.to_bits() as u64)
    }

    /// Create from f64
    pub fn from_f64(v: f64) -> Self {
        Self(v.to_bits())
    }

    /// Convert to f32
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0 as u32)
    }

    /// Convert to f64
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Floating point precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatPrec {
    /// `float`
    Single,
    /// `double`
    Double,
}

/// Calendar date and time, millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    #[serde(default)]
    pub hour: u8,
    #[serde(default)]
    pub minute: u8,
    #[serde(default)]
    pub second: u8,
    #[serde(default)]
    pub millisecond: u16,
}

impl DateTimeValue {
    /// Midnight on the given date
    pub const fn date(year: u16, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    /// Set the time of day
    #[must_use]
    pub const fn at(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Set milliseconds
    #[must_use]
    pub const fn with_millis(mut self, millisecond: u16) -> Self {
        self.millisecond = millisecond;
        self
    }
}

/// A variable captured by a closure object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedValue {
    /// Name of the captured variable (and closure field)
    pub name: String,
    /// Value at the time the tree was built
    pub value: Constant,
}

/// Constant with its declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub value: ConstantValue,
    pub ty: TypeRef,
}

impl Constant {
    /// Create a constant
    pub fn new(value: ConstantValue, ty: TypeRef) -> Self {
        Self { value, ty }
    }

    /// `bool` constant
    pub fn bool(v: bool) -> Self {
        Self::new(ConstantValue::Bool(v), TypeRef::BOOL)
    }

    /// `char` constant
    pub fn char(v: char) -> Self {
        Self::new(ConstantValue::Char(v), TypeRef::CHAR)
    }

    /// `int` constant
    pub fn int(v: i32) -> Self {
        Self::new(ConstantValue::Int(v.into()), TypeRef::INT)
    }

    /// `uint` constant
    pub fn uint(v: u32) -> Self {
        Self::new(ConstantValue::Int(v.into()), TypeRef::UINT)
    }

    /// `long` constant
    pub fn long(v: i64) -> Self {
        Self::new(ConstantValue::Int(v.into()), TypeRef::LONG)
    }

    /// `ulong` constant
    pub fn ulong(v: u64) -> Self {
        Self::new(ConstantValue::Int(v.into()), TypeRef::ULONG)
    }

    /// Integral constant of any primitive integral type
    pub fn integral(v: i128, kind: PrimKind) -> Self {
        Self::new(ConstantValue::Int(v), TypeRef::Prim(kind))
    }

    /// `float` constant
    pub fn float(v: f32) -> Self {
        Self::new(
            ConstantValue::Float(FloatBits::from_f32(v), FloatPrec::Single),
            TypeRef::FLOAT,
        )
    }

    /// `double` constant
    pub fn double(v: f64) -> Self {
        Self::new(
            ConstantValue::Float(FloatBits::from_f64(v), FloatPrec::Double),
            TypeRef::DOUBLE,
        )
    }

    /// `decimal` constant from its text form
    pub fn decimal(text: impl Into<String>) -> Self {
        Self::new(ConstantValue::Decimal(text.into()), TypeRef::DECIMAL)
    }

    /// `string` constant
    pub fn string(v: impl Into<String>) -> Self {
        Self::new(ConstantValue::String(v.into()), TypeRef::STRING)
    }

    /// `null` of the given type
    pub fn null(ty: TypeRef) -> Self {
        Self::new(ConstantValue::Null, ty)
    }

    /// Enum value
    pub fn enum_value(ty: TypeRef, v: i64) -> Self {
        Self::new(ConstantValue::Enum(v), ty)
    }

    /// `typeof(T)` constant
    pub fn type_of(ty: TypeRef) -> Self {
        Self::new(
            ConstantValue::Type(ty),
            TypeRef::class(crate::types::SYSTEM_NAMESPACE, "Type"),
        )
    }

    /// `DateTime` constant
    pub fn date_time(v: DateTimeValue) -> Self {
        Self::new(ConstantValue::DateTime(v), TypeRef::date_time())
    }

    /// `TimeSpan` constant from ticks
    pub fn time_span(ticks: i64) -> Self {
        Self::new(ConstantValue::TimeSpan(ticks), TypeRef::time_span())
    }

    /// Is this `null`?
    pub const fn is_null(&self) -> bool {
        matches!(self.value, ConstantValue::Null)
    }

    /// Captured variable of a closure constant, by field name
    pub fn captured(&self, name: &str) -> Option<&CapturedValue> {
        match &self.value {
            ConstantValue::Closure(values) => values.iter().find(|c| c.name == name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_bits() {
        let c = Constant::double(1.5);
        match c.value {
            ConstantValue::Float(bits, FloatPrec::Double) => assert_eq!(bits.to_f64(), 1.5),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(FloatBits::from_f32(0.25).to_f32(), 0.25);
    }

    #[test]
    fn test_ticks() {
        assert_eq!(TICKS_PER_DAY, 864_000_000_000);
        assert_eq!(TICKS_PER_SECOND, 10_000_000);
    }

    #[test]
    fn test_captured_lookup() {
        let closure = Constant::new(
            ConstantValue::Closure(vec![CapturedValue {
                name: "count".into(),
                value: Constant::int(3),
            }]),
            TypeRef::OBJECT,
        );
        assert_eq!(closure.captured("count").map(|c| &c.value), Some(&Constant::int(3)));
        assert!(closure.captured("other").is_none());
    }
}
