//! Type reference model
//!
//! A `TypeRef` is structural: two references naming the same namespace, name
//! and generic arguments are equal. Named types are shared through `Arc` so
//! large trees that mention the same type many times stay cheap to clone.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::PrimKind;

/// Namespace of the runtime's core types
pub const SYSTEM_NAMESPACE: &str = "System";

/// Reference to a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Built-in type with a keyword spelling
    Prim(PrimKind),
    /// Named class, struct, interface, delegate or enum
    Named(Arc<NamedType>),
    /// Array of `element` with the given rank (1 for vectors)
    Array { element: Box<TypeRef>, rank: u8 },
    /// Nullable value type `T?`
    Nullable(Box<TypeRef>),
    /// Unbound generic parameter `T`
    GenericParam(String),
}

/// A named (non-primitive) type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    /// Dotted namespace, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Simple name without generic arity marker
    pub name: String,
    /// Generic type arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_args: Vec<TypeRef>,
    /// Enclosing type for nested types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<Arc<NamedType>>,
    /// What kind of type this is
    #[serde(default)]
    pub kind: TypeKind,
}

/// Classification of a named type
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Delegate,
    /// Enumeration with its member table
    Enum(EnumInfo),
    /// Compiler-generated anonymous type with its property names in order
    Anonymous(Vec<String>),
    /// Compiler-generated closure holding captured variables
    Closure,
}

/// Enum member table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumInfo {
    /// Members in declaration order
    pub members: Vec<EnumMember>,
    /// Marked as a bit-flags enum
    #[serde(default)]
    pub is_flags: bool,
    /// Underlying integral type
    #[serde(default = "default_underlying")]
    pub underlying: PrimKind,
}

fn default_underlying() -> PrimKind {
    PrimKind::Int32
}

/// A single named enum value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl EnumInfo {
    /// Build a plain (non-flags) enum table
    pub fn new(members: impl IntoIterator<Item = (&'static str, i64)>) -> Self {
        Self {
            members: members
                .into_iter()
                .map(|(name, value)| EnumMember::new(name, value))
                .collect(),
            is_flags: false,
            underlying: PrimKind::Int32,
        }
    }

    /// Build a flags enum table
    pub fn flags(members: impl IntoIterator<Item = (&'static str, i64)>) -> Self {
        Self {
            is_flags: true,
            ..Self::new(members)
        }
    }

    /// First member declared with exactly this value
    pub fn member_for(&self, value: i64) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }
}

impl NamedType {
    /// Create a class type
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            name: name.into(),
            generic_args: Vec::new(),
            declaring_type: None,
            kind: TypeKind::Class,
        }
    }

    /// Set the kind
    #[must_use]
    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set generic arguments
    #[must_use]
    pub fn with_generic_args(mut self, args: Vec<TypeRef>) -> Self {
        self.generic_args = args;
        self
    }

    /// Nest inside another type
    #[must_use]
    pub fn nested_in(mut self, declaring: NamedType) -> Self {
        self.declaring_type = Some(Arc::new(declaring));
        self
    }

    /// Is this `System.<name>`?
    pub fn is_system(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(SYSTEM_NAMESPACE)
    }

    /// Namespace-qualified name without generic arguments
    pub fn qualified_name(&self) -> String {
        let mut out = String::new();
        if let Some(declaring) = &self.declaring_type {
            out.push_str(&declaring.qualified_name());
            out.push('.');
        } else if let Some(ns) = &self.namespace {
            out.push_str(ns);
            out.push('.');
        }
        out.push_str(&self.name);
        out
    }
}

impl TypeRef {
    pub const VOID: Self = Self::Prim(PrimKind::Void);
    pub const BOOL: Self = Self::Prim(PrimKind::Bool);
    pub const CHAR: Self = Self::Prim(PrimKind::Char);
    pub const BYTE: Self = Self::Prim(PrimKind::Byte);
    pub const INT: Self = Self::Prim(PrimKind::Int32);
    pub const UINT: Self = Self::Prim(PrimKind::UInt32);
    pub const LONG: Self = Self::Prim(PrimKind::Int64);
    pub const ULONG: Self = Self::Prim(PrimKind::UInt64);
    pub const FLOAT: Self = Self::Prim(PrimKind::Single);
    pub const DOUBLE: Self = Self::Prim(PrimKind::Double);
    pub const DECIMAL: Self = Self::Prim(PrimKind::Decimal);
    pub const STRING: Self = Self::Prim(PrimKind::String);
    pub const OBJECT: Self = Self::Prim(PrimKind::Object);

    /// Wrap a named type
    pub fn named(ty: NamedType) -> Self {
        Self::Named(Arc::new(ty))
    }

    /// Class type in a namespace
    pub fn class(namespace: &str, name: &str) -> Self {
        Self::named(NamedType::new(Some(namespace), name))
    }

    /// Struct type in a namespace
    pub fn value_struct(namespace: &str, name: &str) -> Self {
        Self::named(NamedType::new(Some(namespace), name).with_kind(TypeKind::Struct))
    }

    /// Generic class type
    pub fn generic(namespace: &str, name: &str, args: Vec<TypeRef>) -> Self {
        Self::named(NamedType::new(Some(namespace), name).with_generic_args(args))
    }

    /// Enum type
    pub fn enumeration(namespace: &str, name: &str, info: EnumInfo) -> Self {
        Self::named(NamedType::new(Some(namespace), name).with_kind(TypeKind::Enum(info)))
    }

    /// One-dimensional array of this type
    pub fn array_of(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    /// Nullable wrapper
    pub fn nullable(inner: TypeRef) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// `System.DateTime`
    pub fn date_time() -> Self {
        Self::value_struct(SYSTEM_NAMESPACE, "DateTime")
    }

    /// `System.TimeSpan`
    pub fn time_span() -> Self {
        Self::value_struct(SYSTEM_NAMESPACE, "TimeSpan")
    }

    /// `System.Exception`
    pub fn exception() -> Self {
        Self::class(SYSTEM_NAMESPACE, "Exception")
    }

    /// `System.Math`
    pub fn math() -> Self {
        Self::class(SYSTEM_NAMESPACE, "Math")
    }

    /// `System.Func<...>` delegate; the last argument is the return type
    pub fn func(args: Vec<TypeRef>) -> Self {
        Self::named(
            NamedType::new(Some(SYSTEM_NAMESPACE), "Func")
                .with_generic_args(args)
                .with_kind(TypeKind::Delegate),
        )
    }

    /// `System.Action<...>` delegate
    pub fn action(args: Vec<TypeRef>) -> Self {
        Self::named(
            NamedType::new(Some(SYSTEM_NAMESPACE), "Action")
                .with_generic_args(args)
                .with_kind(TypeKind::Delegate),
        )
    }

    /// Primitive kind, if this is a primitive
    pub const fn as_prim(&self) -> Option<PrimKind> {
        match self {
            Self::Prim(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Named type, if this is one
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }

    /// Is this `void`?
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Prim(PrimKind::Void))
    }

    /// Is this `bool`?
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Prim(PrimKind::Bool))
    }

    /// Is this `string`?
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::Prim(PrimKind::String))
    }

    /// Enum member table, looking through nullable wrappers
    pub fn enum_info(&self) -> Option<&EnumInfo> {
        match self {
            Self::Named(named) => match &named.kind {
                TypeKind::Enum(info) => Some(info),
                _ => None,
            },
            Self::Nullable(inner) => inner.enum_info(),
            _ => None,
        }
    }

    /// Is this a delegate type?
    pub fn is_delegate(&self) -> bool {
        matches!(self.as_named(), Some(n) if n.kind == TypeKind::Delegate)
    }

    /// Is this a compiler-generated anonymous type?
    pub fn is_anonymous(&self) -> bool {
        matches!(self.as_named(), Some(n) if matches!(n.kind, TypeKind::Anonymous(_)))
    }

    /// Is this a compiler-generated closure type?
    pub fn is_closure(&self) -> bool {
        matches!(self.as_named(), Some(n) if n.kind == TypeKind::Closure)
    }

    /// Is this `System.<name>`?
    pub fn is_system(&self, name: &str) -> bool {
        matches!(self.as_named(), Some(n) if n.is_system(name))
    }

    /// Is this the root exception type?
    pub fn is_root_exception(&self) -> bool {
        self.is_system("Exception")
    }

    /// Can a variable of this type hold `null`?
    pub fn admits_null(&self) -> bool {
        match self {
            Self::Prim(kind) => !kind.is_value_type(),
            Self::Named(named) => !matches!(named.kind, TypeKind::Struct | TypeKind::Enum(_)),
            Self::Array { .. } | Self::Nullable(_) => true,
            Self::GenericParam(_) => false,
        }
    }

    /// Underlying type of a nullable, or self
    pub fn non_nullable(&self) -> &TypeRef {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Array element type
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Array { element, .. } => Some(element),
            _ => None,
        }
    }
}

impl From<PrimKind> for TypeRef {
    fn from(kind: PrimKind) -> Self {
        Self::Prim(kind)
    }
}
