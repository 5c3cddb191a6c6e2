//! Member descriptions
//!
//! The renderer never reflects over real types. Methods, properties, fields
//! and constructors are described through the [`DescribeMember`] capability,
//! which a reflection or metadata layer implements. [`MemberInfo`] is the
//! plain-data implementation used for serialized trees and tests.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::TypeRef;

/// What kind of member is described
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Property,
    Field,
    Constructor,
    Indexer,
    Event,
}

/// Parameter passing modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamModifier {
    #[default]
    None,
    Ref,
    Out,
    In,
    /// Variadic `params T[]`
    Params,
}

impl ParamModifier {
    /// Keyword written before an argument at a call site
    pub const fn call_site_keyword(self) -> Option<&'static str> {
        match self {
            Self::Ref => Some("ref"),
            Self::Out => Some("out"),
            _ => None,
        }
    }
}

/// One method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub modifier: ParamModifier,
}

impl ParamInfo {
    /// By-value parameter
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifier: ParamModifier::None,
        }
    }

    /// Set the modifier
    #[must_use]
    pub fn with_modifier(mut self, modifier: ParamModifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Capability interface over member metadata
///
/// Implementations must be cheap to query; the renderer asks the same
/// questions repeatedly while measuring and writing.
pub trait DescribeMember: fmt::Debug + Send + Sync {
    /// Simple member name (`Parse`, `Length`, `.ctor` for constructors)
    fn name(&self) -> &str;

    /// Member kind
    fn kind(&self) -> MemberKind;

    /// Type declaring the member
    fn declaring_type(&self) -> Option<&TypeRef>;

    /// Static member?
    fn is_static(&self) -> bool;

    /// Extension method? The first argument renders as the subject.
    fn is_extension(&self) -> bool {
        false
    }

    /// Generic method arguments
    fn generic_arguments(&self) -> &[TypeRef] {
        &[]
    }

    /// Must the generic arguments be written at the call site?
    fn requires_explicit_generic_arguments(&self) -> bool {
        false
    }

    /// Parameters, or `None` when the metadata cannot describe them
    fn parameters(&self) -> Option<&[ParamInfo]> {
        None
    }

    /// Return type for methods, value type for properties and fields
    fn member_type(&self) -> &TypeRef;
}

/// Plain-data member description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<TypeRef>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_extension: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeRef>,
    #[serde(default)]
    pub explicit_generic_arguments: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParamInfo>>,
    pub member_type: TypeRef,
}

impl MemberInfo {
    fn new(kind: MemberKind, declaring: TypeRef, name: &str, member_type: TypeRef) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            declaring_type: Some(declaring),
            is_static: false,
            is_extension: false,
            generic_arguments: Vec::new(),
            explicit_generic_arguments: false,
            parameters: None,
            member_type,
        }
    }

    /// Instance method
    pub fn method(declaring: TypeRef, name: &str, params: Vec<ParamInfo>, ret: TypeRef) -> Self {
        Self {
            parameters: Some(params),
            ..Self::new(MemberKind::Method, declaring, name, ret)
        }
    }

    /// Static method
    pub fn static_method(
        declaring: TypeRef,
        name: &str,
        params: Vec<ParamInfo>,
        ret: TypeRef,
    ) -> Self {
        Self {
            is_static: true,
            ..Self::method(declaring, name, params, ret)
        }
    }

    /// Static extension method; the first parameter is the extended value
    pub fn extension_method(
        declaring: TypeRef,
        name: &str,
        params: Vec<ParamInfo>,
        ret: TypeRef,
    ) -> Self {
        Self {
            is_extension: true,
            ..Self::static_method(declaring, name, params, ret)
        }
    }

    /// Instance property
    pub fn property(declaring: TypeRef, name: &str, ty: TypeRef) -> Self {
        Self::new(MemberKind::Property, declaring, name, ty)
    }

    /// Instance field
    pub fn field(declaring: TypeRef, name: &str, ty: TypeRef) -> Self {
        Self::new(MemberKind::Field, declaring, name, ty)
    }

    /// Constructor
    pub fn constructor(declaring: TypeRef, params: Vec<ParamInfo>) -> Self {
        Self {
            parameters: Some(params),
            ..Self::new(MemberKind::Constructor, declaring.clone(), ".ctor", declaring)
        }
    }

    /// Mark static
    #[must_use]
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Attach generic method arguments
    #[must_use]
    pub fn with_generic_arguments(mut self, args: Vec<TypeRef>, explicit: bool) -> Self {
        self.generic_arguments = args;
        self.explicit_generic_arguments = explicit;
        self
    }

    /// Forget parameter metadata
    #[must_use]
    pub fn without_parameters(mut self) -> Self {
        self.parameters = None;
        self
    }

    /// Snapshot any member description into plain data
    pub fn snapshot(member: &dyn DescribeMember) -> Self {
        Self {
            name: member.name().to_owned(),
            kind: member.kind(),
            declaring_type: member.declaring_type().cloned(),
            is_static: member.is_static(),
            is_extension: member.is_extension(),
            generic_arguments: member.generic_arguments().to_vec(),
            explicit_generic_arguments: member.requires_explicit_generic_arguments(),
            parameters: member.parameters().map(<[ParamInfo]>::to_vec),
            member_type: member.member_type().clone(),
        }
    }
}

impl DescribeMember for MemberInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> MemberKind {
        self.kind
    }

    fn declaring_type(&self) -> Option<&TypeRef> {
        self.declaring_type.as_ref()
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_extension(&self) -> bool {
        self.is_extension
    }

    fn generic_arguments(&self) -> &[TypeRef] {
        &self.generic_arguments
    }

    fn requires_explicit_generic_arguments(&self) -> bool {
        self.explicit_generic_arguments
    }

    fn parameters(&self) -> Option<&[ParamInfo]> {
        self.parameters.as_deref()
    }

    fn member_type(&self) -> &TypeRef {
        &self.member_type
    }
}

/// Reference to a member from a tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MemberRefRepr", into = "MemberRefRepr")]
pub enum MemberRef {
    /// Member resolved through the metadata layer
    Described(Arc<dyn DescribeMember>),
    /// Member the metadata layer could not resolve; only the name is known
    Missing { name: String },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MemberRefRepr {
    Described(MemberInfo),
    Missing { name: String },
}

impl From<MemberRefRepr> for MemberRef {
    fn from(repr: MemberRefRepr) -> Self {
        match repr {
            MemberRefRepr::Described(info) => Self::Described(Arc::new(info)),
            MemberRefRepr::Missing { name } => Self::Missing { name },
        }
    }
}

impl From<MemberRef> for MemberRefRepr {
    fn from(member: MemberRef) -> Self {
        match member {
            MemberRef::Described(described) => Self::Described(MemberInfo::snapshot(&*described)),
            MemberRef::Missing { name } => Self::Missing { name },
        }
    }
}

impl MemberRef {
    /// Wrap a member description
    pub fn described(member: impl DescribeMember + 'static) -> Self {
        Self::Described(Arc::new(member))
    }

    /// Unresolved member sentinel
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Member name, available for both resolved and missing members
    pub fn name(&self) -> &str {
        match self {
            Self::Described(member) => member.name(),
            Self::Missing { name } => name,
        }
    }

    /// The description, if resolved
    pub fn description(&self) -> Option<&dyn DescribeMember> {
        match self {
            Self::Described(member) => Some(&**member),
            Self::Missing { .. } => None,
        }
    }

    /// Is this the missing sentinel?
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Static member? Missing members are treated as instance members.
    pub fn is_static(&self) -> bool {
        self.description().is_some_and(|m| m.is_static())
    }

    /// Member kind, if resolved
    pub fn kind(&self) -> Option<MemberKind> {
        self.description().map(|m| m.kind())
    }

    /// Declaring type, if resolved
    pub fn declaring_type(&self) -> Option<&TypeRef> {
        self.description().and_then(|m| m.declaring_type())
    }

    /// Member value or return type, if resolved
    pub fn member_type(&self) -> Option<&TypeRef> {
        self.description().map(|m| m.member_type())
    }
}

impl PartialEq for MemberRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Described(a), Self::Described(b)) => {
                Arc::ptr_eq(a, b) || MemberInfo::snapshot(&**a) == MemberInfo::snapshot(&**b)
            }
            (Self::Missing { name: a }, Self::Missing { name: b }) => a == b,
            _ => false,
        }
    }
}

impl From<MemberInfo> for MemberRef {
    fn from(info: MemberInfo) -> Self {
        Self::described(info)
    }
}
