//! Type name rendering with a process-wide cache.
//!
//! Rendering a type name walks generic arguments and declaring types, and the
//! same few types appear many times in a tree. Names are memoized per
//! `(type, qualified)` key in a cache shared across threads, since separate
//! translate calls may run concurrently against the same metadata. The cache
//! is cleared whenever it reaches [`TYPE_NAME_CACHE_CAPACITY`] entries.
//!
//! Types mentioning an anonymous type anywhere are rendered fresh each time,
//! since their names come from a caller-supplied namer.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use readex_repr::{NamedType, TypeKind, TypeRef};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Name used for anonymous types when no namer is configured
pub const DEFAULT_ANONYMOUS_TYPE_NAME: &str = "AnonymousType";

/// Entries held before the type name cache starts over
pub const TYPE_NAME_CACHE_CAPACITY: usize = 4096;

type TypeNameKey = (TypeRef, bool);

/// Renders the name of an anonymous type
pub type AnonymousNamer<'n> = &'n dyn Fn(&TypeRef) -> String;

/// Global type name cache.
///
/// Uses `parking_lot::RwLock` so concurrent readers never block each other.
static TYPE_NAME_CACHE: Lazy<RwLock<FxHashMap<TypeNameKey, Arc<str>>>> =
    Lazy::new(|| RwLock::new(FxHashMap::default()));

/// Get the display name of a type, using the cache for repeated lookups.
///
/// Anonymous types render as [`DEFAULT_ANONYMOUS_TYPE_NAME`].
pub fn type_name(ty: &TypeRef, qualified: bool) -> Arc<str> {
    type_name_with(ty, qualified, None)
}

/// Get the display name of a type, naming any anonymous type it mentions
/// with `namer`
pub fn type_name_with(
    ty: &TypeRef,
    qualified: bool,
    namer: Option<AnonymousNamer<'_>>,
) -> Arc<str> {
    if let TypeRef::Prim(kind) = ty {
        return Arc::from(kind.keyword());
    }
    if mentions_anonymous(ty) {
        let mut rendered = String::new();
        render_type(&mut rendered, ty, qualified, namer);
        return Arc::from(rendered);
    }

    let key = (ty.clone(), qualified);

    // Fast path: read lock only
    {
        let cache = TYPE_NAME_CACHE.read();
        if let Some(name) = cache.get(&key) {
            trace!(name = %name, "type name cache hit");
            return Arc::clone(name);
        }
    }

    let mut rendered = String::new();
    render_type(&mut rendered, ty, qualified, None);
    let name: Arc<str> = Arc::from(rendered);
    trace!(name = %name, "type name cache miss");

    let mut cache = TYPE_NAME_CACHE.write();
    if cache.len() >= TYPE_NAME_CACHE_CAPACITY && !cache.contains_key(&key) {
        debug!(entries = cache.len(), "type name cache full, clearing");
        cache.clear();
    }
    // Another thread may have inserted while we were rendering
    Arc::clone(cache.entry(key).or_insert_with(|| Arc::clone(&name)))
}

fn mentions_anonymous(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Prim(_) | TypeRef::GenericParam(_) => false,
        TypeRef::Nullable(inner) => mentions_anonymous(inner),
        TypeRef::Array { element, .. } => mentions_anonymous(element),
        TypeRef::Named(named) => named_mentions_anonymous(named),
    }
}

fn named_mentions_anonymous(named: &NamedType) -> bool {
    matches!(named.kind, TypeKind::Anonymous(_))
        || named.generic_args.iter().any(mentions_anonymous)
        || named
            .declaring_type
            .as_deref()
            .is_some_and(named_mentions_anonymous)
}

/// Clear the type name cache.
pub fn clear_type_name_cache() {
    TYPE_NAME_CACHE.write().clear();
}

/// Number of cached type names.
pub fn type_name_cache_len() -> usize {
    TYPE_NAME_CACHE.read().len()
}

fn render_type(
    out: &mut String,
    ty: &TypeRef,
    qualified: bool,
    namer: Option<AnonymousNamer<'_>>,
) {
    match ty {
        TypeRef::Prim(kind) => out.push_str(kind.keyword()),
        TypeRef::Nullable(inner) => {
            render_type(out, inner, qualified, namer);
            out.push('?');
        }
        TypeRef::Array { element, rank } => {
            render_type(out, element, qualified, namer);
            out.push('[');
            for _ in 1..*rank {
                out.push(',');
            }
            out.push(']');
        }
        TypeRef::GenericParam(name) => out.push_str(name),
        TypeRef::Named(named) if matches!(named.kind, TypeKind::Anonymous(_)) => match namer {
            Some(namer) => out.push_str(&namer(ty)),
            None => out.push_str(DEFAULT_ANONYMOUS_TYPE_NAME),
        },
        TypeRef::Named(named) => render_named(out, named, qualified, namer),
    }
}

fn render_named(
    out: &mut String,
    named: &NamedType,
    qualified: bool,
    namer: Option<AnonymousNamer<'_>>,
) {
    if let Some(declaring) = &named.declaring_type {
        render_named(out, declaring, qualified, namer);
        out.push('.');
    } else if qualified {
        if let Some(ns) = &named.namespace {
            out.push_str(ns);
            out.push('.');
        }
    }
    out.push_str(&named.name);
    if named.generic_args.is_empty() {
        return;
    }
    out.push('<');
    for (i, arg) in named.generic_args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        render_type(out, arg, qualified, namer);
    }
    out.push('>');
}

/// Base for generated variable names: the camel-cased type name.
///
/// `int` gives `int`, `DateTime` gives `dateTime`, `List<string>` gives
/// `stringList`, `int[]` gives `intArray`.
pub fn variable_base_name(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Prim(kind) => kind.keyword().to_owned(),
        TypeRef::Nullable(inner) => variable_base_name(inner),
        TypeRef::Array { element, .. } => format!("{}Array", variable_base_name(element)),
        TypeRef::GenericParam(name) => camel_case(name),
        TypeRef::Named(named) => {
            let base = if matches!(named.kind, TypeKind::Anonymous(_)) {
                "anonymousType"
            } else {
                named.name.as_str()
            };
            match named.generic_args.first() {
                Some(arg) if named.generic_args.len() == 1 => {
                    format!("{}{}", variable_base_name(arg), pascal_case(base))
                }
                _ => camel_case(base),
            }
        }
    }
}

fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
