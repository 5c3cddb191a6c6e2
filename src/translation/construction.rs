//! Object and array construction.
//!
//! `new T(args)` with object and collection initializers, anonymous objects
//! `new { Id = id }`, and arrays either sized, `new int[3]`, or initialized,
//! `new[] { 1, 2 }`. Initializer lists stay on one line while they fit and
//! every entry is a single line; otherwise each entry gets its own line:
//!
//! ```text
//! new Person
//! {
//!     Name = "Ann",
//!     Address = new Address { City = "Oslo" }
//! }
//! ```

use readex_repr::{
    ArrayInit, Expr, Initializer, MemberRef, NewArray, NewObject, NodeKind, TypeKind, TypeRef,
};

use super::parameters::{translate_arguments, ArgumentList};
use super::{BoxedTranslation, Sequence, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

// ============================================================================
// Initializer lists
// ============================================================================

/// `{ a, b }`, or one entry per line
pub struct InitializerList {
    entries: Vec<BoxedTranslation>,
    multiline: bool,
    size: TranslationSize,
}

impl InitializerList {
    /// Build a list whose opening brace follows `prefix_len` characters
    pub fn new(
        entries: Vec<BoxedTranslation>,
        prefix_len: usize,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let inline_len = prefix_len
            + 4
            + entries.iter().map(|entry| entry.len()).sum::<usize>()
            + entries.len().saturating_sub(1) * 2;
        let multiline = entries.iter().any(|entry| entry.size().lines > 0)
            || (entries.len() > 1 && inline_len > ctx.line_wrap_threshold());
        let mut translation = Self {
            entries,
            multiline,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Is each entry on its own line?
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Write the separator between the owning expression and the list
    fn lead_in(&self, sink: &mut dyn TranslationSink) {
        if self.multiline {
            sink.write_new_line();
        } else {
            sink.write_text(" ");
        }
    }
}

impl Translation for InitializerList {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        if self.entries.is_empty() {
            sink.write_text("{ }");
            return;
        }
        if !self.multiline {
            sink.write_text("{ ");
            super::write_separated(sink, &self.entries, ", ");
            sink.write_text(" }");
            return;
        }
        sink.write_opening_brace();
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                sink.write_text(",");
                sink.write_new_line();
            }
            sink.write_translation(&**entry);
        }
        sink.write_closing_brace();
    }
}

/// `Member = { ... }`
struct NestedInitializer {
    name: BoxedTranslation,
    list: InitializerList,
    size: TranslationSize,
}

impl Translation for NestedInitializer {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_translation(&*self.name);
        sink.write_text(" =");
        self.list.lead_in(sink);
        sink.write_translation(&self.list);
    }
}

fn member_name(member: &MemberRef, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    ctx.token(member.name(), TokenKind::Variable)
}

fn translate_initializer(
    initializer: &Initializer,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    match initializer {
        Initializer::Member { member, value } => Sequence::new(
            vec![member_name(member, ctx), ctx.plain(" = "), ctx.translate(value)],
            ctx,
        )
        .boxed(),
        Initializer::Elements { args } => match args.as_slice() {
            [single] => ctx.translate(single),
            args => {
                let entries = args.iter().map(|arg| ctx.translate(arg)).collect();
                Box::new(InitializerList::new(entries, 0, ctx))
            }
        },
        Initializer::Nested {
            member,
            initializers,
        } => {
            let name = member_name(member, ctx);
            let entries = initializers
                .iter()
                .map(|nested| translate_initializer(nested, ctx))
                .collect();
            let list = InitializerList::new(entries, name.len() + 3, ctx);
            let mut translation = NestedInitializer {
                name,
                list,
                size: TranslationSize::default(),
            };
            translation.size = ctx.measure(&translation);
            Box::new(translation)
        }
    }
}

// ============================================================================
// Objects
// ============================================================================

/// `new T(args) { initializers }`
pub struct NewTranslation {
    ty: Option<BoxedTranslation>,
    args: Option<ArgumentList>,
    initializers: Option<InitializerList>,
    size: TranslationSize,
}

impl Translation for NewTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_keyword("new");
        if let Some(ty) = &self.ty {
            sink.write_text(" ");
            sink.write_translation(&**ty);
        }
        if let Some(args) = &self.args {
            sink.write_translation(args);
        }
        if let Some(initializers) = &self.initializers {
            initializers.lead_in(sink);
            sink.write_translation(initializers);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::New)
    }
}

/// Translate an object construction
pub fn translate_new(node: &NewObject, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let mut translation = match &node.ty {
        TypeRef::Named(named) if matches!(named.kind, TypeKind::Anonymous(_)) => {
            anonymous_object(node, ctx)
        }
        ty => {
            let ty = ctx.type_translation(ty);
            let prefix_len = 4 + ty.len();
            let args = (!node.args.is_empty() || node.initializers.is_empty()).then(|| {
                let params = node
                    .constructor
                    .as_ref()
                    .and_then(MemberRef::description)
                    .and_then(|constructor| constructor.parameters());
                ArgumentList::new(translate_arguments(&node.args, params, ctx), prefix_len, ctx)
            });
            let initializers = (!node.initializers.is_empty()).then(|| {
                let entries = node
                    .initializers
                    .iter()
                    .map(|initializer| translate_initializer(initializer, ctx))
                    .collect();
                let prefix_len = prefix_len + args.as_ref().map_or(0, |a| a.len()) + 1;
                InitializerList::new(entries, prefix_len, ctx)
            });
            NewTranslation {
                ty: Some(ty),
                args,
                initializers,
                size: TranslationSize::default(),
            }
        }
    };
    translation.size = ctx.measure(&translation);
    Box::new(translation)
}

/// `new { Name = value }`, pairing arguments with the type's property names
fn anonymous_object(node: &NewObject, ctx: &TranslationContext<'_>) -> NewTranslation {
    let names: &[String] = match &node.ty {
        TypeRef::Named(named) => match &named.kind {
            TypeKind::Anonymous(names) => names,
            _ => &[],
        },
        _ => &[],
    };
    let entries = node
        .args
        .iter()
        .zip(names)
        .map(|(arg, name)| {
            Sequence::new(
                vec![
                    ctx.token(name.as_str(), TokenKind::Variable),
                    ctx.plain(" = "),
                    ctx.translate(arg),
                ],
                ctx,
            )
            .boxed()
        })
        .collect();
    NewTranslation {
        ty: None,
        args: None,
        initializers: Some(InitializerList::new(entries, 4, ctx)),
        size: TranslationSize::default(),
    }
}

// ============================================================================
// Arrays
// ============================================================================

/// Translate an array construction
pub fn translate_new_array(node: &NewArray, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let mut parts = vec![ctx.keyword("new")];
    match &node.init {
        ArrayInit::Bounds(bounds) => {
            let (innermost, suffix) = jagged_parts(&node.element_type);
            parts.push(ctx.plain(" "));
            parts.push(ctx.type_translation(innermost));
            parts.push(ctx.plain("["));
            for (index, bound) in bounds.iter().enumerate() {
                if index > 0 {
                    parts.push(ctx.plain(", "));
                }
                parts.push(ctx.translate(bound));
            }
            parts.push(ctx.plain("]"));
            if !suffix.is_empty() {
                parts.push(ctx.plain(suffix));
            }
        }
        ArrayInit::Elements(items) if items.is_empty() => {
            let (innermost, suffix) = jagged_parts(&node.element_type);
            parts.push(ctx.plain(" "));
            parts.push(ctx.type_translation(innermost));
            parts.push(ctx.plain("[0]"));
            if !suffix.is_empty() {
                parts.push(ctx.plain(suffix));
            }
        }
        ArrayInit::Elements(items) => {
            if element_type_needed(node, items, ctx) {
                parts.push(ctx.plain(" "));
                parts.push(ctx.type_translation(&node.element_type));
            }
            parts.push(ctx.plain("[]"));
            let prefix_len = parts.iter().map(|part| part.len()).sum::<usize>() + 1;
            let entries = items.iter().map(|item| ctx.translate(item)).collect();
            let list = InitializerList::new(entries, prefix_len, ctx);
            parts.push(if list.is_multiline() {
                Box::new(LineBreak::new(ctx))
            } else {
                ctx.plain(" ")
            });
            parts.push(Box::new(list));
        }
    }
    Sequence::new(parts, ctx).of_kind(NodeKind::NewArray).boxed()
}

/// Innermost element type of a jagged array, and the `[]` suffixes that follow
/// the bounds
fn jagged_parts(element: &TypeRef) -> (&TypeRef, String) {
    let mut innermost = element;
    let mut suffix = String::new();
    while let TypeRef::Array { element, rank } = innermost {
        suffix.push('[');
        for _ in 1..*rank {
            suffix.push(',');
        }
        suffix.push(']');
        innermost = &**element;
    }
    (innermost, suffix)
}

/// Must `new T[]` be written rather than `new[]`?
fn element_type_needed(node: &NewArray, items: &[Expr], ctx: &TranslationContext<'_>) -> bool {
    ctx.settings().show_implicit_array_element_types
        || items.iter().all(Expr::is_null)
        || items.iter().any(|item| item.ty() != node.element_type)
}

/// A bare line break
struct LineBreak {
    size: TranslationSize,
}

impl LineBreak {
    fn new(ctx: &TranslationContext<'_>) -> Self {
        let mut translation = Self {
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for LineBreak {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_new_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TranslationSettings;
    use crate::writer::TranslationWriter;
    use readex_repr::{ExprBuilder, MemberInfo, NamedType, ParamInfo, ParamModifier};

    fn render_with(expr: &Expr, settings: &TranslationSettings) -> String {
        let ctx = TranslationContext::new(expr, settings);
        let translation = ctx.translate(expr);
        let mut writer = TranslationWriter::new("    ", None, translation.len());
        translation.write(&mut writer);
        let out = writer.finish();
        assert_eq!(out.chars().count(), translation.len());
        out
    }

    fn render(expr: &Expr) -> String {
        render_with(expr, &TranslationSettings::default())
    }

    fn new_object(ty: TypeRef, args: Vec<Expr>, initializers: Vec<Initializer>) -> Expr {
        Expr::New(Box::new(NewObject {
            ty,
            constructor: None,
            args,
            initializers,
        }))
    }

    fn new_array(element_type: TypeRef, init: ArrayInit) -> Expr {
        Expr::NewArray(Box::new(NewArray { element_type, init }))
    }

    #[test]
    fn test_constructor_calls() {
        let builder = TypeRef::class("System.Text", "StringBuilder");
        assert_eq!(
            render(&new_object(builder.clone(), vec![], vec![])),
            "new StringBuilder()"
        );
        assert_eq!(
            render(&new_object(builder, vec![Expr::int(16)], vec![])),
            "new StringBuilder(16)"
        );
    }

    #[test]
    fn test_object_initializers() {
        let person = TypeRef::class("App", "Person");
        let name = MemberInfo::property(person.clone(), "Name", TypeRef::STRING);
        let age = MemberInfo::property(person.clone(), "Age", TypeRef::INT);
        let root = new_object(
            person,
            vec![],
            vec![
                Initializer::Member {
                    member: name.into(),
                    value: Expr::string("Ann"),
                },
                Initializer::Member {
                    member: age.into(),
                    value: Expr::int(30),
                },
            ],
        );
        assert_eq!(render(&root), "new Person { Name = \"Ann\", Age = 30 }");
        let narrow = TranslationSettings::default().wrap_lines_at(20);
        assert_eq!(
            render_with(&root, &narrow),
            "new Person\n{\n    Name = \"Ann\",\n    Age = 30\n}"
        );
    }

    #[test]
    fn test_collection_initializers() {
        let list = TypeRef::generic("System.Collections.Generic", "List", vec![TypeRef::INT]);
        let root = new_object(
            list,
            vec![],
            vec![
                Initializer::Elements {
                    args: vec![Expr::int(1)],
                },
                Initializer::Elements {
                    args: vec![Expr::int(2)],
                },
            ],
        );
        assert_eq!(render(&root), "new List<int> { 1, 2 }");

        let dictionary = TypeRef::generic(
            "System.Collections.Generic",
            "Dictionary",
            vec![TypeRef::INT, TypeRef::STRING],
        );
        let root = new_object(
            dictionary,
            vec![],
            vec![Initializer::Elements {
                args: vec![Expr::int(1), Expr::string("one")],
            }],
        );
        assert_eq!(render(&root), "new Dictionary<int, string> { { 1, \"one\" } }");
    }

    #[test]
    fn test_nested_member_initializer() {
        let order = TypeRef::class("App", "Order");
        let lines = MemberInfo::property(order.clone(), "Lines", TypeRef::OBJECT);
        let root = new_object(
            order,
            vec![],
            vec![Initializer::Nested {
                member: lines.into(),
                initializers: vec![Initializer::Elements {
                    args: vec![Expr::string("a")],
                }],
            }],
        );
        assert_eq!(render(&root), "new Order { Lines = { \"a\" } }");
    }

    #[test]
    fn test_constructor_parameters_apply() {
        let parser = TypeRef::class("App", "Parser");
        let mut b = ExprBuilder::new();
        let state = b.variable("state", TypeRef::INT);
        let constructor = MemberInfo::constructor(
            parser.clone(),
            vec![ParamInfo::new("state", TypeRef::INT).with_modifier(ParamModifier::Ref)],
        );
        let root = Expr::New(Box::new(NewObject {
            ty: parser,
            constructor: Some(constructor.into()),
            args: vec![Expr::var(&state)],
            initializers: vec![],
        }));
        assert_eq!(render(&root), "new Parser(ref state)");
    }

    #[test]
    fn test_anonymous_objects() {
        let anonymous = TypeRef::named(
            NamedType::new(None, "<>f__AnonymousType0")
                .with_kind(TypeKind::Anonymous(vec!["Id".into(), "Name".into()])),
        );
        let root = new_object(anonymous, vec![Expr::int(1), Expr::string("x")], vec![]);
        assert_eq!(render(&root), "new { Id = 1, Name = \"x\" }");
    }

    #[test]
    fn test_sized_arrays() {
        assert_eq!(
            render(&new_array(TypeRef::INT, ArrayInit::Bounds(vec![Expr::int(3)]))),
            "new int[3]"
        );
        assert_eq!(
            render(&new_array(
                TypeRef::INT,
                ArrayInit::Bounds(vec![Expr::int(2), Expr::int(3)])
            )),
            "new int[2, 3]"
        );
        assert_eq!(
            render(&new_array(
                TypeRef::array_of(TypeRef::INT),
                ArrayInit::Bounds(vec![Expr::int(3)])
            )),
            "new int[3][]"
        );
        assert_eq!(
            render(&new_array(TypeRef::STRING, ArrayInit::Elements(vec![]))),
            "new string[0]"
        );
    }

    #[test]
    fn test_initialized_arrays() {
        let ints = ArrayInit::Elements(vec![Expr::int(1), Expr::int(2)]);
        assert_eq!(render(&new_array(TypeRef::INT, ints.clone())), "new[] { 1, 2 }");
        let explicit = TranslationSettings::default().show_implicit_array_types();
        assert_eq!(
            render_with(&new_array(TypeRef::INT, ints), &explicit),
            "new int[] { 1, 2 }"
        );
        assert_eq!(
            render(&new_array(
                TypeRef::OBJECT,
                ArrayInit::Elements(vec![Expr::int(1), Expr::string("a")])
            )),
            "new object[] { 1, \"a\" }"
        );
    }
}
