//! Method calls, call chains, delegate invocations and indexers.
//!
//! A call renders as `subject.Method<T>(args)`. Static calls use the
//! declaring type as the subject; extension calls move their first argument
//! into the subject position.
//!
//! A call whose subject is itself a call starts a chain. The chain is
//! collected down to its root expression and, when it has three or more
//! links or two links that do not fit on a line, written fluently:
//!
//! ```text
//! items
//!     .Where(item => item.IsActive)
//!     .Select(item => item.Name)
//!     .ToList()
//! ```

use readex_repr::{precedence, DescribeMember, Expr, MemberRef, NodeKind, ParamInfo};
use tracing::debug;

use super::parameters::{translate_arguments, ArgumentList};
use super::{BoxedTranslation, Parenthesized, Sequence, Translation, TranslationSize};
use crate::analysis::call_subject;
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// Chains with at least this many links are always written fluently
pub const FLUENT_CHAIN_LINKS: usize = 3;

// ============================================================================
// Calls
// ============================================================================

/// `.Method<T>(args)`, one link of a call
struct CallLink {
    name: BoxedTranslation,
    args: ArgumentList,
}

impl CallLink {
    fn new(
        method: &MemberRef,
        args: &[Expr],
        params: Option<&[ParamInfo]>,
        prefix_len: usize,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let name = method_name(method, ctx);
        let args = translate_arguments(args, params, ctx);
        let args = ArgumentList::new(args, prefix_len + name.len() + 1, ctx);
        Self { name, args }
    }

    fn len(&self) -> usize {
        1 + self.name.len() + self.args.len()
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_translation(&*self.name);
        sink.write_translation(&self.args);
    }
}

/// Method name with explicit generic arguments when the member requires them
fn method_name(method: &MemberRef, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let name = ctx.token(method.name(), TokenKind::MethodName);
    let Some(description) = method.description() else {
        return name;
    };
    let generics = description.generic_arguments();
    if generics.is_empty() || !description.requires_explicit_generic_arguments() {
        return name;
    }
    let mut parts = vec![name, ctx.plain("<")];
    for (index, ty) in generics.iter().enumerate() {
        if index > 0 {
            parts.push(ctx.plain(", "));
        }
        parts.push(ctx.type_translation(ty));
    }
    parts.push(ctx.plain(">"));
    Sequence::new(parts, ctx).boxed()
}

/// Arguments after the subject and the parameters they bind to
fn link_arguments<'e>(node: &'e Expr) -> (&'e [Expr], Option<&'e [ParamInfo]>) {
    let Expr::Call {
        subject,
        method,
        args,
    } = node
    else {
        return (&[], None);
    };
    let params = method.description().and_then(DescribeMember::parameters);
    let is_extension = subject.is_none()
        && !args.is_empty()
        && method.description().is_some_and(|m| m.is_extension());
    if is_extension {
        (&args[1..], params.map(|p| p.get(1..).unwrap_or_default()))
    } else {
        (args, params)
    }
}

/// A call or a chain of calls
pub struct CallTranslation {
    subject: Option<BoxedTranslation>,
    links: Vec<CallLink>,
    fluent: bool,
    size: TranslationSize,
}

impl CallTranslation {
    /// Is the chain written one link per line?
    pub fn is_fluent(&self) -> bool {
        self.fluent
    }
}

impl Translation for CallTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        let Some(subject) = &self.subject else {
            if let Some(link) = self.links.first() {
                link.layout(sink);
            }
            return;
        };
        sink.write_translation(&**subject);
        if self.fluent {
            sink.indent();
        }
        for link in &self.links {
            if self.fluent {
                sink.write_new_line();
            }
            sink.write_text(".");
            link.layout(sink);
        }
        if self.fluent {
            sink.unindent();
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Call)
    }
}

/// Translate a method call, collecting any chain it ends
pub fn translate_call(node: &Expr, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let mut chain = vec![node];
    let mut root = call_subject(node);
    while let Some(subject) = root {
        if !ctx.analysis().is_chain_link(subject) || ctx.has_custom_translator(subject) {
            break;
        }
        chain.push(subject);
        root = call_subject(subject);
    }

    let subject = match root {
        Some(root) => Some(Parenthesized::operand(
            ctx.translate(root),
            precedence::PRIMARY,
            ctx,
        )),
        None => static_subject(node, ctx),
    };
    let mut prefix_len = subject.as_ref().map_or(0, |s| s.len() + 1);
    let mut links = Vec::with_capacity(chain.len());
    for call in chain.iter().rev() {
        let Expr::Call { method, .. } = call else {
            continue;
        };
        if method.is_missing() {
            debug!(member = method.name(), "rendering unresolved member by name");
        }
        let (args, params) = link_arguments(call);
        let link = CallLink::new(method, args, params, prefix_len, ctx);
        prefix_len += link.len();
        links.push(link);
    }

    let single_line_len = subject.as_ref().map_or(0, |s| s.len())
        + links.iter().map(CallLink::len).sum::<usize>();
    let fluent = subject.is_some()
        && (links.len() >= FLUENT_CHAIN_LINKS
            || (links.len() > 1 && single_line_len > ctx.line_wrap_threshold()));

    let mut translation = CallTranslation {
        subject,
        links,
        fluent,
        size: TranslationSize::default(),
    };
    translation.size = ctx.measure(&translation);
    Box::new(translation)
}

/// Declaring type of a static call without a subject node
fn static_subject(node: &Expr, ctx: &TranslationContext<'_>) -> Option<BoxedTranslation> {
    let Expr::Call { method, .. } = node else {
        return None;
    };
    method
        .declaring_type()
        .filter(|_| method.is_static())
        .map(|ty| ctx.type_translation(ty))
}

// ============================================================================
// Invocations and indexers
// ============================================================================

/// `target.Invoke(args)`
pub fn translate_invoke(
    target: &Expr,
    args: &[Expr],
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let target = Parenthesized::operand(ctx.translate(target), precedence::PRIMARY, ctx);
    let name = ctx.token("Invoke", TokenKind::MethodName);
    let prefix_len = target.len() + 1 + name.len();
    let args = ArgumentList::new(translate_arguments(args, None, ctx), prefix_len, ctx);
    Sequence::new(vec![target, ctx.plain("."), name, Box::new(args)], ctx)
        .of_kind(NodeKind::Invoke)
        .boxed()
}

/// `subject[a, b]`
pub fn translate_index(
    subject: &Expr,
    args: &[Expr],
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let args = args.iter().map(|arg| ctx.translate(arg)).collect();
    index_translation(ctx.translate(subject), args, ctx)
}

/// `subject[args]` from translated parts
pub fn index_translation(
    subject: BoxedTranslation,
    args: Vec<BoxedTranslation>,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let mut parts = Vec::with_capacity(args.len() * 2 + 2);
    parts.push(Parenthesized::operand(subject, precedence::PRIMARY, ctx));
    parts.push(ctx.plain("["));
    for (index, arg) in args.into_iter().enumerate() {
        if index > 0 {
            parts.push(ctx.plain(", "));
        }
        parts.push(arg);
    }
    parts.push(ctx.plain("]"));
    Sequence::new(parts, ctx).of_kind(NodeKind::Index).boxed()
}
