//! Argument lists.
//!
//! Arguments render inline as `(a, b)` until there are more than three of
//! them, or the single-line form of several arguments would pass the wrap
//! threshold; then each goes on its own indented line:
//!
//! ```text
//! Method(
//!     first,
//!     second,
//!     third,
//!     fourth)
//! ```
//!
//! Arguments are matched against the member's parameter descriptions when
//! the member can describe them: `params` arrays passed as inline array
//! literals are flattened, and `out`/`ref` parameters get their keywords.

use readex_repr::{ArrayInit, Expr, ParamInfo, ParamModifier};

use super::{BoxedTranslation, Sequence, Translation, TranslationSize};
use crate::analysis::{Declaration, NodeKey};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// Most arguments kept on a single line
pub const MAX_INLINE_ARGUMENTS: usize = 3;

/// `(a, b, c)`, split one per line when long
pub struct ArgumentList {
    args: Vec<BoxedTranslation>,
    split: bool,
    size: TranslationSize,
}

impl ArgumentList {
    /// Build a list for a call whose text before `(` is `prefix_len` long
    pub fn new(
        args: Vec<BoxedTranslation>,
        prefix_len: usize,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let inline_len = prefix_len
            + 2
            + args.iter().map(|arg| arg.len()).sum::<usize>()
            + args.len().saturating_sub(1) * 2;
        let split = args.len() > MAX_INLINE_ARGUMENTS
            || (args.len() > 1 && inline_len > ctx.line_wrap_threshold());
        let mut translation = Self {
            args,
            split,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Is each argument on its own line?
    pub fn is_split(&self) -> bool {
        self.split
    }

    /// Number of arguments
    pub fn count(&self) -> usize {
        self.args.len()
    }
}

impl Translation for ArgumentList {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_text("(");
        if self.split {
            sink.write_new_line();
            sink.indent();
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    sink.write_text(",");
                    sink.write_new_line();
                }
                sink.write_translation(&**arg);
            }
            sink.unindent();
        } else {
            super::write_separated(sink, &self.args, ", ");
        }
        sink.write_text(")");
    }
}

/// Translate call arguments against optional parameter descriptions
pub fn translate_arguments(
    args: &[Expr],
    params: Option<&[ParamInfo]>,
    ctx: &TranslationContext<'_>,
) -> Vec<BoxedTranslation> {
    let Some(params) = params else {
        return args.iter().map(|arg| ctx.translate(arg)).collect();
    };
    let mut translated = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        let modifier = params
            .get(index)
            .or_else(|| params.last().filter(|p| p.modifier == ParamModifier::Params))
            .map_or(ParamModifier::None, |p| p.modifier);
        match modifier {
            ParamModifier::Params if index + 1 == params.len() => match arg {
                Expr::NewArray(array) => match &array.init {
                    ArrayInit::Elements(items) => {
                        translated.extend(items.iter().map(|item| ctx.translate(item)));
                    }
                    ArrayInit::Bounds(_) => translated.push(ctx.translate(arg)),
                },
                _ => translated.push(ctx.translate(arg)),
            },
            ParamModifier::Out => translated.push(out_argument(arg, ctx)),
            ParamModifier::Ref => translated.push(
                Sequence::new(
                    vec![ctx.keyword("ref"), ctx.plain(" "), ctx.translate(arg)],
                    ctx,
                )
                .boxed(),
            ),
            _ => translated.push(ctx.translate(arg)),
        }
    }
    translated
}

/// `out x`, `out var x`, `out int x` or `out _`
fn out_argument(arg: &Expr, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let mut parts = vec![ctx.keyword("out"), ctx.plain(" ")];
    let Expr::Variable(variable) = arg else {
        parts.push(ctx.translate(arg));
        return Sequence::new(parts, ctx).boxed();
    };
    match ctx.analysis().declaration(variable.id) {
        Declaration::Discard => parts.push(ctx.plain("_")),
        Declaration::OutVar { argument } if argument == NodeKey::of(arg) => {
            let declared_type = if ctx.settings().uses_implicit_type_names() {
                ctx.keyword("var")
            } else {
                ctx.type_translation(&variable.ty)
            };
            parts.extend([
                declared_type,
                ctx.plain(" "),
                ctx.token(&*ctx.variable_name(variable), TokenKind::Variable),
            ]);
        }
        _ => parts.push(ctx.translate(arg)),
    }
    Sequence::new(parts, ctx).boxed()
}
