//! Unary and binary operators.
//!
//! Parenthesization preserves the tree's grouping and nothing more:
//!
//! - a child binding tighter than its parent is written bare
//! - a child binding looser is parenthesized
//! - a child at the same precedence is bare only on the operator's
//!   associative side, so `(a / b) * c` prints as `a / b * c` while
//!   `a - (b - c)` keeps its parentheses
//! - casts, assignments, lambdas and conditionals are parenthesized whenever
//!   they appear as operands
//!
//! Checked arithmetic is written as `checked(a + b)`, or as a `checked`
//! block when an operand spans several statements. The operand's leading
//! statements then open the block and the operation is returned:
//!
//! ```text
//! checked
//! {
//!     Log.Write();
//!
//!     return x + 1;
//! }
//! ```

use readex_repr::{precedence, BinaryOp, ConstantValue, Expr, NodeKind, TypeRef, UnaryOp};

use super::{
    call, BoxedTranslation, Parenthesized, PreludedStatement, ReturnStatement, Sequence,
    Terminated, Translation, TranslationSize,
};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

// ============================================================================
// Binary
// ============================================================================

/// Minimum operand precedences for a binary operator, left then right
pub fn operand_precedences(op: BinaryOp) -> (u8, u8) {
    let tier = op.precedence();
    if op.is_left_assoc() {
        (tier, tier + 1)
    } else {
        (tier + 1, tier)
    }
}

/// `left op right`
pub struct BinaryTranslation {
    left: BoxedTranslation,
    symbol: &'static str,
    right: BoxedTranslation,
    precedence: u8,
    size: TranslationSize,
}

impl BinaryTranslation {
    /// Combine already-translated operands, parenthesizing them as needed
    pub fn new(
        op: BinaryOp,
        left: BoxedTranslation,
        right: BoxedTranslation,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let (min_left, min_right) = operand_precedences(op);
        let mut translation = Self {
            left: Parenthesized::operand(left, min_left, ctx),
            symbol: op.symbol(),
            right: Parenthesized::operand(right, min_right, ctx),
            precedence: op.precedence(),
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for BinaryTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_translation(&*self.left);
        sink.write_text(" ");
        sink.write_text(self.symbol);
        sink.write_text(" ");
        sink.write_translation(&*self.right);
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Binary)
    }

    fn precedence(&self) -> u8 {
        self.precedence
    }

    fn is_multi_statement(&self) -> bool {
        self.left.is_multi_statement() || self.right.is_multi_statement()
    }
}

/// Translate a binary operation
pub fn translate_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    match op {
        BinaryOp::ArrayIndex => {
            call::index_translation(ctx.translate(left), vec![ctx.translate(right)], ctx)
        }
        BinaryOp::Power => math_pow(ctx.translate(left), ctx.translate(right), ctx),
        op if op.is_checked() => translate_checked(
            || -> BoxedTranslation {
                let left = ctx.translate(left);
                let right = ctx.translate(right);
                Box::new(BinaryTranslation::new(op.unchecked(), left, right, ctx))
            },
            ctx,
        ),
        op => Box::new(BinaryTranslation::new(
            op,
            ctx.translate(left),
            ctx.translate(right),
            ctx,
        )),
    }
}

/// `Math.Pow(base, exponent)`
pub fn math_pow(
    base: BoxedTranslation,
    exponent: BoxedTranslation,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    Sequence::new(
        vec![
            ctx.type_translation(&TypeRef::math()),
            ctx.plain("."),
            ctx.token("Pow", TokenKind::MethodName),
            ctx.plain("("),
            base,
            ctx.plain(", "),
            exponent,
            ctx.plain(")"),
        ],
        ctx,
    )
    .of_kind(NodeKind::Binary)
    .boxed()
}

// ============================================================================
// Checked
// ============================================================================

/// Build an operation with `build` and wrap it in a checked context,
/// keeping any statements hoisted out of its operands inside the context
pub fn translate_checked(
    build: impl FnOnce() -> BoxedTranslation,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let (inner, prelude) = ctx.collect_hoisted(build);
    Box::new(CheckedTranslation::new(inner, prelude, ctx))
}

/// `checked(inner)`, or a `checked` block around a multi-statement operand
pub struct CheckedTranslation {
    inner: BoxedTranslation,
    as_block: bool,
    size: TranslationSize,
}

impl CheckedTranslation {
    /// Wrap `inner` in a checked context, writing `prelude` ahead of it
    pub fn new(
        inner: BoxedTranslation,
        prelude: Vec<BoxedTranslation>,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let as_block = !prelude.is_empty() || inner.is_multi_statement();
        let inner = if prelude.is_empty() {
            inner
        } else {
            Box::new(ReturnStatement::new(inner, ctx))
        };
        let inner = if as_block {
            PreludedStatement::wrap(prelude, Terminated::wrap(inner, ctx), ctx)
        } else {
            inner
        };
        let mut translation = Self {
            inner,
            as_block,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Is the checked context written as a braced block?
    pub fn is_block(&self) -> bool {
        self.as_block
    }
}

impl Translation for CheckedTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_keyword("checked");
        if self.as_block {
            super::write_body(sink, &*self.inner);
        } else {
            sink.write_text("(");
            sink.write_translation(&*self.inner);
            sink.write_text(")");
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        self.inner.node_kind()
    }

    fn is_terminated(&self) -> bool {
        self.as_block
    }

    fn is_multi_statement(&self) -> bool {
        self.as_block
    }
}

// ============================================================================
// Unary
// ============================================================================

/// `op operand` or `operand op`
pub struct UnaryTranslation {
    prefix: &'static str,
    operand: BoxedTranslation,
    suffix: Option<(&'static str, TokenKind)>,
    precedence: u8,
    size: TranslationSize,
}

impl UnaryTranslation {
    fn new(
        prefix: &'static str,
        operand: BoxedTranslation,
        suffix: Option<(&'static str, TokenKind)>,
        precedence: u8,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let mut translation = Self {
            prefix,
            operand,
            suffix,
            precedence,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for UnaryTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_text(self.prefix);
        sink.write_translation(&*self.operand);
        if let Some((suffix, kind)) = self.suffix {
            sink.write_token(suffix, kind);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Unary)
    }

    fn precedence(&self) -> u8 {
        self.precedence
    }
}

/// Would writing `symbol` directly before this operand fuse into another token?
///
/// `-(-x)` must not become `--x`, nor `+(+x)` become `++x`.
fn fuses_with(symbol: &str, operand: &Expr) -> bool {
    let leading = match operand {
        Expr::Unary { op, .. } if !op.is_postfix() => op.symbol(),
        Expr::Constant(constant) => match &constant.value {
            ConstantValue::Int(v) if *v < 0 => "-",
            ConstantValue::Enum(v) if *v < 0 && constant.ty.enum_info().is_none() => "-",
            ConstantValue::Float(bits, _) if bits.to_f64().is_sign_negative() => "-",
            ConstantValue::Decimal(text) if text.starts_with('-') => "-",
            _ => "",
        },
        _ => "",
    };
    matches!(symbol, "-" | "+") && leading.starts_with(symbol)
}

/// Translate a unary operation
pub fn translate_unary(
    op: UnaryOp,
    operand: &Expr,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    if op == UnaryOp::NegateChecked {
        return translate_checked(
            || prefix_form(UnaryOp::Negate, operand, ctx.translate(operand), ctx),
            ctx,
        );
    }
    let translated = ctx.translate(operand);
    match op {
        UnaryOp::IsTrue => translated,
        UnaryOp::ArrayLength => Box::new(UnaryTranslation::new(
            "",
            Parenthesized::operand(translated, precedence::PRIMARY, ctx),
            Some((".Length", TokenKind::Variable)),
            precedence::PRIMARY,
            ctx,
        )),
        UnaryOp::PostIncrementAssign | UnaryOp::PostDecrementAssign => {
            Box::new(UnaryTranslation::new(
                "",
                Parenthesized::operand(translated, precedence::PRIMARY, ctx),
                Some((op.symbol(), TokenKind::Plain)),
                precedence::PRIMARY,
                ctx,
            ))
        }
        op => prefix_form(op, operand, translated, ctx),
    }
}

fn prefix_form(
    op: UnaryOp,
    operand: &Expr,
    translated: BoxedTranslation,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let symbol = op.symbol();
    let operand = if fuses_with(symbol, operand) {
        Box::new(Parenthesized::new(translated, ctx))
    } else {
        Parenthesized::operand(translated, precedence::UNARY, ctx)
    };
    Box::new(UnaryTranslation::new(
        symbol,
        operand,
        None,
        precedence::UNARY,
        ctx,
    ))
}
