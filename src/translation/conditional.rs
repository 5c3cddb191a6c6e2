//! Conditionals.
//!
//! A value-producing conditional whose branches are single expressions is a
//! ternary, wrapped onto indented `?` and `:` lines when it does not fit.
//! Everything else is an `if` statement:
//!
//! - `if` alone when there is no alternate
//! - `else if` chains when the alternate is itself a conditional
//! - a short-circuit form when both branches leave, the alternate following
//!   the `if` block unbraced:
//!
//! ```text
//! if (value == null)
//! {
//!     throw new ArgumentNullException();
//! }
//!
//! return value.Length;
//! ```

use readex_repr::{precedence, Conditional, Expr, NodeKind};

use super::{BoxedTranslation, Parenthesized, Position, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::TranslationSink;

/// Translate a conditional in `position`
pub fn translate_conditional(
    conditional: &Conditional,
    position: Position,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    if let Some(alternate) = conditional.alternate() {
        if !conditional.ty.is_void() && position.uses_value() {
            // Branch statements cannot be hoisted past the test
            let (if_true, true_prelude) =
                ctx.collect_hoisted(|| ctx.translate(&conditional.if_true));
            let (if_false, false_prelude) = ctx.collect_hoisted(|| ctx.translate(alternate));
            if true_prelude.is_empty()
                && false_prelude.is_empty()
                && !if_true.is_multi_statement()
                && !if_false.is_multi_statement()
            {
                let test = ctx.translate(&conditional.test);
                return Box::new(TernaryTranslation::new(test, if_true, if_false, ctx));
            }
        }
    }

    let returns = !conditional.ty.is_void() && matches!(position, Position::Body | Position::Return);
    Box::new(IfStatement::new(conditional, returns, ctx))
}

// ============================================================================
// Ternary
// ============================================================================

/// `test ? a : b`
pub struct TernaryTranslation {
    test: BoxedTranslation,
    if_true: BoxedTranslation,
    if_false: BoxedTranslation,
    wrapped: bool,
    size: TranslationSize,
}

impl TernaryTranslation {
    fn new(
        test: BoxedTranslation,
        if_true: BoxedTranslation,
        if_false: BoxedTranslation,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let test = Parenthesized::operand(test, precedence::CONDITIONAL + 1, ctx);
        let if_true = Parenthesized::operand(if_true, precedence::CONDITIONAL, ctx);
        let if_false = Parenthesized::operand(if_false, precedence::CONDITIONAL, ctx);
        let inline_len = test.len() + if_true.len() + if_false.len() + 6;
        let mut translation = Self {
            test,
            if_true,
            if_false,
            wrapped: inline_len > ctx.line_wrap_threshold(),
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }

    /// Are the branches on their own lines?
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }
}

impl Translation for TernaryTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_translation(&*self.test);
        if self.wrapped {
            sink.indent();
            sink.write_new_line();
            sink.write_text("? ");
            sink.write_translation(&*self.if_true);
            sink.write_new_line();
            sink.write_text(": ");
            sink.write_translation(&*self.if_false);
            sink.unindent();
        } else {
            sink.write_text(" ? ");
            sink.write_translation(&*self.if_true);
            sink.write_text(" : ");
            sink.write_translation(&*self.if_false);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Conditional)
    }

    fn precedence(&self) -> u8 {
        precedence::CONDITIONAL
    }

    fn needs_operand_parentheses(&self) -> bool {
        true
    }
}

// ============================================================================
// Statements
// ============================================================================

enum Alternate {
    None,
    ElseIf(Box<IfStatement>),
    Else(BoxedTranslation),
    ShortCircuit(BoxedTranslation),
}

/// `if (test) { ... }` with its optional alternate
pub struct IfStatement {
    test: BoxedTranslation,
    body: BoxedTranslation,
    alternate: Alternate,
    returns: bool,
    size: TranslationSize,
}

impl IfStatement {
    fn new(conditional: &Conditional, returns: bool, ctx: &TranslationContext<'_>) -> Self {
        let test = ctx.translate(&conditional.test);
        let body = ctx.translate_body(&conditional.if_true, returns);
        let alternate = match conditional.alternate() {
            None => Alternate::None,
            Some(node @ Expr::Conditional(nested)) if !ctx.has_custom_translator(node) => {
                match ctx.collect_hoisted(|| Self::new(nested, returns, ctx)) {
                    (nested, prelude) if prelude.is_empty() => Alternate::ElseIf(Box::new(nested)),
                    // The nested test needs statements of its own first
                    _ => Alternate::Else(ctx.translate_body(node, returns)),
                }
            }
            Some(node) => {
                let translated = ctx.translate_body(node, returns);
                if body.has_exit() && translated.has_exit() {
                    Alternate::ShortCircuit(translated)
                } else {
                    Alternate::Else(translated)
                }
            }
        };
        let mut translation = Self {
            test,
            body,
            alternate,
            returns,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for IfStatement {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control("if");
        sink.write_text(" (");
        sink.write_translation(&*self.test);
        sink.write_text(")");
        super::write_body(sink, &*self.body);
        match &self.alternate {
            Alternate::None => {}
            Alternate::ElseIf(nested) => {
                sink.write_new_line();
                sink.write_control("else");
                sink.write_text(" ");
                sink.write_translation(&**nested);
            }
            Alternate::Else(body) => {
                sink.write_new_line();
                sink.write_control("else");
                super::write_body(sink, &**body);
            }
            Alternate::ShortCircuit(rest) => {
                sink.write_blank_line();
                sink.write_translation(&**rest);
            }
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Conditional)
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn has_exit(&self) -> bool {
        self.body.has_exit()
            && match &self.alternate {
                Alternate::None => false,
                Alternate::ElseIf(nested) => nested.has_exit(),
                Alternate::Else(body) | Alternate::ShortCircuit(body) => body.has_exit(),
            }
    }

    fn is_multi_statement(&self) -> bool {
        true
    }

    fn handles_return(&self) -> bool {
        self.returns
    }

    fn blank_line_before(&self) -> bool {
        true
    }

    fn blank_line_after(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TranslationSettings;
    use crate::writer::TranslationWriter;
    use readex_repr::{BinaryOp, ExprBuilder, MemberInfo, TypeRef, Variable};

    fn render_with(expr: &Expr, settings: &TranslationSettings) -> String {
        let ctx = TranslationContext::new(expr, settings);
        let translation = ctx.translate_in(expr, Position::Body);
        let mut writer = TranslationWriter::new("    ", None, translation.len());
        translation.write(&mut writer);
        let out = writer.finish();
        assert_eq!(out.chars().count(), translation.len());
        out
    }

    fn render(expr: &Expr) -> String {
        render_with(expr, &TranslationSettings::default())
    }

    fn write_line(arg: Expr) -> Expr {
        Expr::static_call(
            MemberInfo::static_method(
                TypeRef::class("System", "Console"),
                "WriteLine",
                vec![],
                TypeRef::VOID,
            ),
            vec![arg],
        )
    }

    fn positive(x: &Variable) -> Expr {
        Expr::binary(BinaryOp::GreaterThan, Expr::var(x), Expr::int(0))
    }

    #[test]
    fn test_value_conditional_is_ternary() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::condition(positive(&x), Expr::int(1), Expr::int(-1));
        assert_eq!(render(&root), "x > 0 ? 1 : -1");
    }

    #[test]
    fn test_long_ternary_wraps() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::condition(
            positive(&x),
            Expr::string("positive number"),
            Expr::string("not positive"),
        );
        let narrow = TranslationSettings::default().wrap_lines_at(20);
        assert_eq!(
            render_with(&root, &narrow),
            "x > 0\n    ? \"positive number\"\n    : \"not positive\""
        );
    }

    #[test]
    fn test_if_and_if_else() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::if_then(positive(&x), write_line(Expr::var(&x)));
        assert_eq!(render(&root), "if (x > 0)\n{\n    Console.WriteLine(x);\n}");

        let root = Expr::if_then_else(
            positive(&x),
            write_line(Expr::string("yes")),
            write_line(Expr::string("no")),
        );
        assert_eq!(
            render(&root),
            "if (x > 0)\n{\n    Console.WriteLine(\"yes\");\n}\nelse\n{\n    Console.WriteLine(\"no\");\n}"
        );
    }

    #[test]
    fn test_else_if_chain() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::if_then_else(
            positive(&x),
            write_line(Expr::int(1)),
            Expr::if_then_else(
                Expr::binary(BinaryOp::LessThan, Expr::var(&x), Expr::int(0)),
                write_line(Expr::int(-1)),
                write_line(Expr::int(0)),
            ),
        );
        assert_eq!(
            render(&root),
            "if (x > 0)\n{\n    Console.WriteLine(1);\n}\nelse if (x < 0)\n{\n    Console.WriteLine(-1);\n}\nelse\n{\n    Console.WriteLine(0);\n}"
        );
    }

    #[test]
    fn test_exiting_branches_short_circuit() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::if_then_else(
            positive(&x),
            Expr::throw(Expr::string("a")),
            Expr::throw(Expr::string("b")),
        );
        assert_eq!(
            render(&root),
            "if (x > 0)\n{\n    throw \"a\";\n}\n\nthrow \"b\";"
        );
    }

    #[test]
    fn test_multi_statement_branches_return_values() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let branch = |value: i32| {
            Expr::block(
                vec![],
                vec![write_line(Expr::int(value)), Expr::int(value)],
            )
        };
        let root = Expr::condition(positive(&x), branch(1), branch(2));
        assert_eq!(
            render(&root),
            "if (x > 0)\n{\n    Console.WriteLine(1);\n\n    return 1;\n}\n\nConsole.WriteLine(2);\n\nreturn 2;"
        );
    }
}
