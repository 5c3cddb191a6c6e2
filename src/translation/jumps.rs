//! Jumps and labels.
//!
//! `throw`, `return`, `goto`, `break` and `continue` all leave the current
//! statement sequence, which is what lets blocks prune the statements after
//! them and lets switch arms skip their `break;`.
//!
//! A `return` that carries the value of a lambda or root body is written as
//! the bare value; the body's own return placement takes over from there.

use readex_repr::{Expr, Goto, GotoKind, LabelExpr, NodeKind};

use super::{BoxedTranslation, EmptyTranslation, Position, Translation, TranslationSize};
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// `keyword operand`, leaving the current sequence
pub struct JumpTranslation {
    keyword: &'static str,
    operand: Option<BoxedTranslation>,
    kind: NodeKind,
    size: TranslationSize,
}

impl JumpTranslation {
    fn new(
        keyword: &'static str,
        operand: Option<BoxedTranslation>,
        kind: NodeKind,
        ctx: &TranslationContext<'_>,
    ) -> Self {
        let mut translation = Self {
            keyword,
            operand,
            kind,
            size: TranslationSize::default(),
        };
        translation.size = ctx.measure(&translation);
        translation
    }
}

impl Translation for JumpTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_control(self.keyword);
        if let Some(operand) = &self.operand {
            sink.write_text(" ");
            sink.write_translation(&**operand);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(self.kind)
    }

    fn has_exit(&self) -> bool {
        true
    }

    fn handles_return(&self) -> bool {
        self.keyword == "return"
    }
}

/// `throw value`, or `throw` inside a handler
pub fn translate_throw(value: Option<&Expr>, ctx: &TranslationContext<'_>) -> BoxedTranslation {
    let operand = value.map(|value| ctx.translate(value));
    Box::new(JumpTranslation::new("throw", operand, NodeKind::Throw, ctx))
}

/// Translate a jump in `position`
pub fn translate_goto(
    goto: &Goto,
    position: Position,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let (keyword, operand) = match goto.kind {
        GotoKind::Return => match (&goto.value, position) {
            (Some(value), Position::Body | Position::Expression) => {
                return ctx.translate_in(value, position);
            }
            (None, Position::Body) => return Box::new(EmptyTranslation),
            (value, _) => ("return", value.as_ref().map(|value| ctx.translate(value))),
        },
        GotoKind::Goto => (
            "goto",
            Some(ctx.token(&*ctx.label_name(&goto.target), TokenKind::Plain)),
        ),
        GotoKind::Break => ("break", None),
        GotoKind::Continue => ("continue", None),
    };
    Box::new(JumpTranslation::new(keyword, operand, NodeKind::Goto, ctx))
}

/// `name:` followed by the value control falls through with
pub struct LabelTranslation {
    name: BoxedTranslation,
    value: Option<BoxedTranslation>,
    size: TranslationSize,
}

impl Translation for LabelTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        sink.write_translation(&*self.name);
        sink.write_text(":");
        if let Some(value) = &self.value {
            sink.write_new_line();
            sink.write_translation(&**value);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Label)
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn has_exit(&self) -> bool {
        self.value.as_ref().is_some_and(|value| value.has_exit())
    }

    fn is_multi_statement(&self) -> bool {
        self.value.is_some()
    }

    fn handles_return(&self) -> bool {
        self.value.as_ref().is_some_and(|value| value.handles_return())
    }

    fn blank_line_before(&self) -> bool {
        true
    }
}

/// Translate a label; labels nothing jumps to reduce to their value
pub fn translate_label(
    label: &LabelExpr,
    position: Position,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    if !ctx.analysis().is_goto_target(label.target.id) {
        return match &label.default_value {
            Some(value) => ctx.translate_in(value, position),
            None => Box::new(EmptyTranslation),
        };
    }
    let value = label.default_value.as_ref().map(|value| {
        let returns = !value.is_void() && matches!(position, Position::Body | Position::Return);
        ctx.translate_body(value, returns)
    });
    let mut translation = LabelTranslation {
        name: ctx.token(&*ctx.label_name(&label.target), TokenKind::Plain),
        value: value.filter(|value| !value.is_empty()),
        size: TranslationSize::default(),
    };
    translation.size = ctx.measure(&translation);
    Box::new(translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TranslationSettings;
    use crate::writer::TranslationWriter;
    use readex_repr::{BinaryOp, ExprBuilder, MemberInfo, TypeRef};

    fn render_in(expr: &Expr, position: Position) -> String {
        let settings = TranslationSettings::default();
        let ctx = TranslationContext::new(expr, &settings);
        let translation = ctx.translate_in(expr, position);
        let mut writer = TranslationWriter::new("    ", None, translation.len());
        translation.write(&mut writer);
        let out = writer.finish();
        assert_eq!(out.chars().count(), translation.len());
        out
    }

    fn log(name: &str) -> Expr {
        Expr::static_call(
            MemberInfo::static_method(TypeRef::class("App", "Log"), name, vec![], TypeRef::VOID),
            vec![],
        )
    }

    #[test]
    fn test_throw_and_rethrow() {
        let mut b = ExprBuilder::new();
        let error = b.variable("error", TypeRef::exception());
        assert_eq!(
            render_in(&Expr::throw(Expr::var(&error)), Position::Statement),
            "throw error"
        );
        assert_eq!(render_in(&Expr::rethrow(), Position::Statement), "throw");
    }

    #[test]
    fn test_return_by_position() {
        let mut b = ExprBuilder::new();
        let exit = b.label("exit", TypeRef::INT);
        let ret = Expr::ret(&exit, Some(Expr::int(1)));
        assert_eq!(render_in(&ret, Position::Statement), "return 1");
        assert_eq!(render_in(&ret, Position::Return), "return 1");
        assert_eq!(render_in(&ret, Position::Body), "1");

        let bare = Expr::ret(&exit, None);
        assert_eq!(render_in(&bare, Position::Statement), "return");
        assert_eq!(render_in(&bare, Position::Body), "");
    }

    #[test]
    fn test_loop_jumps() {
        let mut b = ExprBuilder::new();
        let done = b.label("done", TypeRef::VOID);
        assert_eq!(
            render_in(&Expr::jump(GotoKind::Break, &done, None), Position::Statement),
            "break"
        );
        assert_eq!(
            render_in(&Expr::jump(GotoKind::Continue, &done, None), Position::Statement),
            "continue"
        );
    }

    #[test]
    fn test_goto_and_target_label() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let skip = b.label("skip", TypeRef::VOID);
        let root = Expr::void_block(
            vec![],
            vec![
                Expr::if_then(
                    Expr::binary(BinaryOp::GreaterThan, Expr::var(&x), Expr::int(0)),
                    Expr::goto(&skip),
                ),
                log("Write"),
                Expr::label(&skip, None),
                log("Done"),
            ],
        );
        assert_eq!(
            render_in(&root, Position::Body),
            "if (x > 0)\n{\n    goto skip;\n}\n\nLog.Write();\n\nskip:\nLog.Done();"
        );
    }

    #[test]
    fn test_untargeted_label_reduces_to_value() {
        let mut b = ExprBuilder::new();
        let end = b.label("end", TypeRef::INT);
        assert_eq!(
            render_in(&Expr::label(&end, Some(Expr::int(3))), Position::Return),
            "return 3"
        );
        assert_eq!(render_in(&Expr::label(&end, None), Position::Statement), "");
    }

    #[test]
    fn test_targeted_label_returns_its_value() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let end = b.label("end", TypeRef::INT);
        let root = Expr::block(
            vec![],
            vec![
                Expr::if_then(
                    Expr::binary(BinaryOp::LessThan, Expr::var(&x), Expr::int(0)),
                    Expr::jump(GotoKind::Goto, &end, Some(Expr::int(0))),
                ),
                log("Write"),
                Expr::label(&end, Some(Expr::var(&x))),
            ],
        );
        assert_eq!(
            render_in(&root, Position::Body),
            "if (x < 0)\n{\n    goto end;\n}\n\nLog.Write();\n\nend:\nreturn x;"
        );
    }
}
