//! Conversions and type tests.
//!
//! A cast to a keyword type may take a unary operand bare, as in `(int)-x`;
//! any other target type needs a primary operand, since `(Money)-x` would
//! read as a subtraction. Casts of casts chain without extra parentheses.

use readex_repr::{precedence, CastKind, Expr, NodeKind, TypeRef, TypeTestKind};

use super::operators::translate_checked;
use super::{BoxedTranslation, Parenthesized, Sequence};
use crate::context::TranslationContext;
use crate::writer::TokenKind;

/// Translate a conversion of `operand` to `ty`
pub fn translate_cast(
    kind: CastKind,
    operand: &Expr,
    ty: &TypeRef,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    match kind {
        CastKind::Convert | CastKind::Unbox => cast_translation(ctx.translate(operand), ty, ctx),
        CastKind::ConvertChecked => {
            translate_checked(|| cast_translation(ctx.translate(operand), ty, ctx), ctx)
        }
    }
}

/// `(T)operand` from a translated operand
pub fn cast_translation(
    operand: BoxedTranslation,
    ty: &TypeRef,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let operand = if operand.node_kind() == Some(NodeKind::Cast) {
        operand
    } else {
        let min = if ty.as_prim().is_some() {
            precedence::UNARY
        } else {
            precedence::PRIMARY
        };
        Parenthesized::operand(operand, min, ctx)
    };
    Sequence::new(
        vec![
            ctx.plain("("),
            ctx.type_translation(ty),
            ctx.plain(")"),
            operand,
        ],
        ctx,
    )
    .with_precedence(precedence::UNARY)
    .parenthesized_as_operand()
    .of_kind(NodeKind::Cast)
    .boxed()
}

/// Translate `operand is T`, `operand as T` or an exact type comparison
pub fn translate_type_test(
    kind: TypeTestKind,
    operand: &Expr,
    ty: &TypeRef,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let translated = ctx.translate(operand);
    let (parts, tier) = match kind {
        TypeTestKind::Is | TypeTestKind::As => {
            let keyword = if kind == TypeTestKind::Is { "is" } else { "as" };
            (
                vec![
                    Parenthesized::operand(translated, precedence::RELATIONAL, ctx),
                    ctx.plain(" "),
                    ctx.keyword(keyword),
                    ctx.plain(" "),
                    ctx.type_translation(ty),
                ],
                precedence::RELATIONAL,
            )
        }
        TypeTestKind::TypeEqual => (
            vec![
                Parenthesized::operand(translated, precedence::PRIMARY, ctx),
                ctx.plain("."),
                ctx.token("GetType", TokenKind::MethodName),
                ctx.plain("() == "),
                ctx.keyword("typeof"),
                ctx.plain("("),
                ctx.type_translation(ty),
                ctx.plain(")"),
            ],
            precedence::EQUALITY,
        ),
    };
    Sequence::new(parts, ctx)
        .with_precedence(tier)
        .of_kind(NodeKind::TypeTest)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TranslationSettings;
    use crate::writer::TranslationWriter;
    use readex_repr::{BinaryOp, ExprBuilder, MemberInfo, UnaryOp};

    fn render(expr: &Expr) -> String {
        let settings = TranslationSettings::default();
        let ctx = TranslationContext::new(expr, &settings);
        let translation = ctx.translate(expr);
        let mut writer = TranslationWriter::new("    ", None, translation.len());
        translation.write(&mut writer);
        let out = writer.finish();
        assert_eq!(out.chars().count(), translation.len());
        out
    }

    #[test]
    fn test_casts() {
        let mut b = ExprBuilder::new();
        let value = b.variable("value", TypeRef::OBJECT);
        let count = b.variable("count", TypeRef::LONG);
        assert_eq!(
            render(&Expr::convert(Expr::var(&value), TypeRef::INT)),
            "(int)value"
        );
        assert_eq!(
            render(&Expr::convert(
                Expr::convert(Expr::var(&value), TypeRef::LONG),
                TypeRef::INT
            )),
            "(int)(long)value"
        );
        assert_eq!(
            render(&Expr::convert_checked(Expr::var(&count), TypeRef::INT)),
            "checked((int)count)"
        );
    }

    #[test]
    fn test_checked_conversion_of_block_value() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let write = MemberInfo::static_method(
            TypeRef::class("App", "Log"),
            "Write",
            vec![],
            TypeRef::VOID,
        );
        let value = Expr::block(vec![], vec![Expr::static_call(write, vec![]), Expr::var(&x)]);
        assert_eq!(
            render(&Expr::convert_checked(value, TypeRef::LONG)),
            "checked\n{\n    Log.Write();\n\n    return (long)x;\n}"
        );
    }

    #[test]
    fn test_cast_operands() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let money = TypeRef::value_struct("Shop", "Money");
        let negated = Expr::unary(UnaryOp::Negate, Expr::var(&x));
        assert_eq!(
            render(&Expr::convert(negated.clone(), TypeRef::LONG)),
            "(long)-x"
        );
        assert_eq!(render(&Expr::convert(negated, money)), "(Money)(-x)");
        let sum = Expr::binary(BinaryOp::Add, Expr::var(&x), Expr::int(1));
        assert_eq!(render(&Expr::convert(sum, TypeRef::LONG)), "(long)(x + 1)");
    }

    #[test]
    fn test_cast_as_operand() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::OBJECT);
        let to_string = MemberInfo::method(TypeRef::INT, "ToString", vec![], TypeRef::STRING);
        let root = Expr::call(Expr::convert(Expr::var(&x), TypeRef::INT), to_string, vec![]);
        assert_eq!(render(&root), "((int)x).ToString()");
    }

    #[test]
    fn test_type_tests() {
        let mut b = ExprBuilder::new();
        let shape = b.variable("shape", TypeRef::OBJECT);
        let circle = TypeRef::class("Geometry", "Circle");
        assert_eq!(
            render(&Expr::type_test(TypeTestKind::Is, Expr::var(&shape), circle.clone())),
            "shape is Circle"
        );
        assert_eq!(
            render(&Expr::type_test(TypeTestKind::As, Expr::var(&shape), circle.clone())),
            "shape as Circle"
        );
        assert_eq!(
            render(&Expr::type_test(TypeTestKind::TypeEqual, Expr::var(&shape), circle)),
            "shape.GetType() == typeof(Circle)"
        );
    }
}
