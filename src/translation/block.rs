//! Statement sequences.
//!
//! A block renders as its visible statements, one per line, with the
//! variables that could not be declared inline grouped by type in a header:
//!
//! ```text
//! int i, j;
//! string name;
//!
//! i = 0;
//! ...
//! ```
//!
//! Blocks carry no braces of their own; the construct that owns a block
//! (a branch, a loop, a lambda) supplies them. A block holding a single
//! visible statement and no declarations is transparent.
//!
//! The last statement of a value-producing block is its result: it is
//! returned when the block is a body or sits in return position, or
//! assigned when the block is the value of an assignment. A block used as
//! an operand or argument leaves only its result in place; its leading
//! statements are hoisted ahead of the enclosing statement.

use readex_repr::{AssignOp, Block, Expr, GotoKind, NodeKind};

use super::{
    assignment, BoxedTranslation, EmptyTranslation, Position, PreludedStatement, Sequence,
    Terminated, Translation, TranslationSize,
};
use crate::analysis::Declaration;
use crate::context::TranslationContext;
use crate::writer::{TokenKind, TranslationSink};

/// What becomes of a block's final statement
#[derive(Clone, Copy)]
enum Ending<'e> {
    Plain,
    Return,
    Assign { target: &'e Expr, op: AssignOp },
}

/// Statements written one per line
pub struct BlockTranslation {
    statements: Vec<(BoxedTranslation, bool)>,
    returns: bool,
    size: TranslationSize,
}

impl BlockTranslation {
    /// Number of statements written, declaration lines included
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}

impl Translation for BlockTranslation {
    fn size(&self) -> TranslationSize {
        self.size
    }

    fn layout(&self, sink: &mut dyn TranslationSink) {
        for (index, (statement, blank_before)) in self.statements.iter().enumerate() {
            if index > 0 {
                if *blank_before {
                    sink.write_blank_line();
                } else {
                    sink.write_new_line();
                }
            }
            sink.write_translation(&**statement);
        }
    }

    fn node_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Block)
    }

    fn is_terminated(&self) -> bool {
        true
    }

    fn has_exit(&self) -> bool {
        self.statements
            .last()
            .is_some_and(|(statement, _)| statement.has_exit())
    }

    fn is_multi_statement(&self) -> bool {
        true
    }

    fn handles_return(&self) -> bool {
        self.returns
    }
}

/// Translate a block in `position`
pub fn translate_block(
    node: &Expr,
    block: &Block,
    position: Position,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let visible = visible_statements(node, block, position, ctx);
    let header = header_declarations(block, ctx);
    if position == Position::Expression && (visible.len() > 1 || !header.is_empty()) {
        return translate_inline_block(visible, header, ctx);
    }
    let returns = match position {
        Position::Return => true,
        Position::Statement | Position::Expression => false,
        Position::Body => {
            !block.result_type().is_void() && (visible.len() > 1 || !header.is_empty())
        }
    };
    let ending = if returns { Ending::Return } else { Ending::Plain };
    build(visible, header, position, ending, ctx)
}

/// The final value of a block used inside an expression, its other
/// statements hoisted ahead of the enclosing statement
fn translate_inline_block(
    visible: Vec<&Expr>,
    header: Vec<BoxedTranslation>,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let Some((&last, rest)) = visible.split_last() else {
        return build(Vec::new(), header, Position::Statement, Ending::Plain, ctx);
    };
    let leading = Terminated::wrap(
        build(rest.to_vec(), header, Position::Statement, Ending::Plain, ctx),
        ctx,
    );
    let (value, nested) = ctx.collect_hoisted(|| ctx.translate(last));
    let mut prelude = Vec::with_capacity(nested.len() + 1);
    prelude.push(leading);
    prelude.extend(nested);
    prelude.retain(|statement| !statement.is_empty());
    match ctx.hoist(prelude) {
        Ok(()) => value,
        Err(prelude) => PreludedStatement::wrap(prelude, value, ctx),
    }
}

/// Translate a multi-statement block assigned to `target`: its statements
/// followed by the assignment of its final value
pub(crate) fn translate_assigned_block(
    node: &Expr,
    block: &Block,
    target: &Expr,
    op: AssignOp,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let visible = visible_statements(node, block, Position::Statement, ctx);
    let header = header_declarations(block, ctx);
    build(
        visible,
        header,
        Position::Statement,
        Ending::Assign { target, op },
        ctx,
    )
}

fn build(
    visible: Vec<&Expr>,
    header: Vec<BoxedTranslation>,
    position: Position,
    ending: Ending<'_>,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let Some((last, rest)) = visible.split_last() else {
        return if header.is_empty() {
            Box::new(EmptyTranslation)
        } else {
            finish(header.into_iter().map(|h| (h, false)).collect(), false, ctx)
        };
    };

    if rest.is_empty() && header.is_empty() {
        return match ending {
            Ending::Assign { target, op } => translate_final_assignment(last, target, op, ctx),
            _ => ctx.translate_in(last, position),
        };
    }

    let mut statements: Vec<(BoxedTranslation, bool)> = Vec::with_capacity(visible.len() + 2);
    let has_header = !header.is_empty();
    statements.extend(header.into_iter().map(|h| (h, false)));

    let mut previous: Option<&Expr> = None;
    let mut blank_after_previous = false;
    for (index, statement) in visible.iter().enumerate() {
        let is_last = index + 1 == visible.len();
        let translation = if is_last {
            match ending {
                Ending::Plain => ctx.translate_statement(statement),
                Ending::Return => ctx.translate_body(statement, true),
                Ending::Assign { target, op } => Terminated::wrap(
                    translate_final_assignment(statement, target, op, ctx),
                    ctx,
                ),
            }
        } else {
            ctx.translate_statement(statement)
        };
        if translation.is_empty() {
            continue;
        }

        let follows_marker = previous.is_some_and(|p| match p {
            Expr::Label(label) => ctx.analysis().is_goto_target(label.target.id),
            Expr::Comment(_) => true,
            _ => false,
        });
        let blank_before = match previous {
            None => has_header,
            Some(_) if follows_marker => false,
            Some(_) => {
                blank_after_previous
                    || translation.blank_line_before()
                    || (is_last && translation.handles_return())
            }
        };
        blank_after_previous = translation.blank_line_after();
        previous = Some(statement);
        statements.push((translation, blank_before));
    }

    finish(statements, matches!(ending, Ending::Return), ctx)
}

fn finish(
    statements: Vec<(BoxedTranslation, bool)>,
    returns: bool,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    let mut translation = BlockTranslation {
        statements,
        returns,
        size: TranslationSize::default(),
    };
    translation.size = ctx.measure(&translation);
    Box::new(translation)
}

fn translate_final_assignment(
    statement: &Expr,
    target: &Expr,
    op: AssignOp,
    ctx: &TranslationContext<'_>,
) -> BoxedTranslation {
    if let Expr::Block(inner) = statement {
        if inner.statements.len() > 1 {
            return translate_assigned_block(statement, inner, target, op, ctx);
        }
    }
    ctx.with_prelude(|| {
        assignment::assign_translated(target, op, ctx.translate(statement), statement, false, ctx)
    })
}

/// Statements that produce output
fn visible_statements<'e>(
    node: &Expr,
    block: &'e Block,
    position: Position,
    ctx: &TranslationContext<'_>,
) -> Vec<&'e Expr> {
    let analysis = ctx.analysis();
    let last = block.statements.len().saturating_sub(1);
    block
        .statements
        .iter()
        .enumerate()
        .filter(|&(index, statement)| {
            if !analysis.is_reachable(node, index) || statement.is_empty_statement() {
                return false;
            }
            match statement {
                Expr::Label(label) => {
                    label.default_value.is_some() || analysis.is_goto_target(label.target.id)
                }
                Expr::Default(_) | Expr::Variable(_) => index == last,
                Expr::Goto(goto) if goto.kind == GotoKind::Return && goto.value.is_none() => {
                    !(index == last && position == Position::Body)
                }
                _ => true,
            }
        })
        .map(|(_, statement)| statement)
        .collect()
}

/// `int i, j;` lines for variables declared at the top of the block
fn header_declarations(block: &Block, ctx: &TranslationContext<'_>) -> Vec<BoxedTranslation> {
    let mut groups: Vec<(std::sync::Arc<str>, usize, Vec<BoxedTranslation>)> = Vec::new();
    for (index, variable) in block.variables.iter().enumerate() {
        if ctx.analysis().declaration(variable.id) != Declaration::Header {
            continue;
        }
        let type_name = ctx.type_name(&variable.ty);
        let name = ctx.token(&*ctx.variable_name(variable), TokenKind::Variable);
        match groups.iter_mut().find(|(existing, _, _)| *existing == type_name) {
            Some((_, _, names)) => names.push(name),
            None => groups.push((type_name, index, vec![name])),
        }
    }

    groups
        .into_iter()
        .map(|(_, first, names)| {
            let mut parts = Vec::with_capacity(names.len() * 2 + 2);
            parts.push(ctx.type_translation(&block.variables[first].ty));
            parts.push(ctx.plain(" "));
            for (index, name) in names.into_iter().enumerate() {
                if index > 0 {
                    parts.push(ctx.plain(", "));
                }
                parts.push(name);
            }
            parts.push(ctx.plain(";"));
            Sequence::new(parts, ctx).boxed()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TranslationSettings;
    use crate::writer::TranslationWriter;
    use readex_repr::{BinaryOp, ExprBuilder, MemberInfo, TypeRef};

    fn render(expr: &Expr) -> String {
        let settings = TranslationSettings::default();
        let ctx = TranslationContext::new(expr, &settings);
        let translation = ctx.translate_in(expr, Position::Body);
        let mut writer = TranslationWriter::new("    ", None, translation.len());
        translation.write(&mut writer);
        let out = writer.finish();
        assert_eq!(out.chars().count(), translation.len());
        out
    }

    fn console_write() -> MemberInfo {
        MemberInfo::static_method(
            TypeRef::class("System", "Console"),
            "WriteLine",
            vec![],
            TypeRef::VOID,
        )
    }

    #[test]
    fn test_header_groups_by_type() {
        let mut b = ExprBuilder::new();
        let i = b.variable("i", TypeRef::INT);
        let j = b.variable("j", TypeRef::INT);
        let s = b.variable("s", TypeRef::STRING);
        let root = Expr::void_block(
            vec![i.clone(), j.clone(), s.clone()],
            vec![
                Expr::static_call(console_write(), vec![Expr::var(&i), Expr::var(&j)]),
                Expr::static_call(console_write(), vec![Expr::var(&s)]),
            ],
        );
        assert_eq!(
            render(&root),
            "int i, j;\nstring s;\n\nConsole.WriteLine(i, j);\nConsole.WriteLine(s);"
        );
    }

    #[test]
    fn test_final_value_returned_after_blank_line() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::block(
            vec![x.clone()],
            vec![
                Expr::assign(Expr::var(&x), Expr::int(5)),
                Expr::binary(BinaryOp::Multiply, Expr::var(&x), Expr::int(2)),
            ],
        );
        assert_eq!(render(&root), "var x = 5;\n\nreturn x * 2;");
    }

    #[test]
    fn test_single_statement_is_transparent() {
        let root = Expr::block(vec![], vec![Expr::int(1)]);
        assert_eq!(render(&root), "1");
        assert_eq!(render(&Expr::void_block(vec![], vec![])), "");
    }

    #[test]
    fn test_noise_statements_dropped() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let ret = b.label("ret", TypeRef::VOID);
        let unused = b.label("unused", TypeRef::VOID);
        let root = Expr::void_block(
            vec![],
            vec![
                Expr::empty(),
                Expr::var(&x),
                Expr::default_of(TypeRef::INT),
                Expr::label(&unused, None),
                Expr::static_call(console_write(), vec![]),
                Expr::static_call(console_write(), vec![Expr::int(1)]),
                Expr::ret(&ret, None),
            ],
        );
        assert_eq!(render(&root), "Console.WriteLine();\nConsole.WriteLine(1);");
    }

    #[test]
    fn test_unreachable_statements_dropped() {
        let root = Expr::void_block(
            vec![],
            vec![
                Expr::static_call(console_write(), vec![]),
                Expr::throw(Expr::string("stop")),
                Expr::static_call(console_write(), vec![Expr::int(2)]),
            ],
        );
        assert_eq!(render(&root), "Console.WriteLine();\nthrow \"stop\";");
    }

    #[test]
    fn test_comments_hug_following_statement() {
        let root = Expr::void_block(
            vec![],
            vec![
                Expr::comment("first"),
                Expr::static_call(console_write(), vec![]),
            ],
        );
        assert_eq!(render(&root), "// first\nConsole.WriteLine();");
    }

    #[test]
    fn test_assigned_block_assigns_final_value() {
        let mut b = ExprBuilder::new();
        let total = b.variable("total", TypeRef::INT);
        let temp = b.variable("temp", TypeRef::INT);
        let value = Expr::block(
            vec![temp.clone()],
            vec![
                Expr::assign(Expr::var(&temp), Expr::int(2)),
                Expr::binary(BinaryOp::Add, Expr::var(&temp), Expr::int(1)),
            ],
        );
        let root = Expr::void_block(
            vec![total.clone()],
            vec![
                Expr::assign(Expr::var(&total), value),
                Expr::static_call(console_write(), vec![Expr::var(&total)]),
            ],
        );
        assert_eq!(
            render(&root),
            "int total;\n\nvar temp = 2;\ntotal = temp + 1;\nConsole.WriteLine(total);"
        );
    }

    fn logged_value(x: &readex_repr::Variable) -> Expr {
        Expr::block(
            vec![],
            vec![Expr::static_call(console_write(), vec![]), Expr::var(x)],
        )
    }

    #[test]
    fn test_argument_block_statements_written_first() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::void_block(
            vec![],
            vec![
                Expr::static_call(console_write(), vec![logged_value(&x)]),
                Expr::static_call(console_write(), vec![Expr::int(2)]),
            ],
        );
        assert_eq!(
            render(&root),
            "Console.WriteLine();\nConsole.WriteLine(x);\nConsole.WriteLine(2);"
        );
    }

    #[test]
    fn test_operand_block_in_body_returns_value() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let root = Expr::binary(BinaryOp::Multiply, logged_value(&x), Expr::int(2));
        assert_eq!(render(&root), "Console.WriteLine();\n\nreturn x * 2;");
    }

    #[test]
    fn test_checked_operand_block_stays_in_checked_body() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let total = b.variable("total", TypeRef::INT);
        let root = Expr::void_block(
            vec![],
            vec![
                Expr::assign(
                    Expr::var(&total),
                    Expr::binary(BinaryOp::AddChecked, logged_value(&x), Expr::int(1)),
                ),
                Expr::static_call(console_write(), vec![Expr::var(&total)]),
            ],
        );
        assert_eq!(
            render(&root),
            "total = checked\n{\n    Console.WriteLine();\n\n    return x + 1;\n};\nConsole.WriteLine(total);"
        );
    }

    #[test]
    fn test_nested_operand_blocks_keep_order() {
        let mut b = ExprBuilder::new();
        let x = b.variable("x", TypeRef::INT);
        let outer = Expr::block(
            vec![],
            vec![
                Expr::static_call(console_write(), vec![Expr::int(1)]),
                logged_value(&x),
            ],
        );
        let root = Expr::void_block(
            vec![],
            vec![Expr::static_call(console_write(), vec![outer])],
        );
        assert_eq!(
            render(&root),
            "Console.WriteLine(1);\nConsole.WriteLine();\nConsole.WriteLine(x);"
        );
    }
}
