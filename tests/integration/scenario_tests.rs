//! End-to-end rendering scenarios.
//!
//! Each test builds a small tree through the public constructors and checks
//! the exact text `readex::translate` produces for it.

use readex::{translate, translate_with, TranslationSettings};
use readex_repr::{
    from_json_str, to_json_string, BinaryOp, Constant, EnumInfo, Expr, ExprBuilder, MemberInfo,
    TreeDocument, TypeRef,
};

use super::common::{log, write_line};

fn render(root: &Expr) -> String {
    translate(root).unwrap_or_default()
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn test_same_tier_left_operand_needs_no_parentheses() {
    let mut b = ExprBuilder::new();
    let i1 = b.variable("i1", TypeRef::INT);
    let i2 = b.variable("i2", TypeRef::INT);
    let root = Expr::binary(
        BinaryOp::Multiply,
        Expr::binary(BinaryOp::Divide, Expr::var(&i1), Expr::var(&i2)),
        Expr::var(&i1),
    );
    assert_eq!(render(&root), "i1 / i2 * i1");
}

#[test]
fn test_looser_operand_is_parenthesized() {
    let mut b = ExprBuilder::new();
    let i = b.variable("i", TypeRef::INT);
    let j = b.variable("j", TypeRef::INT);
    let k = b.variable("k", TypeRef::INT);
    let root = Expr::binary(
        BinaryOp::Multiply,
        Expr::binary(BinaryOp::Add, Expr::var(&i), Expr::var(&j)),
        Expr::var(&k),
    );
    assert_eq!(render(&root), "(i + j) * k");
}

#[test]
fn test_ternary_in_expression_position() {
    let mut b = ExprBuilder::new();
    let count = b.variable("count", TypeRef::INT);
    let name = b.variable("name", TypeRef::STRING);
    let root = Expr::condition(
        Expr::binary(BinaryOp::Equal, Expr::var(&count), Expr::int(0)),
        Expr::string("none"),
        Expr::var(&name),
    );
    assert_eq!(render(&root), "count == 0 ? \"none\" : name");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_flags_enum_combination() {
    let binding_flags = TypeRef::enumeration(
        "System.Reflection",
        "BindingFlags",
        EnumInfo::flags([
            ("Default", 0),
            ("IgnoreCase", 1),
            ("DeclaredOnly", 2),
            ("Instance", 4),
            ("Static", 8),
            ("Public", 16),
            ("NonPublic", 32),
        ]),
    );
    let root = Expr::constant(Constant::enum_value(binding_flags, 8 | 16));
    assert_eq!(render(&root), "BindingFlags.Static | BindingFlags.Public");
}

// =============================================================================
// Blocks
// =============================================================================

#[test]
fn test_block_value_is_returned() {
    let mut b = ExprBuilder::new();
    let x = b.variable("x", TypeRef::INT);
    let root = Expr::block(
        vec![x.clone()],
        vec![Expr::assign(Expr::var(&x), Expr::int(5)), Expr::var(&x)],
    );
    assert_eq!(render(&root), "var x = 5;\n\nreturn x;");
}

#[test]
fn test_argument_block_statements_come_first() {
    let mut b = ExprBuilder::new();
    let x = b.variable("x", TypeRef::INT);
    let value = Expr::block(vec![], vec![log("Write"), Expr::var(&x)]);
    let root = Expr::void_block(vec![], vec![write_line(vec![value]), log("Done")]);
    assert_eq!(
        render(&root),
        "Log.Write();\nConsole.WriteLine(x);\nLog.Done();"
    );
}

#[test]
fn test_checked_operand_block_keeps_statements_inside() {
    let mut b = ExprBuilder::new();
    let x = b.variable("x", TypeRef::INT);
    let value = Expr::block(vec![], vec![log("Write"), Expr::var(&x)]);
    let root = Expr::void_block(
        vec![],
        vec![
            Expr::assign(
                Expr::var(&x),
                Expr::binary(BinaryOp::AddChecked, value.clone(), Expr::int(1)),
            ),
            write_line(vec![Expr::convert_checked(value, TypeRef::LONG)]),
        ],
    );
    assert_eq!(
        render(&root),
        "x = checked\n{\n    Log.Write();\n\n    return x + 1;\n};\n\
         Console.WriteLine(checked\n{\n    Log.Write();\n\n    return (long)x;\n});"
    );
}

#[test]
fn test_empty_block_renders_nothing() {
    assert_eq!(translate(&Expr::void_block(vec![], vec![])), None);
}

#[test]
fn test_statements_after_throw_are_dropped() {
    let mut b = ExprBuilder::new();
    let error = b.variable("error", TypeRef::exception());
    let root = Expr::void_block(
        vec![],
        vec![log("A"), Expr::throw(Expr::var(&error)), log("B")],
    );
    assert_eq!(render(&root), "Log.A();\nthrow error;");
}

#[test]
fn test_explicit_type_names_setting() {
    let mut b = ExprBuilder::new();
    let total = b.variable("total", TypeRef::INT);
    let root = Expr::void_block(
        vec![total.clone()],
        vec![
            Expr::assign(Expr::var(&total), Expr::int(3)),
            write_line(vec![Expr::var(&total)]),
        ],
    );
    let explicit = TranslationSettings::default().use_explicit_type_names();
    assert_eq!(
        translate_with(&root, &explicit).as_deref(),
        Some("int total = 3;\nConsole.WriteLine(total);")
    );
}

// =============================================================================
// Calls
// =============================================================================

fn query() -> TypeRef {
    TypeRef::class("App", "Query")
}

fn query_method(name: &str) -> MemberInfo {
    MemberInfo::method(query(), name, vec![], query())
}

#[test]
fn test_call_chain_breaks_into_fluent_lines() {
    let mut b = ExprBuilder::new();
    let q = b.variable("q", query());
    let chain = ["Where", "Select", "ToList"]
        .into_iter()
        .fold(Expr::var(&q), |subject, name| {
            Expr::call(subject, query_method(name), vec![])
        });
    assert_eq!(render(&chain), "q\n    .Where()\n    .Select()\n    .ToList()");

    let tabs = TranslationSettings::default().indent_using("\t");
    assert_eq!(
        translate_with(&chain, &tabs).as_deref(),
        Some("q\n\t.Where()\n\t.Select()\n\t.ToList()")
    );
}

#[test]
fn test_short_chain_stays_on_one_line() {
    let mut b = ExprBuilder::new();
    let q = b.variable("q", query());
    let chain = Expr::call(
        Expr::call(Expr::var(&q), query_method("Where"), vec![]),
        query_method("ToList"),
        vec![],
    );
    assert_eq!(render(&chain), "q.Where().ToList()");
}

// =============================================================================
// Whole-pipeline properties
// =============================================================================

#[test]
fn test_translation_is_repeatable() {
    let mut b = ExprBuilder::new();
    let x = b.variable("x", TypeRef::INT);
    let root = Expr::block(
        vec![x.clone()],
        vec![
            Expr::assign(Expr::var(&x), Expr::int(5)),
            write_line(vec![Expr::var(&x)]),
            Expr::binary(BinaryOp::Multiply, Expr::var(&x), Expr::int(2)),
        ],
    );
    let first = translate(&root);
    assert!(first.is_some());
    assert_eq!(translate(&root), first);
}

#[test]
fn test_decoded_document_renders_like_original() {
    let mut b = ExprBuilder::new();
    let x = b.variable("x", TypeRef::INT);
    let root = Expr::block(
        vec![x.clone()],
        vec![
            Expr::assign(Expr::var(&x), Expr::int(5)),
            Expr::binary(BinaryOp::Multiply, Expr::var(&x), Expr::int(2)),
        ],
    );
    let json = to_json_string(&TreeDocument::new(root.clone()).with_name("doubled")).unwrap();
    let decoded = from_json_str(&json).unwrap();
    assert_eq!(decoded.name.as_deref(), Some("doubled"));
    assert_eq!(translate(&decoded.root), translate(&root));
    assert_eq!(render(&decoded.root), "var x = 5;\n\nreturn x * 2;");
}
