//! Measured size must match written output.
//!
//! Every translation is sized before it is written, and layout decisions
//! (wrapping, fluent chains, ternary breaks) are taken from those sizes. These
//! properties generate statement blocks of mixed shapes, render them under
//! random wrap thresholds and formatters, and check the measured plain length
//! and formatting weight against what the writer actually produced. The
//! shapes include loops, switches, try blocks, lambdas, call chains,
//! multi-line strings and blocks used as operands and arguments.

use proptest::prelude::*;
use readex::{AnsiFormatter, HtmlFormatter, TranslationSettings};
use readex_repr::{
    BinaryOp, CatchHandler, Expr, ExprBuilder, GotoKind, LabelTarget, LoopExpr, MemberInfo,
    Switch, SwitchCase, TryBlock, TypeRef, UnaryOp, Variable,
};

use super::common::{log, write_line, write_measured};

// =============================================================================
// Strategies
// =============================================================================

/// Variables and labels shared by every generated tree
struct Fixture {
    ints: Vec<Variable>,
    parameter: Variable,
    transform: Variable,
    rows: Variable,
    done: LabelTarget,
}

fn fixture() -> Fixture {
    let mut b = ExprBuilder::new();
    Fixture {
        ints: vec![
            b.variable("alpha", TypeRef::INT),
            b.variable("beta", TypeRef::INT),
            b.variable("gamma", TypeRef::INT),
        ],
        parameter: b.variable("delta", TypeRef::INT),
        transform: b.variable("transform", TypeRef::func(vec![TypeRef::INT, TypeRef::INT])),
        rows: b.variable("rows", query()),
        done: b.label("done", TypeRef::VOID),
    }
}

/// Three int variables shared by every generated tree
fn variables() -> Vec<Variable> {
    fixture().ints
}

fn query() -> TypeRef {
    TypeRef::class("App", "Query")
}

fn query_method(name: &str) -> MemberInfo {
    MemberInfo::method(query(), name, vec![], query())
}

/// `value` behind a logging statement, as a two-statement block
fn logged(value: Expr) -> Expr {
    Expr::block(vec![], vec![log("Note"), value])
}

fn arithmetic_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Subtract),
        Just(BinaryOp::Multiply),
        Just(BinaryOp::Divide),
        Just(BinaryOp::Modulo),
        Just(BinaryOp::LeftShift),
        Just(BinaryOp::And),
        Just(BinaryOp::Or),
        Just(BinaryOp::AddChecked),
    ]
}

fn comparison_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Equal),
        Just(BinaryOp::NotEqual),
        Just(BinaryOp::LessThan),
        Just(BinaryOp::GreaterThanOrEqual),
    ]
}

/// Int-typed value expressions
fn int_value(vars: Vec<Variable>) -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0..vars.len()).prop_map(move |index| Expr::var(&vars[index])),
        (-1000i32..1000).prop_map(Expr::int),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        let max = MemberInfo::static_method(
            TypeRef::math(),
            "Max",
            vec![],
            TypeRef::INT,
        );
        prop_oneof![
            (arithmetic_op(), inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| Expr::binary(op, left, right)),
            (comparison_op(), inner.clone(), inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(op, left, right, yes, no)| {
                    Expr::condition(Expr::binary(op, left, right), yes, no)
                }),
            (inner.clone(), inner)
                .prop_map(move |(a, b)| Expr::static_call(max.clone(), vec![a, b])),
        ]
    })
}

/// Single-line statements built around int values
fn simple_statement(f: &Fixture) -> BoxedStrategy<Expr> {
    let targets = f.ints.clone();
    let tested = f.ints.clone();
    let vars = f.ints.clone();
    prop_oneof![
        ((0..targets.len()), int_value(vars.clone()))
            .prop_map(move |(index, value)| Expr::assign(Expr::var(&targets[index]), value)),
        int_value(vars.clone()).prop_map(|value| write_line(vec![value])),
        "[a-z \"\\\\<>&]{0,24}".prop_map(|text| write_line(vec![Expr::string(text)])),
        "[a-z]{1,8}\n[a-z \"]{0,8}".prop_map(|text| write_line(vec![Expr::string(text)])),
        (comparison_op(), 0..tested.len(), int_value(vars.clone()), int_value(vars))
            .prop_map(move |(op, index, limit, value)| {
                Expr::if_then(
                    Expr::binary(op, Expr::var(&tested[index]), limit),
                    write_line(vec![value]),
                )
            }),
        "[a-z ]{1,30}".prop_map(|text| Expr::comment(text)),
    ]
    .boxed()
}

/// Statements whose operands and arguments are statement blocks
fn block_operand_statement(f: &Fixture) -> BoxedStrategy<Expr> {
    let targets = f.ints.clone();
    let vars = f.ints.clone();
    prop_oneof![
        (0..targets.len(), int_value(vars.clone()), int_value(vars.clone())).prop_map(
            move |(index, value, other)| {
                Expr::assign(
                    Expr::var(&targets[index]),
                    Expr::binary(BinaryOp::AddChecked, logged(value), other),
                )
            }
        ),
        int_value(vars.clone()).prop_map(|value| write_line(vec![logged(value)])),
        int_value(vars.clone()).prop_map(|value| {
            write_line(vec![Expr::convert_checked(logged(value), TypeRef::LONG)])
        }),
        (int_value(vars.clone()), int_value(vars)).prop_map(|(left, right)| {
            let product = Expr::binary(BinaryOp::Multiply, logged(left), right);
            write_line(vec![logged(product)])
        }),
    ]
    .boxed()
}

/// Loops, switches and try blocks
fn control_statement(f: &Fixture) -> BoxedStrategy<Expr> {
    let counters = f.ints.clone();
    let vars = f.ints.clone();
    let done = f.done.clone();
    prop_oneof![
        (0..counters.len(), int_value(vars.clone()), int_value(vars.clone())).prop_map(
            move |(index, limit, value)| {
                let counter = &counters[index];
                let body = Expr::void_block(
                    vec![],
                    vec![
                        Expr::if_then(
                            Expr::binary(BinaryOp::GreaterThanOrEqual, Expr::var(counter), limit),
                            Expr::jump(GotoKind::Break, &done, None),
                        ),
                        write_line(vec![value]),
                        Expr::unary(UnaryOp::PostIncrementAssign, Expr::var(counter)),
                    ],
                );
                Expr::Loop(Box::new(LoopExpr {
                    body,
                    break_label: Some(done.clone()),
                    continue_label: None,
                }))
            }
        ),
        (int_value(vars.clone()), prop::collection::vec(int_value(vars.clone()), 1..4)).prop_map(
            |(value, bodies)| {
                let cases = (0i32..)
                    .zip(bodies)
                    .map(|(label, body)| SwitchCase {
                        tests: vec![Expr::int(label)],
                        body: write_line(vec![body]),
                    })
                    .collect();
                Expr::Switch(Box::new(Switch {
                    value,
                    cases,
                    default: Some(log("Unknown")),
                    ty: TypeRef::VOID,
                }))
            }
        ),
        (int_value(vars), any::<bool>()).prop_map(|(value, with_finally)| {
            Expr::Try(Box::new(TryBlock {
                body: write_line(vec![value]),
                handlers: vec![CatchHandler {
                    exception_type: TypeRef::exception(),
                    variable: None,
                    filter: None,
                    body: log("Failed"),
                }],
                finally: with_finally.then(|| log("Done")),
                fault: None,
                ty: TypeRef::VOID,
            }))
        }),
    ]
    .boxed()
}

/// Lambda assignments and fluent call chains
fn delegate_statement(f: &Fixture) -> BoxedStrategy<Expr> {
    let mut scope = f.ints.clone();
    scope.push(f.parameter.clone());
    let (parameter, transform) = (f.parameter.clone(), f.transform.clone());
    let (braced_parameter, braced_transform) = (f.parameter.clone(), f.transform.clone());
    let rows = f.rows.clone();
    let names = vec!["Where", "Select", "OrderBy", "Skip", "ToList"];
    prop_oneof![
        int_value(scope.clone()).prop_map(move |body| {
            Expr::assign(
                Expr::var(&transform),
                Expr::lambda(vec![parameter.clone()], body),
            )
        }),
        (int_value(scope.clone()), int_value(scope)).prop_map(move |(noted, result)| {
            let body = Expr::block(vec![], vec![write_line(vec![noted]), result]);
            Expr::assign(
                Expr::var(&braced_transform),
                Expr::lambda(vec![braced_parameter.clone()], body),
            )
        }),
        prop::collection::vec(prop::sample::select(names), 1..6).prop_map(move |calls| {
            calls.into_iter().fold(Expr::var(&rows), |subject, name| {
                Expr::call(subject, query_method(name), vec![])
            })
        }),
    ]
    .boxed()
}

/// Statements of every shape, mostly single-line
fn statement(f: &Fixture) -> impl Strategy<Value = Expr> {
    prop_oneof![
        4 => simple_statement(f),
        1 => block_operand_statement(f),
        1 => control_statement(f),
        1 => delegate_statement(f),
    ]
}

fn block() -> impl Strategy<Value = Expr> {
    let f = fixture();
    let vars = f.ints.clone();
    prop::collection::vec(statement(&f), 1..8)
        .prop_map(move |statements| Expr::void_block(vars.clone(), statements))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_plain_length_matches_measure(root in block(), threshold in 8usize..120) {
        let settings = TranslationSettings::default().wrap_lines_at(threshold);
        let (plain, styled, size) = write_measured(&root, &settings);
        prop_assert_eq!(plain.chars().count(), size.len);
        prop_assert!(styled.is_none());
    }

    #[test]
    fn test_html_weight_matches_markup(root in block(), threshold in 8usize..120) {
        let settings = TranslationSettings::default()
            .wrap_lines_at(threshold)
            .format_with(HtmlFormatter);
        let (plain, styled, size) = write_measured(&root, &settings);
        prop_assert_eq!(plain.chars().count(), size.len);
        let styled = styled.unwrap_or_default();
        prop_assert_eq!(styled.chars().count(), size.len + size.weight);
    }

    #[test]
    fn test_ansi_weight_matches_escapes(root in block(), indent in "( {1,4}|\t)") {
        let settings = TranslationSettings::default()
            .indent_using(indent)
            .format_with(AnsiFormatter);
        let (plain, styled, size) = write_measured(&root, &settings);
        prop_assert_eq!(plain.chars().count(), size.len);
        let styled = styled.unwrap_or_default();
        prop_assert_eq!(styled.chars().count(), size.len + size.weight);
    }

    #[test]
    fn test_value_length_matches_measure(value in int_value(variables()), threshold in 8usize..80) {
        let settings = TranslationSettings::default().wrap_lines_at(threshold);
        let (plain, _, size) = write_measured(&value, &settings);
        prop_assert_eq!(plain.chars().count(), size.len);
    }
}
