//! Parenthesization preserves grouping.
//!
//! Random arithmetic and bitwise trees over four variables are rendered, then
//! parsed back with a small precedence-climbing parser that uses the same
//! operator tiers and left associativity. The reparsed tree must group
//! exactly like the original, so every parenthesis the renderer omitted was
//! redundant and every one it wrote was needed to keep the grouping.

use proptest::prelude::*;
use readex::translate;
use readex_repr::{BinaryOp, Expr, ExprBuilder, TypeRef, Variable};

// =============================================================================
// Shape
// =============================================================================

/// Grouping skeleton shared by generated trees and reparsed text
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    Leaf(String),
    Binary(&'static str, Box<Shape>, Box<Shape>),
}

const OPERATORS: [(BinaryOp, &str, u8); 10] = [
    (BinaryOp::Multiply, "*", 13),
    (BinaryOp::Divide, "/", 13),
    (BinaryOp::Modulo, "%", 13),
    (BinaryOp::Add, "+", 12),
    (BinaryOp::Subtract, "-", 12),
    (BinaryOp::LeftShift, "<<", 11),
    (BinaryOp::RightShift, ">>", 11),
    (BinaryOp::And, "&", 8),
    (BinaryOp::ExclusiveOr, "^", 7),
    (BinaryOp::Or, "|", 6),
];

fn variables() -> Vec<Variable> {
    let mut b = ExprBuilder::new();
    ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| b.variable(name, TypeRef::INT))
        .collect()
}

fn to_expr(shape: &Shape, vars: &[Variable]) -> Expr {
    match shape {
        Shape::Leaf(name) => {
            let var = vars
                .iter()
                .find(|v| v.name.as_deref() == Some(name.as_str()))
                .unwrap();
            Expr::var(var)
        }
        Shape::Binary(symbol, left, right) => {
            let op = OPERATORS
                .iter()
                .find(|(_, s, _)| s == symbol)
                .map(|(op, _, _)| *op)
                .unwrap();
            Expr::binary(op, to_expr(left, vars), to_expr(right, vars))
        }
    }
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(|n| Shape::Leaf(n.into()));
    leaf.prop_recursive(5, 40, 2, |inner| {
        (0..OPERATORS.len(), inner.clone(), inner).prop_map(|(index, left, right)| {
            Shape::Binary(OPERATORS[index].1, Box::new(left), Box::new(right))
        })
    })
}

// =============================================================================
// Reparser
// =============================================================================

struct Parser<'t> {
    tokens: Vec<&'t str>,
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Self {
        let mut tokens = Vec::new();
        let mut rest = text.trim_start();
        while !rest.is_empty() {
            let len = if rest.starts_with("<<") || rest.starts_with(">>") {
                2
            } else {
                rest.chars().next().map_or(1, char::len_utf8)
            };
            tokens.push(&rest[..len]);
            rest = rest[len..].trim_start();
        }
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'t str> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn primary(&mut self) -> Shape {
        match self.next() {
            Some("(") => {
                let inner = self.expression(0);
                assert_eq!(self.next(), Some(")"));
                inner
            }
            Some(name) => Shape::Leaf(name.to_owned()),
            None => panic!("unexpected end of input"),
        }
    }

    fn expression(&mut self, min: u8) -> Shape {
        let mut left = self.primary();
        while let Some((symbol, tier)) = self.peek().and_then(|token| {
            OPERATORS
                .iter()
                .find(|(_, s, _)| *s == token)
                .map(|(_, s, tier)| (*s, *tier))
        }) {
            if tier < min {
                break;
            }
            self.next();
            let right = self.expression(tier + 1);
            left = Shape::Binary(symbol, Box::new(left), Box::new(right));
        }
        left
    }

    fn parse(text: &'t str) -> Shape {
        let mut parser = Self::new(text);
        let shape = parser.expression(0);
        assert_eq!(parser.peek(), None, "trailing input in {text:?}");
        shape
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_reparser_groups_left() {
    let shape = Parser::parse("a - b - c");
    let expected = Shape::Binary(
        "-",
        Box::new(Shape::Binary(
            "-",
            Box::new(Shape::Leaf("a".into())),
            Box::new(Shape::Leaf("b".into())),
        )),
        Box::new(Shape::Leaf("c".into())),
    );
    assert_eq!(shape, expected);
}

#[test]
fn test_right_nested_same_tier_keeps_parentheses() {
    let vars = variables();
    let shape = Parser::parse("a << (b << c)");
    assert_eq!(
        translate(&to_expr(&shape, &vars)).as_deref(),
        Some("a << (b << c)")
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_rendering_reparses_to_same_grouping(original in shape()) {
        let vars = variables();
        let text = translate(&to_expr(&original, &vars)).unwrap_or_default();
        prop_assert!(!text.contains('\n'));
        prop_assert_eq!(Parser::parse(&text), original);
    }
}
