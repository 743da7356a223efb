//! Property-based tests using QuickCheck

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use unitexpr::{parse, Engine};

mod test_support;

const OPERATORS: [&str; 5] = ["-", "+", "*", "/", "**"];
const NAMES: [&str; 3] = ["meter", "second", "kilometer"];

/// Flat run of small integers joined by binary operators, e.g. `3 ** -2 - 8 / 0`
#[derive(Debug, Clone)]
struct FlatExpression(String);

impl Arbitrary for FlatExpression {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = 1 + usize::arbitrary(g) % 16;
        let mut text = String::new();
        for i in 0..count {
            if i > 0 {
                let op = g.choose(&OPERATORS).copied().unwrap_or("+");
                text.push(' ');
                text.push_str(op);
                text.push(' ');
            }
            let value = i8::arbitrary(g) % 9;
            text.push_str(&value.to_string());
        }
        FlatExpression(text)
    }
}

/// Arbitrary well-formed expression with groups, signs and names
#[derive(Debug, Clone)]
struct NestedExpression(String);

fn nested(g: &mut Gen, depth: usize) -> String {
    if depth == 0 || u8::arbitrary(g) % 4 == 0 {
        return if bool::arbitrary(g) {
            (u8::arbitrary(g) % 10).to_string()
        } else {
            g.choose(&NAMES).copied().unwrap_or("meter").to_string()
        };
    }
    match u8::arbitrary(g) % 4 {
        0 => format!("({})", nested(g, depth - 1)),
        1 => format!("-{}", nested(g, depth - 1)),
        _ => {
            let op = g.choose(&OPERATORS).copied().unwrap_or("*");
            format!("{} {} {}", nested(g, depth - 1), op, nested(g, depth - 1))
        }
    }
}

impl Arbitrary for NestedExpression {
    fn arbitrary(g: &mut Gen) -> Self {
        NestedExpression(nested(g, 6))
    }
}

/// Property: the tree builder agrees with the host library's algorithm
#[test]
fn prop_matches_reference_builder() {
    fn prop(expr: FlatExpression) -> TestResult {
        let Some(expected) = test_support::reference_eval(&expr.0) else {
            return TestResult::error(format!("reference rejected {}", expr.0));
        };
        match parse(&expr.0).map(|tree| tree.evaluate(test_support::resolve)) {
            Ok(Ok(actual)) => TestResult::from_bool(test_support::same_value(actual, expected)),
            other => TestResult::error(format!("{} failed: {:?}", expr.0, other)),
        }
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(FlatExpression) -> TestResult);
}

/// Property: canonical text parses back to a tree with the same shape and value
#[test]
fn prop_canonical_round_trip() {
    fn prop(expr: NestedExpression) -> TestResult {
        let Ok(tree) = parse(&expr.0) else {
            return TestResult::error(format!("generated input rejected: {}", expr.0));
        };
        let text = tree.to_string();
        let Ok(reparsed) = parse(&text) else {
            return TestResult::error(format!("{} -> {} does not parse", expr.0, text));
        };

        let same_shape = tree.to_parenthesized_string() == reparsed.to_parenthesized_string();
        let same_text = reparsed.to_string() == text;
        let same_value = match (
            tree.evaluate(test_support::resolve),
            reparsed.evaluate(test_support::resolve),
        ) {
            (Ok(a), Ok(b)) => test_support::same_value(a, b),
            _ => false,
        };
        TestResult::from_bool(same_shape && same_text && same_value)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(NestedExpression) -> TestResult);
}

/// Property: leaves come out of the tree in the order they appear in the text
#[test]
fn prop_leaves_in_source_order() {
    fn prop(expr: NestedExpression) -> TestResult {
        let Ok(tree) = parse(&expr.0) else {
            return TestResult::discard();
        };
        let positions: Vec<_> = tree.leaves().iter().map(|t| t.start).collect();
        TestResult::from_bool(positions.windows(2).all(|w| w[0] < w[1]))
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(NestedExpression) -> TestResult);
}

/// Property: the engine returns what a direct parse returns
#[test]
fn prop_engine_matches_direct_parse() {
    fn prop(expr: FlatExpression) -> TestResult {
        let engine = Engine::default();
        let direct = parse(&expr.0).map(|t| t.to_parenthesized_string());
        let first = engine.parse(&expr.0).map(|t| t.to_parenthesized_string());
        let cached = engine.parse(&expr.0).map(|t| t.to_parenthesized_string());
        match (direct, first, cached) {
            (Ok(a), Ok(b), Ok(c)) => TestResult::from_bool(a == b && b == c),
            _ => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(FlatExpression) -> TestResult);
}

/// Value checks for the expressions the host library's own test suite pins
#[test]
fn prop_known_values() {
    let cases = [
        ("1 - 2 - 3", -4.0),
        ("2 ** 3 ** 2", 512.0),
        ("-2 ** 2", -4.0),
        ("8 / 2 / 2", 2.0),
        ("2 * -3 + 1", -5.0),
        ("3 - -3", 6.0),
    ];
    for (expr, expected) in cases {
        assert_eq!(test_support::reference_eval(expr), Some(expected), "{expr}");
        let actual = parse(expr)
            .unwrap()
            .evaluate(test_support::resolve)
            .unwrap();
        assert_eq!(actual, expected, "{expr}");
    }
}
