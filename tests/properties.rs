//! Property tests for the evaluator and the session.

use proptest::prelude::*;
use zcalc::calculator::{CalcError, round_significant};
use zcalc::keymap::parse_token;
use zcalc::session::{CalculatorSession, Input};
use zcalc::{AngleMode, evaluate};

// ── Strategies ───────────────────────────────────────────────────────

fn arb_operator() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')]
}

/// An integer chain like `12*7-300/4`, as operands and operators.
fn arb_chain() -> impl Strategy<Value = (Vec<u32>, Vec<char>)> {
    (1usize..8).prop_flat_map(|n| {
        (
            proptest::collection::vec(1u32..10_000, n + 1),
            proptest::collection::vec(arb_operator(), n),
        )
    })
}

fn render(operands: &[u32], operators: &[char]) -> String {
    let mut out = operands[0].to_string();
    for (op, n) in operators.iter().zip(&operands[1..]) {
        out.push(*op);
        out.push_str(&n.to_string());
    }
    out
}

/// Same evaluation order as the parser: `*` and `/` left to right inside
/// each term, then `+` and `-` left to right.
fn reference(operands: &[u32], operators: &[char]) -> f64 {
    let mut sum = 0.0;
    let mut sign = 1.0;
    let mut term = f64::from(operands[0]);
    for (op, n) in operators.iter().zip(&operands[1..]) {
        let n = f64::from(*n);
        match op {
            '*' => term *= n,
            '/' => term /= n,
            _ => {
                sum += sign * term;
                sign = if *op == '+' { 1.0 } else { -1.0 };
                term = n;
            }
        }
    }
    sum + sign * term
}

fn press(session: &mut CalculatorSession, keys: &str) {
    for key in keys.chars() {
        let input = parse_token(&key.to_string()).expect("mapped key");
        session.apply(input);
    }
}

// ── Property tests ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn arithmetic_matches_float_semantics((operands, operators) in arb_chain()) {
        let expression = render(&operands, &operators);
        let expected = round_significant(reference(&operands, &operators), 15);
        let actual = evaluate(&expression, AngleMode::Degrees).unwrap();
        let tolerance = expected.abs().max(1.0) * 1e-14;
        prop_assert!((actual - expected).abs() <= tolerance,
            "{} = {} (expected {})", expression, actual, expected);
    }

    #[test]
    fn extra_paren_is_always_unbalanced(
        (operands, operators) in arb_chain(),
        position in any::<prop::sample::Index>(),
        open in any::<bool>(),
    ) {
        let mut expression = format!("({})", render(&operands, &operators));
        let at = position.index(expression.len() + 1);
        expression.insert(at, if open { '(' } else { ')' });
        prop_assert_eq!(
            evaluate(&expression, AngleMode::Radians),
            Err(CalcError::UnbalancedParentheses)
        );
    }

    #[test]
    fn typed_chain_matches_evaluator((operands, operators) in arb_chain()) {
        let expression = render(&operands, &operators);
        prop_assume!(expression.len() <= 42);

        let mut session = CalculatorSession::new();
        press(&mut session, &expression);
        prop_assert_eq!(session.display_text(), expression.clone());
        session.apply(Input::Equals);

        let expected = evaluate(&expression, AngleMode::Degrees).unwrap();
        let shown: f64 = session.current_operand().parse().unwrap();
        let tolerance = expected.abs().max(1.0) * 1e-9;
        prop_assert!((shown - expected).abs() <= tolerance);
    }

    #[test]
    fn backspace_after_result_is_clear_all(
        (operands, operators) in arb_chain(),
        memory in 1u32..100,
    ) {
        let expression = render(&operands, &operators);
        prop_assume!(expression.len() <= 42);

        let mut a = CalculatorSession::new();
        press(&mut a, &memory.to_string());
        a.apply(parse_token("m+").unwrap());
        a.apply(Input::ClearAll);
        press(&mut a, &expression);
        a.apply(Input::Equals);
        prop_assume!(a.is_result_settled());

        let mut b = CalculatorSession::new();
        b.apply(Input::ClearAll);

        let after_backspace = a.apply(Input::Backspace);
        prop_assert_eq!(after_backspace.display_text, b.projection().display_text);
        prop_assert!(!after_backspace.is_error);
        prop_assert_eq!(a.memory(), f64::from(memory));
    }

    #[test]
    fn nested_input_returns_instead_of_overflowing(
        depth in 0usize..4000,
        wrap in prop::sample::select(vec!["(", "-(", "sqrt(", "2^("]),
    ) {
        let expression = format!("{}1{}", wrap.repeat(depth), ")".repeat(depth));
        let result = evaluate(&expression, AngleMode::Radians);
        prop_assert!(depth <= 512 || result.is_err());
    }

    #[test]
    fn operand_never_has_two_decimal_points(keys in "[0-9.]{1,30}") {
        let mut session = CalculatorSession::new();
        press(&mut session, &keys);
        prop_assert!(session.current_operand().matches('.').count() <= 1);
        prop_assert!(session.current_operand().len() <= 16);
    }
}
