//! Up-front checks run before an expression is tokenized.
//!
//! Rejects anything outside the arithmetic alphabet and any expression
//! whose parentheses do not balance.

use super::error::CalcError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches the first character that is not allowed in an expression.
    /// Allowed: digits, whitespace, operators, parentheses, dots, commas and
    /// ASCII letters (function and constant names).
    static ref FORBIDDEN_CHAR: Regex = Regex::new(r"[^\d\s\.,\+\-\*/\^()a-zA-Z]").unwrap();
}

/// Run every check in order.
pub fn validate(expression: &str) -> Result<(), CalcError> {
    check_characters(expression)?;
    check_parentheses(expression)
}

/// Fail on the first character outside the allow-list.
pub fn check_characters(expression: &str) -> Result<(), CalcError> {
    match FORBIDDEN_CHAR.find(expression) {
        Some(m) => {
            let c = m.as_str().chars().next().unwrap_or('\u{fffd}');
            Err(CalcError::InvalidCharacter(c))
        }
        None if expression.chars().any(|c| !c.is_ascii()) => {
            // \d and \s also match non-ASCII digits and spaces.
            let c = expression
                .chars()
                .find(|c| !c.is_ascii())
                .unwrap_or('\u{fffd}');
            Err(CalcError::InvalidCharacter(c))
        }
        None => Ok(()),
    }
}

/// The running depth must never go negative and must end at zero.
pub fn check_parentheses(expression: &str) -> Result<(), CalcError> {
    let mut depth: i64 = 0;
    for c in expression.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(CalcError::UnbalancedParentheses);
                }
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(CalcError::UnbalancedParentheses)
    }
}

/// Number of `(` still waiting for a matching `)`.
pub fn open_depth(expression: &str) -> usize {
    expression.chars().fold(0usize, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth.saturating_sub(1),
        _ => depth,
    })
}
