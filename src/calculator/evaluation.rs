//! Expression evaluation.
//!
//! A finished expression string goes through validation, tokenizing and
//! parsing into a closed arithmetic AST before anything is computed, so
//! nothing but arithmetic on numbers can ever run.

use super::error::CalcError;
use super::format::round_significant;
use super::functions::AngleMode;
use super::lexer::tokenize;
use super::parser::parse;
use super::validation::validate;

/// Significant digits kept after evaluation.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 15;

/// Evaluate an expression, rounding to 15 significant digits.
pub fn evaluate(expression: &str, mode: AngleMode) -> Result<f64, CalcError> {
    evaluate_rounded(expression, mode, DEFAULT_SIGNIFICANT_DIGITS)
}

/// Evaluate an expression, rounding the result to `significant_digits`.
pub fn evaluate_rounded(
    expression: &str,
    mode: AngleMode,
    significant_digits: usize,
) -> Result<f64, CalcError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(CalcError::calculation("empty expression"));
    }

    validate(expression)?;
    let tokens = tokenize(expression)?;
    let ast = parse(&tokens)?;
    let value = ast.eval(mode)?;

    if !value.is_finite() {
        return Err(CalcError::NonFiniteResult);
    }

    Ok(round_significant(value, significant_digits) + 0.0)
}
