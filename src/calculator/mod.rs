//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Validate an expression against the arithmetic alphabet
//! - Evaluate it through a closed arithmetic AST
//! - Format results so they fit the calculator display

mod error;
mod evaluation;
mod format;
mod functions;
mod lexer;
mod parser;
mod validation;

pub use error::CalcError;
pub use evaluation::{DEFAULT_SIGNIFICANT_DIGITS, evaluate, evaluate_rounded};
pub use format::{format_number, round_significant, to_exponential, to_precision};
pub use functions::{AngleMode, Constant, UnaryFunction};
pub use lexer::{Token, tokenize};
pub use parser::{BinaryOp, Expr, parse};
pub use validation::{check_characters, check_parentheses, open_depth, validate};
