//! Keyboard mapping for calculator sessions.
//!
//! Maps physical key names onto session inputs, and parses the named
//! tokens (`sin`, `pi`, `m+`, ...) used to script a session.

use crate::calculator::{Constant, UnaryFunction};
use crate::session::{Input, MemoryOp, Operator};

/// The physical keys a host should forward, with the input each produces.
pub const KEY_TABLE: &[(&str, &str)] = &[
    ("0-9", "digit"),
    (".", "decimal point"),
    ("+ - * / ^", "operator"),
    ("( )", "parenthesis"),
    ("Enter, =", "equals"),
    ("Escape", "clear all"),
    ("Backspace", "backspace"),
];

/// Translate a physical key (as named by the host's key event) into an input.
pub fn key_to_input(key: &str) -> Option<Input> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return char_to_input(c);
    }

    match key {
        "Enter" | "Return" | "NumpadEnter" => Some(Input::Equals),
        "Escape" | "Esc" => Some(Input::ClearAll),
        "Backspace" => Some(Input::Backspace),
        _ => None,
    }
}

fn char_to_input(c: char) -> Option<Input> {
    match c {
        '0'..='9' => c.to_digit(10).map(|d| Input::Digit(d as u8)),
        '.' | ',' => Some(Input::Decimal),
        '(' => Some(Input::OpenParen),
        ')' => Some(Input::CloseParen),
        '=' => Some(Input::Equals),
        c => Operator::from_symbol(c).map(Input::Operator),
    }
}

/// Parse a scripting token: any mapped key, or a named input.
///
/// Multi-digit tokens are not numbers; type `12` as `1 2`.
pub fn parse_token(token: &str) -> Option<Input> {
    if let Some(input) = key_to_input(token) {
        return Some(input);
    }

    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "c" | "ac" | "clear" => return Some(Input::ClearAll),
        "bs" | "back" | "backspace" | "del" => return Some(Input::Backspace),
        "neg" | "+/-" | "±" | "sign" => return Some(Input::ToggleSign),
        "mode" | "deg" | "rad" | "drg" => return Some(Input::ToggleAngleMode),
        "enter" | "equals" => return Some(Input::Equals),
        "%" => return Some(Input::Unary(UnaryFunction::Percent)),
        _ => {}
    }

    if let Some(op) = MemoryOp::from_name(&lower) {
        return Some(Input::Memory(op));
    }
    if let Some(constant) = Constant::from_name(&lower) {
        return Some(Input::Constant(constant));
    }
    UnaryFunction::from_name(&lower).map(Input::Unary)
}
