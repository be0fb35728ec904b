//! Discrete input events accepted by a calculator session.

use crate::calculator::{Constant, UnaryFunction};

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    /// Whether `c` is any operator symbol.
    pub fn is_symbol(c: char) -> bool {
        Self::from_symbol(c).is_some()
    }
}

/// Memory register operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOp {
    /// MC: zero the register.
    Clear,
    /// MR: recall the register as a settled result.
    Recall,
    /// M+: add the current operand.
    Add,
    /// M-: subtract the current operand.
    Subtract,
}

impl MemoryOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mc" => Some(Self::Clear),
            "mr" => Some(Self::Recall),
            "m+" => Some(Self::Add),
            "m-" => Some(Self::Subtract),
            _ => None,
        }
    }
}

/// One keystroke-like event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// A digit, 0 through 9.
    Digit(u8),
    Decimal,
    Operator(Operator),
    OpenParen,
    CloseParen,
    Equals,
    Unary(UnaryFunction),
    Constant(Constant),
    ToggleSign,
    Backspace,
    ClearAll,
    Memory(MemoryOp),
    ToggleAngleMode,
}
