//! Recursive-descent parser producing a small arithmetic AST.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := NUMBER | CONSTANT | FUNCTION '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` is right-associative and binds tighter than a leading sign, so
//! `-2^2` is `-(2^2)`.
//!
//! Nesting through parentheses, calls, signs and `^` is capped, and so is
//! the token count, which bounds the height of the tree `eval` walks.

use super::error::CalcError;
use super::functions::{AngleMode, Constant, UnaryFunction};
use super::lexer::Token;

/// Deepest nesting of parentheses, calls, signs and exponents.
pub const MAX_DEPTH: usize = 128;

/// Longest token stream the parser accepts.
pub const MAX_TOKENS: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: UnaryFunction,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree. Division by an exact zero is reported instead of
    /// producing an infinity.
    pub fn eval(&self, mode: AngleMode) -> Result<f64, CalcError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Neg(inner) => Ok(-inner.eval(mode)?),
            Self::Binary { op, lhs, rhs } => {
                let a = lhs.eval(mode)?;
                let b = rhs.eval(mode)?;
                match op {
                    BinaryOp::Add => Ok(a + b),
                    BinaryOp::Sub => Ok(a - b),
                    BinaryOp::Mul => Ok(a * b),
                    BinaryOp::Div if b == 0.0 => Err(CalcError::DivisionByZero),
                    BinaryOp::Div => Ok(a / b),
                    BinaryOp::Pow => Ok(a.powf(b)),
                }
            }
            Self::Call { function, arg } => Ok(function.apply(arg.eval(mode)?, mode)),
        }
    }
}

/// Parse a full token stream. Trailing tokens are an error.
pub fn parse(tokens: &[Token]) -> Result<Expr, CalcError> {
    if tokens.len() > MAX_TOKENS {
        return Err(CalcError::calculation("expression too long"));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(CalcError::calculation(format!(
            "unexpected {}",
            describe(token)
        ))),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> Result<(), CalcError> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(CalcError::calculation(format!(
                "expected {}, found {}",
                describe(expected),
                describe(token)
            ))),
            None => Err(CalcError::calculation(format!(
                "expected {}, found end of expression",
                describe(expected)
            ))),
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CalcError>,
    ) -> Result<T, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::calculation("expression nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.nested(Self::unary)?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            let exponent = self.nested(Self::unary)?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(*n)),
            Some(Token::LParen) => {
                let inner = self.nested(Self::expr)?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if let Some(constant) = Constant::from_name(name) {
                    return Ok(Expr::Number(constant.value()));
                }
                let function = UnaryFunction::callable(name).ok_or_else(|| {
                    CalcError::calculation(format!("unknown name '{}'", name))
                })?;
                self.expect(&Token::LParen)?;
                let arg = self.nested(Self::expr)?;
                self.expect(&Token::RParen)?;
                Ok(Expr::Call {
                    function,
                    arg: Box::new(arg),
                })
            }
            Some(token) => Err(CalcError::calculation(format!(
                "unexpected {}",
                describe(token)
            ))),
            None => Err(CalcError::calculation("unexpected end of expression")),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {}", n),
        Token::Ident(name) => format!("'{}'", name),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::Caret => "'^'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
    }
}
