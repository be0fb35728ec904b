//! Tokenizer for validated arithmetic expressions.

use super::error::CalcError;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// Split an expression into tokens.
///
/// Commas are accepted as digit group separators inside a number literal
/// (`1,000`); anywhere else they are an error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => tokens.push(Token::Number(lex_number(&mut chars)?)),
            'a'..='z' | 'A'..='Z' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_alphabetic() {
                        break;
                    }
                    ident.push(c);
                    chars.next();
                }
                tokens.push(Token::Ident(ident.to_ascii_lowercase()));
            }
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '^' => Token::Caret,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => return Err(CalcError::calculation("unexpected ','")),
                    other => return Err(CalcError::InvalidCharacter(other)),
                };
                tokens.push(token);
                chars.next();
            }
        }
    }

    Ok(tokens)
}

fn lex_number(chars: &mut Peekable<Chars<'_>>) -> Result<f64, CalcError> {
    let mut literal = String::new();
    let mut seen_dot = false;

    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => literal.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                literal.push(c);
            }
            '.' => return Err(CalcError::calculation("number with more than one '.'")),
            ',' if !seen_dot && literal.ends_with(|c: char| c.is_ascii_digit()) => {}
            _ => break,
        }
        chars.next();
    }

    // Exponent: only consumed when digits follow, so `2e` stays `2` then `e`.
    if matches!(chars.peek(), Some('e' | 'E')) {
        let mut lookahead = chars.clone();
        lookahead.next();
        let mut exponent = String::from("e");
        if let Some(&sign) = lookahead.peek()
            && (sign == '+' || sign == '-')
        {
            exponent.push(sign);
            lookahead.next();
        }
        if lookahead.peek().is_some_and(|c| c.is_ascii_digit()) {
            while let Some(&c) = lookahead.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                exponent.push(c);
                lookahead.next();
            }
            literal.push_str(&exponent);
            *chars = lookahead;
        }
    }

    if literal == "." {
        return Err(CalcError::calculation("'.' is not a number"));
    }

    literal
        .parse::<f64>()
        .map_err(|_| CalcError::calculation(format!("invalid number '{}'", literal)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_and_numbers() {
        let tokens = tokenize("2 + 3.5*(4-1)/2^2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Plus,
                Token::Number(3.5),
                Token::Star,
                Token::LParen,
                Token::Number(4.0),
                Token::Minus,
                Token::Number(1.0),
                Token::RParen,
                Token::Slash,
                Token::Number(2.0),
                Token::Caret,
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_trailing_and_leading_dot() {
        assert_eq!(tokenize("5.").unwrap(), vec![Token::Number(5.0)]);
        assert_eq!(tokenize(".25").unwrap(), vec![Token::Number(0.25)]);
        assert!(tokenize(".").is_err());
        assert!(tokenize("1.2.3").is_err());
    }

    #[test]
    fn test_exponent_literals() {
        assert_eq!(tokenize("1.5e300").unwrap(), vec![Token::Number(1.5e300)]);
        assert_eq!(tokenize("2e-7").unwrap(), vec![Token::Number(2e-7)]);
        assert_eq!(tokenize("4E+2").unwrap(), vec![Token::Number(400.0)]);
    }

    #[test]
    fn test_e_without_digits_is_identifier() {
        assert_eq!(
            tokenize("2e").unwrap(),
            vec![Token::Number(2.0), Token::Ident("e".to_string())]
        );
        assert_eq!(
            tokenize("3e+x").unwrap(),
            vec![
                Token::Number(3.0),
                Token::Ident("e".to_string()),
                Token::Plus,
                Token::Ident("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_digit_group_separators() {
        assert_eq!(tokenize("1,000,000").unwrap(), vec![Token::Number(1e6)]);
        assert!(tokenize("1 , 2").is_err());
    }

    #[test]
    fn test_identifiers_are_lowercased() {
        assert_eq!(
            tokenize("SIN(PI)").unwrap(),
            vec![
                Token::Ident("sin".to_string()),
                Token::LParen,
                Token::Ident("pi".to_string()),
                Token::RParen,
            ]
        );
    }
}
