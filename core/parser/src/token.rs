//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the formula lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by the
//! parser and by the per-token semantic check. Operators and parentheses never
//! carry text, so they get their own shape; numbers, streams and function
//! handles carry the exact source text they were read from.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ErrorData, TokenError};
use crate::settings::{FunctionHandle, StreamInput};

/// All nine token kinds, regardless of shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
    FunctionHandle,
    Stream,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::FunctionHandle => "FUNCTION_HANDLE",
            TokenKind::Stream => "STREAM",
        };
        write!(f, "{}", name)
    }
}

/// Single-character tokens without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedKind {
    Plus,
    Minus,
    Multiply,
    Divide,
    LParen,
    RParen,
}

impl FixedKind {
    pub fn from_char(ch: char) -> Option<FixedKind> {
        match ch {
            '+' => Some(FixedKind::Plus),
            '-' => Some(FixedKind::Minus),
            '*' => Some(FixedKind::Multiply),
            '/' => Some(FixedKind::Divide),
            '(' => Some(FixedKind::LParen),
            ')' => Some(FixedKind::RParen),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            FixedKind::Plus => '+',
            FixedKind::Minus => '-',
            FixedKind::Multiply => '*',
            FixedKind::Divide => '/',
            FixedKind::LParen => '(',
            FixedKind::RParen => ')',
        }
    }

    pub fn kind(self) -> TokenKind {
        match self {
            FixedKind::Plus => TokenKind::Plus,
            FixedKind::Minus => TokenKind::Minus,
            FixedKind::Multiply => TokenKind::Multiply,
            FixedKind::Divide => TokenKind::Divide,
            FixedKind::LParen => TokenKind::LParen,
            FixedKind::RParen => TokenKind::RParen,
        }
    }

    /// True for the four arithmetic operators.
    pub fn is_operator(self) -> bool {
        !matches!(self, FixedKind::LParen | FixedKind::RParen)
    }
}

/// Tokens that carry their source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValuedKind {
    Number,
    Stream,
    FunctionHandle,
}

impl ValuedKind {
    pub fn kind(self) -> TokenKind {
        match self {
            ValuedKind::Number => TokenKind::Number,
            ValuedKind::Stream => TokenKind::Stream,
            ValuedKind::FunctionHandle => TokenKind::FunctionHandle,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ValuedKind::Number => "NUMBER",
            ValuedKind::Stream => "STREAM",
            ValuedKind::FunctionHandle => "FUNCTION_HANDLE",
        }
    }
}

/// An operator or parenthesis. Always exactly one character wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedToken {
    pub kind: FixedKind,
    pub start: usize,
}

/// A number, stream name or function handle.
/// Fields are private so the length invariant holds for every instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValuedToken {
    kind: ValuedKind,
    value: String,
    start: usize,
    end: usize,
}

impl ValuedToken {
    /// Builds a valued token, checking that `value` exactly covers `start..end`.
    pub fn new(
        kind: ValuedKind,
        value: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Result<Self, TokenError> {
        let value = value.into();
        let len = value.chars().count();
        if len == 0 {
            return Err(TokenError::EmptyValue { kind: kind.label() });
        }
        if end < start || len != end - start {
            return Err(TokenError::SpanMismatch {
                kind: kind.label(),
                value,
                len,
                start,
                end,
            });
        }
        Ok(ValuedToken {
            kind,
            value,
            start,
            end,
        })
    }

    pub fn kind(&self) -> ValuedKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Fixed(FixedToken),
    Valued(ValuedToken),
}

impl Token {
    pub fn fixed(kind: FixedKind, start: usize) -> Self {
        Token::Fixed(FixedToken { kind, start })
    }

    pub fn valued(
        kind: ValuedKind,
        value: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Result<Self, TokenError> {
        ValuedToken::new(kind, value, start, end).map(Token::Valued)
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Fixed(t) => t.kind.kind(),
            Token::Valued(t) => t.kind.kind(),
        }
    }

    pub fn start_offset(&self) -> usize {
        match self {
            Token::Fixed(t) => t.start,
            Token::Valued(t) => t.start,
        }
    }

    pub fn end_offset(&self) -> usize {
        match self {
            Token::Fixed(t) => t.start + 1,
            Token::Valued(t) => t.end,
        }
    }

    /// Source text for valued tokens; `None` for operators and parentheses.
    pub fn value(&self) -> Option<&str> {
        match self {
            Token::Fixed(_) => None,
            Token::Valued(t) => Some(t.value()),
        }
    }

    pub fn fixed_kind(&self) -> Option<FixedKind> {
        match self {
            Token::Fixed(t) => Some(t.kind),
            Token::Valued(_) => None,
        }
    }

    /// True for `+ - * /`.
    pub fn is_operator(&self) -> bool {
        self.fixed_kind().is_some_and(FixedKind::is_operator)
    }

    /// The text this token stands for in a formula.
    pub fn to_symbol(&self) -> String {
        match self {
            Token::Fixed(t) => t.kind.symbol().to_string(),
            Token::Valued(t) => t.value.clone(),
        }
    }

    /// Span of this token, used to annotate errors.
    pub fn error_data(&self) -> ErrorData {
        ErrorData::new(
            self.start_offset(),
            self.end_offset(),
            Some(self.to_symbol()),
        )
    }

    /// Checks whether this token is usable with the given streams and functions.
    /// Returns the rejection reason on failure.
    pub fn is_valid(
        &self,
        allowed_streams: &BTreeSet<StreamInput>,
        allowed_functions: &BTreeSet<FunctionHandle>,
    ) -> Result<(), String> {
        let token = match self {
            Token::Fixed(_) => return Ok(()),
            Token::Valued(t) => t,
        };

        match token.kind {
            ValuedKind::Number => {
                let dots = token.value.matches('.').count();
                if dots > 1 {
                    Err(format!("Invalid number: {}", token.value))
                } else {
                    Ok(())
                }
            }
            ValuedKind::Stream => match StreamInput::from_name(&token.value) {
                Some(stream) if allowed_streams.contains(&stream) => Ok(()),
                Some(_) => Err(format!(
                    "{} stream needs to be selected as an input to be used",
                    token.value
                )),
                None => Err(format!("Invalid value: {}", token.value)),
            },
            ValuedKind::FunctionHandle => match FunctionHandle::from_symbol(&token.value) {
                Some(handle) if allowed_functions.contains(&handle) => Ok(()),
                _ => Err(format!("{} function is not available", token.value)),
            },
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_symbol())
    }
}

/// Rebuilds formula text from tokens, one space between each.
pub fn detokenize(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_symbol)
        .collect::<Vec<_>>()
        .join(" ")
}
