//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It skips
//! whitespace, reads numbers, stream names and `@` function handles, and
//! emits single-character operator tokens. Offsets are character indices.
//!
//! SUPPORTED INPUT:
//! - Single char: + - * / ( )
//! - Numbers: runs of digits and '.', e.g. 12, 0.5, .5
//! - Streams: runs of ASCII letters, e.g. Oil
//! - Function handles: '@' followed by ASCII letters, e.g. @FPD

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{CompileError, ErrorData, FormulaResult};
use crate::logging::{log_enter, log_exit};
use crate::token::{FixedKind, Token, ValuedKind};

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    /// Character index of the next character `input` will yield.
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            position: 0,
        }
    }

    /// Advances the lexer and returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> FormulaResult<Option<Token>> {
        self.skip_whitespace();

        let start = self.position;
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        if let Some(kind) = FixedKind::from_char(ch) {
            return Ok(Some(Token::fixed(kind, start)));
        }

        match ch {
            '@' => self.read_function_handle(start).map(Some),
            ch if ch.is_ascii_digit() || ch == '.' => self.read_number(ch, start).map(Some),
            ch if ch.is_ascii_alphabetic() => self.read_stream(ch, start).map(Some),
            ch => Err(CompileError::syntax(
                format!("Invalid character: {}", ch),
                Some(ErrorData::new(start, start + 1, Some(ch.to_string()))),
            )
            .into()),
        }
    }

    /// Consumes the whole input. Fails on the first unrecognized character.
    pub fn tokenize(mut self) -> FormulaResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.next()?;
        self.position += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !matches!(ch, ' ' | '\t' | '\n') {
                break;
            }
            self.advance();
        }
    }

    /// Appends following characters to `text` while `accept` holds.
    fn read_while(&mut self, text: &mut String, accept: impl Fn(char) -> bool) {
        while let Some(&ch) = self.input.peek() {
            if !accept(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    /// Reads digits and dots. Multiple dots are accepted here and rejected by
    /// the token check, so the error can point at the whole literal.
    fn read_number(&mut self, first_char: char, start: usize) -> FormulaResult<Token> {
        let mut number_str = String::from(first_char);
        self.read_while(&mut number_str, |c| c.is_ascii_digit() || c == '.');
        Ok(Token::valued(ValuedKind::Number, number_str, start, self.position)?)
    }

    fn read_stream(&mut self, first_char: char, start: usize) -> FormulaResult<Token> {
        let mut name = String::from(first_char);
        self.read_while(&mut name, |c| c.is_ascii_alphabetic());
        Ok(Token::valued(ValuedKind::Stream, name, start, self.position)?)
    }

    /// Reads `@` plus the letters that follow. A bare `@` is still a handle
    /// token; the token check reports it as unavailable.
    fn read_function_handle(&mut self, start: usize) -> FormulaResult<Token> {
        let mut handle = String::from('@');
        self.read_while(&mut handle, |c| c.is_ascii_alphabetic());
        Ok(Token::valued(ValuedKind::FunctionHandle, handle, start, self.position)?)
    }
}

/// Convenience function to tokenize a formula string directly.
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    log_enter!("LEX", "tokenize", "len={}", input.len());
    let result = Lexer::new(input).tokenize();
    match &result {
        Ok(tokens) => log_exit!("LEX", "tokenize", "tokens={}", tokens.len()),
        Err(e) => log_exit!("LEX", "tokenize", "error={}", e),
    }
    result
}
