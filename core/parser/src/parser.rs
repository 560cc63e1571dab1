//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a sequence of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It takes the
//! tokens produced by the Lexer and builds a Node tree that can be evaluated.
//!
//! GRAMMAR:
//!   expression --> term ( ("+" | "-") term )*
//!   term       --> factor ( ("*" | "/") factor )*
//!   factor     --> NUMBER
//!                | STREAM
//!                | "(" expression ")"
//!                | ("+" | "-") factor
//!                | FUNCTION_HANDLE "(" NUMBER ")"
//!
//! A binary operator directly followed by another operator (`2++2`, `2*-2`)
//! is rejected instead of reading the second one as a sign. Signs are only
//! accepted where a factor starts an expression, e.g. `-2*3` or `2+(-3)`.
//!
//! Signs and parentheses nest at most `MAX_NESTING_DEPTH` levels deep.

use crate::ast::Node;
use crate::error::{CompileError, ErrorData};
use crate::logging::{log_enter, log_exit};
use crate::token::{FixedKind, Token, ValuedKind, ValuedToken};

pub type ParseResult<T> = Result<T, CompileError>;

/// Deepest run of nested signs and parentheses the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The Parser walks a token slice left to right with one token of lookahead.
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parses all tokens into a single tree. An empty token list yields `None`.
    pub fn parse(&mut self) -> ParseResult<Option<Node>> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let node = self.parse_expression()?;

        // Ensure we consumed all tokens
        if let Some(token) = self.current() {
            let message = if token.fixed_kind() == Some(FixedKind::RParen) {
                "Opening parenthesis not found".to_string()
            } else {
                format!("Unexpected token: {}", token)
            };
            return Err(CompileError::syntax(message, Some(token.error_data())));
        }

        Ok(Some(node))
    }

    fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn current_fixed(&self) -> Option<FixedKind> {
        self.current().and_then(Token::fixed_kind)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Span of the last token, used when input ends where more was expected.
    fn end_of_input_data(&self) -> Option<ErrorData> {
        self.tokens.last().map(Token::error_data)
    }

    /// Opens one level of sign or parenthesis nesting at `token`.
    fn enter_nested(&mut self, token: &Token) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(CompileError::syntax(
                "Formula is nested too deeply",
                Some(token.error_data()),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    /// Rejects an operator right after the binary operator `previous`.
    fn reject_operator_run(&self, previous: &Token) -> ParseResult<()> {
        match self.current() {
            Some(token) if token.is_operator() => Err(CompileError::syntax(
                format!(
                    "Unexpected operator after '{}': {}",
                    previous.to_symbol(),
                    token.to_symbol()
                ),
                Some(ErrorData::new(
                    previous.start_offset(),
                    token.end_offset(),
                    Some(format!("{}{}", previous.to_symbol(), token.to_symbol())),
                )),
            )),
            _ => Ok(()),
        }
    }

    /// Parses additive expressions (+ and -).
    fn parse_expression(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_term()?;

        while let Some(op_token) = self.current() {
            let op = match op_token.fixed_kind() {
                Some(op @ (FixedKind::Plus | FixedKind::Minus)) => op,
                _ => break,
            };
            self.advance();
            self.reject_operator_run(op_token)?;
            let right = self.parse_term()?;

            left = match op {
                FixedKind::Plus => Node::add(left, right),
                _ => Node::subtract(left, right),
            };
        }

        Ok(left)
    }

    /// Parses multiplicative expressions (* and /).
    fn parse_term(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_factor()?;

        while let Some(op_token) = self.current() {
            let op = match op_token.fixed_kind() {
                Some(op @ (FixedKind::Multiply | FixedKind::Divide)) => op,
                _ => break,
            };
            self.advance();
            self.reject_operator_run(op_token)?;
            let right = self.parse_factor()?;

            left = match op {
                FixedKind::Multiply => Node::multiply(left, right),
                _ => Node::divide(left, right),
            };
        }

        Ok(left)
    }

    /// Parses literals, stream references, function calls, signs and parentheses.
    fn parse_factor(&mut self) -> ParseResult<Node> {
        let token = match self.current() {
            Some(token) => token,
            None => {
                return Err(CompileError::syntax(
                    "Unexpected end of formula",
                    self.end_of_input_data(),
                ))
            }
        };

        match token {
            Token::Valued(valued) => match valued.kind() {
                ValuedKind::Number => {
                    self.advance();
                    Ok(Node::number(valued.value()))
                }
                ValuedKind::Stream => {
                    self.advance();
                    Ok(Node::stream(valued.value()))
                }
                ValuedKind::FunctionHandle => self.parse_function_call(valued),
            },

            Token::Fixed(fixed) => match fixed.kind {
                FixedKind::LParen => {
                    self.enter_nested(token)?;
                    self.advance();
                    let expr = self.parse_expression()?;
                    if self.current_fixed() != Some(FixedKind::RParen) {
                        return Err(CompileError::syntax(
                            "Closing parenthesis not found",
                            Some(token.error_data()),
                        ));
                    }
                    self.advance();
                    self.leave_nested();
                    Ok(expr)
                }
                FixedKind::Plus | FixedKind::Minus => {
                    self.enter_nested(token)?;
                    self.advance();
                    let operand = self.parse_factor()?;
                    self.leave_nested();
                    Ok(if fixed.kind == FixedKind::Plus {
                        Node::plus(operand)
                    } else {
                        Node::minus(operand)
                    })
                }
                FixedKind::RParen | FixedKind::Multiply | FixedKind::Divide => {
                    Err(CompileError::syntax(
                        format!("Unexpected token: {}", token),
                        Some(token.error_data()),
                    ))
                }
            },
        }
    }

    /// Parses `@HANDLE(NUMBER)`; the current token is the handle.
    fn parse_function_call(&mut self, handle: &'t ValuedToken) -> ParseResult<Node> {
        let handle_data = || {
            ErrorData::new(
                handle.start(),
                handle.end(),
                Some(handle.value().to_string()),
            )
        };
        self.advance();

        if self.current_fixed() != Some(FixedKind::LParen) {
            return Err(CompileError::syntax(
                "Expected opening parenthesis",
                Some(handle_data()),
            ));
        }
        self.advance();

        let argument = match self.current() {
            Some(Token::Valued(arg)) if arg.kind() == ValuedKind::Number => arg.value(),
            _ => {
                return Err(CompileError::syntax(
                    "Function input not found",
                    Some(handle_data()),
                ))
            }
        };
        self.advance();

        if self.current_fixed() != Some(FixedKind::RParen) {
            return Err(CompileError::syntax(
                "Expected closing parenthesis",
                Some(handle_data()),
            ));
        }
        self.advance();

        Ok(Node::function_call(handle.value(), argument))
    }
}

/// Convenience function to parse a token sequence directly.
pub fn parse(tokens: &[Token]) -> ParseResult<Option<Node>> {
    log_enter!("PARSE", "parse", "tokens={}", tokens.len());
    let result = Parser::new(tokens).parse();
    match &result {
        Ok(Some(node)) => log_exit!("PARSE", "parse", "tree={}", node),
        Ok(None) => log_exit!("PARSE", "parse", "empty"),
        Err(e) => log_exit!("PARSE", "parse", "error={}", e),
    }
    result
}
