//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the stream formula compiler.
//! CONTEXT: This crate exposes the lexer, token check, parser and AST needed
//! to turn a forecast formula such as `Oil * 2 + Gas` or `@FPD(123)` into a
//! tree, plus the validation entry point used by the formula editor.
//!
//! PIPELINE: Formula String --> Lexer --> Tokens --> Token check --> Parser --> AST
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, /
//! - Unary signs: -Oil, +2, --2
//! - Stream references: Oil, Gas, Water (only when selected as inputs)
//! - Function calls with a numeric argument: @FPD(123)
//! - Parentheses for grouping

pub mod ast;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod settings;
pub mod token;
pub mod validate;


// Re-export commonly used types for convenience
pub use ast::Node;
pub use error::{CompileError, ErrorData, FormulaError, FormulaResult, TokenError};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, ParseResult, Parser, MAX_NESTING_DEPTH};
pub use settings::{available_functions, FormulaSettings, FunctionHandle, SettingsError, StreamInput};
pub use token::{detokenize, FixedKind, Token, TokenKind, ValuedKind};
pub use validate::{check_tokens, compile, formula_has_error, FormulaVerdict};
