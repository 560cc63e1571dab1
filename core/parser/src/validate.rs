//! FILENAME: core/parser/src/validate.rs
//! PURPOSE: Validation entry point used by the formula editor.
//! CONTEXT: Runs Lexer --> token check --> Parser for one formula against the
//! stream inputs selected by the caller, and folds the outcome into a
//! `FormulaVerdict` the UI can render directly.

use std::collections::BTreeSet;

use serde::{Serialize, Serializer};

use crate::ast::Node;
use crate::error::{CompileError, FormulaError, FormulaResult};
use crate::lexer::tokenize;
use crate::logging::{log_enter, log_exit};
use crate::parser::parse;
use crate::settings::{FormulaSettings, FunctionHandle, StreamInput};
use crate::token::Token;

/// Outcome of validating a formula.
///
/// Serializes as `false`, a plain string, or an error object, which is the
/// shape the editor's inline error state expects.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaVerdict {
    /// The formula lexes, passes the token check and parses.
    Valid,
    /// Failure without a location to point at.
    Message(String),
    /// Failure with a span into the formula.
    Error(CompileError),
}

impl FormulaVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, FormulaVerdict::Valid)
    }

    /// Message text for any failure, `None` when valid.
    pub fn message(&self) -> Option<&str> {
        match self {
            FormulaVerdict::Valid => None,
            FormulaVerdict::Message(message) => Some(message),
            FormulaVerdict::Error(error) => Some(error.message()),
        }
    }
}

impl From<FormulaError> for FormulaVerdict {
    fn from(error: FormulaError) -> Self {
        match error {
            FormulaError::Compile(compile) if compile.data().is_some() => {
                FormulaVerdict::Error(compile)
            }
            other => FormulaVerdict::Message(other.to_string()),
        }
    }
}

impl Serialize for FormulaVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormulaVerdict::Valid => serializer.serialize_bool(false),
            FormulaVerdict::Message(message) => serializer.serialize_str(message),
            FormulaVerdict::Error(error) => error.serialize(serializer),
        }
    }
}

/// Checks every token in source order and reports the first one not usable
/// with the given streams and functions.
pub fn check_tokens(
    tokens: &[Token],
    allowed_streams: &BTreeSet<StreamInput>,
    allowed_functions: &BTreeSet<FunctionHandle>,
) -> Result<(), CompileError> {
    for token in tokens {
        if let Err(reason) = token.is_valid(allowed_streams, allowed_functions) {
            log::debug!(target: "VALIDATE", "rejected token {} at {}: {}", token, token.start_offset(), reason);
            return Err(CompileError::value(reason, Some(token.error_data())));
        }
    }
    Ok(())
}

/// Lexes, checks and parses a formula, returning the tree.
/// An empty (or all-whitespace) formula compiles to `None`.
pub fn compile(formula: &str, settings: &FormulaSettings) -> FormulaResult<Option<Node>> {
    let tokens = tokenize(formula)?;
    check_tokens(
        &tokens,
        &settings.allowed_streams(),
        &settings.allowed_functions(),
    )?;
    Ok(parse(&tokens)?)
}

/// Validates a formula against the selected stream inputs.
///
/// The compiled tree is discarded; nothing is evaluated. Never panics or
/// returns an error: every failure is folded into the verdict.
pub fn formula_has_error(formula: &str, inputs: &[StreamInput]) -> FormulaVerdict {
    log_enter!("VALIDATE", "formula_has_error", "formula={:?} inputs={:?}", formula, inputs);
    let settings = FormulaSettings::new(inputs.iter().copied());
    let verdict = match compile(formula, &settings) {
        Ok(_) => FormulaVerdict::Valid,
        Err(error) => FormulaVerdict::from(error),
    };
    log_exit!("VALIDATE", "formula_has_error", "verdict={:?}", verdict);
    verdict
}
