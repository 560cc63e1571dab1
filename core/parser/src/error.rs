//! FILENAME: core/parser/src/error.rs
//! PURPOSE: Error types shared by every stage of the formula pipeline.
//! CONTEXT: `CompileError` is the "rich" error handed back to the editor: a
//! message plus an optional span into the source so the offending text can be
//! underlined. `TokenError` signals a broken token invariant, which is a bug in
//! the caller or lexer rather than bad user input.

use serde::Serialize;
use thiserror::Error;

/// Location and text of the offending part of a formula.
/// `start_index..end_index` is a half-open character range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    pub start_index: usize,
    pub end_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ErrorData {
    pub fn new(start_index: usize, end_index: usize, value: Option<String>) -> Self {
        ErrorData {
            start_index,
            end_index,
            value,
        }
    }
}

/// Rich error raised while lexing, validating, parsing or evaluating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Malformed token stream or grammar violation.
    #[error("{message}")]
    Syntax {
        message: String,
        data: Option<ErrorData>,
    },

    /// Well-formed token that is not usable with the current settings.
    #[error("{message}")]
    Value {
        message: String,
        data: Option<ErrorData>,
    },

    /// Arithmetic failure during evaluation.
    #[error("{message}")]
    Math {
        message: String,
        data: Option<ErrorData>,
    },
}

impl CompileError {
    pub fn syntax(message: impl Into<String>, data: Option<ErrorData>) -> Self {
        CompileError::Syntax {
            message: message.into(),
            data,
        }
    }

    pub fn value(message: impl Into<String>, data: Option<ErrorData>) -> Self {
        CompileError::Value {
            message: message.into(),
            data,
        }
    }

    pub fn math(message: impl Into<String>, data: Option<ErrorData>) -> Self {
        CompileError::Math {
            message: message.into(),
            data,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CompileError::Syntax { message, .. }
            | CompileError::Value { message, .. }
            | CompileError::Math { message, .. } => message,
        }
    }

    pub fn data(&self) -> Option<&ErrorData> {
        match self {
            CompileError::Syntax { data, .. }
            | CompileError::Value { data, .. }
            | CompileError::Math { data, .. } => data.as_ref(),
        }
    }

    /// Name of the error kind as shown to the frontend.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CompileError::Syntax { .. } => "SyntaxError",
            CompileError::Value { .. } => "ValueError",
            CompileError::Math { .. } => "MathError",
        }
    }
}

/// Flat, camelCase view of a `CompileError` for the UI boundary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompileErrorRepr<'a> {
    kind: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

impl Serialize for CompileError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = self.data();
        CompileErrorRepr {
            kind: self.kind_name(),
            message: self.message(),
            start_index: data.map(|d| d.start_index),
            end_index: data.map(|d| d.end_index),
            value: data.and_then(|d| d.value.as_deref()),
        }
        .serialize(serializer)
    }
}

/// A token was built in violation of its shape invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("{kind} token value must not be empty")]
    EmptyValue { kind: &'static str },

    #[error("{kind} token value \"{value}\" has length {len} but spans {start}..{end}")]
    SpanMismatch {
        kind: &'static str,
        value: String,
        len: usize,
        start: usize,
        end: usize,
    },
}

/// Any failure of the compile pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),
}

pub type FormulaResult<T> = Result<T, FormulaError>;
