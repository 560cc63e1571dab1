//! FILENAME: core/engine/src/bindings.rs
//! PURPOSE: Values and callables the evaluator consults at runtime.
//! CONTEXT: Stream values and the meaning of built-in functions such as
//! `@FPD` belong to the caller. The evaluator only looks them up and
//! combines the results arithmetically.

use std::collections::HashMap;

use formula_parser::{CompileError, FunctionHandle, StreamInput};
use serde::{Deserialize, Serialize};

/// Current value of each bound stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamValues {
    values: HashMap<StreamInput, f64>,
}

impl StreamValues {
    pub fn new() -> Self {
        StreamValues::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, stream: StreamInput, value: f64) -> Self {
        self.values.insert(stream, value);
        self
    }

    pub fn insert(&mut self, stream: StreamInput, value: f64) -> Option<f64> {
        self.values.insert(stream, value)
    }

    pub fn get(&self, stream: StreamInput) -> Option<f64> {
        self.values.get(&stream).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(StreamInput, f64)> for StreamValues {
    fn from_iter<I: IntoIterator<Item = (StreamInput, f64)>>(iter: I) -> Self {
        StreamValues {
            values: iter.into_iter().collect(),
        }
    }
}

/// Runtime implementation of the built-in functions.
pub trait FunctionEvaluator {
    fn call(&self, handle: FunctionHandle, argument: f64) -> Result<f64, CompileError>;
}

impl<F> FunctionEvaluator for F
where
    F: Fn(FunctionHandle, f64) -> Result<f64, CompileError>,
{
    fn call(&self, handle: FunctionHandle, argument: f64) -> Result<f64, CompileError> {
        self(handle, argument)
    }
}

/// Evaluator for callers that bind no functions: every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFunctions;

impl FunctionEvaluator for NoFunctions {
    fn call(&self, handle: FunctionHandle, _argument: f64) -> Result<f64, CompileError> {
        Err(CompileError::value(
            format!("{} function is not available", handle),
            None,
        ))
    }
}
