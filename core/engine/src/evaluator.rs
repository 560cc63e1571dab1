//! FILENAME: core/engine/src/evaluator.rs
//! PURPOSE: Evaluates formula trees to a number.
//! CONTEXT: After a formula is compiled into a Node tree, this module walks
//! the tree and computes the result. Stream references are read from the
//! caller's `StreamValues`; function calls are routed to the caller's
//! `FunctionEvaluator`. Division is the only operation that can fail at
//! runtime, with a `MathError`.

use formula_parser::logging::{log_enter, log_exit};
use formula_parser::{
    compile, CompileError, FormulaResult, FormulaSettings, FunctionHandle, Node, StreamInput,
};

use crate::bindings::{FunctionEvaluator, StreamValues};

pub type EvalResult = Result<f64, CompileError>;

/// The formula evaluator.
/// Holds references to the stream values and function implementations.
pub struct Evaluator<'a> {
    streams: &'a StreamValues,
    functions: &'a dyn FunctionEvaluator,
}

impl<'a> Evaluator<'a> {
    pub fn new(streams: &'a StreamValues, functions: &'a dyn FunctionEvaluator) -> Self {
        Evaluator { streams, functions }
    }

    /// Evaluates a tree and returns the result.
    pub fn evaluate(&self, node: &Node) -> EvalResult {
        match node {
            Node::Number(value) => parse_number(value),
            Node::Add(left, right) => Ok(self.evaluate(left)? + self.evaluate(right)?),
            Node::Subtract(left, right) => Ok(self.evaluate(left)? - self.evaluate(right)?),
            Node::Multiply(left, right) => Ok(self.evaluate(left)? * self.evaluate(right)?),
            Node::Divide(left, right) => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                eval_divide(left_val, right_val)
            }
            Node::Plus(operand) => self.evaluate(operand),
            Node::Minus(operand) => Ok(-self.evaluate(operand)?),
            Node::Stream(name) => self.eval_stream(name),
            Node::FunctionCall { handle, argument } => self.eval_function(handle, argument),
        }
    }

    fn eval_stream(&self, name: &str) -> EvalResult {
        let stream = StreamInput::from_name(name)
            .ok_or_else(|| CompileError::value(format!("Invalid value: {}", name), None))?;
        self.streams.get(stream).ok_or_else(|| {
            CompileError::value(format!("No value bound for {} stream", name), None)
        })
    }

    fn eval_function(&self, handle: &str, argument: &str) -> EvalResult {
        let function = FunctionHandle::from_symbol(handle).ok_or_else(|| {
            CompileError::value(format!("{} function is not available", handle), None)
        })?;
        let argument = parse_number(argument)?;
        self.functions.call(function, argument)
    }
}

fn parse_number(value: &str) -> EvalResult {
    value
        .parse::<f64>()
        .map_err(|_| CompileError::value(format!("Invalid number: {}", value), None))
}

fn eval_divide(left: f64, right: f64) -> EvalResult {
    if right == 0.0 {
        return Err(CompileError::math("Division by zero", None));
    }
    let quotient = left / right;
    if !quotient.is_finite() && left.is_finite() && right.is_finite() {
        return Err(CompileError::math(
            "Division produced a non-finite result",
            None,
        ));
    }
    Ok(quotient)
}

/// Compiles a formula against `settings` and evaluates it.
/// An empty formula has no value and yields `None`.
pub fn evaluate_formula(
    formula: &str,
    settings: &FormulaSettings,
    streams: &StreamValues,
    functions: &dyn FunctionEvaluator,
) -> FormulaResult<Option<f64>> {
    log_enter!("EVAL", "evaluate_formula", "formula={:?}", formula);

    let node = match compile(formula, settings)? {
        Some(node) => node,
        None => {
            log_exit!("EVAL", "evaluate_formula", "empty");
            return Ok(None);
        }
    };

    let result = Evaluator::new(streams, functions).evaluate(&node);
    match &result {
        Ok(value) => log_exit!("EVAL", "evaluate_formula", "result={}", value),
        Err(e) => log_exit!("EVAL", "evaluate_formula", "error={}", e),
    }
    Ok(Some(result?))
}
