//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for formula-engine integration tests.

#![allow(dead_code)]

use formula_engine::{FunctionEvaluator, StreamValues};
use formula_parser::{CompileError, FormulaSettings, FunctionHandle, StreamInput};

/// Stand-in for the forecast runtime: `@FPD(n)` returns a fixed rate
/// declining by `decline` per day over `n` days.
pub struct DeclineFixture {
    pub initial_rate: f64,
    pub decline: f64,
}

impl FunctionEvaluator for DeclineFixture {
    fn call(&self, handle: FunctionHandle, argument: f64) -> Result<f64, CompileError> {
        match handle {
            FunctionHandle::Fpd => Ok(self.initial_rate * (1.0 - self.decline).powf(argument)),
        }
    }
}

/// Test harness holding the caller-side context of one evaluation.
pub struct TestHarness {
    pub settings: FormulaSettings,
    pub streams: StreamValues,
    pub functions: DeclineFixture,
}

impl TestHarness {
    /// All streams selected and bound: Oil=100, Gas=40, Water=10.
    pub fn new() -> Self {
        TestHarness {
            settings: FormulaSettings::new(StreamInput::ALL),
            streams: StreamValues::new()
                .with(StreamInput::Oil, 100.0)
                .with(StreamInput::Gas, 40.0)
                .with(StreamInput::Water, 10.0),
            functions: DeclineFixture {
                initial_rate: 1000.0,
                decline: 0.5,
            },
        }
    }

    /// Same bindings, but only the given streams selected.
    pub fn with_inputs(inputs: &[StreamInput]) -> Self {
        let mut harness = Self::new();
        harness.settings = FormulaSettings::new(inputs.iter().copied());
        harness
    }

    pub fn evaluate(&self, formula: &str) -> formula_parser::FormulaResult<Option<f64>> {
        formula_engine::evaluate_formula(formula, &self.settings, &self.streams, &self.functions)
    }
}
