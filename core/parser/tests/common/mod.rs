//! FILENAME: tests/common/mod.rs
//! Shared fixtures for formula-parser integration tests.

#![allow(dead_code)]

use formula_parser::{CompileError, FormulaVerdict, StreamInput};
use proptest::prelude::*;

pub const ALL_INPUTS: [StreamInput; 3] = StreamInput::ALL;

/// Asserts the verdict is a rich error of the given kind and message.
pub fn assert_rejected(verdict: &FormulaVerdict, kind: &str, message: &str) {
    match verdict {
        FormulaVerdict::Error(error) => {
            assert_eq!(error.kind_name(), kind, "unexpected kind for {:?}", error);
            assert_eq!(error.message(), message);
        }
        other => panic!("Expected {} \"{}\", got {:?}", kind, message, other),
    }
}

/// Span of a rich error verdict.
pub fn span_of(verdict: &FormulaVerdict) -> (usize, usize) {
    let data = match verdict {
        FormulaVerdict::Error(CompileError::Syntax { data, .. })
        | FormulaVerdict::Error(CompileError::Value { data, .. })
        | FormulaVerdict::Error(CompileError::Math { data, .. }) => data.as_ref(),
        _ => None,
    };
    let data = data.expect("verdict has no span");
    (data.start_index, data.end_index)
}

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..1000).prop_map(|(whole, frac)| format!("{}.{}", whole, frac)),
        prop::sample::select(vec!["Oil", "Gas", "Water"]).prop_map(String::from),
        (0u32..1000).prop_map(|n| format!("@FPD({})", n)),
    ]
}

/// Formulas that are valid when every stream is selected.
/// Signs are always wrapped in parentheses so they never follow an operator.
pub fn valid_formula() -> impl Strategy<Value = String> {
    operand().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/"]),
                inner.clone()
            )
                .prop_map(|(left, op, right)| format!("{} {} {}", left, op, right)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.prop_map(|e| format!("(-{})", e)),
        ]
    })
}
