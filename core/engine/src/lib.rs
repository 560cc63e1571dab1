//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the formula engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod bindings;
pub mod dependency_extractor;
pub mod evaluator;

// Re-export commonly used types at the crate root
pub use bindings::{FunctionEvaluator, NoFunctions, StreamValues};
pub use dependency_extractor::{
    extract_dependencies, referenced_functions, referenced_streams, FormulaDependencies,
};
pub use evaluator::{evaluate_formula, EvalResult, Evaluator};
