//! FILENAME: core/engine/src/dependency_extractor.rs
//! PURPOSE: Extracts stream and function references from parsed formulas.
//! CONTEXT: Before evaluating, a caller can walk the tree to learn which
//! stream series it must load and which built-in functions will be called.

use std::collections::BTreeSet;

use formula_parser::{FunctionHandle, Node, StreamInput};

/// Dependencies of a formula, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaDependencies {
    pub streams: BTreeSet<StreamInput>,
    pub functions: BTreeSet<FunctionHandle>,
}

/// Extracts all stream and function references from a tree.
///
/// Names outside the registries are skipped; the token check rejects them
/// before a tree is ever built.
pub fn extract_dependencies(node: &Node) -> FormulaDependencies {
    let mut deps = FormulaDependencies::default();
    extract_recursive(node, &mut deps);
    deps
}

/// Streams a formula reads.
pub fn referenced_streams(node: &Node) -> BTreeSet<StreamInput> {
    extract_dependencies(node).streams
}

/// Functions a formula calls.
pub fn referenced_functions(node: &Node) -> BTreeSet<FunctionHandle> {
    extract_dependencies(node).functions
}

fn extract_recursive(node: &Node, deps: &mut FormulaDependencies) {
    match node {
        Node::Number(_) => {}

        Node::Stream(name) => {
            if let Some(stream) = StreamInput::from_name(name) {
                deps.streams.insert(stream);
            }
        }

        Node::FunctionCall { handle, .. } => {
            if let Some(handle) = FunctionHandle::from_symbol(handle) {
                deps.functions.insert(handle);
            }
        }

        Node::Add(left, right)
        | Node::Subtract(left, right)
        | Node::Multiply(left, right)
        | Node::Divide(left, right) => {
            extract_recursive(left, deps);
            extract_recursive(right, deps);
        }

        Node::Plus(operand) | Node::Minus(operand) => extract_recursive(operand, deps),
    }
}
