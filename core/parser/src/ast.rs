//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. The Evaluator then traverses
//! this tree to compute the final result.
//!
//! Every node renders a bracketed debug form through `Display`, e.g.
//! `Oil / 2` renders as `[[Oil]/[2]]`. Tests compare against these strings.

use std::fmt;

/// A parsed formula. Each node owns its children.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    /// Numeric literal, kept as written.
    Number(String),

    Add(Box<Node>, Box<Node>),
    Subtract(Box<Node>, Box<Node>),
    Multiply(Box<Node>, Box<Node>),
    Divide(Box<Node>, Box<Node>),

    /// Unary `+`.
    Plus(Box<Node>),
    /// Unary `-`.
    Minus(Box<Node>),

    /// Stream reference such as `Oil`.
    Stream(String),

    /// Built-in call like `@FPD(123)`. The argument is always a bare number.
    FunctionCall { handle: String, argument: String },
}

impl Node {
    pub fn number(value: impl Into<String>) -> Self {
        Node::Number(value.into())
    }

    pub fn stream(name: impl Into<String>) -> Self {
        Node::Stream(name.into())
    }

    pub fn function_call(handle: impl Into<String>, argument: impl Into<String>) -> Self {
        Node::FunctionCall {
            handle: handle.into(),
            argument: argument.into(),
        }
    }

    pub fn add(left: Node, right: Node) -> Self {
        Node::Add(Box::new(left), Box::new(right))
    }

    pub fn subtract(left: Node, right: Node) -> Self {
        Node::Subtract(Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Node, right: Node) -> Self {
        Node::Multiply(Box::new(left), Box::new(right))
    }

    pub fn divide(left: Node, right: Node) -> Self {
        Node::Divide(Box::new(left), Box::new(right))
    }

    pub fn plus(operand: Node) -> Self {
        Node::Plus(Box::new(operand))
    }

    pub fn minus(operand: Node) -> Self {
        Node::Minus(Box::new(operand))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "[{}]", value),
            Node::Add(left, right) => write!(f, "[{}+{}]", left, right),
            Node::Subtract(left, right) => write!(f, "[{}-{}]", left, right),
            Node::Multiply(left, right) => write!(f, "[{}*{}]", left, right),
            Node::Divide(left, right) => write!(f, "[{}/{}]", left, right),
            Node::Plus(operand) => write!(f, "[+{}]", operand),
            Node::Minus(operand) => write!(f, "[-{}]", operand),
            Node::Stream(name) => write!(f, "[{}]", name),
            Node::FunctionCall { handle, argument } => write!(f, "[{}([{}])]", handle, argument),
        }
    }
}
