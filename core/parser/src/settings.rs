//! FILENAME: core/parser/src/settings.rs
//! PURPOSE: The stream and function vocabulary a formula may use.
//! CONTEXT: The caller passes the currently selected stream inputs on every
//! validation call. From those, the allowed streams and the enabled function
//! handles are derived. Nothing here is cached between calls.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named input series a formula can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamInput {
    Oil,
    Gas,
    Water,
}

impl StreamInput {
    pub const ALL: [StreamInput; 3] = [StreamInput::Oil, StreamInput::Gas, StreamInput::Water];

    /// The spelling used inside formulas.
    pub fn name(self) -> &'static str {
        match self {
            StreamInput::Oil => "Oil",
            StreamInput::Gas => "Gas",
            StreamInput::Water => "Water",
        }
    }

    /// Looks up a stream by its formula spelling. Case-sensitive.
    pub fn from_name(name: &str) -> Option<StreamInput> {
        StreamInput::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl fmt::Display for StreamInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Built-in functions callable as `@NAME(number)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FunctionHandle {
    Fpd,
}

impl FunctionHandle {
    pub const ALL: [FunctionHandle; 1] = [FunctionHandle::Fpd];

    /// Registry name without the leading `@`.
    pub fn name(self) -> &'static str {
        match self {
            FunctionHandle::Fpd => "FPD",
        }
    }

    /// The handle as written in a formula, e.g. `@FPD`.
    pub fn symbol(self) -> String {
        format!("@{}", self.name())
    }

    /// Looks up a handle by registry name (no `@`). Case-sensitive.
    pub fn from_name(name: &str) -> Option<FunctionHandle> {
        FunctionHandle::ALL.into_iter().find(|h| h.name() == name)
    }

    /// Looks up a handle by its formula symbol (with `@`).
    pub fn from_symbol(symbol: &str) -> Option<FunctionHandle> {
        symbol.strip_prefix('@').and_then(FunctionHandle::from_name)
    }
}

impl fmt::Display for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}

/// Functions are only offered once at least one stream is selected.
pub fn available_functions(inputs: &[StreamInput]) -> BTreeSet<FunctionHandle> {
    if inputs.is_empty() {
        return BTreeSet::new();
    }
    FunctionHandle::ALL.into_iter().collect()
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-call context a formula is validated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSettings {
    #[serde(default)]
    pub inputs: Vec<StreamInput>,
}

impl FormulaSettings {
    pub fn new(inputs: impl IntoIterator<Item = StreamInput>) -> Self {
        FormulaSettings {
            inputs: inputs.into_iter().collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn allowed_streams(&self) -> BTreeSet<StreamInput> {
        self.inputs.iter().copied().collect()
    }

    pub fn allowed_functions(&self) -> BTreeSet<FunctionHandle> {
        available_functions(&self.inputs)
    }
}
