//! trylang_options: Compiler options.
//!
//! Options are read from a JSON document with camelCase keys, e.g.
//! `{ "checkedArithmetic": false }`. Every field is optional; accessors
//! apply the defaults.

use serde::{Deserialize, Serialize};

/// Options controlling the binder/lowerer/evaluator pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilerOptions {
    /// Whether integer overflow is a runtime fault (default) or wraps.
    /// Division and modulo by zero always fault.
    pub checked_arithmetic: Option<bool>,
}

impl CompilerOptions {
    pub fn checked_arithmetic(&self) -> bool {
        self.checked_arithmetic.unwrap_or(true)
    }

    pub fn with_checked_arithmetic(mut self, checked: bool) -> Self {
        self.checked_arithmetic = Some(checked);
        self
    }
}

/// Parse compiler options from a JSON string.
pub fn parse_options(content: &str) -> Result<CompilerOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse compiler options from a JSON file.
pub fn parse_options_file(path: &str) -> Result<CompilerOptions, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let options = parse_options(&content)?;
    Ok(options)
}
