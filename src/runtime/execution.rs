//! Execution of fetched fractal code
//!
//! Fetched code is JavaScript. The loader hands it to an `ExecutionContext`
//! together with the host module table, which plays the role of the
//! `require` bindings, and gets module exports back.
//!
//! `LinkedExecutor` does not evaluate JavaScript. It resolves the code
//! against components already linked into the module table: first by
//! fractal id, then by the name in the code's `registerModule('<name>', ...)`
//! glue. Hosts that embed a script engine implement the trait themselves.

use thiserror::Error;

use crate::domain::services::fractal_analyzer;
use crate::domain::services::significant_tokens;

use super::component::ModuleExports;
use super::module_table::ModuleTable;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("fractal code is empty")]
    EmptyCode,

    #[error("no linked module for fractal '{id}'")]
    Unlinked { id: String },

    #[error("module for '{id}' has no default or sole export")]
    NoEntryComponent { id: String },

    #[error("execution failed: {0}")]
    Failed(String),
}

pub trait ExecutionContext: Send + Sync {
    /// Run `code` for fractal `id` with `modules` as its bindings.
    fn execute(
        &self,
        id: &str,
        code: &str,
        modules: &ModuleTable,
    ) -> Result<ModuleExports, ExecutionError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedExecutor;

impl LinkedExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionContext for LinkedExecutor {
    fn execute(
        &self,
        id: &str,
        code: &str,
        modules: &ModuleTable,
    ) -> Result<ModuleExports, ExecutionError> {
        if code.trim().is_empty() {
            return Err(ExecutionError::EmptyCode);
        }
        if let Some(exports) = modules.get(id) {
            return Ok(exports);
        }
        registered_names(code)
            .into_iter()
            .find_map(|name| modules.get(&name))
            .ok_or_else(|| ExecutionError::Unlinked { id: id.to_string() })
    }
}

/// Names passed as the first argument of `registerModule(...)` calls.
pub fn registered_names(code: &str) -> Vec<String> {
    fractal_analyzer::registered_names(code, &significant_tokens(code))
}
