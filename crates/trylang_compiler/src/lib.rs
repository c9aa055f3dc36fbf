//! trylang_compiler: Pipeline orchestration.
//!
//! Takes a syntax tree and options, binds and lowers it once, and
//! evaluates the lowered program against caller-owned variable stores.

use thiserror::Error;
use trylang_binder::{Binder, BoundBlockStatement, BoundProgram};
use trylang_core::value::Value;
use trylang_diagnostics::DiagnosticCollection;
use trylang_evaluator::{RuntimeError, VariableStore};
use trylang_options::CompilerOptions;
use trylang_syntax::SyntaxTree;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    /// Binding reported errors; the program was not run.
    #[error("binding produced {} error(s)", .0.error_count())]
    Binding(DiagnosticCollection),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// A bound and lowered program.
pub struct Compilation {
    tree: SyntaxTree,
    options: CompilerOptions,
    diagnostics: DiagnosticCollection,
    /// The lowered program. Built even when binding failed so it can be
    /// inspected, but never evaluated in that case.
    program: BoundBlockStatement,
}

impl Compilation {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(tree: SyntaxTree, options: CompilerOptions) -> Self {
        let BoundProgram {
            statement,
            diagnostics,
        } = Binder::bind_program(&tree);
        let program = trylang_lowerer::lower_program(statement);
        tracing::debug!(
            errors = diagnostics.error_count(),
            statements = program.statements.len(),
            "compilation ready"
        );
        Self {
            tree,
            options,
            diagnostics,
            program,
        }
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// The flat, lowered program.
    pub fn program(&self) -> &BoundBlockStatement {
        &self.program
    }

    /// Run the program against `store`. Refused if binding reported errors.
    pub fn evaluate(&self, store: &mut VariableStore) -> Result<Option<Value>, CompilationError> {
        if self.diagnostics.has_errors() {
            return Err(CompilationError::Binding(self.diagnostics.clone()));
        }
        let value = trylang_evaluator::evaluate(&self.program, store, &self.options)?;
        Ok(value)
    }
}
