//! lumen_compiler: Compilation orchestration.
//!
//! Chains submissions, runs the parse -> bind -> lower -> evaluate
//! pipeline for each, and collects the diagnostics of every phase.

use lumen_binder::bound::BoundBlockStatement;
use lumen_binder::{Binder, BoundGlobalScope};
use lumen_diagnostics::Diagnostic;
use lumen_transformers::Lowerer;
use std::sync::{Arc, OnceLock};

pub use lumen_core::Value;
pub use lumen_evaluator::{EvaluationError, Variables};
pub use lumen_parser::SyntaxTree;

/// The outcome of evaluating a submission.
///
/// `value` is `None` whenever `diagnostics` is non-empty, and also when the
/// program ran but executed no declaration or expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub value: Option<Value>,
}

/// One submission, linked to the submission before it.
///
/// Variables declared by earlier submissions stay in scope, so a REPL keeps
/// a single chain of compilations alive.
#[derive(Debug)]
pub struct Compilation {
    previous: Option<Arc<Compilation>>,
    syntax_tree: SyntaxTree,
    global_scope: OnceLock<Arc<BoundGlobalScope>>,
    program: OnceLock<BoundBlockStatement>,
}

impl Compilation {
    pub fn new(syntax_tree: SyntaxTree) -> Self {
        Self::with_previous(None, syntax_tree)
    }

    fn with_previous(previous: Option<Arc<Compilation>>, syntax_tree: SyntaxTree) -> Self {
        Self {
            previous,
            syntax_tree,
            global_scope: OnceLock::new(),
            program: OnceLock::new(),
        }
    }

    /// Create the compilation for the next submission.
    pub fn continue_with(self: &Arc<Self>, syntax_tree: SyntaxTree) -> Self {
        Self::with_previous(Some(Arc::clone(self)), syntax_tree)
    }

    pub fn previous(&self) -> Option<&Arc<Compilation>> {
        self.previous.as_ref()
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }

    /// The bound form of this submission, computed on first use.
    pub fn global_scope(&self) -> &Arc<BoundGlobalScope> {
        if let Some(scope) = self.global_scope.get() {
            return scope;
        }

        let previous = self.previous.as_ref().map(|p| Arc::clone(p.global_scope()));
        let scope = Arc::new(Binder::bind_global_scope(previous, self.syntax_tree.root()));
        // a racing caller may have published first; its scope wins
        self.global_scope.get_or_init(|| scope)
    }

    /// The flat program the evaluator runs, lowered on first use.
    pub fn lowered_program(&self) -> &BoundBlockStatement {
        self.program
            .get_or_init(|| Lowerer::lower(self.global_scope().statement.clone()))
    }

    /// Evaluate this submission against `variables`.
    ///
    /// Syntax and binding diagnostics are returned in the result and stop the
    /// program from running. Runtime faults are returned as errors.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&self, variables: &mut Variables) -> Result<EvaluationResult, EvaluationError> {
        let global_scope = self.global_scope();
        let diagnostics: Vec<Diagnostic> = self
            .syntax_tree
            .diagnostics()
            .iter()
            .chain(global_scope.diagnostics.iter())
            .cloned()
            .collect();

        if !diagnostics.is_empty() {
            tracing::debug!(count = diagnostics.len(), "submission has diagnostics");
            return Ok(EvaluationResult {
                diagnostics,
                value: None,
            });
        }

        let program = self.lowered_program();
        let value = lumen_evaluator::Evaluator::new(program, variables).evaluate()?;
        tracing::debug!(?value, "evaluated");

        Ok(EvaluationResult {
            diagnostics: Vec::new(),
            value,
        })
    }
}
