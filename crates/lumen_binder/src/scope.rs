//! Scope management for the binder.

use crate::bound::BoundStatement;
use crate::symbol::{TypeSymbol, VariableSymbol};
use indexmap::IndexMap;
use lumen_diagnostics::Diagnostic;
use std::sync::Arc;
use thiserror::Error;

/// Returned when a name is declared twice in the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variable '{name}' is already declared in this scope")]
pub struct AlreadyDeclared {
    pub name: String,
}

/// A scope in the binding phase. Scopes form a chain from inner to outer.
#[derive(Debug, Default)]
pub struct BoundScope {
    /// Variables declared in this scope, in declaration order.
    variables: IndexMap<String, VariableSymbol>,
    /// The parent scope (None for the outermost scope).
    parent: Option<Box<BoundScope>>,
}

impl BoundScope {
    pub fn new(parent: Option<Box<BoundScope>>) -> Self {
        Self {
            variables: IndexMap::new(),
            parent,
        }
    }

    pub fn parent(&self) -> Option<&BoundScope> {
        self.parent.as_deref()
    }

    /// Detach and return the parent scope, dropping this scope's bindings.
    pub fn into_parent(self) -> Option<Box<BoundScope>> {
        self.parent
    }

    /// Declare a new variable in this scope.
    ///
    /// Fails when `name` is already declared in this scope. Outer scopes are
    /// not consulted, so shadowing is allowed.
    pub fn declare(
        &mut self,
        name: &str,
        ty: TypeSymbol,
        is_read_only: bool,
    ) -> Result<VariableSymbol, AlreadyDeclared> {
        let variable = VariableSymbol::new(name, ty, is_read_only);
        self.declare_symbol(variable.clone())?;
        Ok(variable)
    }

    /// Declare an existing symbol in this scope.
    pub fn declare_symbol(&mut self, variable: VariableSymbol) -> Result<(), AlreadyDeclared> {
        if self.variables.contains_key(variable.name()) {
            return Err(AlreadyDeclared {
                name: variable.name().to_string(),
            });
        }
        self.variables.insert(variable.name().to_string(), variable);
        Ok(())
    }

    /// Resolve a name in this scope, then outward through the parents.
    pub fn lookup(&self, name: &str) -> Option<&VariableSymbol> {
        let mut scope = Some(self);
        while let Some(s) = scope {
            if let Some(variable) = s.variables.get(name) {
                return Some(variable);
            }
            scope = s.parent.as_deref();
        }
        None
    }

    /// Variables declared directly in this scope, in declaration order.
    pub fn declared_variables(&self) -> Vec<VariableSymbol> {
        self.variables.values().cloned().collect()
    }
}

/// The result of binding one submission.
///
/// `previous` links to the global scope of the submission before this one,
/// whose variables stay visible as outer bindings.
#[derive(Debug)]
pub struct BoundGlobalScope {
    pub previous: Option<Arc<BoundGlobalScope>>,
    pub diagnostics: Vec<Diagnostic>,
    pub variables: Vec<VariableSymbol>,
    pub statement: BoundStatement,
}
