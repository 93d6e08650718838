//! Symbol definitions.

use lumen_core::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The static type of a bound expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Int,
    Bool,
}

impl TypeSymbol {
    pub fn name(self) -> &'static str {
        match self {
            TypeSymbol::Int => "Int",
            TypeSymbol::Bool => "Bool",
        }
    }

    /// The type of a runtime value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Int(_) => TypeSymbol::Int,
            Value::Bool(_) => TypeSymbol::Bool,
        }
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
struct VariableData {
    name: String,
    ty: TypeSymbol,
    is_read_only: bool,
}

/// A declared variable.
///
/// Identity is the declaration: two symbols are equal only when they are
/// clones of the one created for the same declaration, even if their names
/// and types match.
#[derive(Clone)]
pub struct VariableSymbol(Arc<VariableData>);

impl VariableSymbol {
    pub fn new(name: impl Into<String>, ty: TypeSymbol, is_read_only: bool) -> Self {
        Self(Arc::new(VariableData {
            name: name.into(),
            ty,
            is_read_only,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn ty(&self) -> TypeSymbol {
        self.0.ty
    }

    pub fn is_read_only(&self) -> bool {
        self.0.is_read_only
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const ()).hash(state);
    }
}

impl fmt::Debug for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_read_only() { "let" } else { "var" };
        write!(f, "{} {}: {}", keyword, self.name(), self.ty())
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A jump target created during lowering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelSymbol {
    name: String,
}

impl LabelSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for LabelSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
