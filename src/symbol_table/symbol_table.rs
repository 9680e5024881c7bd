use std::{collections::HashMap, fmt::Display};

use tracing::debug;

use crate::{
    ast::types::TypeTag,
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolKind::Variable => "Variable",
            SymbolKind::Parameter => "Parameter",
            SymbolKind::Function => "Function",
        };

        write!(f, "{}", name)
    }
}

/// A declared name. For functions `type_tag` is the return type.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub type_tag: TypeTag,
    pub kind: SymbolKind,
    pub scope_level: usize,
}

#[derive(Debug)]
pub struct Scope {
    pub symbol_lookup: HashMap<String, Symbol>,
    pub parent: Option<usize>,
    pub level: usize,
}

impl Scope {
    pub fn new(parent: Option<usize>, level: usize) -> Self {
        Scope {
            symbol_lookup: HashMap::new(),
            parent,
            level,
        }
    }

    pub fn get_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbol_lookup.get(name)
    }
}

/// Arena of scopes, innermost last.
///
/// Scopes are opened and closed in strict stack order, so the current scope
/// is always the last one in the arena and closing it drops its symbols.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    current: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    /// A table holding only the global scope, at level 0.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope::new(None, 0)],
            current: 0,
        }
    }

    pub fn current_level(&self) -> usize {
        self.scopes[self.current].level
    }

    pub fn push_scope(&mut self) {
        let level = self.current_level() + 1;
        self.scopes.push(Scope::new(Some(self.current), level));
        self.current = self.scopes.len() - 1;

        debug!(level, "entered scope");
    }

    /// Closes the current scope. The global scope is never closed.
    pub fn pop_scope(&mut self) {
        let Some(parent) = self.scopes[self.current].parent else {
            return;
        };

        let level = self.current_level();
        self.scopes.truncate(self.current);
        self.current = parent;

        debug!(level, "left scope");
    }

    /// Declares `name` in the current scope.
    ///
    /// Fails with a redeclaration error located at `position` when the current
    /// scope already holds the name; enclosing scopes are not consulted.
    pub fn declare(
        &mut self,
        name: &str,
        type_tag: TypeTag,
        kind: SymbolKind,
        position: Position,
    ) -> Result<(), Error> {
        if self.is_defined_in_current_scope(name) {
            return Err(Error::new(
                ErrorImpl::AlreadyDeclared {
                    what: kind.to_string(),
                    name: String::from(name),
                },
                position,
            ));
        }

        let scope_level = self.current_level();
        self.scopes[self.current].symbol_lookup.insert(
            String::from(name),
            Symbol {
                name: String::from(name),
                type_tag,
                kind,
                scope_level,
            },
        );

        Ok(())
    }

    /// Finds the innermost visible symbol called `name`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut index = Some(self.current);

        while let Some(scope_index) = index {
            let scope = &self.scopes[scope_index];
            if let Some(symbol) = scope.get_symbol(name) {
                return Some(symbol);
            }
            index = scope.parent;
        }

        None
    }

    pub fn is_defined_in_current_scope(&self, name: &str) -> bool {
        self.scopes[self.current].get_symbol(name).is_some()
    }
}
