//! Type checking and semantic analysis module.
//!
//! This module walks the AST once and records every semantic problem it
//! finds in the diagnostic sink:
//!
//! - Verifying type correctness of expressions and statements
//! - Resolving variable and function references
//! - Checking declarations for redeclaration in the same scope
//! - Checking `return` placement and returned types
//! - Managing scopes through the symbol table
//!
//! The AST is never modified. Inferred types only live for the duration of
//! the walk.

pub mod type_checker;

#[cfg(test)]
mod tests;
