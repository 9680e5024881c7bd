//! Scoped symbol storage for semantic analysis.
//!
//! Scopes live in an arena and refer to their enclosing scope by index.
//! Lookups walk outward from the innermost scope, so inner declarations
//! shadow outer ones.

pub mod symbol_table;
