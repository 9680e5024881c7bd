//! Code generation module for the compiler.
//!
//! This module lowers a checked `Program` into a textual stack-machine
//! listing. It handles:
//!
//! - Compilation of expressions into accumulator code
//! - Compilation of statements, with labels for control flow
//! - Function prologues and epilogues
//! - The `_start` entry point
//!
//! The listing is for reading, not for assembling.

pub mod compiler;
pub mod expr;
pub mod instructions;
pub mod stmt;

#[cfg(test)]
mod tests;
