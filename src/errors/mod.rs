//! Error types and error handling for the compiler.
//!
//! This module defines the diagnostics produced throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - The closed set of error kinds every diagnostic belongs to
//! - The diagnostic sink each phase reports into
//! - Helpful error messages and suggestions

pub mod diagnostics;
pub mod errors;
