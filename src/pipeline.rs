//! The compilation pipeline.
//!
//! Source text runs through four phases, each reporting into its own
//! [`Diagnostics`]. A phase only starts when every earlier phase finished
//! without errors, so the errors a caller sees always come from one phase.

use std::{
    fmt::{self, Display},
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::info;

use crate::{
    ast::ast::Program,
    compiler::compiler::compile,
    errors::diagnostics::Diagnostics,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

/// Extension given to generated listings.
pub const OUTPUT_EXTENSION: &str = "asm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexing,
    Parsing,
    Analysis,
    Generation,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lexing => "lexical analysis",
            Phase::Parsing => "parsing",
            Phase::Analysis => "semantic analysis",
            Phase::Generation => "code generation",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{phase} failed with {} error(s)", .diagnostics.error_count())]
    Failed {
        phase: Phase,
        diagnostics: Diagnostics,
    },
    #[error("could not read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            CompileError::Failed { diagnostics, .. } => Some(diagnostics),
            CompileError::Io { .. } => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            CompileError::Failed { phase, .. } => Some(*phase),
            CompileError::Io { .. } => None,
        }
    }
}

fn gate(phase: Phase, diagnostics: Diagnostics) -> Result<(), CompileError> {
    if diagnostics.has_errors() {
        return Err(CompileError::Failed { phase, diagnostics });
    }

    Ok(())
}

/// Runs the lexer alone.
pub fn lex_source(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    gate(Phase::Lexing, diagnostics)?;

    info!(tokens = tokens.len(), "lexical analysis completed");
    Ok(tokens)
}

/// Runs the lexer and the parser.
pub fn parse_source(source: &str) -> Result<Program, CompileError> {
    let tokens = lex_source(source)?;

    let mut diagnostics = Diagnostics::new();
    let program = parse(tokens, &mut diagnostics);
    gate(Phase::Parsing, diagnostics)?;

    info!(statements = program.statements.len(), "parsing completed");
    Ok(program)
}

/// Runs every phase and returns the generated listing.
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    let program = parse_source(source)?;

    let mut diagnostics = Diagnostics::new();
    type_check(&program, &mut diagnostics);
    gate(Phase::Analysis, diagnostics)?;
    info!("semantic analysis completed");

    let listing = compile(&program);
    info!(lines = listing.lines().count(), "code generation completed");

    Ok(listing)
}

pub fn compile_file(path: &Path) -> Result<String, CompileError> {
    let source = fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    compile_source(&source)
}

/// `program.h45` becomes `program.asm` next to it.
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}
