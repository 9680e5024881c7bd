//! Command line driver.
//!
//! Reads one source file, runs the pipeline and either writes the listing
//! next to the source or prints it.

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use anyhow::{self, Context};
use clap::{crate_version, Arg, Command};
use h45c::{
    display_error,
    pipeline::{compile_source, lex_source, output_path, parse_source, CompileError},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. Phase progress is logged at `info`.
fn default_filter(verbosity: u64) -> &'static str {
    match verbosity {
        0 => "h45c=info",
        1 => "h45c=debug",
        _ => "h45c=trace",
    }
}

fn init_logging(verbosity: u64) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints every diagnostic of a failed phase and the summary line.
fn report_failure(error: &CompileError, source: &str, file: &str) -> anyhow::Result<()> {
    let diagnostics = match error.diagnostics() {
        Some(diagnostics) => diagnostics,
        None => return Err(anyhow::anyhow!("{}", error)),
    };

    for diagnostic in diagnostics.errors() {
        eprintln!("{}", diagnostic);
        display_error(diagnostic, source, file);
        eprintln!();
    }

    eprintln!(
        "Compilation failed with {} error(s)",
        diagnostics.error_count()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Command::new("h45c")
        .version(crate_version!())
        .about("Compiler for the H-45 language")
        .arg(
            Arg::new("source")
                .value_name("SOURCE")
                .required(true)
                .help("Source file to compile"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .help("Write the listing to FILE instead of SOURCE with an .asm extension"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Print the listing instead of writing it"),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .conflicts_with("ast")
                .help("Print the token stream and stop"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the parsed program and stop"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Log more detail than phase progress, may be repeated"),
        )
        .get_matches();

    init_logging(args.occurrences_of("verbose"));

    let source_path = PathBuf::from(args.value_of("source").unwrap_or_default());
    let file_name = source_path.display().to_string();

    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("Failed to read source file: {}", file_name))?;

    if args.is_present("tokens") {
        match lex_source(&source) {
            Ok(tokens) => tokens.iter().for_each(|token| println!("{}", token)),
            Err(error) => {
                report_failure(&error, &source, &file_name)?;
                process::exit(1);
            }
        }
        return Ok(());
    }

    if args.is_present("ast") {
        match parse_source(&source) {
            Ok(program) => print!("{}", program),
            Err(error) => {
                report_failure(&error, &source, &file_name)?;
                process::exit(1);
            }
        }
        return Ok(());
    }

    let listing = match compile_source(&source) {
        Ok(listing) => listing,
        Err(error) => {
            report_failure(&error, &source, &file_name)?;
            process::exit(1);
        }
    };

    if args.is_present("stdout") {
        print!("{}", listing);
        eprintln!("Compilation completed successfully");
        return Ok(());
    }

    let destination = match args.value_of("output") {
        Some(path) => PathBuf::from(path),
        None => output_path(Path::new(&source_path)),
    };

    fs::write(&destination, listing)
        .with_context(|| format!("Failed to write output file: {}", destination.display()))?;

    info!(output = %destination.display(), "listing written");
    println!("Compilation completed successfully");
    println!("Output written to {}", destination.display());

    Ok(())
}
