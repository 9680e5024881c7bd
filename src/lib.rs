#![allow(clippy::module_inception)]

use std::fmt::{self, Display};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod pipeline;
pub mod symbol_table;
pub mod type_checker;

extern crate regex;

/// A 1-based line/column pair. `(-1, -1)` marks a position that is not known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: i32,
    pub column: i32,
}

impl Position {
    pub fn new(line: i32, column: i32) -> Self {
        Position { line, column }
    }

    pub fn unknown() -> Self {
        Position {
            line: -1,
            column: -1,
        }
    }

    pub fn is_known(&self) -> bool {
        self.line >= 0 && self.column >= 0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the text of a 1-based line of `source`, without its line terminator.
pub fn get_line_at_position(source: &str, position: &Position) -> Option<String> {
    if !position.is_known() || position.line == 0 {
        return None;
    }

    source
        .lines()
        .nth((position.line - 1) as usize)
        .map(|line| line.trim_end_matches('\r').to_string())
}

/// Prints a diagnostic with the offending source line underneath it.
pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", render_error(error, source, file));
}

pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: TypeMismatch (cannot assign string to variable of type int)
        -> main.h45:2:9
          |
        2 | int x = "hello";
          | ----^
    */

    let mut rendered = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }

    let line_text = match get_line_at_position(source, position) {
        Some(line_text) => line_text,
        None => {
            rendered.push_str(&format!("-> {}\n", file));
            return rendered;
        }
    };

    rendered.push_str(&format!("-> {}:{}\n", file, position));

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = (position.column.max(1) as usize).saturating_sub(removed_whitespace);
    rendered.push_str(&format!("{:>padding$} {:->column$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
