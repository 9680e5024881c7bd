use std::fmt::Display;

use tracing::debug;

use super::errors::{Error, ErrorImpl, ErrorKind};
use crate::Position;

/// Collects every error reported while a phase runs.
///
/// Phases never stop on the first problem: they report into the sink and keep
/// going, and the pipeline checks [`Diagnostics::has_errors`] once the phase is
/// over to decide whether the next one may start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn report(&mut self, error: Error) {
        debug!(kind = %error.kind(), position = %error.get_position(), "{}", error.message());
        self.errors.push(error);
    }

    pub fn report_at(&mut self, error_impl: ErrorImpl, position: Position) {
        self.report(Error::new(error_impl, position));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|error| error.kind() == kind).count()
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }

        Ok(())
    }
}
