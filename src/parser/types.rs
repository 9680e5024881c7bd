use crate::{
    ast::types::TypeTag,
    errors::errors::{Error, ErrorImpl},
};

use super::parser::Parser;

/// Consumes a type keyword and returns the type it names.
///
/// `error` builds the diagnostic reported when the current token is not a
/// type keyword; the offending token is left in place.
pub fn parse_type(parser: &mut Parser, error: fn(String) -> ErrorImpl) -> Result<TypeTag, Error> {
    let token = parser.current_token();

    match token.kind.as_type_tag() {
        Some(type_tag) => {
            parser.advance();
            Ok(type_tag)
        }
        None => Err(Error::new(error(token.describe()), token.position)),
    }
}

pub fn expected_parameter_type(found: String) -> ErrorImpl {
    ErrorImpl::ExpectedParameterType { found }
}

pub fn expected_declaration_type(found: String) -> ErrorImpl {
    ErrorImpl::UnexpectedToken {
        expected: String::from("Expected type"),
        found,
    }
}
