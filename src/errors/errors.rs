use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The closed taxonomy every diagnostic falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LexicalError,
    SyntaxError,
    SemanticError,
    TypeError,
    UndeclaredVariable,
    RedeclarationError,
    FunctionNotFound,
    /// Reserved: call arity and argument types are never checked.
    ArgumentMismatch,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::LexicalError => "LEXICAL_ERROR",
            ErrorKind::SyntaxError => "SYNTAX_ERROR",
            ErrorKind::SemanticError => "SEMANTIC_ERROR",
            ErrorKind::TypeError => "TYPE_ERROR",
            ErrorKind::UndeclaredVariable => "UNDECLARED_VARIABLE",
            ErrorKind::RedeclarationError => "REDECLARATION_ERROR",
            ErrorKind::FunctionNotFound => "FUNCTION_NOT_FOUND",
            ErrorKind::ArgumentMismatch => "ARGUMENT_MISMATCH",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedParameterType { .. } => "ExpectedParameterType",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::CalleeNotCallable => "CalleeNotCallable",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::NonBooleanCondition { .. } => "NonBooleanCondition",
            ErrorImpl::InvalidOperandTypes { .. } => "InvalidOperandTypes",
            ErrorImpl::InvalidOperandType { .. } => "InvalidOperandType",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::ArgumentMismatch { .. } => "ArgumentMismatch",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { character } => match character {
                '&' => ErrorTip::Suggestion(String::from("logical and is written `&&`")),
                '|' => ErrorTip::Suggestion(String::from("logical or is written `||`")),
                _ => ErrorTip::None,
            },
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add a closing `\"` to the string literal"))
            }
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("{}, found `{}`", expected, found))
            }
            ErrorImpl::ExpectedExpression { found } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", found))
            }
            ErrorImpl::ExpectedParameterType { .. } => ErrorTip::Suggestion(String::from(
                "parameters are written `type name`, e.g. `int count`",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InvalidAssignmentTarget => {
                ErrorTip::Suggestion(String::from("only a variable can be assigned to"))
            }
            ErrorImpl::ReturnOutsideFunction => ErrorTip::None,
            ErrorImpl::CalleeNotCallable => ErrorTip::None,
            ErrorImpl::NotAFunction { name } => {
                ErrorTip::Suggestion(format!("`{}` is a variable, not a function", name))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ReturnTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected return type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::MissingReturnValue { expected } => {
                ErrorTip::Suggestion(format!("return a value of type `{}`", expected))
            }
            ErrorImpl::NonBooleanCondition { .. } => ErrorTip::Suggestion(String::from(
                "conditions must be `bool`, compare the value explicitly",
            )),
            ErrorImpl::InvalidOperandTypes { .. } => ErrorTip::None,
            ErrorImpl::InvalidOperandType { .. } => ErrorTip::None,
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::AlreadyDeclared { name, .. } => {
                ErrorTip::Suggestion(format!("`{}` already declared in this scope", name))
            }
            ErrorImpl::FunctionNotFound { function } => {
                ErrorTip::Suggestion(format!("Function `{}` is never declared", function))
            }
            ErrorImpl::ArgumentMismatch { expected, received, .. } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.is_known() {
            write!(
                f,
                "[{}] Line {}, Column {}: {}",
                self.kind(),
                self.position.line,
                self.position.column,
                self.internal_error
            )
        } else {
            write!(f, "[{}] {}", self.kind(), self.internal_error)
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: char },
    #[error("Unterminated string")]
    UnterminatedString,

    // Syntax
    #[error("{expected}")]
    UnexpectedToken { expected: String, found: String },
    #[error("Expected expression")]
    ExpectedExpression { found: String },
    #[error("Expected parameter type")]
    ExpectedParameterType { found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,

    // Semantic
    #[error("Return statement outside function")]
    ReturnOutsideFunction,
    #[error("Only functions can be called")]
    CalleeNotCallable,
    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    // Types
    #[error("Cannot assign {received} to variable of type {expected}")]
    TypeMatchError { expected: String, received: String },
    #[error("Cannot return {received} from function expecting {expected}")]
    ReturnTypeMatchError { expected: String, received: String },
    #[error("Function must return a value of type {expected}")]
    MissingReturnValue { expected: String },
    #[error("{construct} condition must be boolean, got {found}")]
    NonBooleanCondition { construct: String, found: String },
    #[error("Invalid operand types for {operator}: {left} and {right}")]
    InvalidOperandTypes {
        operator: String,
        left: String,
        right: String,
    },
    #[error("Invalid operand type for {operator}: {operand}")]
    InvalidOperandType { operator: String, operand: String },

    // Symbols
    #[error("Undefined variable '{variable}'")]
    VariableNotDeclared { variable: String },
    #[error("{what} '{name}' is already declared")]
    AlreadyDeclared { what: String, name: String },
    #[error("Undefined function '{function}'")]
    FunctionNotFound { function: String },
    #[error("function '{function}' expects {expected} arguments, received {received}")]
    ArgumentMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnexpectedCharacter { .. } | ErrorImpl::UnterminatedString => {
                ErrorKind::LexicalError
            }
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::ExpectedParameterType { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidAssignmentTarget => ErrorKind::SyntaxError,
            ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::CalleeNotCallable
            | ErrorImpl::NotAFunction { .. } => ErrorKind::SemanticError,
            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ReturnTypeMatchError { .. }
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::NonBooleanCondition { .. }
            | ErrorImpl::InvalidOperandTypes { .. }
            | ErrorImpl::InvalidOperandType { .. } => ErrorKind::TypeError,
            ErrorImpl::VariableNotDeclared { .. } => ErrorKind::UndeclaredVariable,
            ErrorImpl::AlreadyDeclared { .. } => ErrorKind::RedeclarationError,
            ErrorImpl::FunctionNotFound { .. } => ErrorKind::FunctionNotFound,
            ErrorImpl::ArgumentMismatch { .. } => ErrorKind::ArgumentMismatch,
        }
    }
}
