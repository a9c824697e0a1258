//! Signature document model and parser.
//!
//! A signature document describes the type surface of classes and modules:
//! methods with their overloads, attributes, constants, instance variables
//! and mixins. [`parse`] turns the text into [`Declaration`]s that the
//! comparison engine can diff structurally.
//!
//! # Example
//!
//! ```
//! use sigcompare::signature::parse;
//!
//! let decls = parse("class User\n  def valid?: () -> bool\nend\n").unwrap();
//! assert_eq!(decls[0].name, "User");
//! assert!(decls[0].method("valid?").is_some());
//! ```

pub mod declaration;
pub mod lexer;
pub mod parser;
pub mod types;

pub use declaration::{
    Attribute, AttributeKind, Constant, Declaration, DeclarationKind, Include, InstanceVariable,
    Member, MethodDefinition, MethodKind, MixinKind, Overload, Visibility,
};
pub use parser::parse;
pub use types::{Block, Param, ParameterSet, ProcType, RecordField, RecordKey, ReturnType, TypeExpr};

use thiserror::Error;

/// Syntax error in a signature document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}
