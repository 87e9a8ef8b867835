//! Top-level statement tree for JavaScript modules
//!
//! The tree is deliberately shallow: a [`Program`] is a directive prologue
//! plus a list of top-level statements, which is all a module-level transform
//! needs to read or rewrite.

pub mod ast;
pub mod error;
pub mod hoist;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::{BlockHoist, Directive, Program, Span, Statement, StatementKind};
pub use error::{ParseError, ParseResult};
pub use hoist::hoist;
pub use parser::{parse, parse_statement};
pub use serializer::{quote, serialize, Serializer};
