//! Go source parsing backed by tree-sitter

mod common;
mod go;

pub use go::{GoFile, GoParser, ImportSpec, SyntaxItem, SyntaxVisitor};
