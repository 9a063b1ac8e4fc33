//! Script compiler for Cavern adventures.
//!
//! Source text goes through [`lexer::lex`] and [`parser::parse`] into a
//! [`Script`](ast::Script), then [`compiler::compile`] resolves every room and
//! item reference and builds an [`Adventure`]. Compilation is all-or-nothing:
//! the first syntax error stops everything, and semantic errors are collected
//! and reported together, but either way no adventure comes out.

/// Abstract syntax tree for scripts.
pub mod ast;
/// From syntax tree to adventure.
pub mod compiler;
/// Source-located diagnostics and their terminal rendering.
pub mod diagnostics;
/// Compile error type.
pub mod error;
/// Tokenizer built on logos.
pub mod lexer;
/// Grammar built on chumsky.
pub mod parser;
/// Room and item name index.
pub mod resolver;

use std::path::Path;

use cavern_engine::Adventure;

pub use diagnostics::{Diagnostic, render_diagnostics};
pub use error::CompileError;

/// Compile script source into an adventure.
pub fn compile_source(source: &str) -> Result<Adventure, CompileError> {
    let (tokens, lex_errors) = lexer::lex(source);
    if let Some(err) = lex_errors.into_iter().next() {
        return Err(CompileError::syntax(source, err.span, err.message));
    }

    let script = parser::parse(&tokens).map_err(|errors| match errors.into_iter().next() {
        Some(err) => CompileError::syntax(source, err.span, err.message),
        None => CompileError::syntax(source, 0..0, "invalid script"),
    })?;

    compiler::compile(&script)
}

/// Read and compile a script file.
pub fn compile_file(path: &Path) -> Result<Adventure, CompileError> {
    let source = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    compile_source(&source)
}
