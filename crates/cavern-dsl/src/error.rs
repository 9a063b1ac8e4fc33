use std::path::PathBuf;

use thiserror::Error;

use crate::ast::Span;
use crate::diagnostics::Diagnostic;

/// Why a script did not compile. No adventure is produced in any case.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The first lexer or parser failure.
    #[error("syntax error at line {line}: {message}")]
    Syntax {
        /// 1-based line of the failure.
        line: usize,
        /// Byte range of the offending input.
        span: Span,
        /// What went wrong.
        message: String,
    },

    /// Every semantic problem found in the script.
    #[error("{}", summarize(.diagnostics))]
    Semantic {
        /// One entry per problem, in source order.
        diagnostics: Vec<Diagnostic>,
    },

    /// The script file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl CompileError {
    /// Build a syntax error, computing the line from the span.
    pub fn syntax(source: &str, span: Span, message: impl Into<String>) -> Self {
        CompileError::Syntax {
            line: line_of(source, span.start),
            span,
            message: message.into(),
        }
    }

    /// The error as renderable diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileError::Syntax { span, message, .. } => {
                vec![Diagnostic::error(span.clone(), message.clone())]
            }
            CompileError::Semantic { diagnostics } => diagnostics.clone(),
            CompileError::Io { .. } => Vec::new(),
        }
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "semantic error".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}

/// 1-based line number of a byte offset.
pub fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
