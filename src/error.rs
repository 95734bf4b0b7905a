//! Error types for the export audit
//!
//! Every failure inside a pass is fatal to that pass. Files that cannot be
//! attributed to a Go module are not errors; the resolver reports them as
//! `None` and the export pass skips them.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while discovering, parsing or auditing source files
#[derive(Error, Diagnostic, Debug)]
pub enum AuditError {
    /// Traversal could not descend into or read something beneath a root
    #[error("could not walk {}", root.display())]
    #[diagnostic(code(refaudit::walk))]
    Walk {
        root: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A discovered source file could not be read
    #[error("could not read {}", path.display())]
    #[diagnostic(code(refaudit::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file contains syntax errors
    #[error("could not parse {}: syntax error at {line}:{column}", path.display())]
    #[diagnostic(
        code(refaudit::parse),
        help("fix the file or exclude its directory with --exclude-from / --exclude-to")
    )]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    /// The Go grammar could not be loaded into the parser
    #[error("failed to load Go grammar: {0}")]
    #[diagnostic(code(refaudit::grammar))]
    Grammar(#[from] tree_sitter::LanguageError),

    /// The pipeline was cancelled before it finished
    #[error("operation cancelled")]
    #[diagnostic(code(refaudit::cancelled))]
    Cancelled,

    /// A configuration file could not be loaded
    #[error("invalid config file {}: {message}", path.display())]
    #[diagnostic(code(refaudit::config))]
    Config { path: PathBuf, message: String },

    /// One of the extraction passes failed
    #[error("failed to find {pass}")]
    #[diagnostic(code(refaudit::pass))]
    Pass {
        pass: &'static str,
        #[source]
        source: Box<AuditError>,
    },
}

impl AuditError {
    /// Wrap an error with the name of the pass it aborted
    pub fn in_pass(self, pass: &'static str) -> Self {
        AuditError::Pass {
            pass,
            source: Box::new(self),
        }
    }

    /// Unwrap pass context to reach the underlying failure
    pub fn root_cause(&self) -> &AuditError {
        match self {
            AuditError::Pass { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
