//! refaudit - find potentially unused exports in Go code across repositories
//!
//! Given "from" trees holding library code and "to" trees holding the code
//! that consumes it, refaudit lists every exported top-level symbol of the
//! library and the ones no consumer refers to through a qualified selector
//! such as `pkg.Name`. The analysis is syntactic, so there will be false
//! positives.
//!
//! # Architecture
//!
//! The audit pipeline consists of:
//! 1. **File Discovery** - Walk the roots for `.go` files, skipping `vendor`
//!    and excluded directories
//! 2. **Parsing** - Parse each file with tree-sitter
//! 3. **Module Resolution** - Qualify exports with the import path derived
//!    from the nearest `go.mod`
//! 4. **Extraction** - Collect exported declarations and import-qualified
//!    selectors
//! 5. **Diffing** - Subtract the used set from the exported set
//! 6. **Reporting** - Output results as JSON or for the terminal

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod module;
pub mod parser;
pub mod report;

pub use analysis::{diff, Auditor, ExportExtractor, ImportAliasTable, Report, SymbolSet, UsageExtractor};
pub use config::{expand_path, Config};
pub use discovery::{CancelToken, SourceTreeWalker};
pub use error::AuditError;
pub use module::{GoModResolver, ModuleResolver};
pub use report::{ReportFormat, Reporter};
