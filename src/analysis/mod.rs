//! Export and usage extraction, and the audit that compares them

mod diff;
mod exports;
mod imports;
mod symbols;
mod usages;

pub use diff::{diff, Report};
pub use exports::{collect_exports, is_exported, ExportExtractor};
pub use imports::{default_alias, ImportAliasTable};
pub use symbols::{qualify, SymbolSet};
pub use usages::{collect_usages, UsageExtractor};

use crate::config::Config;
use crate::discovery::{CancelToken, SourceTreeWalker};
use crate::error::AuditError;
use tracing::info;

/// Runs the export pass over the "from" trees and the usage pass over the
/// "to" trees, then compares the two.
pub struct Auditor {
    config: Config,
    cancel: CancelToken,
}

impl Auditor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Stop both passes once `token` is cancelled, e.g. on interrupt
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    fn walker(&self) -> SourceTreeWalker {
        SourceTreeWalker::from_config(&self.config).with_cancel_token(self.cancel.clone())
    }

    /// Run both passes and build the report.
    ///
    /// The passes run concurrently and share only the external cancel
    /// token; if both fail, the export pass error is returned.
    pub fn run(&self) -> Result<Report, AuditError> {
        let config = &self.config;

        let (exports, usages) = rayon::join(
            || {
                ExportExtractor::new(self.walker())
                    .extract_exports(&config.from, &config.exclude_from)
            },
            || {
                UsageExtractor::new(self.walker())
                    .extract_usages(&config.to, &config.exclude_to)
            },
        );
        let exports = exports.map_err(|e| e.in_pass("exports"))?;
        let usages = usages.map_err(|e| e.in_pass("usages"))?;

        let report = diff(&exports, &usages);
        info!(
            "{} exported, {} imported, {} potentially unused",
            report.exported.len(),
            report.imported.len(),
            report.unused_exports.len()
        );
        Ok(report)
    }
}
