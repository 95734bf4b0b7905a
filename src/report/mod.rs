mod json;
mod terminal;

pub use json::{JsonReport, JsonReporter};
pub use terminal::TerminalReporter;

use crate::analysis::Report;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Terminal,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "terminal" | "text" => Ok(ReportFormat::Terminal),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Writes an audit report to stdout or a file
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self { format, output_path }
    }

    pub fn render(&self, report: &Report) -> Result<String> {
        match self.format {
            ReportFormat::Json => JsonReporter::new().render(report).into_diagnostic(),
            ReportFormat::Terminal => Ok(TerminalReporter::new().render(report)),
        }
    }

    pub fn report(&self, report: &Report) -> Result<()> {
        let rendered = self.render(report)?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, format!("{}\n", rendered.trim_end()))
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to: {}", path.display());
        } else {
            println!("{}", rendered.trim_end());
        }

        Ok(())
    }
}
