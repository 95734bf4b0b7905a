use crate::analysis::Report;
use serde::{Deserialize, Serialize};

/// Wire form of a report
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonReport {
    #[serde(rename = "Exported")]
    pub exported: Vec<String>,
    #[serde(rename = "Imported")]
    pub imported: Vec<String>,
    #[serde(rename = "UnusedExports")]
    pub unused_exports: Vec<String>,
}

impl From<&Report> for JsonReport {
    fn from(report: &Report) -> Self {
        Self {
            exported: report.exported.clone(),
            imported: report.imported.clone(),
            unused_exports: report.unused_exports.clone(),
        }
    }
}

/// JSON reporter for programmatic output
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &Report) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonReport::from(report))
    }
}
