use crate::analysis::Report;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Human readable listing of unused exports, grouped by package
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &Report) -> String {
        let mut out = String::new();

        if report.unused_exports.is_empty() {
            let _ = writeln!(out, "{}", "No unused exports found!".green().bold());
            self.write_summary(&mut out, report);
            return out;
        }

        let _ = writeln!(
            out,
            "{}",
            format!("Found {} potentially unused exports:", report.unused_exports.len())
                .yellow()
                .bold()
        );
        let _ = writeln!(out);

        for (package, names) in group_by_package(&report.unused_exports) {
            let _ = writeln!(out, "{}", package.cyan().bold());
            for name in names {
                let _ = writeln!(out, "  {} {}", "○".yellow(), name);
            }
            let _ = writeln!(out);
        }

        self.write_summary(&mut out, report);
        out
    }

    fn write_summary(&self, out: &mut String, report: &Report) {
        let _ = writeln!(
            out,
            "{}",
            format!(
                "{} exported, {} imported, {} unused",
                report.exported.len(),
                report.imported.len(),
                report.unused_exports.len()
            )
            .dimmed()
        );
    }
}

/// Split qualified names at the last `.` into package path and identifier
fn group_by_package(names: &[String]) -> BTreeMap<&str, Vec<&str>> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for name in names {
        let (package, ident) = name.rsplit_once('.').unwrap_or(("", name.as_str()));
        groups.entry(package).or_default().push(ident);
    }
    groups
}
