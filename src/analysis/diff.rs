use super::symbols::SymbolSet;

/// Outcome of an audit. Every list is sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Exported symbols found in the "from" trees
    pub exported: Vec<String>,
    /// Imported symbols referenced from the "to" trees
    pub imported: Vec<String>,
    /// Exported symbols never referenced
    pub unused_exports: Vec<String>,
}

/// Compare exports against usages
pub fn diff(exports: &SymbolSet, usages: &SymbolSet) -> Report {
    let exported = exports.sorted();
    let unused_exports = exported
        .iter()
        .filter(|name| !usages.contains(name.as_str()))
        .cloned()
        .collect();

    Report {
        exported,
        imported: usages.sorted(),
        unused_exports,
    }
}
