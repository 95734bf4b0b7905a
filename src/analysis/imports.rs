use crate::parser::{GoFile, ImportSpec};
use std::collections::HashMap;

/// Local name an import is referred to by when it has no explicit name
pub fn default_alias(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}

/// Maps the local names of one file's imports to their import paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportAliasTable {
    aliases: HashMap<String, String>,
}

impl ImportAliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from the import declarations of a parsed file
    pub fn from_file(file: &GoFile) -> Self {
        let mut table = Self::new();
        for spec in file.imports() {
            table.insert(&spec);
        }
        table
    }

    /// Register an import under its explicit name, or the last segment of
    /// its path. A later import with the same name replaces the earlier.
    pub fn insert(&mut self, spec: &ImportSpec<'_>) {
        let alias = spec.name.unwrap_or_else(|| default_alias(spec.path));
        self.aliases.insert(alias.to_string(), spec.path.to_string());
    }

    /// Import path behind a local name
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
