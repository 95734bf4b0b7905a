use std::collections::HashSet;

/// Join a module path and an identifier into a qualified name
pub fn qualify(module: &str, ident: &str) -> String {
    format!("{}.{}", module, ident)
}

/// An unordered set of qualified names such as `example.com/lib.Thing`.
///
/// Inserting a name that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSet {
    names: HashSet<String>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `module.ident`; returns false when it was already present
    pub fn insert(&mut self, module: &str, ident: &str) -> bool {
        self.names.insert(qualify(module, ident))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in lexicographic order
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
