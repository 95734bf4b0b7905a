use super::symbols::SymbolSet;
use crate::discovery::SourceTreeWalker;
use crate::error::AuditError;
use crate::module::{GoModResolver, ModuleResolver};
use crate::parser::{GoFile, GoParser, SyntaxItem, SyntaxVisitor};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Go exportedness: the identifier starts with an upper case letter
pub fn is_exported(ident: &str) -> bool {
    ident.chars().next().is_some_and(char::is_uppercase)
}

/// Collects exported top-level identifiers of one file
struct ExportVisitor<'a> {
    module: &'a str,
    /// Names already declared at file scope
    declared: HashSet<String>,
    exports: &'a mut SymbolSet,
}

impl<'a> ExportVisitor<'a> {
    fn new(module: &'a str, exports: &'a mut SymbolSet) -> Self {
        Self {
            module,
            declared: HashSet::new(),
            exports,
        }
    }

    fn add(&mut self, ident: &str) {
        if ident.is_empty() || ident == "_" {
            return;
        }
        // Only the declaring occurrence counts
        if !self.declared.insert(ident.to_string()) {
            return;
        }
        if is_exported(ident) {
            self.exports.insert(self.module, ident);
        }
    }
}

impl SyntaxVisitor for ExportVisitor<'_> {
    fn visit(&mut self, item: SyntaxItem<'_>) {
        match item {
            SyntaxItem::Function { name } | SyntaxItem::TypeSpec { name } => self.add(name),
            SyntaxItem::ValueGroup { names } | SyntaxItem::ShortVarDecl { names } => {
                for name in names {
                    self.add(name);
                }
            }
            SyntaxItem::Selector { .. } => {}
        }
    }
}

/// Record the exported top-level symbols of a parsed file under `module`
pub fn collect_exports(file: &GoFile, module: &str, exports: &mut SymbolSet) {
    let before = exports.len();
    file.walk(&mut ExportVisitor::new(module, exports));
    trace!(
        "{}: {} new exports in package {}",
        file.path().display(),
        exports.len() - before,
        file.package_name().unwrap_or("?")
    );
}

/// Finds the exported symbols defined beneath a set of roots
pub struct ExportExtractor<R = GoModResolver> {
    walker: SourceTreeWalker,
    resolver: R,
}

impl ExportExtractor<GoModResolver> {
    pub fn new(walker: SourceTreeWalker) -> Self {
        Self::with_resolver(walker, GoModResolver::new())
    }
}

impl<R: ModuleResolver> ExportExtractor<R> {
    pub fn with_resolver(walker: SourceTreeWalker, resolver: R) -> Self {
        Self { walker, resolver }
    }

    /// Parse every Go file beneath `roots` and collect its exports.
    ///
    /// A file that fails to read or parse aborts the pass. Files the
    /// resolver cannot attribute to a module are skipped.
    pub fn extract_exports(&mut self, roots: &[PathBuf], excluded: &[PathBuf]) -> Result<SymbolSet, AuditError> {
        let mut exports = SymbolSet::new();
        let mut parser = GoParser::new()?;
        let mut skipped = 0usize;
        let resolver = &mut self.resolver;

        self.walker.walk(roots, excluded, |path| {
            let file = parser.parse_file(path)?;
            match resolver.resolve(path) {
                Some(module) => collect_exports(&file, &module, &mut exports),
                None => {
                    trace!("No module for {}, skipping", path.display());
                    skipped += 1;
                }
            }
            Ok(())
        })?;

        debug!("Found {} exports ({} files skipped)", exports.len(), skipped);
        Ok(exports)
    }
}
