use super::imports::ImportAliasTable;
use super::symbols::SymbolSet;
use crate::discovery::SourceTreeWalker;
use crate::error::AuditError;
use crate::parser::{GoFile, GoParser, SyntaxItem, SyntaxVisitor};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Collects selectors whose base names an import of the same file
struct UsageVisitor<'a> {
    aliases: &'a ImportAliasTable,
    usages: &'a mut SymbolSet,
}

impl SyntaxVisitor for UsageVisitor<'_> {
    fn visit(&mut self, item: SyntaxItem<'_>) {
        match item {
            SyntaxItem::Selector { base, field } => {
                // Bases that are not imports are locals, receivers or fields
                if let Some(import_path) = self.aliases.resolve(base) {
                    self.usages.insert(import_path, field);
                }
            }
            SyntaxItem::Function { .. }
            | SyntaxItem::ValueGroup { .. }
            | SyntaxItem::TypeSpec { .. }
            | SyntaxItem::ShortVarDecl { .. } => {}
        }
    }
}

/// Record every qualified reference of a parsed file
pub fn collect_usages(file: &GoFile, usages: &mut SymbolSet) {
    let aliases = ImportAliasTable::from_file(file);
    if aliases.is_empty() {
        return;
    }
    trace!("{}: {} imports", file.path().display(), aliases.len());
    file.walk(&mut UsageVisitor {
        aliases: &aliases,
        usages,
    });
}

/// Finds the imported symbols referenced beneath a set of roots
pub struct UsageExtractor {
    walker: SourceTreeWalker,
}

impl UsageExtractor {
    pub fn new(walker: SourceTreeWalker) -> Self {
        Self { walker }
    }

    /// Parse every Go file beneath `roots` and collect its references to
    /// imported packages. A file that fails to read or parse aborts the
    /// pass.
    pub fn extract_usages(&self, roots: &[PathBuf], excluded: &[PathBuf]) -> Result<SymbolSet, AuditError> {
        let mut usages = SymbolSet::new();
        let mut parser = GoParser::new()?;

        self.walker.walk(roots, excluded, |path| {
            let file = parser.parse_file(path)?;
            collect_usages(&file, &mut usages);
            Ok(())
        })?;

        debug!("Found {} imported references", usages.len());
        Ok(usages)
    }
}
