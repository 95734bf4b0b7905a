use super::common::{children_of_kind, descendants, node_text};
use crate::error::AuditError;
use std::path::{Path, PathBuf};
use tracing::trace;
use tree_sitter::{Node, Parser as TsParser, Tree};

/// Syntax shapes the extractors care about.
///
/// Top-level declarations come first, in file order, followed by every
/// qualified selector in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxItem<'a> {
    /// `func Name(...)` at file scope. Methods are not functions.
    Function { name: &'a str },
    /// Names declared by a file-scope `var` or `const` group
    ValueGroup { names: Vec<&'a str> },
    /// A type definition or alias at file scope
    TypeSpec { name: &'a str },
    /// `a, b := ...` at file scope; only plain identifiers are kept
    ShortVarDecl { names: Vec<&'a str> },
    /// `base.field` where `base` is a plain identifier, in value or type
    /// position
    Selector { base: &'a str, field: &'a str },
}

/// Receives the items of a parsed file
pub trait SyntaxVisitor {
    fn visit(&mut self, item: SyntaxItem<'_>);
}

/// One import spec of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec<'a> {
    /// Explicit local name, including `_` and `.`
    pub name: Option<&'a str>,
    /// Import path without quotes
    pub path: &'a str,
}

/// Go source parser using tree-sitter
pub struct GoParser {
    parser: TsParser,
}

impl GoParser {
    pub fn new() -> Result<Self, AuditError> {
        let mut parser = TsParser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Read and parse a file from disk
    pub fn parse_file(&mut self, path: &Path) -> Result<GoFile, AuditError> {
        let source = std::fs::read_to_string(path).map_err(|source| AuditError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(path, source)
    }

    /// Parse Go source code. A tree containing syntax errors is rejected.
    pub fn parse(&mut self, path: &Path, source: String) -> Result<GoFile, AuditError> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| AuditError::Parse {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let error = descendants(root)
                .find(|n| n.is_error() || n.is_missing())
                .unwrap_or(root);
            let position = error.start_position();
            return Err(AuditError::Parse {
                path: path.to_path_buf(),
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        // Go requires the package clause to come first, exactly once
        if let Some(offending) = misplaced_package_clause(root) {
            let position = offending.map_or(tree_sitter::Point::new(0, 0), |n| n.start_position());
            return Err(AuditError::Parse {
                path: path.to_path_buf(),
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        trace!("Parsed {}", path.display());
        Ok(GoFile {
            path: path.to_path_buf(),
            source,
            tree,
        })
    }
}

/// A parsed Go source file
pub struct GoFile {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl GoFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name from the package clause
    pub fn package_name(&self) -> Option<&str> {
        let root = self.tree.root_node();
        let clause = children_of_kind(root, "package_clause").into_iter().next()?;
        let ident = children_of_kind(clause, "package_identifier").into_iter().next()?;
        Some(node_text(ident, &self.source))
    }

    /// Import specs of every import declaration in the file
    pub fn imports(&self) -> Vec<ImportSpec<'_>> {
        let root = self.tree.root_node();
        children_of_kind(root, "import_declaration")
            .into_iter()
            .flat_map(descendants)
            .filter(|node| node.kind() == "import_spec")
            .filter_map(|spec| {
                let path = spec.child_by_field_name("path")?;
                let path = node_text(path, &self.source).trim_matches(|c| c == '"' || c == '`');
                let name = spec
                    .child_by_field_name("name")
                    .map(|n| node_text(n, &self.source));
                Some(ImportSpec { name, path })
            })
            .collect()
    }

    /// Feed every top-level declaration, then every selector, to `visitor`
    pub fn walk<V: SyntaxVisitor + ?Sized>(&self, visitor: &mut V) {
        let root = self.tree.root_node();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            for item in self.top_level_items(child) {
                visitor.visit(item);
            }
        }

        for node in descendants(root) {
            if let Some(item) = self.selector_item(node) {
                visitor.visit(item);
            }
        }
    }

    fn top_level_items(&self, node: Node<'_>) -> Vec<SyntaxItem<'_>> {
        match node.kind() {
            "function_declaration" => node
                .child_by_field_name("name")
                .map(|name| SyntaxItem::Function {
                    name: node_text(name, &self.source),
                })
                .into_iter()
                .collect(),
            "var_declaration" => vec![self.value_group(node, "var_spec")],
            "const_declaration" => vec![self.value_group(node, "const_spec")],
            "type_declaration" => {
                let mut specs = Vec::new();
                collect_specs(node, &["type_spec", "type_alias"], &mut specs);
                specs
                    .into_iter()
                    .filter_map(|spec| spec.child_by_field_name("name"))
                    .map(|name| SyntaxItem::TypeSpec {
                        name: node_text(name, &self.source),
                    })
                    .collect()
            }
            "short_var_declaration" => {
                let names = node
                    .child_by_field_name("left")
                    .map(|left| {
                        let mut cursor = left.walk();
                        left.named_children(&mut cursor)
                            .filter(|n| n.kind() == "identifier")
                            .map(|n| node_text(n, &self.source))
                            .collect()
                    })
                    .unwrap_or_default();
                vec![SyntaxItem::ShortVarDecl { names }]
            }
            _ => Vec::new(),
        }
    }

    fn value_group(&self, node: Node<'_>, spec_kind: &str) -> SyntaxItem<'_> {
        let mut specs = Vec::new();
        collect_specs(node, &[spec_kind], &mut specs);

        let mut names = Vec::new();
        for spec in specs {
            let mut cursor = spec.walk();
            names.extend(
                spec.children_by_field_name("name", &mut cursor)
                    .map(|n| node_text(n, &self.source)),
            );
        }
        SyntaxItem::ValueGroup { names }
    }

    fn selector_item(&self, node: Node<'_>) -> Option<SyntaxItem<'_>> {
        let (base, field) = match node.kind() {
            "selector_expression" => {
                let operand = node.child_by_field_name("operand")?;
                if operand.kind() != "identifier" {
                    return None;
                }
                (operand, node.child_by_field_name("field")?)
            }
            "qualified_type" => (
                node.child_by_field_name("package")?,
                node.child_by_field_name("name")?,
            ),
            _ => return None,
        };
        Some(SyntaxItem::Selector {
            base: node_text(base, &self.source),
            field: node_text(field, &self.source),
        })
    }
}

/// `Some` when the file does not open with its single package clause.
/// The inner node is the one to blame, if the file has any.
fn misplaced_package_clause(root: Node<'_>) -> Option<Option<Node<'_>>> {
    let clauses = children_of_kind(root, "package_clause");
    let mut cursor = root.walk();
    let first = root
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");

    match (clauses.as_slice(), first) {
        ([clause], Some(first)) if *clause == first => None,
        ([_, second, ..], _) => Some(Some(*second)),
        _ => Some(first),
    }
}

/// Collect spec nodes of a declaration without entering the specs
/// themselves, so declarations nested in initializers are not picked up.
fn collect_specs<'tree>(node: Node<'tree>, kinds: &[&str], out: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if kinds.contains(&child.kind()) {
            out.push(child);
        } else {
            collect_specs(child, kinds, out);
        }
    }
}
