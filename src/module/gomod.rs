use super::ModuleResolver;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use tracing::{trace, warn};

const GO_MOD: &str = "go.mod";
const TEST_FILE_SUFFIX: &str = "_test.go";
const TESTDATA_DIR: &str = "testdata";

fn module_directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*module\s+(\S+)").expect("module directive pattern"))
}

/// Parse the module path out of go.mod contents
pub fn parse_module_path(contents: &str) -> Option<String> {
    let caps = module_directive().captures(contents)?;
    let module = caps[1].trim_matches(|c| c == '"' || c == '`');
    if module.is_empty() {
        None
    } else {
        Some(module.to_string())
    }
}

/// A directory holding a go.mod, with the module path it declares
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModuleRoot {
    dir: PathBuf,
    module: String,
}

/// Resolves import paths from the nearest enclosing go.mod.
///
/// Files the go tool would never build resolve to `None`: `_test.go`
/// files, files named with a leading `_` or `.`, and files below a
/// `testdata`, `_*` or `.*` directory inside the module.
#[derive(Debug, Default)]
pub struct GoModResolver {
    /// directory -> module root governing it
    roots: HashMap<PathBuf, Option<ModuleRoot>>,
}

impl GoModResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn module_root(&mut self, dir: &Path) -> Option<ModuleRoot> {
        if let Some(cached) = self.roots.get(dir) {
            return cached.clone();
        }

        let go_mod = dir.join(GO_MOD);
        let found = if go_mod.is_file() {
            match std::fs::read_to_string(&go_mod) {
                Ok(contents) => {
                    let module = parse_module_path(&contents);
                    if module.is_none() {
                        warn!("No module directive in {}", go_mod.display());
                    }
                    module.map(|module| ModuleRoot {
                        dir: dir.to_path_buf(),
                        module,
                    })
                }
                Err(e) => {
                    warn!("Could not read {}: {}", go_mod.display(), e);
                    None
                }
            }
        } else {
            dir.parent().and_then(|parent| self.module_root(parent))
        };

        self.roots.insert(dir.to_path_buf(), found.clone());
        found
    }
}

fn is_ignored_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

impl ModuleResolver for GoModResolver {
    fn resolve(&mut self, file: &Path) -> Option<String> {
        let file_name = file.file_name()?.to_str()?;
        if file_name.ends_with(TEST_FILE_SUFFIX) || is_ignored_name(file_name) {
            trace!("Not part of a package build: {}", file.display());
            return None;
        }

        let dir = file.parent()?;
        let root = self.module_root(dir)?;
        let relative = dir.strip_prefix(&root.dir).ok()?;

        let mut import_path = root.module;
        for component in relative.components() {
            let Component::Normal(segment) = component else {
                return None;
            };
            let segment = segment.to_str()?;
            if segment == TESTDATA_DIR || is_ignored_name(segment) {
                trace!("Inside an ignored directory: {}", file.display());
                return None;
            }
            import_path.push('/');
            import_path.push_str(segment);
        }

        Some(import_path)
    }
}
