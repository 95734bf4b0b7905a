//! Normalization of user supplied paths

use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

fn env_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\$\{([^}]*)\}|\$([A-Za-z0-9_]+)").expect("environment reference pattern")
    })
}

/// Replace `$VAR` and `${VAR}` with values from the environment.
///
/// Unset variables expand to the empty string. A `$` not followed by a
/// variable name is kept as is.
pub fn expand_env(input: &str) -> String {
    env_reference()
        .replace_all(input, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            std::env::var(name).unwrap_or_default()
        })
        .into_owned()
}

/// Expand environment references and resolve the result to a clean
/// absolute path.
pub fn expand_path(input: &str) -> PathBuf {
    let expanded = PathBuf::from(expand_env(input));
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };
    clean(&absolute)
}

/// Lexically remove `.` and `..` components
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}
