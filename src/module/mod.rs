//! Attribution of source files to Go module import paths

mod gomod;

pub use gomod::GoModResolver;

use std::path::Path;

/// Finds the import path exported symbols of a file are qualified with.
///
/// `None` means the file does not belong to a buildable package and should
/// be skipped; it is not an error.
pub trait ModuleResolver {
    fn resolve(&mut self, file: &Path) -> Option<String>;
}

impl<F> ModuleResolver for F
where
    F: FnMut(&Path) -> Option<String>,
{
    fn resolve(&mut self, file: &Path) -> Option<String> {
        self(file)
    }
}
