//! Discovery of Go source files beneath a set of roots

mod cancel;
mod file_finder;

pub use cancel::CancelToken;
pub use file_finder::{is_go_source, SourceTreeWalker, GO_SOURCE_SUFFIX, VENDOR_DIR};
