mod loader;
pub mod paths;

pub use loader::{Config, DEFAULT_QUEUE_CAPACITY};
pub use paths::expand_path;
