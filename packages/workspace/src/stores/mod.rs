//! DocumentStore implementations

mod file;
mod memory;
mod watcher;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use watcher::{DirectoryWatcher, WatcherError, WatcherResult};
