pub mod storage;

pub use storage::{FlatFileStore, InMemoryStore};
