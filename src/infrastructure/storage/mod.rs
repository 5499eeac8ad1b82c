//! Record store implementations
//!
//! `FlatFileStore` is the real backend: four line-oriented text files.
//! `InMemoryStore` mirrors its observable behavior (ordering included) for
//! tests and throwaway runs.

mod file;
mod memory;

pub use file::FlatFileStore;
pub use memory::InMemoryStore;

/// Audit timestamp in the `YYYY-MM-DD HH:MM:SS` local-time layout used by
/// the log and attendance files.
pub(crate) fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
