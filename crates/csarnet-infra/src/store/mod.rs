//! Session store implementations - file-backed and in-memory.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
