//! Store adapters behind [`crate::repos::SeatingStore`].

mod document;
pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
