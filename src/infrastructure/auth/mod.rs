pub mod memory;

pub use memory::MemoryAuth;
