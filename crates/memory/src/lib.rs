//! Task store implementations for Petal.

pub mod in_memory;

pub use in_memory::InMemoryTaskStore;
