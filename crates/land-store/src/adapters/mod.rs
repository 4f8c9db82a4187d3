pub mod memory;

pub use memory::InMemoryParcelStore;
