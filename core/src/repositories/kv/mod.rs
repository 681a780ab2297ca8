//! Key-value persistence module.

mod r#trait;
pub use r#trait::KeyValueStore;

mod memory;
pub use memory::InMemoryKeyValueStore;

#[cfg(test)]
mod tests;
