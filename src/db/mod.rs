pub mod memory;
pub mod mongodb;
pub mod store;
#[cfg(test)]
pub(crate) mod unreachable;

pub use memory::MemoryStore;
pub use store::{QrCodeStore, StoreError, StoreResult};
