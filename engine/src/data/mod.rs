// Persistence side of the engine: the key-value store abstraction, its two
// implementations and the snapshot of a BillState into named slots.
pub mod file_store;
pub mod snapshot;
pub mod store;

pub use file_store::JsonFileStore;
pub use store::{KeyValueStore, MemoryStore};
