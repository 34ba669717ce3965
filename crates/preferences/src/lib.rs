pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::StoreError;
pub use store::{PreferenceStore, FAVORITES_KEY, HISTORY_KEY};
