pub mod countdown;
pub mod error;
pub mod persistence;
pub mod preprocess;
pub mod session;
pub mod store;

pub use countdown::Countdown;
pub use error::StorageError;
pub use persistence::{FileStore, KeyValueStore, MemoryStore, Persistence, Snapshot};
pub use session::{FetchGuard, SessionState};
pub use store::WordStore;

#[cfg(test)]
mod tests;
