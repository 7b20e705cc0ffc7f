//! Local persistence for user state: favorites, watched history, favorite
//! persons, and a couple of settings flags. A small key-value interface
//! isolates the collections from raw (de)serialization.

pub mod collections;
pub mod file;
pub mod memory;

pub use collections::Library;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;

/// String-keyed store of JSON-serializable blobs
///
/// Implementations validate the stored shape on read: a value that no longer
/// deserializes into the requested type surfaces as a storage error rather
/// than a panic. A missing key is `Ok(None)`.
pub trait KvStore: Send + Sync {
    fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>>;

    fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()>;

    fn remove(&self, key: &str) -> AppResult<()>;
}
