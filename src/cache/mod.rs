//! Cache Module
//!
//! In-process query cache: TTL store, key derivation and read-through access.

mod entry;
mod key;
mod read_through;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{generate_key, ParamValue, PARAM_SEPARATOR};
pub use read_through::QueryCache;
pub use stats::CacheStats;
pub use store::CacheStore;
